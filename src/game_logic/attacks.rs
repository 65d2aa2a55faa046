use log::warn;

use super::legality::{is_knight_jump, slides_along};
use crate::board::Board;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

impl Board {
    /// Whether any piece of `by_color` attacks `square`.
    ///
    /// Uses attack geometry, not [`Board::is_legal_move`], so the answer can
    /// differ from asking whether some `by_color` piece may move there:
    /// - A square held by a `by_color` piece still counts as attacked
    ///   (the piece is defended).
    /// - Pawns attack both forward diagonals even when they are empty.
    /// - Kings attack adjacent squares only, never their castling targets.
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        self.pieces(by_color)
            .any(|(origin, piece)| self.attacks(&piece, origin, square))
    }

    /// Whether `color`'s king is attacked.
    ///
    /// A board without that king is reported as not in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_square_attacked(king, !color),
            None => {
                warn!("no {color} king on the board, treating as not in check");
                false
            }
        }
    }

    /// [`Board::is_in_check`] without the missing-king warning, for the
    /// per-candidate probes of move validation.
    pub(super) fn king_attacked(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, !color))
    }

    /// Attack geometry of `piece` standing on `from`.
    ///
    /// Matches [`Board::is_legal_move`] except that pawns threaten both forward
    /// diagonals whether or not something stands there, and kings only
    /// threaten adjacent squares. Castling is never considered here, so probing
    /// attacks cannot recurse back into castling validation.
    fn attacks(&self, piece: &Piece, from: Square, target: Square) -> bool {
        if from == target {
            return false;
        }
        let (df, dr) = from.delta_to(target);
        match piece.kind {
            PieceKind::Pawn => df.abs() == 1 && dr == piece.color.pawn_direction(),
            PieceKind::Knight => is_knight_jump(df, dr),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                slides_along(piece.kind, df, dr) && self.path_clear(from, target)
            }
            PieceKind::King => df.abs() <= 1 && dr.abs() <= 1,
        }
    }

    /// Squares of the `by_color` pieces attacking `square`.
    pub fn attackers_of(&self, square: Square, by_color: Color) -> Vec<Square> {
        self.pieces(by_color)
            .filter(|(origin, piece)| self.attacks(piece, *origin, square))
            .map(|(origin, _)| origin)
            .collect()
    }
}
