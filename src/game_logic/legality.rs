use crate::board::{Board, CastlingSide};
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// Knight jump: (±1, ±2) or (±2, ±1).
#[inline]
pub(super) fn is_knight_jump(file_delta: i8, rank_delta: i8) -> bool {
    matches!((file_delta.abs(), rank_delta.abs()), (1, 2) | (2, 1))
}

/// Whether a sliding piece of `kind` moves along this delta at all.
#[inline]
pub(super) fn slides_along(kind: PieceKind, file_delta: i8, rank_delta: i8) -> bool {
    let straight = (file_delta == 0) != (rank_delta == 0);
    let diagonal = file_delta != 0 && file_delta.abs() == rank_delta.abs();
    match kind {
        PieceKind::Rook => straight,
        PieceKind::Bishop => diagonal,
        PieceKind::Queen => straight || diagonal,
        _ => false,
    }
}

impl Board {
    /// Movement rules for `piece` going from `from` to `to`.
    ///
    /// Covers geometry and occupancy only. Whether the move leaves the mover's
    /// own king in check is decided by [`Board::try_move`] and the game-end
    /// queries.
    pub fn is_legal_move(&self, piece: &Piece, from: Square, to: Square) -> bool {
        if from == to {
            return false;
        }
        if self.get(to).is_some_and(|target| target.color == piece.color) {
            return false;
        }

        let (df, dr) = from.delta_to(to);
        match piece.kind {
            PieceKind::Pawn => self.pawn_move_valid(piece, from, to),
            PieceKind::Knight => is_knight_jump(df, dr),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                slides_along(piece.kind, df, dr) && self.path_clear(from, to)
            }
            PieceKind::King => {
                if df.abs() <= 1 && dr.abs() <= 1 {
                    true
                } else if dr == 0 {
                    CastlingSide::from_king_delta(df)
                        .is_some_and(|side| self.castling_valid(piece, from, side))
                } else {
                    false
                }
            }
        }
    }

    /// Every square strictly between `from` and `to` is empty.
    pub(super) fn path_clear(&self, from: Square, to: Square) -> bool {
        from.between(to).all(|sq| self.get(sq).is_none())
    }

    fn pawn_move_valid(&self, piece: &Piece, from: Square, to: Square) -> bool {
        let direction = piece.color.pawn_direction();
        let (df, dr) = from.delta_to(to);

        match (df.abs(), dr) {
            (0, dr) if dr == direction => self.get(to).is_none(),
            (0, dr) if dr == 2 * direction => {
                from.rank() == piece.color.pawn_rank()
                    && self.path_clear(from, to)
                    && self.get(to).is_none()
            }
            (1, dr) if dr == direction => {
                if self.get(to).is_some() {
                    // Own pieces were rejected by the caller.
                    true
                } else {
                    from.rank() == piece.color.en_passant_rank()
                        && self.en_passant_valid(piece, from, to)
                }
            }
            _ => false,
        }
    }

    /// The last move was a double push landing beside `from` on `to`'s file.
    fn en_passant_valid(&self, piece: &Piece, from: Square, to: Square) -> bool {
        let Some(last) = self.last_move() else {
            return false;
        };
        let Some(passed) = Square::new(to.file(), from.rank()) else {
            return false;
        };

        last.was_double_pawn_push
            && last.to == passed
            && self
                .get(passed)
                .is_some_and(|victim| victim.is(PieceKind::Pawn, !piece.color))
    }

    fn castling_valid(&self, king: &Piece, from: Square, side: CastlingSide) -> bool {
        let color = king.color;
        let home = color.home_rank();

        if Square::new(CastlingSide::KING_FILE, home) != Some(from) {
            return false;
        }
        if !self.castling().may_castle(color, side) {
            return false;
        }
        let Some(rook_square) = Square::new(side.rook_file(), home) else {
            return false;
        };
        if !self
            .get(rook_square)
            .is_some_and(|rook| rook.is(PieceKind::Rook, color))
        {
            return false;
        }
        if !self.path_clear(from, rook_square) {
            return false;
        }

        // No square the king stands on or crosses may be attacked.
        let Some(target) = Square::new(side.king_target_file(), home) else {
            return false;
        };
        std::iter::once(from)
            .chain(from.between(target))
            .chain(std::iter::once(target))
            .all(|sq| !self.is_square_attacked(sq, !color))
    }
}
