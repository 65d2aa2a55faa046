use log::{debug, info};
use thiserror::Error;

use crate::board::{Board, CastlingSide, LastMove};
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// Why a move was not played.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("invalid square")]
    InvalidSquare,
    #[error("no piece on {0}")]
    NoPiece(Square),
    #[error("it is {0}'s turn")]
    NotYourTurn(Color),
    #[error("{piece} cannot move from {from} to {to}")]
    Illegal { piece: Piece, from: Square, to: Square },
    #[error("{from}{to} would leave the {color} king in check")]
    LeavesKingInCheck {
        color: Color,
        from: Square,
        to: Square,
    },
}

/// A piece taken off the board by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub piece: Piece,
    /// Differs from the move's destination for en passant.
    pub square: Square,
}

/// The rook relocation of a castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RookShift {
    pub rook: Piece,
    pub from: Square,
    pub to: Square,
}

/// Everything a finalized move changed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Capture>,
    pub castling: Option<RookShift>,
    /// The queen that replaced the pawn on the last rank.
    pub promotion: Option<Piece>,
}

impl MoveOutcome {
    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.captured.is_some_and(|capture| capture.square != self.to)
    }
}

/// A provisional move that must be handed back to
/// [`Board::revert_temp_move`] before the board is used for anything else.
#[must_use = "a temporary move must be reverted"]
#[derive(Debug, PartialEq, Eq)]
pub struct TempMove {
    piece: Piece,
    from: Square,
    to: Square,
    displaced: Option<Piece>,
    en_passant: Option<Capture>,
}

/// Square of the pawn an en passant capture from `from` to `to` would take.
///
/// `None` unless `piece` is a pawn stepping diagonally onto an empty square.
fn en_passant_square(board: &Board, piece: &Piece, from: Square, to: Square) -> Option<Square> {
    let (df, _) = from.delta_to(to);
    if piece.kind != PieceKind::Pawn || df.abs() != 1 || board.get(to).is_some() {
        return None;
    }
    Square::new(to.file(), from.rank())
}

impl Board {
    /// Play a move, returning `true` on success.
    ///
    /// Accepts squares or algebraic strings. Rejected moves leave the board
    /// untouched. Turn order is not enforced here; see
    /// [`GameEngine::move_piece`](crate::game_logic::GameEngine::move_piece).
    pub fn move_piece<S: TryInto<Square>>(&mut self, from: S, to: S) -> bool {
        match (from.try_into(), to.try_into()) {
            (Ok(from), Ok(to)) => self.try_move(from, to).is_ok(),
            _ => false,
        }
    }

    /// Validate and play a move, reporting what it changed.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        let piece = self.get(from).ok_or(MoveError::NoPiece(from))?;

        if !self.is_legal_move(&piece, from, to) {
            debug!("rejected {from}{to}: illegal for {piece}");
            return Err(MoveError::Illegal { piece, from, to });
        }

        let leaves_check = self
            .with_temp_move(from, to, |board| board.king_attacked(piece.color))
            .unwrap_or(true);
        if leaves_check {
            debug!("rejected {from}{to}: {} king would be in check", piece.color);
            return Err(MoveError::LeavesKingInCheck {
                color: piece.color,
                from,
                to,
            });
        }

        Ok(self.finalize(piece, from, to))
    }

    /// Apply a validated move with all of its side effects.
    fn finalize(&mut self, piece: Piece, from: Square, to: Square) -> MoveOutcome {
        let (df, dr) = from.delta_to(to);
        let en_passant = en_passant_square(self, &piece, from, to);

        match piece.kind {
            PieceKind::King => self.castling_mut().mark_king_moved(piece.color),
            PieceKind::Rook => self.castling_mut().mark_rook_square(piece.color, from),
            _ => {}
        }

        self.take(from);
        let mut captured = self
            .put(to, Some(piece))
            .map(|taken| Capture { piece: taken, square: to });
        if let Some(square) = en_passant {
            captured = self.take(square).map(|taken| Capture { piece: taken, square });
        }
        if let Some(capture) = captured
            && capture.piece.kind == PieceKind::Rook
        {
            // A rook taken on its home square can no longer castle.
            self.castling_mut()
                .mark_rook_square(capture.piece.color, capture.square);
        }

        let castling = if piece.kind == PieceKind::King && dr == 0 {
            CastlingSide::from_king_delta(df).and_then(|side| self.shift_castling_rook(from, side))
        } else {
            None
        };

        let promotion = if piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank()
        {
            self.take(to);
            Some(self.spawn(to, PieceKind::Queen, piece.color))
        } else {
            None
        };

        self.record_move(LastMove {
            piece,
            from,
            to,
            was_double_pawn_push: piece.kind == PieceKind::Pawn && dr.abs() == 2,
        });

        let outcome = MoveOutcome {
            piece,
            from,
            to,
            captured,
            castling,
            promotion,
        };
        log_outcome(&outcome);
        outcome
    }

    fn shift_castling_rook(&mut self, king_from: Square, side: CastlingSide) -> Option<RookShift> {
        let from = Square::new(side.rook_file(), king_from.rank())?;
        let to = Square::new(side.rook_target_file(), king_from.rank())?;
        let rook = self.take(from)?;
        self.put(to, Some(rook));
        Some(RookShift { rook, from, to })
    }

    /// Move a piece provisionally, without captures being finalized, castling
    /// rooks moving or promotion.
    ///
    /// Any piece on the destination and an en passant victim are lifted off
    /// and kept in the returned [`TempMove`], so that
    /// [`Board::revert_temp_move`] restores the exact prior board.
    pub fn apply_temp_move(&mut self, from: Square, to: Square) -> Option<TempMove> {
        if from == to {
            return None;
        }
        let piece = self.get(from)?;

        let mut en_passant = None;
        if let Some(square) = en_passant_square(self, &piece, from, to)
            && let Some(victim) = self.get(square)
            && victim.is(PieceKind::Pawn, !piece.color)
        {
            self.take(square);
            en_passant = Some(Capture {
                piece: victim,
                square,
            });
        }

        self.take(from);
        let displaced = self.put(to, Some(piece));
        Some(TempMove {
            piece,
            from,
            to,
            displaced,
            en_passant,
        })
    }

    /// Undo a [`TempMove`].
    pub fn revert_temp_move(&mut self, temp: TempMove) {
        self.put(temp.to, temp.displaced);
        self.put(temp.from, Some(temp.piece));
        if let Some(capture) = temp.en_passant {
            self.put(capture.square, Some(capture.piece));
        }
    }

    /// Run `probe` against the board with a move provisionally applied.
    ///
    /// The move is always reverted before returning. `None` if there is no
    /// piece on `from`.
    pub fn with_temp_move<R>(
        &mut self,
        from: Square,
        to: Square,
        probe: impl FnOnce(&Board) -> R,
    ) -> Option<R> {
        let temp = self.apply_temp_move(from, to)?;
        let result = probe(&*self);
        self.revert_temp_move(temp);
        Some(result)
    }
}

fn log_outcome(outcome: &MoveOutcome) {
    let MoveOutcome {
        piece, from, to, ..
    } = outcome;
    info!("{piece} {from}{to}");
    if let Some(capture) = outcome.captured {
        info!("{} captured on {}", capture.piece, capture.square);
    }
    if let Some(shift) = outcome.castling {
        info!("castled, rook {}{}", shift.from, shift.to);
    }
    if let Some(queen) = outcome.promotion {
        info!("promoted to {queen} on {to}");
    }
}
