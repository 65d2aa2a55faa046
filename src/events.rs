use crate::board::Board;
use crate::game_logic::{GameStatus, MoveOutcome};
use crate::piece::{Color, Piece};
use crate::square::Square;

/// A change to the board that the presentation layer may want to redraw or
/// animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// Every piece was removed. Placements for the new layout follow.
    BoardReset,
    PiecePlaced {
        square: Square,
        piece: Piece,
    },
    PieceRemoved {
        square: Square,
        piece: Piece,
    },
    PieceMoved {
        piece: Piece,
        from: Square,
        to: Square,
    },
    TurnChanged(Color),
    KingInCheck {
        color: Color,
        king_square: Square,
    },
    Checkmate {
        loser: Color,
    },
    Stalemate {
        color: Color,
    },
}

/// Piece-level events for a finalized move, in the order they happened.
///
/// - Captured piece removed (from the en passant square if applicable)
/// - Mover moved, then the castling rook
/// - Promoted pawn removed and its queen placed
pub fn move_events(outcome: &MoveOutcome) -> Vec<BoardEvent> {
    let mut events = Vec::with_capacity(4);

    if let Some(capture) = outcome.captured {
        events.push(BoardEvent::PieceRemoved {
            square: capture.square,
            piece: capture.piece,
        });
    }

    events.push(BoardEvent::PieceMoved {
        piece: outcome.piece,
        from: outcome.from,
        to: outcome.to,
    });

    if let Some(shift) = outcome.castling {
        events.push(BoardEvent::PieceMoved {
            piece: shift.rook,
            from: shift.from,
            to: shift.to,
        });
    }

    if let Some(queen) = outcome.promotion {
        events.push(BoardEvent::PieceRemoved {
            square: outcome.to,
            piece: outcome.piece,
        });
        events.push(BoardEvent::PiecePlaced {
            square: outcome.to,
            piece: queen,
        });
    }

    events
}

/// Check, checkmate or stalemate notification for the side to move.
pub fn status_event(board: &Board, status: GameStatus) -> Option<BoardEvent> {
    let color = board.current_turn();
    match status {
        GameStatus::Ongoing => None,
        GameStatus::Check => board
            .king_square(color)
            .map(|king_square| BoardEvent::KingInCheck { color, king_square }),
        GameStatus::Checkmate => Some(BoardEvent::Checkmate { loser: color }),
        GameStatus::Stalemate => Some(BoardEvent::Stalemate { color }),
    }
}
