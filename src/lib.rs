pub mod board;
pub mod events;
pub mod game_logic;
pub mod mock;
pub mod piece;
pub mod square;

pub use board::Board;
pub use game_logic::{GameEngine, GameStatus, MoveError, MoveOutcome};
pub use piece::{Color, Piece, PieceKind};
pub use square::Square;

/// Trait for receiving board change notifications.
///
/// Abstracts over whatever presents the board (terminal, 2D or 3D scene),
/// so that a single rules core drives any number of independent views.
/// Events arrive synchronously, right after the change they describe.
pub trait BoardObserver {
    /// Handle one board change.
    ///
    /// Implementations must not fail the game: errors on the presentation
    /// side are theirs to log or ignore.
    fn on_event(&mut self, event: &events::BoardEvent);
}
