mod attacks;
mod execute;
mod legality;
mod outcome;

pub use execute::{Capture, MoveError, MoveOutcome, RookShift, TempMove};
pub use outcome::GameStatus;

use log::{debug, info};

use crate::BoardObserver;
use crate::board::Board;
use crate::events::{BoardEvent, move_events, status_event};
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// Game controller: owns the board, enforces turn order and notifies
/// observers after every change.
#[derive(Default)]
pub struct GameEngine {
    board: Board,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl GameEngine {
    /// Engine with the standard starting position.
    #[inline]
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Engine driving an existing board.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            observers: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the piece at a square or algebraic string, if any.
    #[inline]
    pub fn piece_at<S: TryInto<Square>>(&self, square: S) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn subscribe(&mut self, observer: impl BoardObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Status of the side to move.
    #[inline]
    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// Reset to the standard opening layout.
    pub fn setup_standard_position(&mut self) {
        self.board.setup_standard_position();
        info!("board reset to the standard position");

        self.emit(BoardEvent::BoardReset);
        let placed: Vec<_> = Color::ALL
            .into_iter()
            .flat_map(|color| self.board.pieces(color).collect::<Vec<_>>())
            .collect();
        for (square, piece) in placed {
            self.emit(BoardEvent::PiecePlaced { square, piece });
        }
        self.emit(BoardEvent::TurnChanged(self.board.current_turn()));
    }

    /// Spawn a piece, replacing any occupant.
    pub fn set_piece_at<S: TryInto<Square>>(
        &mut self,
        square: S,
        kind: PieceKind,
        color: Color,
    ) -> Option<Piece> {
        let square = square.try_into().ok()?;
        if let Some(displaced) = self.board.remove_piece_at(square) {
            self.emit(BoardEvent::PieceRemoved {
                square,
                piece: displaced,
            });
        }
        let piece = self.board.set_piece_at(square, kind, color)?;
        self.emit(BoardEvent::PiecePlaced { square, piece });
        Some(piece)
    }

    /// Remove and return the piece on `square`.
    pub fn remove_piece_at<S: TryInto<Square>>(&mut self, square: S) -> Option<Piece> {
        let square = square.try_into().ok()?;
        let piece = self.board.remove_piece_at(square)?;
        self.emit(BoardEvent::PieceRemoved { square, piece });
        Some(piece)
    }

    /// Play a move for the side to move.
    ///
    /// On success observers receive the piece events of the move, the turn
    /// change, and a check, checkmate or stalemate notice for the opponent.
    pub fn move_piece<S: TryInto<Square>>(
        &mut self,
        from: S,
        to: S,
    ) -> Result<MoveOutcome, MoveError> {
        let (Ok(from), Ok(to)) = (from.try_into(), to.try_into()) else {
            return Err(MoveError::InvalidSquare);
        };
        let piece = self.board.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        let turn = self.board.current_turn();
        if piece.color != turn {
            debug!("rejected {from}{to}: {} piece moved on {turn}'s turn", piece.color);
            return Err(MoveError::NotYourTurn(turn));
        }

        let outcome = self.board.try_move(from, to)?;

        for event in move_events(&outcome) {
            self.emit(event);
        }
        self.emit(BoardEvent::TurnChanged(self.board.current_turn()));

        let status = self.board.status();
        match status {
            GameStatus::Checkmate => info!("checkmate, {turn} wins"),
            GameStatus::Stalemate => info!("stalemate"),
            GameStatus::Check => info!("{} is in check", self.board.current_turn()),
            GameStatus::Ongoing => {}
        }
        if let Some(event) = status_event(&self.board, status) {
            self.emit(event);
        }

        Ok(outcome)
    }

    fn emit(&mut self, event: BoardEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("board", &self.board)
            .field("observers", &self.observers.len())
            .finish()
    }
}
