use std::collections::HashMap;
use std::io::{self, Write};

use log::warn;

use crate::BoardObserver;
use crate::board::Board;
use crate::events::BoardEvent;
use crate::piece::{Color, Piece};
use crate::square::{BOARD_SIZE, Square};

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

/// Terminal-based board view for development and testing.
///
/// Keeps its own copy of the piece layout, keyed by square and rebuilt purely
/// from [`BoardEvent`]s, the way a sprite or mesh layer would. The grid is
/// redrawn whenever the turn changes.
#[derive(Debug)]
pub struct TerminalDisplay<W: Write> {
    out: W,
    pieces: HashMap<Square, Piece>,
}

impl TerminalDisplay<io::Stdout> {
    /// Create a display writing to stdout.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalDisplay<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            pieces: HashMap::new(),
        }
    }

    /// Replace the mirrored layout with the board's current one.
    pub fn sync(&mut self, board: &Board) {
        self.pieces = Color::ALL
            .into_iter()
            .flat_map(|color| board.pieces(color))
            .collect();
    }

    /// The piece this view shows on `square`.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn apply(&mut self, event: &BoardEvent) {
        match *event {
            BoardEvent::BoardReset => self.pieces.clear(),
            BoardEvent::PiecePlaced { square, piece } => {
                self.pieces.insert(square, piece);
            }
            BoardEvent::PieceRemoved { square, .. } => {
                self.pieces.remove(&square);
            }
            BoardEvent::PieceMoved { from, to, .. } => {
                if let Some(piece) = self.pieces.remove(&from) {
                    self.pieces.insert(to, piece);
                }
            }
            _ => {}
        }
    }

    /// Write the mirrored board as an 8×8 grid.
    pub fn render(&mut self) -> Result<(), DisplayError> {
        for rank in (0..BOARD_SIZE).rev() {
            write!(self.out, " {} ", rank + 1)?;
            for file in 0..BOARD_SIZE {
                let symbol = Square::new(file, rank)
                    .and_then(|square| self.piece_at(square))
                    .map_or('·', |piece| piece.symbol());
                write!(self.out, " {symbol} ")?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out, "    a  b  c  d  e  f  g  h")?;
        self.out.flush()?;
        Ok(())
    }

    fn show(&mut self, event: &BoardEvent) -> Result<(), DisplayError> {
        match *event {
            BoardEvent::TurnChanged(color) => {
                self.render()?;
                writeln!(self.out, "{color} to move")?;
            }
            BoardEvent::KingInCheck { color, king_square } => {
                writeln!(self.out, "{color} king on {king_square} is in check")?;
            }
            BoardEvent::Checkmate { loser } => {
                writeln!(self.out, "checkmate, {} wins", !loser)?;
            }
            BoardEvent::Stalemate { color } => {
                writeln!(self.out, "stalemate, {color} has no moves")?;
            }
            _ => {}
        }
        Ok(())
    }
}

impl<W: Write> BoardObserver for TerminalDisplay<W> {
    fn on_event(&mut self, event: &BoardEvent) {
        self.apply(event);
        if let Err(e) = self.show(event) {
            warn!("terminal display update failed: {e}");
        }
    }
}
