use crate::board::Board;
use crate::piece::Color;
use crate::square::Square;

/// State of the game from the point of view of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, Self::Checkmate | Self::Stalemate)
    }
}

impl Board {
    /// Whether `color` has at least one move that does not leave its own king
    /// in check.
    ///
    /// Tries every (origin, target) pair and probes each legal candidate with
    /// a temporary move on a scratch copy of the board.
    pub fn has_any_legal_moves(&self, color: Color) -> bool {
        let mut scratch = self.clone();
        for from in Square::all() {
            let Some(piece) = self.get(from).filter(|piece| piece.color == color) else {
                continue;
            };
            for to in Square::all() {
                if self.is_legal_move(&piece, from, to) && !scratch.leaves_in_check(from, to) {
                    return true;
                }
            }
        }
        false
    }

    /// Every move `color` may play, as (origin, target) pairs.
    pub fn legal_moves(&self, color: Color) -> Vec<(Square, Square)> {
        let mut scratch = self.clone();
        self.pieces(color)
            .flat_map(|(from, piece)| {
                Square::all()
                    .filter(move |&to| self.is_legal_move(&piece, from, to))
                    .map(move |to| (from, to))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .filter(|&(from, to)| !scratch.leaves_in_check(from, to))
            .collect()
    }

    /// Targets the piece on `from` may move to.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let Some(piece) = self.get(from) else {
            return Vec::new();
        };
        let mut scratch = self.clone();
        Square::all()
            .filter(|&to| self.is_legal_move(&piece, from, to))
            .filter(|&to| !scratch.leaves_in_check(from, to))
            .collect()
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_any_legal_moves(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_any_legal_moves(color)
    }

    /// Status of the side to move.
    pub fn status(&self) -> GameStatus {
        let color = self.current_turn();
        match (self.is_in_check(color), self.has_any_legal_moves(color)) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Ongoing,
        }
    }

    /// Whether moving `from`'s piece to `to` would expose its own king.
    fn leaves_in_check(&mut self, from: Square, to: Square) -> bool {
        let Some(color) = self.get(from).map(|piece| piece.color) else {
            return true;
        };
        self.with_temp_move(from, to, |board| board.king_attacked(color))
            .unwrap_or(true)
    }
}
