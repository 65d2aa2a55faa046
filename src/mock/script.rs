use thiserror::Error;

use crate::game_logic::{GameEngine, MoveError, MoveOutcome};
use crate::square::Square;

/// Error when parsing a move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid move notation: '{0}'")]
pub struct ParseError(String);

/// A scripted sequence of moves in coordinate notation.
///
/// Format:
/// - Each move is an origin and a target square written together ("e2e4")
/// - Whitespace separates moves
///
/// Examples:
/// - `"e2e4 e7e5 g1f3"` - three moves
/// - `"e1g1"` - castling is written as the king's move
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveScript {
    moves: Vec<(Square, Square)>,
}

impl MoveScript {
    /// Parse a script. Nothing is returned for a partially valid script.
    pub fn parse(script: &str) -> Result<Self, ParseError> {
        let moves = script
            .split_whitespace()
            .map(parse_move)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { moves })
    }

    #[inline]
    pub fn moves(&self) -> &[(Square, Square)] {
        &self.moves
    }

    /// Play every move in order, stopping at the first rejected one.
    pub fn play(&self, engine: &mut GameEngine) -> Result<Vec<MoveOutcome>, MoveError> {
        self.moves
            .iter()
            .map(|&(from, to)| engine.move_piece(from, to))
            .collect()
    }
}

/// Parse a single "e2e4" token.
fn parse_move(token: &str) -> Result<(Square, Square), ParseError> {
    let invalid = || ParseError(token.to_string());
    if !token.is_ascii() || token.len() != 4 {
        return Err(invalid());
    }
    let (from, to) = token.split_at(2);
    let from = Square::from_algebraic(from).ok_or_else(invalid)?;
    let to = Square::from_algebraic(to).ok_or_else(invalid)?;
    Ok((from, to))
}
