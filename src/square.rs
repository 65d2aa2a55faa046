use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of files (and ranks) on the board.
pub const BOARD_SIZE: u8 = 8;

/// Error when parsing algebraic square notation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseSquareError {
    #[error("square notation '{0}' is too short")]
    TooShort(String),
    #[error("invalid file '{0}', expected a-h")]
    InvalidFile(char),
    #[error("invalid rank in '{0}', expected 1-8")]
    InvalidRank(String),
}

/// A board square (file 0-7 = a-h, rank 0-7 = 1-8).
///
/// Only in-range squares can be constructed. Constructors that take untrusted
/// input return `None` instead of failing loudly, since stray input from the
/// presentation layer is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Create a square from 0-indexed coordinates, or `None` if out of range.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < BOARD_SIZE && rank < BOARD_SIZE {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Like [`Square::new`] but for signed coordinates produced by offsets.
    #[inline]
    pub fn from_coords(file: i8, rank: i8) -> Option<Self> {
        Self::new(u8::try_from(file).ok()?, u8::try_from(rank).ok()?)
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Parse algebraic notation ("e4"). Returns `None` for anything invalid.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Render as algebraic notation ("e4").
    pub fn to_algebraic(self) -> String {
        self.to_string()
    }

    /// Square offset by a (file, rank) delta, if it stays on the board.
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        Self::new(
            self.file.checked_add_signed(file_delta)?,
            self.rank.checked_add_signed(rank_delta)?,
        )
    }

    /// Signed (file, rank) delta from `self` to `other`.
    #[inline]
    pub fn delta_to(self, other: Self) -> (i8, i8) {
        (
            other.file as i8 - self.file as i8,
            other.rank as i8 - self.rank as i8,
        )
    }

    /// All 64 squares, a1 first, rank by rank.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Self { file, rank }))
    }

    /// Squares strictly between `self` and `other` along a shared rank, file
    /// or diagonal. Empty if the two are adjacent or not aligned.
    pub fn between(self, other: Self) -> impl Iterator<Item = Self> {
        let (df, dr) = self.delta_to(other);
        let aligned = df == 0 || dr == 0 || df.abs() == dr.abs();
        let steps = if aligned { df.abs().max(dr.abs()) } else { 0 };
        let (sf, sr) = (df.signum(), dr.signum());
        (1..steps).filter_map(move |i| self.offset(sf * i, sr * i))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(_)) = (chars.next(), chars.clone().next()) else {
            return Err(ParseSquareError::TooShort(s.to_string()));
        };
        if !('a'..='h').contains(&file) {
            return Err(ParseSquareError::InvalidFile(file));
        }
        // Rank is whatever follows the file letter, so "e10" is rejected
        // rather than truncated to "e1".
        let rank = match chars.as_str().as_bytes() {
            [digit @ b'1'..=b'8'] => digit - b'1',
            _ => return Err(ParseSquareError::InvalidRank(s.to_string())),
        };
        Ok(Self {
            file: file as u8 - b'a',
            rank,
        })
    }
}

impl TryFrom<&str> for Square {
    type Error = ParseSquareError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
