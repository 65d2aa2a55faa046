use std::fmt;

use crate::piece::{Color, Piece, PieceId, PieceKind};
use crate::square::{BOARD_SIZE, Square};

/// Which rook a castling move uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    /// Towards the a-file rook.
    Queenside,
    /// Towards the h-file rook.
    Kingside,
}

impl CastlingSide {
    /// File the king starts castling from (e).
    pub const KING_FILE: u8 = 4;

    /// Side implied by a two-file king move, if the delta is one.
    pub const fn from_king_delta(file_delta: i8) -> Option<Self> {
        match file_delta {
            2 => Some(Self::Kingside),
            -2 => Some(Self::Queenside),
            _ => None,
        }
    }

    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            Self::Queenside => 0,
            Self::Kingside => 7,
        }
    }

    #[inline]
    pub const fn king_target_file(self) -> u8 {
        match self {
            Self::Queenside => 2,
            Self::Kingside => 6,
        }
    }

    #[inline]
    pub const fn rook_target_file(self) -> u8 {
        match self {
            Self::Queenside => 3,
            Self::Kingside => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MovedFlags {
    king: bool,
    rook_a: bool,
    rook_h: bool,
}

/// "Has moved" flags for each king and home-square rook.
///
/// Flags only ever go from `false` to `true`; a new game starts from a fresh
/// state rather than resetting individual flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastlingState {
    white: MovedFlags,
    black: MovedFlags,
}

impl CastlingState {
    fn flags(&self, color: Color) -> &MovedFlags {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn flags_mut(&mut self, color: Color) -> &mut MovedFlags {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    #[inline]
    pub fn king_moved(&self, color: Color) -> bool {
        self.flags(color).king
    }

    #[inline]
    pub fn rook_moved(&self, color: Color, side: CastlingSide) -> bool {
        let flags = self.flags(color);
        match side {
            CastlingSide::Queenside => flags.rook_a,
            CastlingSide::Kingside => flags.rook_h,
        }
    }

    /// Whether neither the king nor the rook for `side` has moved.
    #[inline]
    pub fn may_castle(&self, color: Color, side: CastlingSide) -> bool {
        !self.king_moved(color) && !self.rook_moved(color, side)
    }

    pub fn mark_king_moved(&mut self, color: Color) {
        self.flags_mut(color).king = true;
    }

    pub fn mark_rook_moved(&mut self, color: Color, side: CastlingSide) {
        let flags = self.flags_mut(color);
        match side {
            CastlingSide::Queenside => flags.rook_a = true,
            CastlingSide::Kingside => flags.rook_h = true,
        }
    }

    /// Mark the rook whose home square is `square`, if any.
    pub fn mark_rook_square(&mut self, color: Color, square: Square) {
        if square.rank() != color.home_rank() {
            return;
        }
        for side in [CastlingSide::Queenside, CastlingSide::Kingside] {
            if square.file() == side.rook_file() {
                self.mark_rook_moved(color, side);
            }
        }
    }
}

/// The most recent move, kept only to validate en passant on the next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub was_double_pawn_push: bool,
}

/// The 8×8 board and all state the rules need.
///
/// The board owns every placed piece. Pieces are spawned with a fresh
/// [`PieceId`] and dropped when captured or when the board is cleared.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    /// Indexed `[rank][file]`.
    squares: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    current_turn: Color,
    castling: CastlingState,
    last_move: Option<LastMove>,
    next_id: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Board in the standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_standard_position();
        board
    }

    /// Board with no pieces, white to move and nothing moved yet.
    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            current_turn: Color::White,
            castling: CastlingState::default(),
            last_move: None,
            next_id: 0,
        }
    }

    /// Remove every piece and reset turn, castling and last-move state.
    pub fn clear(&mut self) {
        self.squares = [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        self.current_turn = Color::White;
        self.castling = CastlingState::default();
        self.last_move = None;
    }

    /// Reset to the standard opening layout.
    pub fn setup_standard_position(&mut self) {
        self.clear();
        for color in Color::ALL {
            for (file, kind) in (0..BOARD_SIZE).zip(PieceKind::BACK_RANK) {
                if let Some(sq) = Square::new(file, color.home_rank()) {
                    self.spawn(sq, kind, color);
                }
                if let Some(sq) = Square::new(file, color.pawn_rank()) {
                    self.spawn(sq, PieceKind::Pawn, color);
                }
            }
        }
    }

    #[inline]
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    /// Override whose turn it is (used when setting up custom positions).
    #[inline]
    pub fn set_turn(&mut self, color: Color) {
        self.current_turn = color;
    }

    #[inline]
    pub fn castling(&self) -> &CastlingState {
        &self.castling
    }

    /// Mutable castling flags, for marking kings or rooks as moved.
    #[inline]
    pub fn castling_mut(&mut self) -> &mut CastlingState {
        &mut self.castling
    }

    #[inline]
    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    /// Get the piece at a square or algebraic string, if any.
    ///
    /// Invalid input yields `None`, same as an empty square.
    pub fn piece_at<S: TryInto<Square>>(&self, square: S) -> Option<Piece> {
        self.get(square.try_into().ok()?)
    }

    /// Spawn a new piece at `square`, replacing whatever was there.
    ///
    /// Returns the placed piece, or `None` if the square is invalid.
    pub fn set_piece_at<S: TryInto<Square>>(
        &mut self,
        square: S,
        kind: PieceKind,
        color: Color,
    ) -> Option<Piece> {
        let square = square.try_into().ok()?;
        Some(self.spawn(square, kind, color))
    }

    /// Remove and return the piece at `square`.
    pub fn remove_piece_at<S: TryInto<Square>>(&mut self, square: S) -> Option<Piece> {
        self.take(square.try_into().ok()?)
    }

    /// All pieces of `color` with their squares.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| {
            self.get(sq)
                .filter(|piece| piece.color == color)
                .map(|piece| (sq, piece))
        })
    }

    /// Square of `color`'s king, if it is on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    #[inline]
    pub(crate) fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank() as usize][square.file() as usize]
    }

    /// Place `piece` (or nothing) at `square`, returning the previous occupant.
    #[inline]
    pub(crate) fn put(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.squares[square.rank() as usize][square.file() as usize],
            piece,
        )
    }

    #[inline]
    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        self.put(square, None)
    }

    pub(crate) fn spawn(&mut self, square: Square, kind: PieceKind, color: Color) -> Piece {
        let piece = Piece {
            id: PieceId::new(self.next_id),
            kind,
            color,
        };
        self.next_id += 1;
        self.put(square, Some(piece));
        piece
    }

    pub(crate) fn record_move(&mut self, last_move: LastMove) {
        self.last_move = Some(last_move);
        self.current_turn = !last_move.piece.color;
    }

    /// Board placement, rank 8 first, ranks separated by '/'.
    fn placement(&self) -> String {
        (0..BOARD_SIZE)
            .rev()
            .map(|rank| {
                (0..BOARD_SIZE)
                    .map(|file| {
                        Square::new(file, rank)
                            .and_then(|sq| self.get(sq))
                            .map_or('.', |piece| piece.symbol())
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.placement().split('/').zip((1..=BOARD_SIZE).rev()) {
            write!(f, " {rank} ")?;
            for symbol in row.chars() {
                write!(f, " {symbol} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "    a  b  c  d  e  f  g  h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("placement", &self.placement())
            .field("current_turn", &self.current_turn)
            .field("castling", &self.castling)
            .field("last_move", &self.last_move)
            .finish()
    }
}
