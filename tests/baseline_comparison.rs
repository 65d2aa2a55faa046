//! Replays deterministic games on both our board and shakmaty's, comparing
//! the legal move sets and game state after every ply.

use chess_rules_board::{Board, Color, Square};
use shakmaty::{Chess, Move, Position, Role};
use test_case::test_case;

fn to_ours(square: shakmaty::Square) -> Square {
    Square::from_algebraic(&square.to_string()).expect("shakmaty squares are always valid")
}

fn color_of(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

/// The (origin, target) pair a move is written as on our board.
///
/// Under-promotions have no counterpart since pawns always become queens.
fn coords(mv: &Move) -> Option<(Square, Square)> {
    match *mv {
        Move::Castle { king, rook } => {
            let (king, rook) = (to_ours(king), to_ours(rook));
            let file = if rook.file() > king.file() { 6 } else { 2 };
            Some((king, Square::new(file, king.rank())?))
        }
        _ if mv.promotion().is_some_and(|role| role != Role::Queen) => None,
        _ => Some((to_ours(mv.from()?), to_ours(mv.to()))),
    }
}

fn expected_moves(pos: &Chess) -> Vec<(Square, Square)> {
    let mut moves: Vec<_> = pos.legal_moves().iter().filter_map(coords).collect();
    moves.sort();
    moves
}

fn assert_same_state(board: &Board, pos: &Chess, ply: usize) {
    let color = board.current_turn();
    assert_eq!(color, color_of(pos.turn()), "turn differs at ply {ply}");

    for square in Square::all() {
        let theirs = pos.board().piece_at(
            square
                .to_string()
                .parse::<shakmaty::Square>()
                .expect("our squares are always valid"),
        );
        let ours = board.piece_at(square);
        assert_eq!(
            ours.map(|piece| piece.symbol()),
            theirs.map(|piece| piece.char()),
            "{square} differs at ply {ply}"
        );
    }

    let mut actual = board.legal_moves(color);
    actual.sort();
    assert_eq!(
        actual,
        expected_moves(pos),
        "legal moves differ at ply {ply}\n{board}"
    );
    assert_eq!(board.is_in_check(color), pos.is_check(), "ply {ply}");
    assert_eq!(board.is_checkmate(color), pos.is_checkmate(), "ply {ply}");
    assert_eq!(board.is_stalemate(color), pos.is_stalemate(), "ply {ply}");
}

/// Plays up to `plies` moves, picking each one from shakmaty's move list
/// with a fixed stride so games are reproducible.
fn replay(seed: usize, plies: usize) {
    let mut board = Board::new();
    let mut pos = Chess::default();

    for ply in 0..plies {
        assert_same_state(&board, &pos, ply);

        let candidates: Vec<Move> = pos
            .legal_moves()
            .into_iter()
            .filter(|mv| coords(mv).is_some())
            .collect();
        if candidates.is_empty() {
            break;
        }
        let mv = candidates[(seed * 31 + ply * 17) % candidates.len()].clone();
        let (from, to) = coords(&mv).expect("candidates map to our notation");

        assert!(board.move_piece(from, to), "{from}{to} rejected at ply {ply}");
        pos.play_unchecked(mv);
    }
}

#[test_case(1; "game one")]
#[test_case(2; "game two")]
#[test_case(3; "game three")]
#[test_case(5; "game five")]
#[test_case(8; "game eight")]
#[test_case(13; "game thirteen")]
fn random_games_match_baseline(seed: usize) {
    replay(seed, 120);
}

#[test]
fn scripted_game_matches_baseline() {
    // Exercises en passant, both castles and a promotion.
    let script = [
        "e2e4", "d7d5", "e4e5", "f7f5", "e5f6", "g8h6", "g1f3", "b8c6", "f1c4", "c8e6", "e1g1",
        "d8d7", "f6g7", "e8c8", "g7h8",
    ];
    let mut board = Board::new();
    let mut pos = Chess::default();

    for (ply, token) in script.iter().enumerate() {
        assert_same_state(&board, &pos, ply);

        let mv = pos
            .legal_moves()
            .into_iter()
            .find(|mv| coords(mv).is_some_and(|(from, to)| format!("{from}{to}") == *token))
            .unwrap_or_else(|| panic!("{token} is not legal at ply {ply}"));
        let (from, to) = coords(&mv).unwrap();

        assert!(board.move_piece(from, to), "{token} rejected at ply {ply}");
        pos.play_unchecked(mv);
    }
    assert_same_state(&board, &pos, script.len());
}
