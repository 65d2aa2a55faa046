use chess_rules_board::events::BoardEvent;
use chess_rules_board::game_logic::{GameEngine, GameStatus, MoveError};
use chess_rules_board::mock::{EventLog, MoveScript, TerminalDisplay};
use chess_rules_board::{Board, Color, PieceKind, Square};
use test_case::test_case;

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).expect("test square is invalid")
}

/// Helper: create an engine with an event log subscribed.
fn setup() -> (GameEngine, EventLog) {
    let mut engine = GameEngine::new();
    let log = EventLog::new();
    engine.subscribe(log.clone());
    (engine, log)
}

/// Helper: play a script, panicking on the first rejected move.
fn play(engine: &mut GameEngine, script: &str) {
    MoveScript::parse(script)
        .expect("valid script")
        .play(engine)
        .unwrap_or_else(|e| panic!("script '{script}' failed: {e}"));
}

fn assert_piece(engine: &GameEngine, square: &str, kind: PieceKind, color: Color) {
    let found = engine.piece_at(square);
    assert!(
        found.is_some_and(|piece| piece.is(kind, color)),
        "Expected {color} {kind:?} at {square}, found {found:?}"
    );
}

// ---------------------------------------------------------------
// Opening position
// ---------------------------------------------------------------

#[test]
fn opening_has_twenty_legal_moves() {
    let engine = GameEngine::new();
    let board = engine.board();

    assert_eq!(board.legal_moves(Color::White).len(), 20);

    let pawn = board.piece_at("e2").unwrap();
    let knight = board.piece_at("b1").unwrap();
    let bishop = board.piece_at("c1").unwrap();
    assert!(board.is_legal_move(&pawn, sq("e2"), sq("e4")));
    assert!(board.is_legal_move(&knight, sq("b1"), sq("c3")));
    assert!(!board.is_legal_move(&bishop, sq("c1"), sq("f4")));
}

// ---------------------------------------------------------------
// En passant
// ---------------------------------------------------------------

#[test]
fn en_passant_right_after_double_push() {
    let (mut engine, log) = setup();
    play(&mut engine, "e2e4 a7a6 e4e5 d7d5");
    let victim = engine.piece_at("d5").unwrap();
    log.clear();

    let outcome = engine.move_piece("e5", "d6").expect("en passant is legal");

    assert!(outcome.is_en_passant());
    assert_piece(&engine, "d6", PieceKind::Pawn, Color::White);
    assert_eq!(engine.piece_at("d5"), None);
    assert_eq!(
        log.events()[0],
        BoardEvent::PieceRemoved {
            square: sq("d5"),
            piece: victim,
        }
    );
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut engine = GameEngine::new();
    play(&mut engine, "e2e4 a7a6 e4e5 d7d5 h2h3 h7h6");

    assert!(matches!(
        engine.move_piece("e5", "d6"),
        Err(MoveError::Illegal { .. })
    ));
}

// ---------------------------------------------------------------
// Castling
// ---------------------------------------------------------------

#[test]
fn castling_moves_rook_and_notifies_both() {
    let (mut engine, log) = setup();
    play(&mut engine, "e2e4 e7e5 g1f3 b8c6 f1c4 g8f6");
    log.clear();

    engine.move_piece("e1", "g1").expect("castling is legal");

    assert_piece(&engine, "g1", PieceKind::King, Color::White);
    assert_piece(&engine, "f1", PieceKind::Rook, Color::White);
    let moved: Vec<_> = log
        .events()
        .into_iter()
        .filter_map(|event| match event {
            BoardEvent::PieceMoved { from, to, .. } => Some(format!("{from}{to}")),
            _ => None,
        })
        .collect();
    assert_eq!(moved, ["e1g1", "h1f1"]);
}

#[test]
fn castling_lost_after_rook_moves_out_and_back() {
    let mut board = Board::empty();
    board.set_piece_at("e1", PieceKind::King, Color::White);
    board.set_piece_at("h1", PieceKind::Rook, Color::White);
    board.set_piece_at("e8", PieceKind::King, Color::Black);
    let mut engine = GameEngine::from_board(board);

    play(&mut engine, "h1h3 e8d8 h3h1 d8e8");

    assert!(engine.move_piece("e1", "g1").is_err());
    assert_piece(&engine, "e1", PieceKind::King, Color::White);
}

#[test_case("f8"; "through check")]
#[test_case("g8"; "into check")]
#[test_case("e8"; "out of check")]
fn castling_rejected_when_attacked(rook: &str) {
    let mut board = Board::empty();
    board.set_piece_at("e1", PieceKind::King, Color::White);
    board.set_piece_at("h1", PieceKind::Rook, Color::White);
    board.set_piece_at("a8", PieceKind::King, Color::Black);
    board.set_piece_at(rook, PieceKind::Rook, Color::Black);
    let mut engine = GameEngine::from_board(board);

    assert!(engine.move_piece("e1", "g1").is_err());
}

// ---------------------------------------------------------------
// Game end
// ---------------------------------------------------------------

#[test]
fn fools_mate() {
    let (mut engine, log) = setup();

    play(&mut engine, "f2f3 e7e5 g2g4 d8h4");

    assert!(engine.board().is_checkmate(Color::White));
    assert_eq!(engine.status(), GameStatus::Checkmate);
    assert_eq!(
        log.events().last(),
        Some(&BoardEvent::Checkmate {
            loser: Color::White
        })
    );
    assert!(engine.move_piece("a2", "a3").is_err(), "no move escapes mate");
}

#[test]
fn king_only_stalemate() {
    let mut board = Board::empty();
    board.set_piece_at("a8", PieceKind::King, Color::Black);
    board.set_piece_at("c7", PieceKind::King, Color::White);
    board.set_piece_at("d4", PieceKind::Bishop, Color::White);
    let (mut engine, log) = (GameEngine::from_board(board), EventLog::new());
    engine.subscribe(log.clone());

    // Bb6 covers a7; the white king covers b7 and b8.
    play(&mut engine, "d4b6");

    assert!(engine.board().is_stalemate(Color::Black));
    assert!(!engine.board().is_checkmate(Color::Black));
    assert_eq!(
        log.events().last(),
        Some(&BoardEvent::Stalemate {
            color: Color::Black
        })
    );
}

// ---------------------------------------------------------------
// Self-check and promotion
// ---------------------------------------------------------------

#[test]
fn pinned_bishop_cannot_leave_the_file() {
    let mut board = Board::empty();
    board.set_piece_at("e1", PieceKind::King, Color::White);
    board.set_piece_at("e3", PieceKind::Bishop, Color::White);
    board.set_piece_at("e8", PieceKind::Rook, Color::Black);
    board.set_piece_at("h8", PieceKind::King, Color::Black);
    let mut engine = GameEngine::from_board(board);
    let bishop = engine.piece_at("e3").unwrap();

    assert!(engine.board().is_legal_move(&bishop, sq("e3"), sq("d4")));
    assert!(matches!(
        engine.move_piece("e3", "d4"),
        Err(MoveError::LeavesKingInCheck { .. })
    ));
    assert_eq!(engine.piece_at("e3"), Some(bishop));
    assert_eq!(engine.board().current_turn(), Color::White);
}

#[test]
fn promotion_creates_queen() {
    let mut board = Board::empty();
    board.set_piece_at("e1", PieceKind::King, Color::White);
    board.set_piece_at("h8", PieceKind::King, Color::Black);
    let pawn = board
        .set_piece_at("c7", PieceKind::Pawn, Color::White)
        .unwrap();
    let mut engine = GameEngine::from_board(board);

    let outcome = engine.move_piece("c7", "c8").expect("promotion is legal");

    let queen = outcome.promotion.expect("pawn promotes");
    assert_eq!(engine.piece_at("c8"), Some(queen));
    assert!(queen.is(PieceKind::Queen, Color::White));
    assert!(
        engine
            .board()
            .pieces(Color::White)
            .all(|(_, piece)| piece.id != pawn.id)
    );
    // The new queen checks along the back rank.
    assert_eq!(engine.status(), GameStatus::Check);
}

// ---------------------------------------------------------------
// Presentation adapters stay in sync through events alone
// ---------------------------------------------------------------

#[test]
fn terminal_mirror_matches_board_after_game() {
    let (mut engine, log) = setup();
    engine.setup_standard_position();
    play(
        &mut engine,
        "e2e4 d7d5 e4d5 c7c5 d5c6 g8f6 c6b7 e7e6 b7a8 f8e7 g1f3 e8g8 f1e2 f6e4 e1g1",
    );

    let mut display = TerminalDisplay::with_writer(Vec::new());
    for event in log.events() {
        chess_rules_board::BoardObserver::on_event(&mut display, &event);
    }

    for square in Square::all() {
        assert_eq!(
            display.piece_at(square),
            engine.piece_at(square),
            "mirror differs on {square}"
        );
    }
    assert_piece(&engine, "a8", PieceKind::Queen, Color::White);
    assert_piece(&engine, "g8", PieceKind::King, Color::Black);
    assert_piece(&engine, "f8", PieceKind::Rook, Color::Black);
}
