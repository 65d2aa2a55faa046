use std::io::{self, Write};

use super::{MoveScript, TerminalDisplay};
use crate::game_logic::GameEngine;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive terminal game.
///
/// Moves are typed in coordinate notation; the board is redrawn by a
/// [`TerminalDisplay`] subscribed to the engine.
pub fn run_interactive_terminal() {
    let mut engine = new_engine();

    clear_screen();
    print_help();
    engine.setup_standard_position();

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush stdout: {}", e);
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "m" => {
                if parts.len() < 2 {
                    println!("Usage: m <from><to> [...]");
                } else {
                    play_moves(&mut engine, &parts[1..].join(" "));
                }
            }
            "r" => {
                clear_screen();
                print_help();
                engine.setup_standard_position();
                println!("\n🔄 Reset to initial state");
            }
            "p" => {
                clear_screen();
                print_help();
                println!("{}", engine.board());
                println!("{} to move", engine.board().current_turn());
            }
            "q" => break,
            _ => play_moves(&mut engine, &input),
        }
    }
}

fn new_engine() -> GameEngine {
    let mut engine = GameEngine::new();
    engine.subscribe(TerminalDisplay::new());
    engine
}

fn play_moves(engine: &mut GameEngine, script: &str) {
    match MoveScript::parse(script) {
        Ok(script) => {
            if let Err(e) = script.play(engine) {
                println!("❌ {}", e);
            }
        }
        Err(e) => println!("❌ {}", e),
    }
}

fn print_help() {
    println!("♟️  Chess Rules Board");
    println!();
    println!("Commands: <from><to> | m <moves...> | r (reset) | p (print) | q (quit)");
    println!();
}
