fn main() {
    chess_rules_board::mock::run_interactive_terminal();
}
