mod display;
mod event_log;
mod script;
mod terminal;

pub use display::{DisplayError, TerminalDisplay};
pub use event_log::EventLog;
pub use script::{MoveScript, ParseError};
pub use terminal::run_interactive_terminal;
