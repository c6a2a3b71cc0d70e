pub mod index;
pub mod parse;

pub use index::{process_manual_commands, CommandReport, ManualCommandsError};
pub use parse::{parse_command, Command, ParseOutcome};
