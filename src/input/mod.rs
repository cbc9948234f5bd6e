//! Terminal input handling

pub mod commands;
pub mod line;

pub use commands::{Command, CommandError, HELP, parse};
pub use line::decode_line;
