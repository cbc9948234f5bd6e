//! Line commands typed into the terminal front-end
//!
//! Every command starts with `:`. Arguments are taken verbatim after the
//! single space that follows the command word, so leading and trailing
//! whitespace in a title or body survives.

use std::path::PathBuf;

/// Errors produced while parsing a command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty input")]
    Empty,

    #[error("Commands start with ':' (try :help)")]
    NotACommand,

    #[error("Unknown command ':{0}' (try :help)")]
    Unknown(String),

    #[error("':{command}' takes no argument")]
    UnexpectedArgument { command: &'static str },
}

/// A parsed terminal command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the title field
    Title(String),
    /// Replace the body field
    Body(String),
    /// Append one line to the body field
    AppendBody(String),
    /// Press the Analyze button
    Analyze,
    /// Press the Clear button
    Clear,
    /// Print the form
    Show,
    /// Export the panel as PNG, optionally to a given path
    Render(Option<PathBuf>),
    /// Probe the prediction service
    Health,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  :title <text>    set the article title
  :body <text>     set the article text
  :body+ <text>    append a line to the article text
  :analyze         send the article for classification
  :clear           empty the form and the result
  :show            print the form
  :render [path]   save the panel as a PNG image
  :health          check that the prediction service is up
  :help            show this help
  :quit            exit";

/// Parses one input line
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(CommandError::Empty);
    }

    let Some(rest) = line.trim_start().strip_prefix(':') else {
        return Err(CommandError::NotACommand);
    };
    let (word, argument) = match rest.split_once(' ') {
        Some((word, argument)) => (word, Some(argument)),
        None => (rest, None),
    };
    let text = || argument.unwrap_or_default().to_string();

    let bare = |command: Command, name: &'static str| match argument {
        Some(arg) if !arg.trim().is_empty() => Err(CommandError::UnexpectedArgument { command: name }),
        _ => Ok(command),
    };

    match word.to_ascii_lowercase().as_str() {
        "title" | "t" => Ok(Command::Title(text())),
        "body" | "b" => Ok(Command::Body(text())),
        "body+" | "b+" => Ok(Command::AppendBody(text())),
        "analyze" | "a" => bare(Command::Analyze, "analyze"),
        "clear" | "c" => bare(Command::Clear, "clear"),
        "show" | "s" => bare(Command::Show, "show"),
        "render" | "r" => Ok(Command::Render(
            argument
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        )),
        "health" => bare(Command::Health, "health"),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => bare(Command::Quit, "quit"),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
