//! Command line parser using nom
//!
//! Grammar (case-insensitive keywords, input trimmed first):
//! ```text
//! stats | clear | exit
//! add <value>
//! <value>
//! ```

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    combinator::{all_consuming, rest, value},
    sequence::{pair, preceded},
    IResult,
};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Touch a key (`add <value>` or a bare value)
    Touch(String),
    /// Print hit/miss/eviction counters
    Stats,
    /// Drop every cached key
    Clear,
    /// Leave the command loop
    Exit,
}

/// Rejected input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Keyword given without its argument
    MissingValue(&'static str),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::MissingValue(cmd) => write!(f, "'{}' requires a value", cmd),
        }
    }
}

impl std::error::Error for CommandError {}

/// Parse one input line
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Ok((_, cmd)) = keyword(line) {
        return Ok(Some(cmd));
    }

    if let Ok((_, key)) = add_value(line) {
        return Ok(Some(Command::Touch(key.to_string())));
    }

    if line.eq_ignore_ascii_case("add") {
        return Err(CommandError::MissingValue("add"));
    }

    Ok(Some(Command::Touch(line.to_string())))
}

fn keyword(input: &str) -> IResult<&str, Command> {
    all_consuming(alt((
        value(Command::Stats, tag_no_case("stats")),
        value(Command::Clear, tag_no_case("clear")),
        value(Command::Exit, tag_no_case("exit")),
    )))(input)
}

fn add_value(input: &str) -> IResult<&str, &str> {
    preceded(pair(tag_no_case("add"), take_while1(char::is_whitespace)), rest)(input)
}
