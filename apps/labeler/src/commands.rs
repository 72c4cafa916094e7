//! Line commands typed at the labeling prompt.

use thiserror::Error;

pub const HELP_TEXT: &str = "\
commands:
  load [start] [end]          fetch items in [start, end] (defaults: current range)
  next | n, prev | p          move through the loaded items
  set <critical|popular|commercial> <value>
                              fill a label field (empty value clears it)
  annotator <name>            who is labeling
  skip <on|off>               skip already labeled rows when loading
  show <on|off>               include labeled rows when loading
  save                        submit labels for the current item
  help                        this text
  quit | exit                 leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField {
    Critical,
    Popular,
    Commercial,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load {
        start: Option<i64>,
        end: Option<i64>,
    },
    Next,
    Prev,
    Set {
        field: LabelField,
        value: String,
    },
    Annotator(String),
    Skip(bool),
    Show(bool),
    Save,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not an integer index")]
    InvalidIndex(String),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "load" => parse_load(rest),
        "next" | "n" => Ok(Command::Next),
        "prev" | "p" => Ok(Command::Prev),
        "set" => parse_set(rest),
        "annotator" => Ok(Command::Annotator(rest.to_string())),
        "skip" => parse_switch(rest, "skip <on|off>").map(Command::Skip),
        "show" => parse_switch(rest, "show <on|off>").map(Command::Show),
        "save" => Ok(Command::Save),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_load(rest: &str) -> Result<Command, CommandError> {
    let mut bounds = rest.split_whitespace().map(parse_index);
    let start = bounds.next().transpose()?;
    let end = bounds.next().transpose()?;
    if bounds.next().is_some() {
        return Err(CommandError::Usage("load [start] [end]"));
    }
    Ok(Command::Load { start, end })
}

fn parse_index(raw: &str) -> Result<i64, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidIndex(raw.to_string()))
}

fn parse_set(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "set <critical|popular|commercial> <value>";
    let (name, value) = match rest.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (rest, ""),
    };
    let field = match name.to_ascii_lowercase().as_str() {
        "critical" => LabelField::Critical,
        "popular" => LabelField::Popular,
        "commercial" => LabelField::Commercial,
        _ => return Err(CommandError::Usage(USAGE)),
    };
    Ok(Command::Set {
        field,
        value: value.to_string(),
    })
}

fn parse_switch(rest: &str, usage: &'static str) -> Result<bool, CommandError> {
    match rest.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CommandError::Usage(usage)),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
