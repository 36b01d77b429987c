//! Line protocol for driving a [`RobinMap`] from text input.
//!
//! One command per line, whitespace separated:
//!
//! ```text
//! get <key>          `key` -> `value`  |  Not Found
//! put <key> <int>    `key` -> `value`
//! del <key>          Removed <value>   |  Not Found
//! print              slot-by-slot dump of the table
//! quit               end of session
//! ```
//!
//! Anything else is answered with `Illegal input`. Every token is length
//! checked before it is used, and blank lines are skipped.

use crate::{Error, RobinMap, Value};
use core::fmt;
use std::io::{self, BufRead, Write};

/// Longest accepted token, in bytes.
pub const MAX_TOKEN_LEN: usize = 49;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Get(String),
    Put(String, Value),
    Del(String),
    Print,
    Quit,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("`{0}` is missing an argument")]
    MissingArgument(&'static str),
    #[error("unexpected trailing input {0:?}")]
    TrailingInput(String),
    #[error("{0:?} is not an integer")]
    InvalidValue(String),
    #[error("token longer than {max} bytes")]
    TokenTooLong { max: usize },
}

impl Command {
    /// Parse one line. `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(op) = tokens.next() else {
            return Ok(None);
        };
        let op = checked(op)?;

        let cmd = match op {
            "get" => Command::Get(argument(&mut tokens, "get")?.to_owned()),
            "put" => {
                let key = argument(&mut tokens, "put")?.to_owned();
                let raw = argument(&mut tokens, "put")?;
                let value = raw
                    .parse::<Value>()
                    .map_err(|_| ParseError::InvalidValue(raw.to_owned()))?;
                Command::Put(key, value)
            }
            "del" => Command::Del(argument(&mut tokens, "del")?.to_owned()),
            "print" => Command::Print,
            "quit" => Command::Quit,
            other => return Err(ParseError::UnknownCommand(other.to_owned())),
        };

        match tokens.next() {
            Some(extra) => Err(ParseError::TrailingInput(extra.to_owned())),
            None => Ok(Some(cmd)),
        }
    }
}

fn checked(token: &str) -> Result<&str, ParseError> {
    if token.len() > MAX_TOKEN_LEN {
        return Err(ParseError::TokenTooLong { max: MAX_TOKEN_LEN });
    }
    Ok(token)
}

fn argument<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    op: &'static str,
) -> Result<&'a str, ParseError> {
    checked(tokens.next().ok_or(ParseError::MissingArgument(op))?)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Found { key: String, value: Value },
    NotFound,
    Removed(Value),
    Dump(String),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Found { key, value } => write!(f, "`{key}` -> `{value}`"),
            Response::NotFound => f.write_str("Not Found"),
            Response::Removed(value) => write!(f, "Removed {value}"),
            Response::Dump(dump) => f.write_str(dump),
        }
    }
}

/// Slot-by-slot rendering of a table: a `len - capacity` header, then one
/// line per slot with its key, value and displacement.
pub struct Dump<'a>(pub &'a RobinMap);

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.0;
        writeln!(f, "{:3} - {:2}", map.len(), map.capacity())?;
        write!(f, "--------------------------")?;
        for (index, slot) in map.slots().enumerate() {
            match slot {
                Some(s) => write!(
                    f,
                    "\n{index:3}. {:>10} -> {:4} | psl: {}",
                    s.key, s.value, s.displacement
                )?,
                None => write!(f, "\n{index:3}. {:>10}", "-")?,
            }
        }
        Ok(())
    }
}

/// Apply one command. `Quit` renders like `Print`; [`run`] stops before
/// executing it.
pub fn execute(map: &mut RobinMap, cmd: Command) -> Result<Response, Error> {
    let response = match cmd {
        Command::Get(key) => match map.get(&key) {
            Some(value) => Response::Found { key, value },
            None => Response::NotFound,
        },
        Command::Put(key, value) => {
            let value = *map.put(&key, value)?;
            Response::Found { key, value }
        }
        Command::Del(key) => match map.remove(&key) {
            Some(value) => Response::Removed(value),
            None => Response::NotFound,
        },
        Command::Print | Command::Quit => Response::Dump(Dump(map).to_string()),
    };
    Ok(response)
}

/// Read commands from `input` until `quit` or end of input, writing one
/// response per command to `output`.
pub fn run<R: BufRead, W: Write>(map: &mut RobinMap, input: R, mut output: W) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let cmd = match Command::parse(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(error = %e, "rejected input line");
                writeln!(output, "Illegal input")?;
                continue;
            }
        };
        tracing::trace!(?cmd, "executing");
        match execute(map, cmd) {
            Ok(response) => writeln!(output, "{response}")?,
            Err(e) => {
                tracing::warn!(error = %e, "command failed");
                writeln!(output, "Error: {e}")?;
            }
        }
    }
    output.flush()
}
