use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use clap::{error::ErrorKind, Parser, Subcommand};
use tracing::{debug, warn};

use crate::error::{ErrorCode, Result};
use crate::KeyValueStore;

/// One shell instruction. Arguments are split on whitespace, so keys and
/// values cannot contain spaces.
#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Set the value of a string key to a string
    Set { key: String, value: String },
    /// Get the string value of a given string key
    Get { key: String },
    /// Remove a given key
    Rm { key: String },
    /// Check whether a key is present
    Has { key: String },
    /// Print the number of entries
    Size,
    /// Print every entry in slot order
    Print,
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Parser)]
#[command(no_binary_name = true)]
struct Line {
    #[command(subcommand)]
    cmd: Command,
}

impl FromStr for Command {
    type Err = clap::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Line::try_parse_from(s.split_whitespace()).map(|line| line.cmd)
    }
}

/// A read-eval-print loop over an in-memory `KeyValueStore<String, String>`.
pub struct Shell {
    store: KeyValueStore<String, String>,
}

impl Shell {
    pub fn new(store: KeyValueStore<String, String>) -> Self {
        Shell { store }
    }

    pub fn store(&self) -> &KeyValueStore<String, String> {
        &self.store
    }

    /// Applies `cmd` to the store and returns the line to print, if any.
    pub fn execute(&mut self, cmd: Command) -> Result<Option<String>> {
        let reply = match cmd {
            Command::Set { key, value } => {
                self.store.set(key, value)?;
                None
            }
            Command::Get { key } => match self.store.get(key.as_str()) {
                Ok(value) => Some(value.clone()),
                Err(e) if matches!(*e, ErrorCode::KeyNotFound) => Some("Key not found".to_owned()),
                Err(e) => return Err(e),
            },
            Command::Rm { key } => {
                self.store.remove(key.as_str());
                None
            }
            Command::Has { key } => Some(self.store.has_key(key.as_str()).to_string()),
            Command::Size => Some(self.store.size().to_string()),
            Command::Print => Some(self.store.to_string()),
            Command::Exit => None,
        };
        Ok(reply)
    }

    /// Runs commands from `input` until `exit` or end of input.
    ///
    /// Replies go to `out`. Lines that do not parse are reported on `err` and
    /// skipped.
    pub fn run<R, W, E>(&mut self, input: R, out: &mut W, err: &mut E) -> Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let cmd = match line.parse::<Command>() {
                Ok(cmd) => cmd,
                Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                    write!(out, "{}", e.render())?;
                    continue;
                }
                Err(e) => {
                    warn!("rejected input line: {}", line);
                    write!(err, "{}", e.render())?;
                    continue;
                }
            };
            if cmd == Command::Exit {
                debug!("exit requested");
                break;
            }

            if let Some(reply) = self.execute(cmd)? {
                writeln!(out, "{}", reply)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}
