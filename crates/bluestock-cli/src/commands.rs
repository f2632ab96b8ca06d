//! Command parsing for the interactive session

use bluestock_core::{Filter, Symbol};
use thiserror::Error;

/// Why a line of input could not be turned into a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Missing {what} for /{command}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("Unknown filter '{0}', expected ALL, GOOD, NEUTRAL or BAD")]
    InvalidFilter(String),

    #[error("Unknown command: /{0} (try /help)")]
    Unknown(String),
}

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Plain text typed into the input line; added as one symbol
    Input { text: String },
    /// Add one or more symbols
    Add { symbols: Vec<String> },
    /// Remove a symbol chip
    Remove { symbol: Symbol },
    /// Show registered symbols
    List,
    /// Analyze all registered symbols
    Analyze,
    /// Change the rating filter
    Filter { filter: Filter },
    /// Re-render the current view
    Show,
    /// List analyses stored by the backend
    History,
    /// Show help
    Help,
    /// Exit the session
    Exit,
}

impl Command {
    /// Parse a command from user input.
    ///
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(input: &str) -> Result<Option<Self>, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Some(Command::Input {
                text: input.to_string(),
            }));
        };

        let mut parts = rest.split_whitespace();
        let cmd = parts.next().ok_or(CommandError::Empty)?.to_lowercase();
        let args: Vec<&str> = parts.collect();

        let command = match cmd.as_str() {
            "add" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "add",
                        what: "symbol",
                    });
                }
                Command::Add {
                    symbols: args.iter().map(ToString::to_string).collect(),
                }
            },
            "remove" | "rm" => {
                let symbol = args.first().and_then(|raw| Symbol::parse(raw)).ok_or(
                    CommandError::MissingArgument {
                        command: "remove",
                        what: "symbol",
                    },
                )?;
                Command::Remove { symbol }
            },
            "filter" | "f" => {
                let raw = args.first().ok_or(CommandError::MissingArgument {
                    command: "filter",
                    what: "rating",
                })?;
                let filter = raw
                    .parse()
                    .map_err(|_| CommandError::InvalidFilter((*raw).to_string()))?;
                Command::Filter { filter }
            },
            "list" | "ls" => Command::List,
            "analyze" | "a" => Command::Analyze,
            "show" | "s" => Command::Show,
            "history" => Command::History,
            "help" | "h" | "?" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            _ => return Err(CommandError::Unknown(cmd)),
        };

        Ok(Some(command))
    }

    /// Help text listing every command
    pub fn help() -> &'static str {
        "Commands:\n\
        \x20 <SYMBOL>              - Add a symbol (e.g. INFY)\n\
        \x20 /add <SYMBOL>...      - Add one or more symbols\n\
        \x20 /remove <SYMBOL>      - Remove a symbol\n\
        \x20 /list                 - Show registered symbols\n\
        \x20 /analyze              - Analyze all registered symbols\n\
        \x20 /filter <RATING>      - Show ALL, GOOD, NEUTRAL or BAD results\n\
        \x20 /show                 - Show the current results\n\
        \x20 /history              - List analyses stored by the backend\n\
        \x20 /help                 - Show help\n\
        \x20 /exit                 - Exit"
    }
}
