//! Terminal command parsing
//!
//! Turns a line typed by the player into a protocol request:
//! - `create <size> <name>`
//! - `join <game-id> <name>`
//! - `word <word>` (or `w <word>`)
//! - `help`, `quit`

use shared::{ClientRequest, CreateGame, JoinGame, SubmitWord};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  create <size> <name>    start a new game with a size x size board
  join <game-id> <name>   join a game someone shared with you
  word <word>             claim a word on your turn (alias: w)
  help                    show this message
  quit                    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(ClientRequest),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("board size must be a positive number, got `{0}`")]
    BadSize(String),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = parts.collect();

    let command = match verb.to_lowercase().as_str() {
        "create" | "new" => {
            let [size, name @ ..] = rest.as_slice() else {
                return Err(CommandError::Usage("create <size> <name>"));
            };
            if name.is_empty() {
                return Err(CommandError::Usage("create <size> <name>"));
            }
            let grid_size = size
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| CommandError::BadSize(size.to_string()))?;

            Command::Send(ClientRequest::CreateGame(CreateGame {
                grid_size,
                player_name: name.join(" "),
            }))
        }
        "join" => {
            let [game_id, name @ ..] = rest.as_slice() else {
                return Err(CommandError::Usage("join <game-id> <name>"));
            };
            if name.is_empty() {
                return Err(CommandError::Usage("join <game-id> <name>"));
            }

            Command::Send(ClientRequest::JoinGame(JoinGame {
                game_id: game_id.to_string(),
                player_name: name.join(" "),
            }))
        }
        "word" | "w" => match rest.as_slice() {
            [word] => Command::Send(ClientRequest::SubmitWord(SubmitWord {
                word: word.to_string(),
            })),
            _ => return Err(CommandError::Usage("word <word>")),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}
