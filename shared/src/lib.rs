//! Wire protocol shared by the word duel server and client
//!
//! Every message travels as one JSON text frame. Requests from a client use the
//! `{type, payload}` envelope, events from the server use `{event, payload}`.
//! Inbound parsing happens in two steps so that an unknown `type` can be told
//! apart from a known `type` carrying a bad payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Session identifier assigned by the server at connect time. A player is
/// identified by the session that created or joined the game.
pub type PlayerId = u32;

/// Game identifier (UUID v4 text)
pub type GameId = String;

pub const CREATE_GAME: &str = "create_game";
pub const JOIN_GAME: &str = "join_game";
pub const SUBMIT_WORD: &str = "submit_word";

/// Raw inbound envelope before the payload is interpreted
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateGame {
    pub grid_size: usize,
    pub player_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinGame {
    pub game_id: GameId,
    pub player_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SubmitWord {
    pub word: String,
}

/// A request a client can make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequest {
    CreateGame(CreateGame),
    JoinGame(JoinGame),
    SubmitWord(SubmitWord),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed envelope: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("unknown message type `{0}`")]
    UnknownType(String),
    #[error("invalid payload for `{kind}`: {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientRequest {
    /// Parses a JSON text frame into a typed request
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let envelope: Envelope = serde_json::from_str(text).map_err(ProtocolError::Malformed)?;
        Self::from_envelope(envelope)
    }

    pub fn from_envelope(envelope: Envelope) -> Result<Self, ProtocolError> {
        let Envelope { kind, payload } = envelope;
        let invalid = |source| ProtocolError::InvalidPayload {
            kind: kind.clone(),
            source,
        };

        match kind.as_str() {
            CREATE_GAME => serde_json::from_value(payload)
                .map(ClientRequest::CreateGame)
                .map_err(invalid),
            JOIN_GAME => serde_json::from_value(payload)
                .map(ClientRequest::JoinGame)
                .map_err(invalid),
            SUBMIT_WORD => serde_json::from_value(payload)
                .map(ClientRequest::SubmitWord)
                .map_err(invalid),
            _ => Err(ProtocolError::UnknownType(kind.clone())),
        }
    }

    /// Wire name of this request
    pub fn kind(&self) -> &'static str {
        match self {
            ClientRequest::CreateGame(_) => CREATE_GAME,
            ClientRequest::JoinGame(_) => JOIN_GAME,
            ClientRequest::SubmitWord(_) => SUBMIT_WORD,
        }
    }

    pub fn to_envelope(&self) -> Envelope {
        let payload = match self {
            ClientRequest::CreateGame(p) => serde_json::to_value(p),
            ClientRequest::JoinGame(p) => serde_json::to_value(p),
            ClientRequest::SubmitWord(p) => serde_json::to_value(p),
        }
        // Plain structs of strings and integers always serialize.
        .unwrap_or(Value::Null);

        Envelope {
            kind: self.kind().to_string(),
            payload,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_envelope())
    }
}

/// Public view of a player, as sent to the opponent
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
}

/// Events pushed from the server to a client
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(
    tag = "event",
    content = "payload",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    GameCreated {
        game_id: GameId,
        player_id: PlayerId,
        grid: Vec<String>,
    },
    PlayerJoined {
        opponent: PlayerView,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        grid: Option<Vec<String>>,
    },
    GameStarted {
        starting_player_id: PlayerId,
    },
    WordSubmitted {
        player_id: PlayerId,
        word: String,
        score: u32,
    },
    NextTurn {
        next_player_id: PlayerId,
    },
    PlayerDisconnected {
        disconnected_player_id: PlayerId,
    },
    Error {
        message: String,
    },
}

impl ServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
