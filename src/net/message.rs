//! State-sync messages and their JSON wire format
//!
//! Every payload is a JSON object carrying a `msgType` discriminant next to
//! the variant's fields:
//!
//! ```json
//! {"msgType":"UPDATE_POS","position":[688.0,100.0],"direction":[0.0,1.0],"tickNumber":50}
//! ```
//!
//! Decoding reads the discriminant first and only then decodes the body as
//! that variant, so a field value can never be mistaken for a tag.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ProtocolError, Result};

/// Name of the discriminant field
pub const KIND_FIELD: &str = "msgType";

/// Message discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Update,
    NoChange,
    Hit,
}

impl MessageKind {
    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Update => "UPDATE_POS",
            MessageKind::NoChange => "NO_CHANGE",
            MessageKind::Hit => "HIT",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "UPDATE_POS" => Ok(MessageKind::Update),
            "NO_CHANGE" => Ok(MessageKind::NoChange),
            "HIT" => Ok(MessageKind::Hit),
            other => Err(ProtocolError::UnknownKind(other.to_string())),
        }
    }
}

/// Paddle moved: absolute position plus new direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaddleUpdate {
    pub position: Vec2,
    pub direction: Vec2,
    pub tick_number: u64,
}

/// Heartbeat: direction unchanged since the last update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoChange {
    pub direction: Vec2,
    pub tick_number: u64,
}

/// Ball bounced off the sender's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaddleHit {
    /// Sender's paddle position at the hit
    pub position: Vec2,
    pub ball_position: Vec2,
    /// Ball velocity after the bounce
    pub ball_direction: Vec2,
    pub tick_number: u64,
}

/// A state-sync message
///
/// Built fresh for every send and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msgType")]
pub enum Message {
    #[serde(rename = "UPDATE_POS")]
    Update(PaddleUpdate),
    #[serde(rename = "NO_CHANGE")]
    NoChange(NoChange),
    #[serde(rename = "HIT")]
    Hit(PaddleHit),
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Update(_) => MessageKind::Update,
            Message::NoChange(_) => MessageKind::NoChange,
            Message::Hit(_) => MessageKind::Hit,
        }
    }

    /// Sender's tick when the message was built
    pub fn tick_number(&self) -> u64 {
        match self {
            Message::Update(m) => m.tick_number,
            Message::NoChange(m) => m.tick_number,
            Message::Hit(m) => m.tick_number,
        }
    }

    /// Serialize to a JSON payload
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(ProtocolError::Encode)
    }

    /// Decode a received payload
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes).map_err(ProtocolError::NotJson)?;
        let kind = peek_kind(&value)?;

        let message = match kind {
            MessageKind::Update => Message::Update(decode_body(kind, value)?),
            MessageKind::NoChange => Message::NoChange(decode_body(kind, value)?),
            MessageKind::Hit => Message::Hit(decode_body(kind, value)?),
        };
        message.check_finite()?;
        Ok(message)
    }

    fn check_finite(&self) -> Result<()> {
        let fields = match self {
            Message::Update(m) => vec![("position", m.position), ("direction", m.direction)],
            Message::NoChange(m) => vec![("direction", m.direction)],
            Message::Hit(m) => vec![
                ("position", m.position),
                ("ballPosition", m.ball_position),
                ("ballDirection", m.ball_direction),
            ],
        };

        match fields.iter().find(|(_, v)| !v.is_finite()) {
            Some(&(field, _)) => Err(ProtocolError::NonFinite {
                kind: self.kind(),
                field,
            }),
            None => Ok(()),
        }
    }
}

/// Read the discriminant without decoding the rest of the document
pub fn peek_kind(value: &Value) -> Result<MessageKind> {
    value
        .get(KIND_FIELD)
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingKind)?
        .parse()
}

fn decode_body<T: DeserializeOwned>(kind: MessageKind, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| ProtocolError::InvalidPayload { kind, source })
}

impl From<PaddleUpdate> for Message {
    fn from(m: PaddleUpdate) -> Self {
        Message::Update(m)
    }
}

impl From<NoChange> for Message {
    fn from(m: NoChange) -> Self {
        Message::NoChange(m)
    }
}

impl From<PaddleHit> for Message {
    fn from(m: PaddleHit) -> Self {
        Message::Hit(m)
    }
}
