//! Error types for the wire protocol

use thiserror::Error;

use super::message::MessageKind;

/// Why an inbound payload was rejected (or an outbound one could not be built)
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Payload is not a JSON document
    #[error("payload is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    /// Document has no string `msgType` field
    #[error("payload has no `msgType` discriminant")]
    MissingKind,

    /// Discriminant names no known message
    #[error("unknown message kind `{0}`")]
    UnknownKind(String),

    /// Discriminant is fine but a field failed to decode
    #[error("invalid {kind} payload: {source}")]
    InvalidPayload {
        kind: MessageKind,
        #[source]
        source: serde_json::Error,
    },

    /// A numeric field decoded to NaN or infinity
    #[error("{kind} field `{field}` is not finite")]
    NonFinite {
        kind: MessageKind,
        field: &'static str,
    },

    /// Serialization failed
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
