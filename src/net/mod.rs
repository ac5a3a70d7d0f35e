//! Network synchronization
//!
//! Wire protocol, reconciliation of inbound messages and the transport
//! boundary. There is no server: each side is authoritative for its own
//! paddle and for hits against it, and dead-reckons everything else.

pub mod error;
pub mod message;
pub mod reconcile;
pub mod transport;

pub use error::ProtocolError;
pub use message::{Message, MessageKind, NoChange, PaddleHit, PaddleUpdate};
pub use reconcile::{Applied, reconcile};
pub use transport::{LinkEndpoint, LinkProfile, LossyLink, Outbox, Transport};
