//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, never a render delta
//! - Integer ball steps
//! - No network, rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, WallContact, wall_contact};
pub use state::{Ball, GameState, Paddle, PlayerId, RemoteTrack, Side};
pub use tick::{GameEvent, tick};
