//! NetPong - two-player Pong kept in sync over a best-effort channel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddles, fixed tick step)
//! - `driver`: Fixed timestep scheduler with bounded catch-up
//! - `input`: Local input sampling and outbound message policy
//! - `net`: Wire protocol, reconciliation and transport boundary
//! - `session`: One client's session state tying it all together
//! - `settings`: Data-driven session configuration

pub mod driver;
pub mod input;
pub mod net;
pub mod session;
pub mod settings;
pub mod sim;

pub use driver::{CatchUp, Stopwatch, TickDriver};
pub use input::{ControlInput, InputPolicy};
pub use net::{Message, MessageKind, ProtocolError, Transport};
pub use session::{Session, View};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE_HZ: f64 = 60.0;
    /// Duration of one tick in milliseconds
    pub const TICK_MS: f64 = 1000.0 / TICK_RATE_HZ;
    /// Maximum ticks executed per driver invocation; the rest carries over
    pub const MAX_CATCH_UP: u32 = 3;

    /// Playing field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    pub const BALL_START: [f32; 2] = [400.0, 400.0];
    pub const BALL_VELOCITY: [f32; 2] = [2.0, -2.0];

    /// Paddle defaults (both paddles start centered on x = 100 / x = 700)
    pub const PADDLE_SIZE: [f32; 2] = [24.0, 96.0];
    pub const LEFT_PADDLE_START: [f32; 2] = [100.0 - 12.0, 100.0];
    pub const RIGHT_PADDLE_START: [f32; 2] = [700.0 - 12.0, 100.0];
    /// Paddle displacement per input sample / per dead-reckoning tick
    pub const PADDLE_STEP: [f32; 2] = [0.0, 10.0];

    /// Player marker placement
    pub const MARKER_ORIGIN: [f32; 2] = [70.0, 10.0];
    pub const MARKER_SPACING: f32 = 600.0;
}
