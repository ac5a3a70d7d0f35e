//! Session settings
//!
//! Field geometry, entity defaults and scheduler tuning. Loaded from JSON;
//! any key left out falls back to the compiled-in constants.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a settings document is rejected
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tunable session parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Scheduler ===
    /// Simulation ticks per second
    pub tick_rate_hz: f64,
    /// Max ticks run per driver invocation
    pub max_catch_up: u32,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Ball ===
    /// Edge length of the ball's bounding box
    pub ball_size: f32,
    pub ball_start: Vec2,
    /// Initial velocity (integer components: direction × speed)
    pub ball_velocity: Vec2,

    // === Paddles ===
    pub paddle_size: Vec2,
    pub left_paddle_start: Vec2,
    pub right_paddle_start: Vec2,
    /// Displacement per input sample and per dead-reckoning tick
    pub paddle_step: Vec2,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            max_catch_up: MAX_CATCH_UP,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ball_size: BALL_SIZE,
            ball_start: Vec2::from_array(BALL_START),
            ball_velocity: Vec2::from_array(BALL_VELOCITY),

            paddle_size: Vec2::from_array(PADDLE_SIZE),
            left_paddle_start: Vec2::from_array(LEFT_PADDLE_START),
            right_paddle_start: Vec2::from_array(RIGHT_PADDLE_START),
            paddle_step: Vec2::from_array(PADDLE_STEP),
        }
    }
}

impl Settings {
    /// Tick duration in milliseconds
    pub fn tick_ms(&self) -> f64 {
        1000.0 / self.tick_rate_hz
    }

    /// Field extent as a vector
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check that every value can drive a session
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(invalid("tick_rate_hz", "must be a positive number"));
        }
        if self.max_catch_up == 0 {
            return Err(invalid("max_catch_up", "must be at least 1"));
        }
        let field = self.field();
        if !(field.is_finite() && field.cmpgt(Vec2::ZERO).all()) {
            return Err(invalid("field", "dimensions must be positive"));
        }
        if !(self.ball_size > 0.0 && self.ball_size.is_finite()) {
            return Err(invalid("ball_size", "must be a positive number"));
        }

        let vectors = [
            ("ball_start", self.ball_start),
            ("ball_velocity", self.ball_velocity),
            ("paddle_size", self.paddle_size),
            ("left_paddle_start", self.left_paddle_start),
            ("right_paddle_start", self.right_paddle_start),
            ("paddle_step", self.paddle_step),
        ];
        for (field, v) in vectors {
            if !v.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> SettingsError {
    SettingsError::Invalid { field, reason }
}
