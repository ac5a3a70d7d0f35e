//! Game state and core simulation types
//!
//! Everything a session mutates lives here, owned by a single `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::settings::Settings;

/// Which end of the field a paddle guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Player id assigned at session start (0 plays left, 1 plays right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerId {
    Zero,
    One,
}

impl PlayerId {
    /// Paddle this player controls
    pub fn side(self) -> Side {
        match self {
            PlayerId::Zero => Side::Left,
            PlayerId::One => Side::Right,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            PlayerId::Zero => 0,
            PlayerId::One => 1,
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = u8;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(PlayerId::Zero),
            1 => Ok(PlayerId::One),
            other => Err(other),
        }
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Per-tick displacement (integer components)
    pub vel: Vec2,
    /// Bounding box edge length
    pub size: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self { pos, vel, size }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    pub fn bounce_horizontal(&mut self) {
        self.vel.x = -self.vel.x;
    }

    pub fn bounce_vertical(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Advance by one tick's worth of velocity
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// A paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Current displacement per input sample (zero when idle)
    pub vel: Vec2,
}

impl Paddle {
    pub fn new(side: Side, pos: Vec2, size: Vec2) -> Self {
        Self {
            side,
            pos,
            size,
            vel: Vec2::ZERO,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// True if a ball with velocity `vel` is heading toward this paddle's goal
    pub fn is_approached_by(&self, vel: Vec2) -> bool {
        match self.side {
            Side::Left => vel.x < 0.0,
            Side::Right => vel.x > 0.0,
        }
    }
}

/// Dead-reckoning track for one remote-authoritative entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemoteTrack {
    /// Last movement direction received (unit or zero vector)
    pub direction: Vec2,
    /// Sender tick of the last applied snapshot
    pub baseline_tick: u64,
}

impl Default for RemoteTrack {
    fn default() -> Self {
        Self {
            direction: Vec2::ZERO,
            baseline_tick: 0,
        }
    }
}

/// Complete per-client state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Simulation tick counter (logical clock for every message)
    pub time_ticks: u64,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    /// Paddle driven by local input
    pub local_side: Side,
    /// Opponent paddle extrapolation
    pub remote_paddle: RemoteTrack,
    /// Sender tick of the last applied ball correction
    pub ball_baseline_tick: u64,
    pub field: Vec2,
    /// Paddle displacement per tick of movement
    pub paddle_step: Vec2,
}

impl GameState {
    /// Create the initial state for the given player
    pub fn new(player: PlayerId, settings: &Settings) -> Self {
        Self {
            time_ticks: 0,
            ball: Ball::new(
                settings.ball_start,
                settings.ball_velocity,
                settings.ball_size,
            ),
            left: Paddle::new(Side::Left, settings.left_paddle_start, settings.paddle_size),
            right: Paddle::new(
                Side::Right,
                settings.right_paddle_start,
                settings.paddle_size,
            ),
            local_side: player.side(),
            remote_paddle: RemoteTrack::default(),
            ball_baseline_tick: 0,
            field: settings.field(),
            paddle_step: settings.paddle_step,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Locally authoritative paddle
    pub fn my_paddle(&self) -> &Paddle {
        self.paddle(self.local_side)
    }

    pub fn my_paddle_mut(&mut self) -> &mut Paddle {
        self.paddle_mut(self.local_side)
    }

    /// Remote-authoritative paddle
    pub fn their_paddle(&self) -> &Paddle {
        self.paddle(self.local_side.opposite())
    }

    pub fn their_paddle_mut(&mut self) -> &mut Paddle {
        self.paddle_mut(self.local_side.opposite())
    }

    /// Ticks elapsed locally since `sender_tick`; never negative
    pub fn ticks_since(&self, sender_tick: u64) -> u64 {
        self.time_ticks.saturating_sub(sender_tick)
    }
}
