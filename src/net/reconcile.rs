//! Inbound reconciliation
//!
//! Merges a remote message into local state. Paddle messages are
//! extrapolated forward by the number of ticks that passed locally since the
//! sender built them; a hit is an authoritative snap of ball and paddle.
//!
//! Only the opponent paddle and the ball are ever written here. The local
//! paddle belongs to local input alone.

use super::message::{Message, MessageKind, NoChange, PaddleHit, PaddleUpdate};
use crate::sim::GameState;

/// What happened to a message handed to [`reconcile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Merged into state
    Merged(MessageKind),
    /// Older than what the entity already reflects; ignored
    Superseded(MessageKind),
}

impl Applied {
    pub fn kind(&self) -> MessageKind {
        match self {
            Applied::Merged(kind) | Applied::Superseded(kind) => *kind,
        }
    }
}

/// Merge one remote message into local state
pub fn reconcile(state: &mut GameState, message: &Message) -> Applied {
    let kind = message.kind();
    let applied = match message {
        Message::Update(m) => apply_update(state, m),
        Message::NoChange(m) => apply_no_change(state, m),
        Message::Hit(m) => apply_hit(state, m),
    };

    if applied {
        log::debug!(
            "Merged {} from tick {} at local tick {}",
            kind,
            message.tick_number(),
            state.time_ticks
        );
        Applied::Merged(kind)
    } else {
        log::debug!(
            "Ignored superseded {} from tick {} (baseline paddle {}, ball {})",
            kind,
            message.tick_number(),
            state.remote_paddle.baseline_tick,
            state.ball_baseline_tick
        );
        Applied::Superseded(kind)
    }
}

/// Snapshot position, extrapolated along the new direction
fn apply_update(state: &mut GameState, m: &PaddleUpdate) -> bool {
    if m.tick_number < state.remote_paddle.baseline_tick {
        return false;
    }

    let delta = state.ticks_since(m.tick_number) as f32;
    let step = state.paddle_step;
    state.their_paddle_mut().pos = m.position + m.direction * step * delta;

    state.remote_paddle.direction = m.direction;
    state.remote_paddle.baseline_tick = m.tick_number;
    true
}

/// Re-extrapolate the ticks since the heartbeat along its direction
///
/// The per-tick drift already moved the paddle along the last known
/// direction; only the difference to the carried direction is applied, so an
/// unchanged direction leaves the paddle where dead reckoning put it.
fn apply_no_change(state: &mut GameState, m: &NoChange) -> bool {
    if m.tick_number < state.remote_paddle.baseline_tick {
        return false;
    }

    let delta = state.ticks_since(m.tick_number) as f32;
    let correction = (m.direction - state.remote_paddle.direction) * state.paddle_step * delta;
    state.their_paddle_mut().pos += correction;

    state.remote_paddle.direction = m.direction;
    state.remote_paddle.baseline_tick = m.tick_number;
    true
}

/// Authoritative correction: snap the paddle, re-project the ball
///
/// The ball velocity keeps integer components. The paddle snap is skipped
/// when a newer paddle message has already been merged.
fn apply_hit(state: &mut GameState, m: &PaddleHit) -> bool {
    if m.tick_number < state.ball_baseline_tick {
        return false;
    }

    let delta = state.ticks_since(m.tick_number) as f32;
    let vel = m.ball_direction.trunc();
    state.ball.pos = m.ball_position + vel * delta;
    state.ball.vel = vel;
    state.ball_baseline_tick = m.tick_number;

    if m.tick_number >= state.remote_paddle.baseline_tick {
        state.their_paddle_mut().pos = m.position;
        state.remote_paddle.baseline_tick = m.tick_number;
    }
    true
}
