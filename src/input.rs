//! Local input sampling and the outbound message policy
//!
//! Runs on the host's input cadence, not the fixed tick. Moves the local
//! paddle immediately and decides what to tell the peer: a full update when
//! the movement direction changed, a heartbeat when it did not.

use glam::Vec2;

use crate::net::{Message, NoChange, PaddleUpdate};
use crate::sim::GameState;

/// Control state for one input sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// "Move up" held
    pub up: bool,
    /// "Move down" held
    pub down: bool,
}

impl ControlInput {
    pub const IDLE: Self = Self {
        up: false,
        down: false,
    };
    pub const UP: Self = Self {
        up: true,
        down: false,
    };
    pub const DOWN: Self = Self {
        up: false,
        down: true,
    };

    /// Requested movement direction (up wins if both are held)
    pub fn direction(&self) -> Vec2 {
        if self.up {
            Vec2::NEG_Y
        } else if self.down {
            Vec2::Y
        } else {
            Vec2::ZERO
        }
    }
}

/// Remembers the last direction sent so only changes produce updates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputPolicy {
    last_sent_direction: Vec2,
}

impl InputPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_sent_direction(&self) -> Vec2 {
        self.last_sent_direction
    }

    /// Apply one input sample to the local paddle and build the message to send
    pub fn sample(&mut self, state: &mut GameState, input: ControlInput) -> Message {
        let direction = input.direction();
        let step = state.paddle_step;

        let paddle = state.my_paddle_mut();
        paddle.vel = direction * step;
        paddle.pos += paddle.vel;
        let position = paddle.pos;

        let tick_number = state.time_ticks;
        if direction == self.last_sent_direction {
            Message::NoChange(NoChange {
                direction,
                tick_number,
            })
        } else {
            self.last_sent_direction = direction;
            Message::Update(PaddleUpdate {
                position,
                direction,
                tick_number,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::MessageKind;
    use crate::settings::Settings;
    use crate::sim::PlayerId;

    fn new_state() -> GameState {
        GameState::new(PlayerId::Zero, &Settings::default())
    }

    #[test]
    fn test_direction_mapping() {
        assert_eq!(ControlInput::IDLE.direction(), Vec2::ZERO);
        assert_eq!(ControlInput::UP.direction(), Vec2::new(0.0, -1.0));
        assert_eq!(ControlInput::DOWN.direction(), Vec2::new(0.0, 1.0));
        let both = ControlInput { up: true, down: true };
        assert_eq!(both.direction(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_idle_sends_heartbeat() {
        let mut state = new_state();
        let mut policy = InputPolicy::new();
        state.time_ticks = 4;

        let msg = policy.sample(&mut state, ControlInput::IDLE);
        assert_eq!(
            msg,
            Message::NoChange(NoChange {
                direction: Vec2::ZERO,
                tick_number: 4,
            })
        );
        assert_eq!(state.my_paddle().pos, Vec2::new(88.0, 100.0));
        assert_eq!(state.my_paddle().vel, Vec2::ZERO);
    }

    #[test]
    fn test_direction_change_sends_update_once() {
        let mut state = new_state();
        let mut policy = InputPolicy::new();

        let msg = policy.sample(&mut state, ControlInput::DOWN);
        assert_eq!(
            msg,
            Message::Update(PaddleUpdate {
                position: Vec2::new(88.0, 110.0),
                direction: Vec2::new(0.0, 1.0),
                tick_number: 0,
            })
        );
        assert_eq!(state.my_paddle().vel, Vec2::new(0.0, 10.0));

        // Holding the key: heartbeats carrying the same direction
        let msg = policy.sample(&mut state, ControlInput::DOWN);
        assert_eq!(msg.kind(), MessageKind::NoChange);
        assert_eq!(state.my_paddle().pos, Vec2::new(88.0, 120.0));

        // Release: direction changes back to zero
        let msg = policy.sample(&mut state, ControlInput::IDLE);
        assert_eq!(msg.kind(), MessageKind::Update);
        assert_eq!(policy.last_sent_direction(), Vec2::ZERO);
        assert_eq!(state.my_paddle().vel, Vec2::ZERO);
    }

    #[test]
    fn test_only_local_paddle_moves() {
        let mut state = new_state();
        let mut policy = InputPolicy::new();
        let theirs = state.their_paddle().pos;

        policy.sample(&mut state, ControlInput::UP);
        assert_eq!(state.my_paddle().pos, Vec2::new(88.0, 90.0));
        assert_eq!(state.their_paddle().pos, theirs);
    }
}
