//! Fixed timestep simulation tick
//!
//! Advances the game state by exactly one step. Nothing here reads a clock or
//! a render delta; the ball moves by its integer velocity once per tick.

use glam::Vec2;

use super::collision::wall_contact;
use super::state::GameState;

/// Something the host must react to after a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The ball bounced off the locally authoritative paddle
    PaddleHit {
        /// Local paddle position at the hit
        paddle_pos: Vec2,
        /// Ball position at the end of the hit tick
        ball_pos: Vec2,
        /// Ball velocity after the bounce
        ball_vel: Vec2,
        tick: u64,
    },
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState) -> Option<GameEvent> {
    state.time_ticks += 1;

    // Walls: each axis independently, both may fire at a corner
    let contact = wall_contact(state.ball.pos, state.ball.size, state.field);
    if contact.horizontal {
        state.ball.bounce_horizontal();
    }
    if contact.vertical {
        state.ball.bounce_vertical();
    }

    // Only our own paddle is tested; the opponent reports its own hits
    let paddle = state.my_paddle();
    let hit = paddle.is_approached_by(state.ball.vel)
        && state.ball.bounds().intersects(&paddle.bounds());
    if hit {
        state.ball.bounce_horizontal();
    }

    // Dead reckoning: keep the opponent moving between messages
    let drift = state.remote_paddle.direction * state.paddle_step;
    state.their_paddle_mut().pos += drift;

    state.ball.advance();

    log::trace!(
        "tick {} ball={:?} vel={:?}",
        state.time_ticks,
        state.ball.pos,
        state.ball.vel
    );

    if !hit {
        return None;
    }
    log::debug!(
        "Paddle hit at tick {} (ball {:?}, vel {:?})",
        state.time_ticks,
        state.ball.pos,
        state.ball.vel
    );
    Some(GameEvent::PaddleHit {
        paddle_pos: state.my_paddle().pos,
        ball_pos: state.ball.pos,
        ball_vel: state.ball.vel,
        tick: state.time_ticks,
    })
}
