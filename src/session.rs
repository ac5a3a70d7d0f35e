//! One client's game session
//!
//! Owns every piece of mutable state for a client: simulation, scheduler,
//! input policy and the outbound transport. The host serializes calls, so the
//! tick loop and the message handler never interleave.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{MARKER_ORIGIN, MARKER_SPACING};
use crate::driver::{CatchUp, TickDriver};
use crate::input::{ControlInput, InputPolicy};
use crate::net::{Applied, Message, MessageKind, PaddleHit, ProtocolError, Transport, reconcile};
use crate::settings::Settings;
use crate::sim::{Ball, GameEvent, GameState, Paddle, PlayerId, Side, tick};

/// Read-only snapshot for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub tick: u64,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    pub local_side: Side,
}

/// A running session for one player
#[derive(Debug)]
pub struct Session<T: Transport> {
    player: PlayerId,
    state: GameState,
    driver: TickDriver,
    policy: InputPolicy,
    transport: T,
}

impl<T: Transport> Session<T> {
    /// Assign paddle roles and start the tick clock at zero
    pub fn start(player: PlayerId, settings: &Settings, transport: T) -> Self {
        log::info!(
            "Session started as player {} ({:?} paddle)",
            player.index(),
            player.side()
        );
        Self {
            player,
            state: GameState::new(player, settings),
            driver: TickDriver::from_settings(settings),
            policy: InputPolicy::new(),
            transport,
        }
    }

    /// Run the ticks owed after `elapsed_ms` of wall time since start
    pub fn update(&mut self, elapsed_ms: f64) -> CatchUp {
        let driver = self.driver;
        driver.advance(elapsed_ms, self, |s| s.state.time_ticks, Self::step)
    }

    /// Execute exactly one simulation tick
    pub fn step(&mut self) {
        if let Some(GameEvent::PaddleHit {
            paddle_pos,
            ball_pos,
            ball_vel,
            tick: tick_number,
        }) = tick(&mut self.state)
        {
            self.send(Message::Hit(PaddleHit {
                position: paddle_pos,
                ball_position: ball_pos,
                ball_direction: ball_vel,
                tick_number,
            }));
        }
    }

    /// Apply one input sample and send the resulting message
    pub fn handle_input(&mut self, input: ControlInput) -> MessageKind {
        let message = self.policy.sample(&mut self.state, input);
        let kind = message.kind();
        self.send(message);
        kind
    }

    /// Decode and merge a received payload
    ///
    /// A payload that fails to decode leaves all state untouched.
    pub fn handle_message(&mut self, bytes: &[u8]) -> Result<Applied, ProtocolError> {
        match Message::decode(bytes) {
            Ok(message) => Ok(reconcile(&mut self.state, &message)),
            Err(e) => {
                log::warn!("Dropping inbound payload: {}", e);
                Err(e)
            }
        }
    }

    fn send(&mut self, message: Message) {
        log::debug!(
            "Sending {} at tick {}",
            message.kind(),
            message.tick_number()
        );
        self.transport.send(&message);
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tick_count(&self) -> u64 {
        self.state.time_ticks
    }

    pub fn ball(&self) -> &Ball {
        &self.state.ball
    }

    pub fn my_paddle(&self) -> &Paddle {
        self.state.my_paddle()
    }

    pub fn their_paddle(&self) -> &Paddle {
        self.state.their_paddle()
    }

    pub fn view(&self) -> View {
        View {
            tick: self.state.time_ticks,
            ball: self.state.ball.clone(),
            left: self.state.left.clone(),
            right: self.state.right.clone(),
            local_side: self.state.local_side,
        }
    }

    /// Tick counter display text
    pub fn tick_label(&self) -> String {
        format!("frame tick: {}", self.state.time_ticks)
    }

    /// Where the "this is you" marker goes
    pub fn marker_position(&self) -> Vec2 {
        Vec2::new(
            MARKER_ORIGIN[0] + f32::from(self.player.index()) * MARKER_SPACING,
            MARKER_ORIGIN[1],
        )
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
