//! Two sessions talking over an in-memory link, one tick per host frame.

use glam::Vec2;

use netpong::net::{LinkEndpoint, LinkProfile, LossyLink};
use netpong::sim::PlayerId;
use netpong::{ControlInput, Session, Settings};

struct Match {
    link: LossyLink,
    left: Session<LinkEndpoint>,
    right: Session<LinkEndpoint>,
    frame: u64,
    tick_ms: f64,
}

impl Match {
    fn new(settings: &Settings, profile: LinkProfile) -> Self {
        let link = LossyLink::new(profile, 1234);
        let (a, b) = link.endpoints();
        Self {
            left: Session::start(PlayerId::Zero, settings, a),
            right: Session::start(PlayerId::One, settings, b),
            link,
            frame: 0,
            tick_ms: settings.tick_ms(),
        }
    }

    fn elapsed_ms(&self) -> f64 {
        // Mid-tick, so exactly `frame` ticks are owed
        (self.frame as f64 + 0.5) * self.tick_ms
    }

    fn deliver(&mut self) {
        self.frame += 1;
        self.link.set_time(self.elapsed_ms());
        for session in [&mut self.left, &mut self.right] {
            let arrived = session.transport().receive();
            for payload in arrived {
                session.handle_message(&payload).expect("peer payloads decode");
            }
        }
    }

    fn play(&mut self, left: ControlInput, right: ControlInput) {
        self.left.handle_input(left);
        self.right.handle_input(right);
        let elapsed = self.elapsed_ms();
        self.left.update(elapsed);
        self.right.update(elapsed);
    }

    fn frame(&mut self, left: ControlInput, right: ControlInput) {
        self.deliver();
        self.play(left, right);
    }
}

#[test]
fn remote_paddle_settles_on_sender_position() {
    let mut game = Match::new(&Settings::default(), LinkProfile::PERFECT);

    for _ in 0..5 {
        game.frame(ControlInput::DOWN, ControlInput::IDLE);
    }
    for _ in 0..15 {
        game.frame(ControlInput::IDLE, ControlInput::IDLE);
    }

    assert_eq!(game.left.tick_count(), 20);
    assert_eq!(game.left.my_paddle().pos, Vec2::new(88.0, 150.0));
    assert_eq!(game.right.their_paddle().pos, Vec2::new(88.0, 150.0));

    // Nobody touched the right paddle
    assert_eq!(game.right.my_paddle().pos, Vec2::new(688.0, 100.0));
    assert_eq!(game.left.their_paddle().pos, Vec2::new(688.0, 100.0));
    assert_eq!(game.left.ball(), game.right.ball());
}

#[test]
fn hits_keep_both_balls_in_agreement() {
    let settings = Settings {
        ball_start: Vec2::new(200.0, 130.0),
        ball_velocity: Vec2::new(-2.0, 0.0),
        ..Settings::default()
    };
    let mut game = Match::new(&settings, LinkProfile::PERFECT);

    let mut reversals = 0;
    let mut last_vx = game.left.ball().vel.x;
    for _ in 0..1200 {
        game.deliver();
        // Any hit from the previous frame has been applied by now
        assert_eq!(game.left.ball(), game.right.ball(), "frame {}", game.frame);

        game.play(ControlInput::IDLE, ControlInput::IDLE);

        let vx = game.left.ball().vel.x;
        if vx != last_vx {
            reversals += 1;
            last_vx = vx;
        }
    }

    // Both paddles returned the ball several times
    assert!(reversals >= 4, "only {} reversals", reversals);
    game.deliver();
    assert_eq!(game.left.ball(), game.right.ball());
}

#[test]
fn lossy_link_never_disturbs_local_state() {
    let mut game = Match::new(&Settings::default(), LinkProfile::default());

    for i in 0..300u64 {
        let left = if i % 50 < 10 { ControlInput::DOWN } else { ControlInput::IDLE };
        let right = if i % 70 < 7 { ControlInput::UP } else { ControlInput::IDLE };
        game.frame(left, right);
    }

    assert_eq!(game.left.tick_count(), 300);
    assert_eq!(game.right.tick_count(), 300);
    // 6 bursts of 10 steps down, 5 bursts of 7 steps up
    assert_eq!(game.left.my_paddle().pos, Vec2::new(88.0, 100.0 + 600.0));
    assert_eq!(game.right.my_paddle().pos, Vec2::new(688.0, 100.0 - 350.0));
}
