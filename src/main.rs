//! NetPong demo host
//!
//! Runs two sessions in one process, joined by a lossy in-memory link, and
//! drives them from a real wall clock with scripted input. Every few seconds
//! the host stalls on purpose so the catch-up path gets exercised.
//!
//! Environment:
//! - `NETPONG_CONFIG`: path to a JSON settings file
//! - `NETPONG_SECONDS`: how long to run (default 5)
//! - `RUST_LOG`: log filter (e.g. `netpong=debug`)

use std::time::Duration;

use netpong::net::{LinkEndpoint, LinkProfile, LossyLink};
use netpong::sim::PlayerId;
use netpong::{ControlInput, Session, Settings, Stopwatch};

/// Host frame pacing (~120 Hz, faster than the 60 Hz simulation)
const FRAME: Duration = Duration::from_millis(8);
/// Deliberate stall every this many frames
const HITCH_EVERY: u64 = 240;
const HITCH: Duration = Duration::from_millis(150);

fn main() {
    env_logger::init();
    log::info!("NetPong (native) starting...");

    let settings = match std::env::var("NETPONG_CONFIG") {
        Ok(path) => Settings::load(path),
        Err(_) => Settings::default(),
    };
    let seconds = std::env::var("NETPONG_SECONDS")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(5.0);

    let link = LossyLink::new(LinkProfile::default(), 0x5eed);
    let (a, b) = link.endpoints();
    let mut left = Session::start(PlayerId::Zero, &settings, a);
    let mut right = Session::start(PlayerId::One, &settings, b);

    let clock = Stopwatch::start();
    let mut frame: u64 = 0;
    loop {
        let now = clock.elapsed_ms();
        if now >= seconds * 1000.0 {
            break;
        }
        link.set_time(now);

        deliver(&mut left);
        deliver(&mut right);

        left.handle_input(scripted_input(frame, 0));
        right.handle_input(scripted_input(frame, 97));

        let report_l = left.update(now);
        let report_r = right.update(now);
        if report_l.deficit > 0 || report_r.deficit > 0 {
            log::info!(
                "Catching up: {} / {} tick(s) behind",
                report_l.deficit,
                report_r.deficit
            );
        }

        if frame.is_multiple_of(60) {
            log::info!(
                "{} | ball L {:?} R {:?} | remote paddle L {:?} R {:?}",
                left.tick_label(),
                left.ball().pos,
                right.ball().pos,
                left.their_paddle().pos,
                right.their_paddle().pos
            );
        }

        frame += 1;
        std::thread::sleep(if frame.is_multiple_of(HITCH_EVERY) { HITCH } else { FRAME });
    }

    log::info!("Dropped {} payload(s) on the link", link.dropped());
    for session in [&left, &right] {
        match serde_json::to_string(&session.view()) {
            Ok(json) => println!("player {}: {}", session.player().index(), json),
            Err(e) => log::error!("Failed to serialize view: {}", e),
        }
    }
}

/// Hand every arrived payload to the session
fn deliver(session: &mut Session<LinkEndpoint>) {
    let arrived = session.transport().receive();
    for payload in arrived {
        // Rejected payloads are logged by the session and otherwise ignored
        let _ = session.handle_message(&payload);
    }
}

/// Sweep the paddle up and down with pauses in between
fn scripted_input(frame: u64, phase: u64) -> ControlInput {
    match (frame + phase) % 200 {
        0..=39 => ControlInput::DOWN,
        40..=99 => ControlInput::IDLE,
        100..=139 => ControlInput::UP,
        _ => ControlInput::IDLE,
    }
}
