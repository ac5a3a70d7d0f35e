//! Transport boundary
//!
//! The session hands every outbound message to a [`Transport`] and never
//! waits for a result: delivery is best effort. Hosts plug in their own
//! network stack; [`Outbox`] collects messages in memory and [`LossyLink`]
//! joins two peers through a seeded, delaying and dropping channel.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::message::Message;

/// Outbound half of the channel (fire-and-forget)
pub trait Transport {
    fn send(&mut self, message: &Message);
}

/// Collects sent messages in order
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    pub sent: Vec<Message>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything sent so far
    pub fn drain(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.sent)
    }
}

impl Transport for Outbox {
    fn send(&mut self, message: &Message) {
        self.sent.push(*message);
    }
}

/// Channel behaviour for [`LossyLink`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkProfile {
    /// Base one-way delay
    pub latency_ms: f64,
    /// Extra random delay, uniform in `0..=jitter_ms`
    pub jitter_ms: f64,
    /// Probability a payload is dropped
    pub loss: f64,
}

impl LinkProfile {
    /// Instant, lossless delivery
    pub const PERFECT: Self = Self {
        latency_ms: 0.0,
        jitter_ms: 0.0,
        loss: 0.0,
    };
}

impl Default for LinkProfile {
    fn default() -> Self {
        Self {
            latency_ms: 40.0,
            jitter_ms: 20.0,
            loss: 0.05,
        }
    }
}

#[derive(Debug)]
struct InFlight {
    deliver_at_ms: f64,
    payload: Vec<u8>,
}

#[derive(Debug)]
struct LinkState {
    profile: LinkProfile,
    rng: Pcg32,
    now_ms: f64,
    /// Per-receiver queues, indexed by endpoint
    queues: [VecDeque<InFlight>; 2],
    dropped: u64,
}

/// In-memory duplex channel between two endpoints
///
/// Payloads cross as encoded bytes, so the receiving side goes through the
/// same decode path as a real network. Randomness is seeded for repeatable
/// runs.
#[derive(Debug, Clone)]
pub struct LossyLink {
    inner: Rc<RefCell<LinkState>>,
}

impl LossyLink {
    pub fn new(profile: LinkProfile, seed: u64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LinkState {
                profile,
                rng: Pcg32::seed_from_u64(seed),
                now_ms: 0.0,
                queues: [VecDeque::new(), VecDeque::new()],
                dropped: 0,
            })),
        }
    }

    /// Both ends of the link
    pub fn endpoints(&self) -> (LinkEndpoint, LinkEndpoint) {
        (
            LinkEndpoint {
                link: self.clone(),
                index: 0,
            },
            LinkEndpoint {
                link: self.clone(),
                index: 1,
            },
        )
    }

    /// Advance the link clock
    pub fn set_time(&self, now_ms: f64) {
        self.inner.borrow_mut().now_ms = now_ms;
    }

    /// Payloads lost so far
    pub fn dropped(&self) -> u64 {
        self.inner.borrow().dropped
    }

    fn push(&self, to: usize, payload: Vec<u8>) {
        let mut link = self.inner.borrow_mut();
        let profile = link.profile;

        if profile.loss > 0.0 && link.rng.random_bool(profile.loss.min(1.0)) {
            link.dropped += 1;
            return;
        }

        let jitter = if profile.jitter_ms > 0.0 {
            link.rng.random_range(0.0..=profile.jitter_ms)
        } else {
            0.0
        };
        let deliver_at_ms = link.now_ms + profile.latency_ms + jitter;
        link.queues[to].push_back(InFlight {
            deliver_at_ms,
            payload,
        });
    }

    fn take_due(&self, to: usize) -> Vec<Vec<u8>> {
        let mut link = self.inner.borrow_mut();
        let now = link.now_ms;
        let queue = &mut link.queues[to];

        // Jitter may reorder delivery; collect everything that is due
        let mut due = Vec::new();
        let mut pending = VecDeque::with_capacity(queue.len());
        while let Some(item) = queue.pop_front() {
            if item.deliver_at_ms <= now {
                due.push(item);
            } else {
                pending.push_back(item);
            }
        }
        *queue = pending;

        due.sort_by(|a, b| a.deliver_at_ms.total_cmp(&b.deliver_at_ms));
        due.into_iter().map(|item| item.payload).collect()
    }
}

/// One side of a [`LossyLink`]
#[derive(Debug, Clone)]
pub struct LinkEndpoint {
    link: LossyLink,
    index: usize,
}

impl LinkEndpoint {
    /// Payloads addressed to this endpoint that have arrived
    pub fn receive(&self) -> Vec<Vec<u8>> {
        self.link.take_due(self.index)
    }

    /// Put raw bytes on the wire toward the peer
    pub fn send_raw(&self, payload: Vec<u8>) {
        self.link.push(1 - self.index, payload);
    }
}

impl Transport for LinkEndpoint {
    fn send(&mut self, message: &Message) {
        match message.encode() {
            Ok(payload) => self.send_raw(payload),
            Err(e) => log::warn!("Dropping unencodable {}: {}", message.kind(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::net::message::NoChange;

    fn heartbeat(tick_number: u64) -> Message {
        Message::NoChange(NoChange {
            direction: Vec2::ZERO,
            tick_number,
        })
    }

    #[test]
    fn test_outbox_keeps_order() {
        let mut outbox = Outbox::new();
        outbox.send(&heartbeat(1));
        outbox.send(&heartbeat(2));

        let sent = outbox.drain();
        assert_eq!(sent.iter().map(Message::tick_number).collect::<Vec<_>>(), [1, 2]);
        assert!(outbox.sent.is_empty());
    }

    #[test]
    fn test_perfect_link_delivers_immediately() {
        let link = LossyLink::new(LinkProfile::PERFECT, 1);
        let (mut a, b) = link.endpoints();

        a.send(&heartbeat(5));
        let received = b.receive();
        assert_eq!(received.len(), 1);
        assert_eq!(Message::decode(&received[0]).unwrap(), heartbeat(5));
        assert!(a.receive().is_empty());
    }

    #[test]
    fn test_latency_holds_payloads() {
        let profile = LinkProfile {
            latency_ms: 50.0,
            jitter_ms: 0.0,
            loss: 0.0,
        };
        let link = LossyLink::new(profile, 1);
        let (mut a, b) = link.endpoints();

        a.send(&heartbeat(1));
        link.set_time(49.0);
        assert!(b.receive().is_empty());
        link.set_time(50.0);
        assert_eq!(b.receive().len(), 1);
    }

    #[test]
    fn test_total_loss_drops_everything() {
        let profile = LinkProfile {
            loss: 1.0,
            ..LinkProfile::PERFECT
        };
        let link = LossyLink::new(profile, 7);
        let (a, mut b) = link.endpoints();

        for t in 0..10 {
            b.send(&heartbeat(t));
        }
        assert!(a.receive().is_empty());
        assert_eq!(link.dropped(), 10);
    }

    #[test]
    fn test_seeded_link_is_repeatable() {
        let run = || {
            let link = LossyLink::new(LinkProfile::default(), 42);
            let (mut a, b) = link.endpoints();
            for t in 0..100 {
                link.set_time(t as f64 * 10.0);
                a.send(&heartbeat(t));
            }
            link.set_time(10_000.0);
            b.receive()
        };
        assert_eq!(run(), run());
    }
}
