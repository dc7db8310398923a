//! Probabilistic fault injection for exercising retransmission logic.
//!
//! Real networks drop, duplicate, corrupt, and delay datagrams. To exercise
//! the ARQ machinery without depending on actual network conditions, the
//! engine consults a [`FaultInjector`] before every send:
//!
//! | Fault        | Description                                           |
//! |--------------|-------------------------------------------------------|
//! | Loss         | Drop an outgoing frame with probability `p_loss`.     |
//! | Duplication  | Send a frame an extra time (`p_duplicate`).           |
//! | Corruption   | Flip one random bit in a copy (`p_corrupt`).          |
//! | ACK delay    | Park an ACK in a one-frame slot (`p_ack_delay`) and   |
//! |              | send it only after `ack_delay` has elapsed.           |
//!
//! Each decision is an independent Bernoulli draw. The RNG is seedable so
//! simulation runs are reproducible. The default profile is a transparent
//! pass-through; production sessions simply keep it that way.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::constants::FRAME_SIZE;

/// Fault probabilities and the acknowledgment delay duration.
///
/// All probabilities are in `[0.0, 1.0]`. Mutable only by test setup;
/// consulted, never altered, by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultProfile {
    /// Probability that an outgoing frame is silently dropped.
    pub p_loss: f64,
    /// Probability that an outgoing frame is sent an extra time.
    pub p_duplicate: f64,
    /// Probability that an outgoing frame has one random bit flipped.
    pub p_corrupt: f64,
    /// Probability that an outgoing ACK is parked in the delay slot.
    pub p_ack_delay: f64,
    /// How long a parked ACK is held before the deferred send.
    pub ack_delay: Duration,
}

impl Default for FaultProfile {
    /// A transparent pass-through: no faults.
    fn default() -> Self {
        Self {
            p_loss: 0.0,
            p_duplicate: 0.0,
            p_corrupt: 0.0,
            p_ack_delay: 0.0,
            ack_delay: Duration::ZERO,
        }
    }
}

impl FaultProfile {
    /// Create a pass-through profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the loss probability.
    pub fn with_loss(mut self, p: f64) -> Self {
        self.p_loss = p;
        self
    }

    /// Set the duplication probability.
    pub fn with_duplication(mut self, p: f64) -> Self {
        self.p_duplicate = p;
        self
    }

    /// Set the corruption probability.
    pub fn with_corruption(mut self, p: f64) -> Self {
        self.p_corrupt = p;
        self
    }

    /// Set the ACK delay probability and duration.
    pub fn with_ack_delay(mut self, p: f64, delay: Duration) -> Self {
        self.p_ack_delay = p;
        self.ack_delay = delay;
        self
    }

    /// Check that every probability is within `[0, 1]`.
    pub fn is_valid(&self) -> bool {
        [self.p_loss, self.p_duplicate, self.p_corrupt, self.p_ack_delay]
            .iter()
            .all(|p| (0.0..=1.0).contains(p))
    }
}

/// Per-frame fault decisions plus the single-slot delayed-ACK buffer.
///
/// Consulted by the sender for outgoing DATA (drop, duplicate, corrupt) and
/// by the receiver for outgoing ACKs (duplicate, delay). All operations are
/// side-effect-free except the one-frame delay slot.
#[derive(Debug)]
pub struct FaultInjector {
    profile: FaultProfile,
    rng: StdRng,
    /// At most one ACK frame may be held for deferred sending. A later
    /// park overwrites the slot; there is no queue.
    delayed_ack: Option<[u8; FRAME_SIZE]>,
}

impl FaultInjector {
    /// Create an injector with an OS-seeded RNG.
    pub fn new(profile: FaultProfile) -> Self {
        Self {
            profile,
            rng: StdRng::from_entropy(),
            delayed_ack: None,
        }
    }

    /// Create an injector with a fixed seed so runs are reproducible.
    pub fn with_seed(profile: FaultProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
            delayed_ack: None,
        }
    }

    /// An injector that never injects a fault.
    pub fn passthrough() -> Self {
        Self::new(FaultProfile::default())
    }

    /// The profile this injector draws from.
    pub fn profile(&self) -> &FaultProfile {
        &self.profile
    }

    fn draw(&mut self, p: f64) -> bool {
        p > 0.0 && self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Decide whether the next outgoing frame is dropped.
    pub fn should_drop(&mut self) -> bool {
        self.draw(self.profile.p_loss)
    }

    /// Decide whether the next outgoing frame is sent an extra time.
    pub fn should_duplicate(&mut self) -> bool {
        self.draw(self.profile.p_duplicate)
    }

    /// Possibly produce a corrupted copy of `frame` with a single bit
    /// flipped at a random position. The original is left untouched.
    pub fn maybe_corrupt(&mut self, frame: &[u8; FRAME_SIZE]) -> Option<[u8; FRAME_SIZE]> {
        if !self.draw(self.profile.p_corrupt) {
            return None;
        }
        let mut copy = *frame;
        let byte = self.rng.gen_range(0..FRAME_SIZE);
        let bit = self.rng.gen_range(0..8);
        copy[byte] ^= 1 << bit;
        Some(copy)
    }

    /// Possibly park an ACK frame in the delay slot.
    ///
    /// Returns `true` when the frame was parked and the caller must skip
    /// the immediate send; `false` means send immediately.
    pub fn buffer_ack(&mut self, frame: [u8; FRAME_SIZE]) -> bool {
        if self.draw(self.profile.p_ack_delay) {
            self.delayed_ack = Some(frame);
            true
        } else {
            false
        }
    }

    /// Drain the delay slot, returning the held frame and the delay the
    /// caller must wait before the deferred send.
    pub fn take_delayed_ack(&mut self) -> Option<([u8; FRAME_SIZE], Duration)> {
        let frame = self.delayed_ack.take()?;
        Some((frame, self.profile.ack_delay))
    }

    /// Whether an ACK is currently held in the delay slot.
    pub fn has_delayed_ack(&self) -> bool {
        self.delayed_ack.is_some()
    }

    /// Discard any held ACK (session reset).
    pub fn clear_delayed_ack(&mut self) {
        self.delayed_ack = None;
    }
}
