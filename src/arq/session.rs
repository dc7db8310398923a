//! Per-session configuration and role state.
//!
//! Session state is modeled as explicit values owned by the engine and
//! mutated only through its exclusive borrow. Single ownership makes the
//! impossibility of concurrent access checkable instead of conventional.

use std::net::SocketAddr;
use std::time::Duration;

use crate::core::constants::{DEFAULT_KEY, DEFAULT_TIMEOUT};
use crate::transport::SequenceBit;

/// How many transmission attempts the sender makes per chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Retransmit forever. A permanently unreachable peer blocks the
    /// sender indefinitely; callers needing termination guarantees must
    /// pick [`Limited`](Self::Limited).
    #[default]
    Unlimited,
    /// Fail with [`crate::arq::ArqError::RetriesExhausted`] once this many
    /// transmissions of the same frame have gone unacknowledged.
    Limited(u32),
}

impl RetryPolicy {
    /// Whether another transmission is allowed after `attempts` so far.
    pub fn allows(&self, attempts: u32) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limited(max) => attempts < *max,
        }
    }
}

/// Immutable per-session parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// ARQ response timeout per transmission attempt.
    pub timeout: Duration,
    /// Obfuscation key byte applied to DATA payloads.
    pub key: u8,
    /// Retry bound for the sender role.
    pub retry: RetryPolicy,
}

impl Default for SessionConfig {
    /// The reference configuration: 1 s timeout, key `0xAA`, unlimited
    /// retries.
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            key: DEFAULT_KEY,
            retry: RetryPolicy::default(),
        }
    }
}

impl SessionConfig {
    /// Create a config with the given timeout and key, unlimited retries.
    pub fn new(timeout: Duration, key: u8) -> Self {
        Self {
            timeout,
            key,
            retry: RetryPolicy::Unlimited,
        }
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Sender-role transmit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SenderState {
    /// Current transmit sequence bit; flips once per acknowledged chunk.
    pub sequence: SequenceBit,
}

/// Receiver-role state: the expected sequence bit plus the peer binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReceiverState {
    /// Sequence bit the next in-order DATA frame must carry.
    pub expected: SequenceBit,
    /// Bound peer, established by the first datagram received and fixed
    /// until the session is reset. While bound, datagrams from any other
    /// source are discarded without reply.
    pub peer: Option<SocketAddr>,
}

impl ReceiverState {
    /// Bind to `addr` if unbound, then report whether `addr` is the bound
    /// peer.
    pub fn admit(&mut self, addr: SocketAddr) -> bool {
        match self.peer {
            None => {
                self.peer = Some(addr);
                true
            }
            Some(bound) => bound == addr,
        }
    }
}
