//! Stop-and-Wait ARQ engine.
//!
//! Drives the sender (DATA → wait-ACK → retry) and receiver
//! (wait-DATA → validate → ACK/NAK) loops over a datagram link. Exactly one
//! data unit is in flight at a time; the alternating sequence bit provides
//! duplicate detection and at-most-once delivery.
//!
//! No failure path is fatal: corruption, duplicates, and timeouts within
//! the retry budget are ordinary control flow. The engine only errors on
//! local precondition violations, an exhausted retry policy, or a broken
//! link.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::time::{Instant, sleep, timeout_at};

use crate::core::DatagramLink;
use crate::core::constants::{CONTROL_RECV_BUFFER_SIZE, DATA_RECV_BUFFER_SIZE, FRAME_SIZE, PAYLOAD_CAPACITY};
use crate::fault::FaultInjector;
use crate::transport::{DecodedFrame, Frame, FrameError, FrameKind, SequenceBit, XorCipher};

use super::message::{fragment, is_final_chunk, reassemble};
use super::session::{ReceiverState, SenderState, SessionConfig};

/// Errors surfaced by the ARQ engine.
#[derive(Debug, Error)]
pub enum ArqError {
    /// Frame construction failed (payload exceeded capacity). A local
    /// programming error, never a wire condition.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// The bounded retry policy ran out of attempts without a matching
    /// ACK.
    #[error("retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        /// Transmissions made before giving up.
        attempts: u32,
    },

    /// The engine has no peer address to send to: it was created with
    /// [`ArqEngine::accept`] and no datagram has bound the session yet.
    #[error("no peer bound")]
    NotBound,

    /// The underlying datagram link failed.
    #[error("link error: {0}")]
    Link(#[from] std::io::Error),
}

/// The Stop-and-Wait ARQ engine.
///
/// Owns the datagram link exclusively along with the per-session sequence
/// state, address binding, cipher, and fault injector. Single-threaded and
/// blocking by design: every receive suspends until a datagram arrives or
/// the timeout elapses, and one engine instance serves exactly one
/// correspondent at a time.
#[derive(Debug)]
pub struct ArqEngine<L: DatagramLink> {
    link: L,
    /// Known correspondent for the sender role (`None` until the receiver
    /// role binds one).
    peer: Option<SocketAddr>,
    config: SessionConfig,
    cipher: XorCipher,
    faults: FaultInjector,
    tx: SenderState,
    rx: ReceiverState,
}

impl<L: DatagramLink> ArqEngine<L> {
    /// Create an engine bound to a known correspondent (client side).
    pub fn connect(link: L, peer: SocketAddr, config: SessionConfig, faults: FaultInjector) -> Self {
        let cipher = XorCipher::new(config.key);
        Self {
            link,
            peer: Some(peer),
            config,
            cipher,
            faults,
            tx: SenderState::default(),
            rx: ReceiverState::default(),
        }
    }

    /// Create an engine that waits for its correspondent's first datagram
    /// (server side).
    pub fn accept(link: L, config: SessionConfig, faults: FaultInjector) -> Self {
        let cipher = XorCipher::new(config.key);
        Self {
            link,
            peer: None,
            config,
            cipher,
            faults,
            tx: SenderState::default(),
            rx: ReceiverState::default(),
        }
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current transmit sequence bit.
    pub fn tx_sequence(&self) -> SequenceBit {
        self.tx.sequence
    }

    /// Sequence bit the receiver role expects next.
    pub fn rx_expected(&self) -> SequenceBit {
        self.rx.expected
    }

    /// The correspondent's address: the configured peer, or the address
    /// the receiver role bound from its first datagram.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer.or(self.rx.peer)
    }

    /// Get a reference to the underlying link.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// End the session: clear both sequence bits, the peer binding, and
    /// any ACK still parked in the delay slot.
    pub fn reset(&mut self) {
        self.tx = SenderState::default();
        self.rx = ReceiverState::default();
        self.faults.clear_delayed_ack();
    }

    // ------------------------- sender role -------------------------

    /// Deliver one application chunk reliably.
    ///
    /// Builds a DATA frame with the current transmit sequence and the
    /// obfuscated payload, then retransmits it until a matching ACK
    /// arrives or the retry policy gives up. On success the sequence bit
    /// has flipped exactly once.
    pub async fn send_chunk(&mut self, data: &[u8]) -> Result<(), ArqError> {
        let dest = self.peer_addr().ok_or(ArqError::NotBound)?;
        let mut frame = Frame::data(self.tx.sequence, data)?;
        // Mask after padding so the receiver's whole-payload unmask
        // restores the zero tail exactly.
        self.cipher.transform_in_place(&mut frame.payload);
        let wire = frame.encode();
        let mut attempts: u32 = 0;

        loop {
            if !self.config.retry.allows(attempts) {
                return Err(ArqError::RetriesExhausted { attempts });
            }
            attempts += 1;
            self.transmit_data(&wire, dest).await?;
            if self.await_ack().await? {
                self.tx.sequence.flip();
                return Ok(());
            }
            // Timeout or NAK: retransmit the same frame, same sequence.
        }
    }

    /// Put one DATA frame on the wire, subject to fault injection.
    async fn transmit_data(&mut self, wire: &[u8; FRAME_SIZE], dest: SocketAddr) -> Result<(), ArqError> {
        if self.faults.should_drop() {
            // Lost in transit; the retry loop recovers.
            return Ok(());
        }
        if self.faults.should_duplicate() {
            self.link.send_to(wire, dest).await?;
        }
        if let Some(corrupted) = self.faults.maybe_corrupt(wire) {
            self.link.send_to(&corrupted, dest).await?;
        } else {
            self.link.send_to(wire, dest).await?;
        }
        Ok(())
    }

    /// Wait for a response within one timeout budget.
    ///
    /// Returns `Ok(true)` on a matching ACK and `Ok(false)` when the
    /// caller should retransmit (budget exhausted, or a matching NAK).
    /// Corrupt responses and control frames for the other sequence are
    /// noise consumed from the same budget. Responses are matched by
    /// sequence, not source address.
    async fn await_ack(&mut self) -> Result<bool, ArqError> {
        let deadline = Instant::now() + self.config.timeout;
        let mut buf = [0u8; CONTROL_RECV_BUFFER_SIZE];

        loop {
            let (len, _from) = match timeout_at(deadline, self.link.recv_from(&mut buf)).await {
                Ok(received) => received?,
                Err(_) => return Ok(false),
            };
            let DecodedFrame::Valid(frame) = Frame::decode(&buf[..len]) else {
                continue;
            };
            if frame.sequence != self.tx.sequence {
                // Stale control frame for the other sequence.
                continue;
            }
            match frame.kind {
                FrameKind::Ack => return Ok(true),
                FrameKind::Nak => return Ok(false),
                FrameKind::Data => continue,
            }
        }
    }

    // ------------------------ receiver role ------------------------

    /// Wait for one inbound frame and process it.
    ///
    /// Returns `Some(payload)` (the full zero-padded chunk) when an
    /// in-order DATA frame was delivered and acknowledged, `None` when the
    /// frame was handled internally: corrupt frames draw a NAK, and
    /// duplicates of an already-delivered frame draw an ACK so the peer
    /// can advance, but are not redelivered.
    pub async fn recv_chunk(&mut self) -> Result<Option<Vec<u8>>, ArqError> {
        let mut buf = [0u8; DATA_RECV_BUFFER_SIZE];
        let (len, from) = loop {
            let (len, from) = self.link.recv_from(&mut buf).await?;
            if self.rx.admit(from) {
                break (len, from);
            }
            // Datagram from an unbound-for source: discard without reply.
        };

        match Frame::decode(&buf[..len]) {
            DecodedFrame::Corrupt(_) => {
                let nak = Frame::nak(self.rx.expected).encode();
                self.link.send_to(&nak, from).await?;
                Ok(None)
            }
            DecodedFrame::Valid(frame) if frame.kind != FrameKind::Data => {
                // A stray control frame is not deliverable; ignore it.
                Ok(None)
            }
            DecodedFrame::Valid(frame) if frame.sequence != self.rx.expected => {
                // Duplicate of an already-delivered frame: the peer missed
                // our ACK. Answer ACK, not NAK, so it can advance; do not
                // redeliver.
                let ack = Frame::ack(frame.sequence).encode();
                self.link.send_to(&ack, from).await?;
                Ok(None)
            }
            DecodedFrame::Valid(frame) => {
                let payload = self.cipher.transform(&frame.payload);
                self.send_ack(frame.sequence, from).await?;
                self.rx.expected.flip();
                Ok(Some(payload))
            }
        }
    }

    /// Acknowledge a delivered frame, subject to fault injection.
    ///
    /// Any ACK still held from an earlier park is flushed first (after its
    /// configured delay), then the new ACK is either sent immediately or
    /// parked in the one-frame delay slot to be flushed by a later call.
    async fn send_ack(&mut self, sequence: SequenceBit, dest: SocketAddr) -> Result<(), ArqError> {
        let held = self.faults.take_delayed_ack();

        let ack = Frame::ack(sequence).encode();
        if self.faults.should_duplicate() {
            self.link.send_to(&ack, dest).await?;
        }
        if !self.faults.buffer_ack(ack) {
            self.link.send_to(&ack, dest).await?;
        }

        if let Some((frame, delay)) = held {
            sleep(delay).await;
            self.link.send_to(&frame, dest).await?;
        }
        Ok(())
    }

    // ------------------------ message layer ------------------------

    /// Deliver a whole application message: fragment at payload capacity
    /// and drive [`send_chunk`](Self::send_chunk) once per chunk, in
    /// order.
    pub async fn send_message(&mut self, data: &[u8]) -> Result<(), ArqError> {
        for chunk in fragment(data, PAYLOAD_CAPACITY) {
            self.send_chunk(&chunk).await?;
        }
        Ok(())
    }

    /// Receive a whole application message: collect delivered chunks until
    /// the end-marker chunk arrives, then reassemble.
    pub async fn recv_message(&mut self) -> Result<Vec<u8>, ArqError> {
        let mut chunks = Vec::new();
        loop {
            let Some(chunk) = self.recv_chunk().await? else {
                continue;
            };
            let done = is_final_chunk(&chunk);
            chunks.push(chunk);
            if done {
                return Ok(reassemble(&chunks));
            }
        }
    }
}
