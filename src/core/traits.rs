//! Core traits for the LOCKSTEP protocol.

use std::io;
use std::net::SocketAddr;

/// A bidirectional datagram channel the ARQ engine runs over.
///
/// # Requirements
///
/// - Datagram boundaries MUST be preserved: one frame per datagram. A
///   byte-stream transport needs an external framing adapter before it can
///   carry LOCKSTEP frames.
/// - Delivery may be unreliable and unordered; the engine assumes nothing
///   beyond boundary preservation.
///
/// Implemented by [`crate::transport::LockstepSocket`] for real UDP and by
/// in-memory links in tests.
#[allow(async_fn_in_trait)]
pub trait DatagramLink {
    /// Send one datagram to the given address.
    async fn send_to(&self, data: &[u8], addr: SocketAddr) -> io::Result<usize>;

    /// Receive one datagram into `buf`, returning its length and source
    /// address. Suspends until a datagram arrives.
    async fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)>;
}
