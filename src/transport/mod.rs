//! LOCKSTEP Protocol - Transport Layer
//!
//! Everything that touches bytes on the wire:
//!
//! - **Frame encoding/decoding**: [`Frame`], [`DecodedFrame`] and the fixed
//!   21-byte wire format
//! - **Integrity**: [`Crc16Ibm`] checksumming
//! - **Payload obfuscation**: [`XorCipher`] (a placeholder, not security)
//! - **Async sockets**: [`LockstepSocket`] wrapper for tokio UDP
//!
//! # Architecture
//!
//! The transport layer sits below the ARQ engine. It handles framing and
//! raw datagram I/O while remaining agnostic to sequence-bit semantics.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Message Layer                   │
//! │   fragmentation / reassembly            │
//! ├─────────────────────────────────────────┤
//! │         ARQ Engine                      │
//! │   sequence bits, retries, binding       │
//! ├─────────────────────────────────────────┤
//! │         Transport Layer                 │  ← This module
//! │   frames, CRC, cipher, sockets          │
//! ├─────────────────────────────────────────┤
//! │              UDP                        │
//! └─────────────────────────────────────────┘
//! ```

mod cipher;
mod crc;
mod frame;
mod socket;

pub use cipher::*;
pub use crc::*;
pub use frame::*;
pub use socket::*;
