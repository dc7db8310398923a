//! # LOCKSTEP Protocol
//!
//! A Stop-and-Wait ARQ reliability layer for unreliable, unordered datagram
//! channels such as UDP. It provides:
//!
//! - **Reliability**: exactly one unacknowledged DATA frame in flight,
//!   retransmitted until acknowledged
//! - **Integrity**: CRC-16/IBM over every frame, validated behind a fixed
//!   terminator byte
//! - **Duplicate detection**: a single alternating sequence bit gives
//!   at-most-once delivery with only two distinguishable states
//! - **Messages**: fragmentation and reassembly of application messages on
//!   top of fixed-capacity single-frame exchanges
//! - **Testability**: a probabilistic fault injector (loss, duplication,
//!   corruption, ACK delay) wired into the engine as a strategy
//!
//! ## Modules
//!
//! - [`core`]: Constants, error types, and the datagram link trait
//! - [`transport`]: Wire frame codec, CRC, payload obfuscation, UDP sockets
//! - [`fault`]: Fault-injection harness for simulated lossy links
//! - [`arq`]: The Stop-and-Wait engine, session state, and message layer
//!
//! ## Example Usage
//!
//! ```no_run
//! use lockstep_arq::prelude::*;
//!
//! # async fn run() -> Result<(), LockstepError> {
//! // Client side: bind a socket and drive a message to a known peer.
//! let socket = LockstepSocket::bind("127.0.0.1:0".parse().unwrap()).await?;
//! let peer = "127.0.0.1:4466".parse().unwrap();
//! let mut engine = ArqEngine::connect(
//!     socket,
//!     peer,
//!     SessionConfig::default(),
//!     FaultInjector::passthrough(),
//! );
//! engine.send_message(b"Hola servidor").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod arq;
pub mod core;
pub mod fault;
pub mod transport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::arq::{
        ArqEngine, ArqError, ReceiverState, RetryPolicy, SenderState, SessionConfig,
    };
    pub use crate::core::constants;
    pub use crate::core::{DatagramLink, LockstepError};
    pub use crate::fault::{FaultInjector, FaultProfile};
    pub use crate::transport::{
        CorruptFrame, CorruptionCause, Crc16Ibm, DecodedFrame, Frame, FrameError, FrameKind,
        LockstepSocket, LockstepSocketBuilder, SequenceBit, XorCipher,
    };
}

// Re-export commonly used items at crate root
pub use crate::arq::{ArqEngine, ArqError, RetryPolicy, SessionConfig};
pub use crate::core::{DatagramLink, LockstepError};
pub use crate::fault::{FaultInjector, FaultProfile};
pub use crate::transport::{DecodedFrame, Frame, FrameKind, LockstepSocket, SequenceBit};
