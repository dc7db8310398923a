//! LOCKSTEP Protocol - ARQ Layer
//!
//! Implements:
//! - The Stop-and-Wait sender and receiver state machines
//! - Per-session sequence state, peer binding, and retry policy
//! - Message fragmentation and reassembly over single-frame exchanges

mod engine;
mod message;
mod session;

pub use engine::*;
pub use message::*;
pub use session::*;
