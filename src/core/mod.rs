//! LOCKSTEP Protocol - Core Layer
//!
//! Constants fixed by the wire format, the crate-level error type, and the
//! [`DatagramLink`] trait that abstracts the channel the ARQ engine runs
//! over.

pub mod constants;

mod error;
mod traits;

pub use error::*;
pub use traits::*;
