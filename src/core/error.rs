//! Error types for the LOCKSTEP protocol.
//!
//! Recoverable wire conditions (corruption, duplicates, timeouts within the
//! retry budget) never appear here: the engine treats them as ordinary
//! control flow. Only construction failures, exhausted retry policies, and
//! link failures surface as errors.

use thiserror::Error;

use crate::arq::ArqError;
use crate::transport::FrameError;

/// Top-level LOCKSTEP errors.
#[derive(Debug, Error)]
pub enum LockstepError {
    /// Frame construction error.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// ARQ engine error.
    #[error("arq error: {0}")]
    Arq(#[from] ArqError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
