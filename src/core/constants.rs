//! Protocol constants for the LOCKSTEP wire format.
//!
//! These values are fixed by the protocol and MUST NOT be changed: both
//! peers must agree on every one of them for frames to validate.

use std::time::Duration;

// =============================================================================
// WIRE FORMAT
// =============================================================================

/// Fixed logical payload capacity of a frame.
///
/// Shorter application chunks are zero-padded to this size; ACK and NAK
/// frames carry an all-zero payload.
pub const PAYLOAD_CAPACITY: usize = 16;

/// Header size: sequence byte + kind byte.
pub const HEADER_SIZE: usize = 2;

/// CRC field size (CRC-16, little-endian on the wire).
pub const CRC_SIZE: usize = 2;

/// Terminator size.
pub const TERMINATOR_SIZE: usize = 1;

/// Byte offset of the CRC field within a frame.
pub const CRC_OFFSET: usize = HEADER_SIZE + PAYLOAD_CAPACITY;

/// Total frame size on the wire (21 bytes).
pub const FRAME_SIZE: usize = HEADER_SIZE + PAYLOAD_CAPACITY + CRC_SIZE + TERMINATOR_SIZE;

/// End-of-frame sentinel byte, validated before the CRC.
pub const TERMINATOR: u8 = 0x7E;

/// Kind byte for a DATA frame.
pub const KIND_DATA: u8 = 1;

/// Kind byte for an ACK frame.
pub const KIND_ACK: u8 = 2;

/// Kind byte for a NAK frame.
pub const KIND_NAK: u8 = 3;

// =============================================================================
// SESSION DEFAULTS
// =============================================================================

/// Default ARQ response timeout per transmission attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Default obfuscation key byte.
pub const DEFAULT_KEY: u8 = 0xAA;

/// Receive buffer size sufficient for control frames (ACK/NAK).
pub const CONTROL_RECV_BUFFER_SIZE: usize = 64;

/// Receive buffer size for data paths.
pub const DATA_RECV_BUFFER_SIZE: usize = 2048;
