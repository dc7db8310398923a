//! Frame encoding and decoding for the LOCKSTEP wire format.
//!
//! # Wire format
//!
//! Every datagram carries exactly one 21-byte frame:
//!
//! ```text
//! offset 0  : sequence    (1 byte, 0 or 1)
//! offset 1  : kind        (1 byte: 1=DATA, 2=ACK, 3=NAK)
//! offset 2  : payload     (16 bytes, zero-padded)
//! offset 18 : crc         (2 bytes LE, CRC-16/IBM over bytes 0..18)
//! offset 20 : terminator  (1 byte, 0x7E)
//! ```
//!
//! Decoding never fails with an error: any validation problem yields
//! [`DecodedFrame::Corrupt`] so the ARQ loop can treat corruption as
//! ordinary control flow instead of an exceptional path.

use thiserror::Error;

use super::crc::Crc16Ibm;
use crate::core::constants::{CRC_OFFSET, FRAME_SIZE, HEADER_SIZE, PAYLOAD_CAPACITY, TERMINATOR};

/// The alternating sequence bit distinguishing consecutive data units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SequenceBit(u8);

impl SequenceBit {
    /// Sequence bit 0 (the initial value on both sides).
    pub const ZERO: Self = Self(0);

    /// Sequence bit 1.
    pub const ONE: Self = Self(1);

    /// Parse a sequence bit from its wire byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 | 1 => Some(Self(byte)),
            _ => None,
        }
    }

    /// Convert to the wire byte.
    pub fn as_byte(self) -> u8 {
        self.0
    }

    /// The opposite bit.
    pub fn flipped(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Flip in place. Called once per successfully acknowledged data unit.
    pub fn flip(&mut self) {
        self.0 ^= 1;
    }
}

/// Frame kind identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FrameKind {
    /// Application data, obfuscated payload.
    Data = 1,
    /// Positive acknowledgment, empty payload.
    Ack = 2,
    /// Negative acknowledgment (corrupt frame seen), empty payload.
    Nak = 3,
}

impl FrameKind {
    /// Parse a frame kind from its wire byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Data),
            2 => Some(Self::Ack),
            3 => Some(Self::Nak),
            _ => None,
        }
    }

    /// Convert to the wire byte.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// A complete protocol frame: header fields plus fixed-capacity payload.
///
/// Constructed immediately before each send and decoded afresh from every
/// received datagram; never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Alternating sequence bit.
    pub sequence: SequenceBit,
    /// Frame kind.
    pub kind: FrameKind,
    /// Payload, zero-padded to capacity. All zeros for ACK/NAK.
    pub payload: [u8; PAYLOAD_CAPACITY],
}

impl Frame {
    /// Build a DATA frame, zero-padding `payload` to capacity.
    ///
    /// Fails when `payload` exceeds the fixed capacity. This is a local
    /// precondition violation, never a wire condition.
    pub fn data(sequence: SequenceBit, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > PAYLOAD_CAPACITY {
            return Err(FrameError::PayloadTooLarge {
                len: payload.len(),
                capacity: PAYLOAD_CAPACITY,
            });
        }
        let mut padded = [0u8; PAYLOAD_CAPACITY];
        padded[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            sequence,
            kind: FrameKind::Data,
            payload: padded,
        })
    }

    /// Build an ACK control frame.
    pub fn ack(sequence: SequenceBit) -> Self {
        Self {
            sequence,
            kind: FrameKind::Ack,
            payload: [0u8; PAYLOAD_CAPACITY],
        }
    }

    /// Build a NAK control frame.
    pub fn nak(sequence: SequenceBit) -> Self {
        Self {
            sequence,
            kind: FrameKind::Nak,
            payload: [0u8; PAYLOAD_CAPACITY],
        }
    }

    /// Serialize to the 21-byte wire form.
    pub fn encode(&self) -> [u8; FRAME_SIZE] {
        let mut buf = [0u8; FRAME_SIZE];
        buf[0] = self.sequence.as_byte();
        buf[1] = self.kind.as_byte();
        buf[HEADER_SIZE..CRC_OFFSET].copy_from_slice(&self.payload);
        let crc = Crc16Ibm::apply(&buf[..CRC_OFFSET]);
        buf[CRC_OFFSET..CRC_OFFSET + 2].copy_from_slice(&crc);
        buf[FRAME_SIZE - 1] = TERMINATOR;
        buf
    }

    /// Parse a received datagram.
    ///
    /// Validates the framing (length and terminator) before the CRC, then
    /// the header fields. Never panics and never returns an error: all
    /// failures become [`DecodedFrame::Corrupt`] with best-effort
    /// diagnostics.
    pub fn decode(raw: &[u8]) -> DecodedFrame {
        let sequence = raw.first().copied().and_then(SequenceBit::from_byte);
        let kind = raw.get(1).copied().and_then(FrameKind::from_byte);
        let corrupt = |cause: CorruptionCause| {
            DecodedFrame::Corrupt(CorruptFrame {
                sequence,
                kind,
                cause,
            })
        };

        if raw.len() != FRAME_SIZE {
            return corrupt(CorruptionCause::BadLength);
        }
        if raw[FRAME_SIZE - 1] != TERMINATOR {
            return corrupt(CorruptionCause::MissingTerminator);
        }
        let wire_crc = u16::from_le_bytes([raw[CRC_OFFSET], raw[CRC_OFFSET + 1]]);
        if !Crc16Ibm::validate(&raw[..CRC_OFFSET], wire_crc) {
            return corrupt(CorruptionCause::CrcMismatch);
        }
        let (Some(sequence), Some(kind)) = (sequence, kind) else {
            return corrupt(CorruptionCause::MalformedHeader);
        };

        let mut payload = [0u8; PAYLOAD_CAPACITY];
        payload.copy_from_slice(&raw[HEADER_SIZE..CRC_OFFSET]);
        DecodedFrame::Valid(Frame {
            sequence,
            kind,
            payload,
        })
    }
}

/// Outcome of decoding a received datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedFrame {
    /// The frame passed framing, CRC, and header validation.
    Valid(Frame),
    /// The datagram failed validation; the ARQ loop treats it as noise.
    Corrupt(CorruptFrame),
}

impl DecodedFrame {
    /// Whether this decode failed validation.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }

    /// The frame, when valid.
    pub fn valid(&self) -> Option<&Frame> {
        match self {
            Self::Valid(frame) => Some(frame),
            Self::Corrupt(_) => None,
        }
    }
}

/// Diagnostics salvaged from a datagram that failed validation.
///
/// `sequence` and `kind` are best-effort reads of the header bytes. They
/// MUST NOT be trusted for protocol decisions; they exist for logging and
/// test assertions only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorruptFrame {
    /// Sequence bit, when the first byte happened to parse.
    pub sequence: Option<SequenceBit>,
    /// Frame kind, when the second byte happened to parse.
    pub kind: Option<FrameKind>,
    /// Which validation step failed.
    pub cause: CorruptionCause,
}

/// Why a datagram failed frame validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptionCause {
    /// Datagram length is not the fixed frame size.
    BadLength,
    /// Final byte is not the frame terminator.
    MissingTerminator,
    /// CRC over header and payload did not match.
    CrcMismatch,
    /// Valid CRC but an unknown sequence or kind byte.
    MalformedHeader,
}

/// Errors from frame construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// Payload exceeds the fixed frame capacity.
    #[error("payload too large: {len} bytes exceeds capacity {capacity}")]
    PayloadTooLarge {
        /// Offered payload length.
        len: usize,
        /// Fixed frame capacity.
        capacity: usize,
    },
}
