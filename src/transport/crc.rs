//! CRC-16/IBM integrity checking.
//!
//! Generator polynomial `0xA001` (the reflected form of `0x8005`), initial
//! register `0xFFFF`, bytes processed least-significant-bit first, no final
//! XOR. The frame stores the value little-endian. Both peers must match
//! this bit-for-bit for interoperability.

/// CRC-16/IBM calculator.
///
/// No I/O and no state; all methods are pure functions over byte slices.
pub struct Crc16Ibm;

impl Crc16Ibm {
    /// Generator polynomial (reflected form of `0x8005`).
    pub const POLYNOMIAL: u16 = 0xA001;

    /// Initial register value.
    pub const INITIAL: u16 = 0xFFFF;

    /// Compute the CRC over `data`.
    pub fn compute(data: &[u8]) -> u16 {
        let mut crc = Self::INITIAL;
        for &byte in data {
            crc ^= u16::from(byte);
            for _ in 0..8 {
                if crc & 1 != 0 {
                    crc = (crc >> 1) ^ Self::POLYNOMIAL;
                } else {
                    crc >>= 1;
                }
            }
        }
        crc
    }

    /// Compute the CRC over `data` and return it as little-endian wire bytes.
    pub fn apply(data: &[u8]) -> [u8; 2] {
        Self::compute(data).to_le_bytes()
    }

    /// Check `data` against a received CRC value.
    pub fn validate(data: &[u8], crc: u16) -> bool {
        Self::compute(data) == crc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // Standard check value for poly 0x8005 reflected, init 0xFFFF,
        // no final XOR.
        assert_eq!(Crc16Ibm::compute(b"123456789"), 0x4B37);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Crc16Ibm::compute(&[]), Crc16Ibm::INITIAL);
    }

    #[test]
    fn test_roundtrip() {
        for data in [&b"lockstep"[..], &[0x00, 0xFF, 0x7E], &[0u8; 18]] {
            let crc = Crc16Ibm::compute(data);
            assert!(Crc16Ibm::validate(data, crc));
        }
    }

    #[test]
    fn test_apply_is_little_endian() {
        let data = b"123456789";
        let bytes = Crc16Ibm::apply(data);
        assert_eq!(u16::from_le_bytes(bytes), Crc16Ibm::compute(data));
    }

    #[test]
    fn test_single_bit_sensitivity() {
        let data = b"sensitivity probe".to_vec();
        let crc = Crc16Ibm::compute(&data);

        for byte in 0..data.len() {
            for bit in 0..8 {
                let mut flipped = data.clone();
                flipped[byte] ^= 1 << bit;
                assert!(
                    !Crc16Ibm::validate(&flipped, crc),
                    "flip at byte {byte} bit {bit} went undetected"
                );
            }
        }
    }
}
