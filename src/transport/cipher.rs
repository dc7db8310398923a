//! XOR payload obfuscation.
//!
//! A byte-wise XOR with a single repeating key byte, applied to DATA
//! payloads only (never to control frames or to the header, CRC, or
//! terminator). The mask covers the full zero-padded payload, so both
//! peers transform the same 16 bytes. The transform is self-inverse:
//! applying it twice restores the input.
//!
//! This is an obfuscation placeholder, not a confidentiality mechanism. Do
//! not treat it as meeting any security requirement.

/// Byte-wise XOR transform with a single repeating key byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorCipher {
    key: u8,
}

impl XorCipher {
    /// Create a cipher with the given key byte.
    pub fn new(key: u8) -> Self {
        Self { key }
    }

    /// Get the key byte.
    pub fn key(&self) -> u8 {
        self.key
    }

    /// Apply the transform. Encryption and decryption are the same
    /// operation.
    pub fn transform(&self, data: &[u8]) -> Vec<u8> {
        data.iter().map(|b| b ^ self.key).collect()
    }

    /// In-place variant of [`transform`](Self::transform) for fixed buffers.
    pub fn transform_in_place(&self, data: &mut [u8]) {
        for b in data {
            *b ^= self.key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involution() {
        for key in [0x00, 0x01, 0xAA, 0xFF] {
            let cipher = XorCipher::new(key);
            let data = b"Hola servidor";
            assert_eq!(cipher.transform(&cipher.transform(data)), data);
        }
    }

    #[test]
    fn test_zero_key_is_identity() {
        let cipher = XorCipher::new(0);
        assert_eq!(cipher.transform(b"unchanged"), b"unchanged");
    }

    #[test]
    fn test_nonzero_key_changes_bytes() {
        let cipher = XorCipher::new(0xAA);
        let out = cipher.transform(b"abc");
        assert_ne!(out, b"abc");
        assert_eq!(out, vec![b'a' ^ 0xAA, b'b' ^ 0xAA, b'c' ^ 0xAA]);
    }

    #[test]
    fn test_in_place_matches_owned() {
        let cipher = XorCipher::new(0x5C);
        let mut buf = *b"in place";
        cipher.transform_in_place(&mut buf);
        assert_eq!(buf.to_vec(), cipher.transform(b"in place"));
    }

    #[test]
    fn test_empty_input() {
        let cipher = XorCipher::new(0xAA);
        assert!(cipher.transform(&[]).is_empty());
    }
}
