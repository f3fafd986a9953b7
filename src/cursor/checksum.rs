//! CRC32 checksum over cursor payloads
//!
//! Detects tokens corrupted in transit or edited by hand. It is not a
//! signature: a client that recomputes the checksum can forge a payload.

use crc32fast::Hasher;

/// Length of the checksum trailer in bytes
pub const CHECKSUM_LEN: usize = 4;

/// Computes a CRC32 checksum over the provided data.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Verifies that the computed checksum matches the expected checksum.
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}

/// Appends the big-endian checksum of `payload` to it.
pub fn seal(mut payload: Vec<u8>) -> Vec<u8> {
    let checksum = compute_checksum(&payload);
    payload.extend_from_slice(&checksum.to_be_bytes());
    payload
}

/// Splits a sealed buffer into its payload, if the trailer matches.
///
/// Returns `None` when the buffer is too short or the checksum differs.
pub fn unseal(sealed: &[u8]) -> Option<&[u8]> {
    if sealed.len() < CHECKSUM_LEN {
        return None;
    }
    let (payload, trailer) = sealed.split_at(sealed.len() - CHECKSUM_LEN);
    let expected = u32::from_be_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    verify_checksum(payload, expected).then_some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_deterministic() {
        let data = b"cursor payload";
        assert_eq!(compute_checksum(data), compute_checksum(data));
    }

    #[test]
    fn test_seal_unseal() {
        let sealed = seal(b"{\"position\":3}".to_vec());
        assert_eq!(sealed.len(), 14 + CHECKSUM_LEN);
        assert_eq!(unseal(&sealed), Some(&b"{\"position\":3}"[..]));
    }

    #[test]
    fn test_unseal_detects_corruption() {
        let mut sealed = seal(vec![0x00, 0x01, 0x02, 0x03, 0x04]);
        sealed[2] ^= 0x01;
        assert_eq!(unseal(&sealed), None);
    }

    #[test]
    fn test_unseal_rejects_short_buffer() {
        assert_eq!(unseal(&[0x01, 0x02]), None);
    }
}
