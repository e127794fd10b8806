// src/common/checksum.rs

use super::error::Pms5003Error;

/// Calculates the PMS5003 additive checksum over `data`.
///
/// The device sums every byte of the frame up to, but not including, the
/// two checksum bytes. A full data frame sums to at most `30 * 0xFF`, so the
/// 16-bit accumulator never wraps on real frames; wrapping arithmetic only
/// keeps arbitrary input from panicking.
#[inline]
pub fn calculate_checksum(data: &[u8]) -> u16 {
    data.iter()
        .fold(0u16, |acc, &byte| acc.wrapping_add(u16::from(byte)))
}

/// Checksum over a frame split into its header and payload parts.
#[inline]
pub fn calculate_frame_checksum(header: &[u8], payload_without_checksum: &[u8]) -> u16 {
    calculate_checksum(header).wrapping_add(calculate_checksum(payload_without_checksum))
}

/// Returns `true` when `claimed` matches the checksum of header plus payload.
///
/// `header` is the start marker and the length field as received,
/// `payload_without_checksum` excludes the two trailing checksum bytes.
pub fn verify(header: &[u8], payload_without_checksum: &[u8], claimed: u16) -> bool {
    calculate_frame_checksum(header, payload_without_checksum) == claimed
}

/// Encodes a checksum as it appears on the wire (big-endian).
pub fn encode_checksum(checksum: u16) -> [u8; 2] {
    checksum.to_be_bytes()
}

/// Decodes the two big-endian checksum bytes at the end of a frame.
///
/// # Panics
///
/// Panics if `checksum_bytes` does not have a length of exactly 2.
pub fn decode_checksum(checksum_bytes: &[u8]) -> u16 {
    assert_eq!(checksum_bytes.len(), 2, "Checksum must be 2 bytes long");
    u16::from_be_bytes([checksum_bytes[0], checksum_bytes[1]])
}

/// Verifies a payload whose last two bytes are the claimed checksum.
///
/// # Returns
///
/// * `Ok(())` if the checksum is valid.
/// * `Err(Pms5003Error::ChecksumMismatch)` otherwise, including payloads too
///   short to hold a checksum at all.
pub fn verify_payload<E>(header: &[u8], payload_with_checksum: &[u8]) -> Result<(), Pms5003Error<E>>
where
    E: core::fmt::Debug,
{
    if payload_with_checksum.len() < 2 {
        return Err(Pms5003Error::ChecksumMismatch { expected: 0, calculated: calculate_checksum(header) });
    }
    let data_len = payload_with_checksum.len() - 2;
    let data_part = &payload_with_checksum[..data_len];
    let claimed = decode_checksum(&payload_with_checksum[data_len..]);

    let calculated = calculate_frame_checksum(header, data_part);
    if calculated == claimed {
        Ok(())
    } else {
        Err(Pms5003Error::ChecksumMismatch { expected: claimed, calculated })
    }
}
