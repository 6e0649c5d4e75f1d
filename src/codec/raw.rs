//! RAW compression mode (spec §4.2.1) — entropy-code the pixel stream as-is.

use crate::codec::entropy::{entropy_decode, entropy_encode};
use crate::error::GitFlixError;

/// Entropy-codes a frame's pixel bytes. Equivalent to spec's `encode_raw`.
pub fn encode_raw(raw: &[u8]) -> Vec<u8> {
    entropy_encode(raw)
}

/// Entropy-decodes a RAW payload, failing with [`GitFlixError::DecompressError`]
/// if the decoded length isn't `width * height * channels`.
/// Equivalent to spec's `decode_raw`.
pub fn decode_raw(
    payload: &[u8],
    width: u32,
    height: u32,
    channels: u32,
    frame_number: u32,
) -> Result<Vec<u8>, GitFlixError> {
    let expected = (width as usize) * (height as usize) * (channels as usize);
    entropy_decode(payload, expected, frame_number)
}
