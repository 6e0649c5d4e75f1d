//! The entropy coder backing both compression modes (spec §4.2).
//!
//! The reference design calls for LZFSE or "any equivalent general-purpose
//! coder... that meets the round-trip law on arbitrary byte inputs" (spec
//! §4.2). GitFlix uses its own LZ4 block codec for that role — the same
//! `compress_default`/`decompress_safe` pair the teacher crate ported from
//! the reference LZ4 implementation — rather than pulling in a second
//! compression dependency for a need the crate already satisfies in-house
//! (spec §4.2a).

use crate::block::compress::{compress_bound, compress_default, Lz4Error};
use crate::block::decompress_api::decompress_safe;
use crate::error::GitFlixError;

/// Entropy-codes `data`, returning a self-contained byte stream.
///
/// Empty input encodes to an empty stream — the LZ4 block format has no
/// meaningful zero-length token, so the edge case is short-circuited here
/// rather than passed through the codec.
pub fn entropy_encode(data: &[u8]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }
    let bound = compress_bound(data.len() as i32);
    let mut dst = vec![0u8; bound.max(0) as usize];
    match compress_default(data, &mut dst) {
        Ok(written) => {
            dst.truncate(written);
            dst
        }
        Err(Lz4Error::OutputTooSmall) | Err(Lz4Error::InputTooLarge) => {
            // compress_bound already guarantees enough room for any input
            // within LZ4_MAX_INPUT_SIZE; this path only triggers for inputs
            // larger than a single frame could ever be.
            panic!("entropy_encode: input exceeds the block codec's maximum size");
        }
    }
}

/// Entropy-decodes `payload`, expecting exactly `expected_len` output bytes.
///
/// Returns [`GitFlixError::DecompressError`] if the underlying codec fails or
/// the decoded length does not match `expected_len`.
pub fn entropy_decode(
    payload: &[u8],
    expected_len: usize,
    frame_number: u32,
) -> Result<Vec<u8>, GitFlixError> {
    if expected_len == 0 {
        return if payload.is_empty() {
            Ok(Vec::new())
        } else {
            Err(GitFlixError::DecompressError {
                frame_number,
                detail: "non-empty payload for zero-length output",
            })
        };
    }
    let mut dst = vec![0u8; expected_len];
    match decompress_safe(payload, &mut dst) {
        Ok(written) if written == expected_len => Ok(dst),
        Ok(_) => Err(GitFlixError::DecompressError {
            frame_number,
            detail: "decoded length mismatch",
        }),
        Err(_) => Err(GitFlixError::DecompressError {
            frame_number,
            detail: "entropy decoder failed",
        }),
    }
}
