//! DELTA compression mode (spec §4.2.2) — a byte-granular run-length delta
//! transform against a predecessor frame, then entropy-coded.

use crate::codec::entropy::{entropy_decode, entropy_encode};
use crate::error::GitFlixError;
use crate::raw_frame::RawFrame;

const CMD_SAME: u8 = 0x00;
const CMD_DIFF: u8 = 0x01;
const MAX_RUN: usize = 255;

/// `true` if any byte-wise difference between `prev` and `cur` cannot be
/// represented as a signed 8-bit delta without clamping (spec §4.2.2's
/// "Clamping" rule). When this returns `true` the caller must fall back to
/// RAW for the whole frame — there is no partial-delta mode.
fn needs_clamp_fallback(prev: &[u8], cur: &[u8]) -> bool {
    prev.iter().zip(cur.iter()).any(|(&p, &c)| {
        let diff = i16::from(c) - i16::from(p);
        !(-128..=127).contains(&diff)
    })
}

/// The run-length delta transform described in spec §4.2.2. `prev` and `cur`
/// must have equal length. Output size is bounded by `2 * N`.
fn rle_encode(prev: &[u8], cur: &[u8]) -> Vec<u8> {
    let n = prev.len();
    let mut out = Vec::with_capacity(n * 2 / 8 + 2);
    let mut i = 0;
    while i < n {
        let same_run = (0..n - i).take(MAX_RUN).take_while(|&k| cur[i + k] == prev[i + k]).count();
        if same_run > 0 {
            out.push(CMD_SAME);
            out.push(same_run as u8);
            i += same_run;
        } else {
            let diff_run = (0..n - i).take(MAX_RUN).take_while(|&k| cur[i + k] != prev[i + k]).count();
            out.push(CMD_DIFF);
            out.push(diff_run as u8);
            for k in 0..diff_run {
                let delta = cur[i + k].wrapping_sub(prev[i + k]);
                out.push(delta);
            }
            i += diff_run;
        }
    }
    out
}

/// Replays a run-length delta command stream against `prev`, reconstructing
/// `cur`. Fails with [`GitFlixError::DecompressError`] on a truncated or
/// out-of-range command stream.
fn rle_decode(commands: &[u8], prev: &[u8], frame_number: u32) -> Result<Vec<u8>, GitFlixError> {
    let mut cur = prev.to_vec();
    let mut cursor = 0usize;
    let mut pos = 0usize;
    let truncated = || GitFlixError::DecompressError {
        frame_number,
        detail: "truncated delta command stream",
    };

    while pos < commands.len() {
        let cmd = commands[pos];
        let len = *commands.get(pos + 1).ok_or_else(truncated)? as usize;
        pos += 2;
        match cmd {
            CMD_SAME => {
                if cursor + len > cur.len() {
                    return Err(truncated());
                }
                cursor += len;
            }
            CMD_DIFF => {
                if pos + len > commands.len() || cursor + len > cur.len() {
                    return Err(truncated());
                }
                for k in 0..len {
                    let delta = commands[pos + k] as i8;
                    let reconstructed = i16::from(prev[cursor + k]) + i16::from(delta);
                    cur[cursor + k] = reconstructed.clamp(0, 255) as u8;
                }
                pos += len;
                cursor += len;
            }
            _ => {
                return Err(GitFlixError::DecompressError {
                    frame_number,
                    detail: "unknown delta command opcode",
                })
            }
        }
    }
    Ok(cur)
}

/// Encodes `cur` as a DELTA frame against `prev`.
///
/// Returns `None` when any byte's delta would require clamping (spec
/// §4.2.3's mode-selection policy: the caller must fall back to RAW for this
/// frame). `prev` and `cur` must have equal length; callers are expected to
/// have already matched them by dimensions.
///
/// The entropy coder needs an exact expected length to decode against, but
/// the command stream's length varies frame to frame (it is at most `2N`,
/// not exactly `2N`). The payload is therefore a 4-byte little-endian
/// command-stream length followed by the entropy-coded commands.
pub fn encode_delta(prev: &[u8], cur: &[u8]) -> Option<Vec<u8>> {
    debug_assert_eq!(prev.len(), cur.len());
    if needs_clamp_fallback(prev, cur) {
        return None;
    }
    let commands = rle_encode(prev, cur);
    let mut out = Vec::with_capacity(4 + commands.len());
    out.extend_from_slice(&(commands.len() as u32).to_le_bytes());
    out.extend_from_slice(&entropy_encode(&commands));
    Some(out)
}

/// Decodes a DELTA payload against `prev`, per spec §4.2.2's preconditions.
pub fn decode_delta(
    payload: &[u8],
    width: u32,
    height: u32,
    channels: u32,
    frame_number: u32,
    prev: Option<&RawFrame>,
) -> Result<Vec<u8>, GitFlixError> {
    let prev = prev.ok_or(GitFlixError::MissingReference { frame_number })?;
    if prev.width != width || prev.height != height || prev.channels != channels {
        return Err(GitFlixError::DimensionMismatch { frame_number });
    }
    if payload.len() < 4 {
        return Err(GitFlixError::DecompressError {
            frame_number,
            detail: "delta payload shorter than its length prefix",
        });
    }
    let commands_len = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]) as usize;
    let commands = entropy_decode(&payload[4..], commands_len, frame_number)?;
    rle_decode(&commands, &prev.pixels, frame_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_roundtrip(prev: &[u8], cur: &[u8]) -> Vec<u8> {
        let payload = encode_delta(prev, cur).expect("no clamp fallback expected");
        let prev_frame = RawFrame::new(1, (prev.len() / 3) as u32, 3, prev.to_vec());
        decode_delta(&payload, 1, (cur.len() / 3) as u32, 3, 0, Some(&prev_frame)).unwrap()
    }

    #[test]
    fn identical_frames_are_all_same_runs() {
        let prev = vec![0x80u8; 192];
        let cur = prev.clone();
        let commands = rle_encode(&prev, &cur);
        // 192 bytes, capped at 255 per run -> one run of 192.
        assert_eq!(commands, vec![CMD_SAME, 192]);
        let decoded = record_roundtrip(&prev, &cur);
        assert_eq!(decoded, cur);
    }

    #[test]
    fn small_diff_reconstructs_exactly() {
        let mut prev = vec![100u8; 48];
        let mut cur = prev.clone();
        cur[5] = 110;
        let decoded = record_roundtrip(&prev, &cur);
        assert_eq!(decoded, cur);
        prev[5] = 100;
        assert_eq!(decoded[5], 110);
    }

    #[test]
    fn overflowing_delta_triggers_raw_fallback() {
        let prev = vec![0u8; 48];
        let mut cur = vec![0u8; 48];
        cur.fill(200);
        assert!(needs_clamp_fallback(&prev, &cur));
        assert!(encode_delta(&prev, &cur).is_none());
    }

    #[test]
    fn missing_reference_is_rejected() {
        let err = decode_delta(&[], 4, 4, 3, 2, None).unwrap_err();
        assert!(matches!(err, GitFlixError::MissingReference { frame_number: 2 }));
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let prev = RawFrame::new(4, 4, 3, vec![0u8; 48]);
        let err = decode_delta(&[], 8, 8, 3, 5, Some(&prev)).unwrap_err();
        assert!(matches!(err, GitFlixError::DimensionMismatch { frame_number: 5 }));
    }

    #[test]
    fn run_longer_than_255_splits_into_multiple_commands() {
        let prev = vec![1u8; 600];
        let cur = prev.clone();
        let commands = rle_encode(&prev, &cur);
        // 600 = 255 + 255 + 90
        assert_eq!(commands, vec![CMD_SAME, 255, CMD_SAME, 255, CMD_SAME, 90]);
    }
}
