//! The Compression Engine (spec §4.2) — RAW and DELTA frame modes over a
//! shared entropy coder, plus the mode-selection policy that picks between
//! them while building a frame's [`FrameRecord`].

pub mod delta;
pub mod entropy;
pub mod raw;

use crate::container::{CompressionType, FrameRecord};
use crate::error::GitFlixError;
use crate::raw_frame::RawFrame;

/// Builds a [`FrameRecord`] for `frame`, choosing DELTA against `prev` when
/// it round-trips losslessly and falling back to RAW otherwise (spec
/// §4.2.3). Frame 0 (no predecessor) is always RAW.
pub fn encode_frame(frame_number: u32, frame: &RawFrame, prev: Option<&RawFrame>) -> FrameRecord {
    let delta_candidate = prev
        .filter(|p| p.same_dimensions(frame))
        .and_then(|p| delta::encode_delta(&p.pixels, &frame.pixels));

    let (compression_type, payload) = match delta_candidate {
        Some(payload) => (CompressionType::Delta, payload),
        None => (CompressionType::Raw, raw::encode_raw(&frame.pixels)),
    };

    FrameRecord {
        frame_number,
        width: frame.width,
        height: frame.height,
        channels: frame.channels,
        compression_type,
        payload,
    }
}

/// Decodes `record` into its pixel bytes, dispatching on its compression
/// mode. `prev` is the decoder's most recently reconstructed frame, required
/// for DELTA.
pub fn decode_frame(record: &FrameRecord, prev: Option<&RawFrame>) -> Result<Vec<u8>, GitFlixError> {
    match record.compression_type {
        CompressionType::Raw => raw::decode_raw(
            &record.payload,
            record.width,
            record.height,
            record.channels,
            record.frame_number,
        ),
        CompressionType::Delta => delta::decode_delta(
            &record.payload,
            record.width,
            record.height,
            record.channels,
            record.frame_number,
            prev,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(w: u32, h: u32, c: u32, fill: u8) -> RawFrame {
        RawFrame::new(w, h, c, vec![fill; (w * h * c) as usize])
    }

    #[test]
    fn first_frame_is_always_raw() {
        let f0 = frame(4, 4, 3, 10);
        let record = encode_frame(0, &f0, None);
        assert_eq!(record.compression_type, CompressionType::Raw);
    }

    #[test]
    fn similar_successor_is_delta() {
        let f0 = frame(4, 4, 3, 10);
        let mut f1 = f0.clone();
        f1.pixels[0] = 11;
        let record = encode_frame(1, &f1, Some(&f0));
        assert_eq!(record.compression_type, CompressionType::Delta);
        let decoded = decode_frame(&record, Some(&f0)).unwrap();
        assert_eq!(decoded, f1.pixels);
    }

    #[test]
    fn large_jump_falls_back_to_raw() {
        let f0 = frame(4, 4, 3, 0);
        let f1 = frame(4, 4, 3, 255);
        let record = encode_frame(1, &f1, Some(&f0));
        assert_eq!(record.compression_type, CompressionType::Raw);
        let decoded = decode_frame(&record, Some(&f0)).unwrap();
        assert_eq!(decoded, f1.pixels);
    }

    #[test]
    fn dimension_change_forces_raw() {
        let f0 = frame(4, 4, 3, 5);
        let f1 = frame(8, 8, 3, 5);
        let record = encode_frame(1, &f1, Some(&f0));
        assert_eq!(record.compression_type, CompressionType::Raw);
    }

    #[test]
    fn end_to_end_chain_round_trips() {
        let frames = vec![frame(4, 4, 3, 0), frame(4, 4, 3, 1), frame(4, 4, 3, 2)];
        let mut records = Vec::new();
        let mut prev: Option<&RawFrame> = None;
        for (i, f) in frames.iter().enumerate() {
            records.push(encode_frame(i as u32, f, prev));
            prev = Some(f);
        }
        let mut decoded_prev: Option<RawFrame> = None;
        for (i, record) in records.iter().enumerate() {
            let pixels = decode_frame(record, decoded_prev.as_ref()).unwrap();
            assert_eq!(pixels, frames[i].pixels);
            decoded_prev = Some(RawFrame::new(4, 4, 3, pixels));
        }
    }
}
