//! Encoder Pipeline (spec §4.4) — pulls frames from a [`FrameSource`] in
//! order and appends each one to the object store as the next commit in the
//! chain, choosing RAW or DELTA per [`crate::codec::encode_frame`].

use crate::displaylevel;
use crate::error::GitFlixError;
use crate::objectstore::Session;
use crate::raw_frame::RawFrame;
use crate::sources::FrameSource;

/// Encodes every frame `source` yields into `session`, in order, starting a
/// new chain from the root (no existing tip).
///
/// Returns the number of frames encoded and the final commit id, i.e. the
/// new chain tip.
pub fn encode_chain(
    session: &Session,
    source: &mut dyn FrameSource,
) -> Result<(u32, Option<gix::ObjectId>), GitFlixError> {
    let mut frame_number = 0u32;
    let mut prev_raw: Option<RawFrame> = None;
    let mut parent: Option<gix::ObjectId> = None;

    while let Some(frame) = source.next_frame()? {
        let record = crate::codec::encode_frame(frame_number, &frame, prev_raw.as_ref());
        let serialized = record.serialize();
        let commit_id = session.append_frame(frame_number, &serialized, parent)?;
        displaylevel!(3, "encoded frame {frame_number} as {:?} ({} bytes) -> {}", record.compression_type, serialized.len(), commit_id);

        parent = Some(commit_id);
        prev_raw = Some(frame);
        frame_number += 1;
    }

    Ok((frame_number, parent))
}
