//! Decode worker (spec §4.5) — walks a committed chain from its root,
//! reconstructing each frame in order and pushing it onto a [`FrameQueue`]
//! for the presenter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::container::FrameRecord;
use crate::displaylevel;
use crate::error::GitFlixError;
use crate::objectstore::{ChainEntry, Session};
use crate::raw_frame::RawFrame;

use super::queue::QueueItem;

/// Decodes `chain` in order, publishing each reconstructed frame to `tx`.
/// Polls `should_exit` between frames so a cancellation request (spec §5)
/// stops the worker promptly instead of draining the whole chain first.
///
/// Launches the session's background prefetcher over the whole chain before
/// decoding the first frame (spec §4.3: the prefetcher is "launched at
/// session open with the full ordered id list", not re-armed reactively a
/// few frames at a time), so cache warming starts from the same moment
/// decoding does rather than trailing a few frames behind it.
///
/// A DELTA frame encountered with no reconstructed predecessor (the chain's
/// first entry was corrupted, or playback starts mid-chain) is decoded as if
/// it were RAW rather than failing outright — see `DESIGN.md`'s resolution
/// of the reference spec's open question on this case.
pub fn run(
    session: &Session,
    chain: &[ChainEntry],
    expected_dims: (u32, u32, u32),
    tx: &Sender<QueueItem>,
    should_exit: &AtomicBool,
) {
    session.start_prefetch(chain);

    let mut prev_raw: Option<RawFrame> = None;

    for entry in chain.iter() {
        if should_exit.load(Ordering::Relaxed) {
            displaylevel!(3, "decode worker observed should_exit, stopping at frame {}", entry.frame_number);
            return;
        }

        match decode_one(session, entry, expected_dims, prev_raw.as_ref()) {
            Ok(frame) => {
                prev_raw = Some(frame.clone());
                if tx.send(QueueItem::Frame(frame)).is_err() {
                    return; // presenter side dropped; nothing left to do.
                }
            }
            Err(e) => {
                displaylevel!(1, "decode worker failed at frame {}: {e}", entry.frame_number);
                let _ = tx.send(QueueItem::Failed(e));
                return;
            }
        }
    }

    let _ = tx.send(QueueItem::Done);
}

fn decode_one(
    session: &Session,
    entry: &ChainEntry,
    expected_dims: (u32, u32, u32),
    prev_raw: Option<&RawFrame>,
) -> Result<RawFrame, GitFlixError> {
    let bytes = session.get_frame(entry.frame_number, entry.commit_id)?;
    let record = FrameRecord::deserialize(&bytes, expected_dims)?;

    let pixels = match crate::codec::decode_frame(&record, prev_raw) {
        Ok(pixels) => pixels,
        Err(GitFlixError::MissingReference { .. }) if record.compression_type == crate::container::CompressionType::Delta => {
            displaylevel!(2, "frame {} is DELTA with no predecessor, decoding as RAW", record.frame_number);
            crate::codec::raw::decode_raw(&record.payload, record.width, record.height, record.channels, record.frame_number)?
        }
        Err(e) => return Err(e),
    };

    Ok(RawFrame::new(record.width, record.height, record.channels, pixels))
}

/// Spawns the decode worker on its own thread, returning the join handle and
/// the queue it publishes frames onto.
pub fn spawn(
    session: Arc<Session>,
    chain: Vec<ChainEntry>,
    expected_dims: (u32, u32, u32),
    tx: Sender<QueueItem>,
    should_exit: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || run(&session, &chain, expected_dims, &tx, &should_exit))
}
