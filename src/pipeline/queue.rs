//! `FrameQueue` — the bounded handoff between the decode worker and the
//! presenter (spec §4.5). Backed by `crossbeam-channel`, mirroring the
//! teacher's use of `crossbeam_channel::bounded` as a blocking semaphore in
//! `threadpool.rs`.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::raw_frame::RawFrame;

/// A decoded frame ready for display, or a terminal signal that decoding
/// has stopped (successfully or with an error).
pub enum QueueItem {
    Frame(RawFrame),
    Done,
    Failed(crate::error::GitFlixError),
}

/// The bounded producer/consumer channel between [`super::decode_worker`] and
/// [`super::presenter`]. Capacity is [`crate::config::Config::frame_queue_size`]
/// (spec §4.5): a full queue blocks the decode worker, providing backpressure
/// so decoding never runs unboundedly far ahead of presentation.
pub struct FrameQueue {
    tx: Sender<QueueItem>,
    rx: Receiver<QueueItem>,
}

impl FrameQueue {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity.max(1));
        FrameQueue { tx, rx }
    }

    pub fn sender(&self) -> Sender<QueueItem> {
        self.tx.clone()
    }

    /// Blocks until a slot is free or `deadline` elapses; used by the
    /// presenter's cancellation poll (spec §5's `should_exit` check cadence).
    pub fn recv_timeout(&self, timeout: Duration) -> Result<QueueItem, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn recv(&self) -> Option<QueueItem> {
        self.rx.recv().ok()
    }
}
