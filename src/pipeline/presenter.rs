//! Presenter (spec §4.5) — consumes decoded frames off a [`FrameQueue`] and
//! displays them, paced to the configured frame rate.
//!
//! A real GPU presenter is out of scope (spec §7 Non-goals); the two
//! implementations here are demo stand-ins: one that writes a line per frame
//! to stdout, and one that discards frames (for benchmarking the rest of the
//! pipeline without display overhead).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::Config;
use crate::displaylevel;
use crate::error::GitFlixError;
use crate::raw_frame::RawFrame;
use crate::timefn::{clock_span_ns, get_time};

use super::queue::{FrameQueue, QueueItem};

/// Something that can display a decoded frame. Implementors should be fast
/// enough not to itself become the pacing bottleneck — `present` is called
/// on the presenter's own thread, in between pacing sleeps.
pub trait Presenter: Send {
    fn present(&mut self, frame: &RawFrame, frame_number: u32);
}

/// Writes one summary line per frame to stdout. Good enough to see playback
/// progress without a real display surface.
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn present(&mut self, frame: &RawFrame, frame_number: u32) {
        println!("frame {frame_number}: {}x{} ({} bytes)", frame.width, frame.height, frame.byte_len());
    }
}

/// Discards every frame. Used by benchmarks and tests that want to drive
/// the decode worker and pacing loop without console I/O overhead.
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _frame: &RawFrame, _frame_number: u32) {}
}

/// Drains `queue`, presenting each frame to `presenter` and pacing playback
/// to `config.target_fps` when `config.present_paced` is set (spec §4.5's
/// pacing requirement). Polls `should_exit` at [`crate::config::SHOULD_EXIT_POLL`]
/// granularity so cancellation is observed promptly even mid-wait.
///
/// Returns `Ok(frames_presented)` on a clean `Done`, or the error a decode
/// worker reported via [`QueueItem::Failed`].
pub fn run(
    queue: &FrameQueue,
    presenter: &mut dyn Presenter,
    config: &Config,
    should_exit: &AtomicBool,
) -> Result<u32, GitFlixError> {
    let mut frame_number = 0u32;
    let target_interval = config.target_interval();
    let mut next_deadline = get_time();

    loop {
        if should_exit.load(Ordering::Relaxed) {
            displaylevel!(3, "presenter observed should_exit after {frame_number} frames");
            return Ok(frame_number);
        }

        let item = match queue.recv_timeout(crate::config::SHOULD_EXIT_POLL) {
            Ok(item) => item,
            Err(_) => continue, // poll timeout; loop back to re-check should_exit
        };

        match item {
            QueueItem::Frame(frame) => {
                if config.present_paced {
                    pace(next_deadline, target_interval);
                    next_deadline = get_time();
                }
                presenter.present(&frame, frame_number);
                frame_number += 1;
            }
            QueueItem::Done => return Ok(frame_number),
            QueueItem::Failed(e) => return Err(e),
        }
    }
}

/// Sleeps until `target_interval` has elapsed since `last_deadline`, or
/// returns immediately if it has already elapsed (a slow decode should never
/// cause the presenter to try to "catch up" by skipping its sleep budget
/// into negative territory).
fn pace(last_deadline: crate::timefn::TimeT, target_interval: Duration) {
    let elapsed_ns = clock_span_ns(last_deadline);
    let target_ns = target_interval.as_nanos() as u64;
    if elapsed_ns < target_ns {
        std::thread::sleep(Duration::from_nanos(target_ns - elapsed_ns));
    }
}
