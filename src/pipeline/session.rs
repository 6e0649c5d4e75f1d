//! `PlaybackSession` — wires the decode worker and presenter together
//! through a [`FrameQueue`], with the `should_exit` cancellation flag spec
//! §5 requires both sides to observe.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::displaylevel;
use crate::error::GitFlixError;
use crate::objectstore::Session;

use super::presenter::Presenter;
use super::queue::FrameQueue;
use super::{decode_worker, presenter};

/// Runs one full playback of the chain ending at `tip`: spawns the decode
/// worker on its own thread, then drives the presenter loop on the caller's
/// thread until the chain is exhausted, a decode error occurs, or
/// `should_exit` is set externally.
///
/// Shutdown order (spec §5): `should_exit` is checked by both the decode
/// worker and the presenter at [`crate::config::SHOULD_EXIT_POLL`]
/// granularity; once set, the decode worker stops enqueueing new frames and
/// the presenter stops dequeuing them, and this function joins the worker
/// thread before returning so no frame ever gets presented after the session
/// reports having stopped.
pub struct PlaybackSession {
    should_exit: Arc<AtomicBool>,
}

impl PlaybackSession {
    pub fn new() -> Self {
        PlaybackSession { should_exit: Arc::new(AtomicBool::new(false)) }
    }

    /// Requests that playback stop. Safe to call from another thread (e.g. a
    /// signal handler or UI event loop).
    pub fn request_exit(&self) {
        self.should_exit.store(true, Ordering::Relaxed);
    }

    /// Runs playback of `tip`'s chain to completion (or cancellation),
    /// returning the number of frames actually presented.
    pub fn run(
        &self,
        session: Arc<Session>,
        tip: gix::ObjectId,
        config: &Config,
        presenter_impl: &mut dyn Presenter,
    ) -> Result<u32, GitFlixError> {
        let chain = session.chain(tip)?;
        let dims = (config.width, config.height, config.channels);

        let queue = FrameQueue::new(config.frame_queue_size);
        let tx = queue.sender();
        let worker_should_exit = Arc::clone(&self.should_exit);
        let worker = decode_worker::spawn(Arc::clone(&session), chain, dims, tx, worker_should_exit);

        let result = presenter::run(&queue, presenter_impl, config, &self.should_exit);

        self.should_exit.store(true, Ordering::Relaxed);
        if worker.join().is_err() {
            displaylevel!(1, "decode worker thread panicked");
        }
        session.close();

        result
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        PlaybackSession::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::encoder::encode_chain;
    use crate::pipeline::presenter::NullPresenter;
    use crate::sources::synthetic::SyntheticFrameSource;
    use tempfile::tempdir;

    #[test]
    fn plays_back_every_encoded_frame() {
        let dir = tempdir().unwrap();
        let store = Arc::new(Session::open(dir.path(), 8, 1, 4).unwrap());
        let mut source = SyntheticFrameSource::new(4, 4, 3, 6, 2);
        let (count, tip) = encode_chain(&store, &mut source).unwrap();
        assert_eq!(count, 6);

        let config = Config { width: 4, height: 4, channels: 3, present_paced: false, ..Config::default() };
        let playback = PlaybackSession::new();
        let mut presenter = NullPresenter;
        let presented = playback.run(Arc::clone(&store), tip.unwrap(), &config, &mut presenter).unwrap();
        assert_eq!(presented, 6);
    }

    #[test]
    fn request_exit_stops_playback_early() {
        let dir = tempdir().unwrap();
        let store = Arc::new(Session::open(dir.path(), 8, 1, 4).unwrap());
        let mut source = SyntheticFrameSource::new(4, 4, 3, 20, 2);
        let (_, tip) = encode_chain(&store, &mut source).unwrap();

        let config = Config { width: 4, height: 4, channels: 3, present_paced: false, ..Config::default() };
        let playback = PlaybackSession::new();
        playback.request_exit();
        let mut presenter = NullPresenter;
        let presented = playback.run(Arc::clone(&store), tip.unwrap(), &config, &mut presenter).unwrap();
        assert_eq!(presented, 0);
    }
}
