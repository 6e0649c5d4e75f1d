//! Background prefetcher (spec §4.3) — a single background task, launched
//! once with the full ordered id list, that walks it sequentially and warms
//! the [`BlobCache`] ahead of the decode worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::threadpool::TPool;

use super::blob_cache::BlobCache;
use super::repo::Repo;
use super::ChainEntry;

/// Walks a chain's ids in order, skipping any already cached, reading and
/// inserting the rest. Submitted as a single job to a small pool (the pool
/// exists so `start` doesn't block its caller; only one walk is ever
/// in flight per `Prefetcher`). Errors are swallowed here deliberately — a
/// prefetch miss just means the decode worker falls back to a direct,
/// synchronous read later (spec §4.3's cache is an optimization, not a
/// correctness dependency).
pub struct Prefetcher {
    pool: TPool,
    should_stop: Arc<AtomicBool>,
}

impl Prefetcher {
    pub fn new(nb_threads: usize, queue_size: usize) -> Option<Self> {
        Some(Prefetcher { pool: TPool::new(nb_threads, queue_size)?, should_stop: Arc::new(AtomicBool::new(false)) })
    }

    /// Launches the prefetch walk over `chain`, oldest-first, the full
    /// ordered id list spec §4.3 calls for. Call this once, as soon as the
    /// chain to be played is known (this crate's `PlaybackSession` does so
    /// before spawning the decode worker, the closest analogue it has to
    /// the reference design's "session open").
    ///
    /// `repo` is the same `Mutex`-guarded handle [`super::Session::get_frame`]
    /// and [`super::Session::append_frame`] go through (spec §4.3/§5: the
    /// prefetcher and the decoder "serialize object-store access through a
    /// single guard"). The walk locks it only for the duration of each
    /// individual `get_blob` call, so it can block briefly behind a
    /// concurrent decode-worker read, but the two never run concurrently.
    pub fn start(&self, repo: Arc<Mutex<Repo>>, cache: Arc<BlobCache>, chain: Vec<ChainEntry>) {
        let should_stop = Arc::clone(&self.should_stop);
        self.pool.submit_job(Box::new(move || {
            for entry in &chain {
                if should_stop.load(Ordering::Relaxed) {
                    return;
                }
                if cache.get(entry.frame_number).is_some() {
                    continue;
                }
                let blob = repo.lock().unwrap().get_blob(entry.commit_id);
                if let Ok(blob) = blob {
                    cache.insert(entry.frame_number, blob);
                }
            }
        }));
    }

    /// Requests that an in-flight walk stop at its next id, without waiting
    /// for it to notice (spec §5's shutdown order: flip first, then join).
    pub fn request_stop(&self) {
        self.should_stop.store(true, Ordering::Relaxed);
    }

    /// Blocks until the walk has finished (having run to exhaustion or
    /// observed [`Prefetcher::request_stop`]).
    pub fn drain(&self) {
        self.pool.jobs_completed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(frame_number: u32, commit_id: gix::ObjectId) -> ChainEntry {
        ChainEntry { frame_number, commit_id }
    }

    #[test]
    fn prefetch_warms_the_cache_for_the_whole_chain() {
        let dir = tempdir().unwrap();
        let repo = Arc::new(Mutex::new(Repo::open_or_init(dir.path()).unwrap()));
        let c0 = repo.lock().unwrap().write_frame(0, b"hello", None).unwrap();
        let c1 = repo.lock().unwrap().write_frame(1, b"world", Some(c0)).unwrap();
        let cache = Arc::new(BlobCache::new(4));

        let prefetcher = Prefetcher::new(2, 4).unwrap();
        prefetcher.start(Arc::clone(&repo), Arc::clone(&cache), vec![entry(0, c0), entry(1, c1)]);
        prefetcher.drain();

        assert_eq!(cache.get(0), Some(b"hello".to_vec()));
        assert_eq!(cache.get(1), Some(b"world".to_vec()));
    }

    #[test]
    fn already_cached_ids_are_skipped() {
        let dir = tempdir().unwrap();
        let repo = Arc::new(Mutex::new(Repo::open_or_init(dir.path()).unwrap()));
        let cache = Arc::new(BlobCache::new(4));
        cache.insert(0, vec![9]);

        let prefetcher = Prefetcher::new(1, 2).unwrap();
        prefetcher.start(Arc::clone(&repo), Arc::clone(&cache), vec![entry(0, gix::ObjectId::null(gix::hash::Kind::Sha1))]);
        prefetcher.drain();

        assert_eq!(cache.get(0), Some(vec![9]));
    }

    #[test]
    fn request_stop_halts_the_walk_before_it_finishes() {
        let dir = tempdir().unwrap();
        let repo = Arc::new(Mutex::new(Repo::open_or_init(dir.path()).unwrap()));
        let mut ids = Vec::new();
        let mut parent = None;
        for i in 0..50u32 {
            let commit = repo.lock().unwrap().write_frame(i, format!("frame-{i}").as_bytes(), parent).unwrap();
            ids.push(entry(i, commit));
            parent = Some(commit);
        }
        let cache = Arc::new(BlobCache::new(64));

        let prefetcher = Prefetcher::new(1, 4).unwrap();
        prefetcher.request_stop();
        prefetcher.start(Arc::clone(&repo), Arc::clone(&cache), ids);
        prefetcher.drain();

        // Stop was requested before the walk started, so it should have
        // halted at (or very near) its first id rather than exhausting 50.
        assert!(cache.len() < 50, "prefetcher kept walking after request_stop");
    }
}
