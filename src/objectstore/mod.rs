//! The Object-Store Adapter (spec §4.3) — a git-backed linear commit chain,
//! a [`BlobCache`] in front of it, and a background [`Prefetcher`] that warms
//! the cache ahead of the decode worker.

pub mod blob_cache;
pub mod prefetcher;
pub mod repo;

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::GitFlixError;

use blob_cache::BlobCache;
use prefetcher::Prefetcher;
use repo::Repo;

/// A single frame's position in the chain: its commit id and the id of its
/// predecessor, if any.
#[derive(Clone)]
pub struct ChainEntry {
    pub frame_number: u32,
    pub commit_id: gix::ObjectId,
}

/// Owns the repository handle, the blob cache, and the prefetcher behind one
/// guard — spec §4.3 requires the prefetcher and decoder to "serialize
/// object-store access through a single guard (the underlying store is not
/// assumed reentrant-safe)". The guard here wraps the `Repo` itself rather
/// than standing beside it: `gix::Repository` is `Send` but not `Sync` (its
/// object/pack cache is meant to be used from one thread at a time), so a
/// `Mutex<Repo>` — `Sync` because `Repo: Send` — is the only way to let the
/// decode worker and the prefetcher's pool threads share one handle at all;
/// a bare `Arc<Repo>` alongside a separate lock would still let callers read
/// through it unguarded.
pub struct Session {
    repo: Arc<Mutex<Repo>>,
    cache: Arc<BlobCache>,
    prefetcher: Option<Prefetcher>,
}

impl Session {
    pub fn open(path: &Path, cache_size: usize, prefetch_threads: usize, prefetch_queue: usize) -> Result<Self, GitFlixError> {
        let repo = Arc::new(Mutex::new(Repo::open_or_init(path)?));
        let cache = Arc::new(BlobCache::new(cache_size));
        let prefetcher = Prefetcher::new(prefetch_threads, prefetch_queue);
        Ok(Session { repo, cache, prefetcher })
    }

    /// Appends a frame onto the chain, serialized through the same guard
    /// reads go through.
    pub fn append_frame(
        &self,
        frame_number: u32,
        serialized_record: &[u8],
        parent: Option<gix::ObjectId>,
    ) -> Result<gix::ObjectId, GitFlixError> {
        let commit_id = {
            let repo = self.repo.lock().unwrap();
            repo.write_frame(frame_number, serialized_record, parent)?
        };
        self.cache.insert(frame_number, serialized_record.to_vec());
        Ok(commit_id)
    }

    /// Fetches a frame's serialized bytes, preferring the cache. The store
    /// read, when it happens, goes through the same guard the prefetcher and
    /// `append_frame` use.
    pub fn get_frame(&self, frame_number: u32, commit_id: gix::ObjectId) -> Result<Vec<u8>, GitFlixError> {
        if let Some(cached) = self.cache.get(frame_number) {
            return Ok(cached);
        }
        let blob = {
            let repo = self.repo.lock().unwrap();
            repo.get_blob(commit_id)?
        };
        self.cache.insert(frame_number, blob.clone());
        Ok(blob)
    }

    /// Launches the background prefetcher over the full ordered `chain`
    /// (spec §4.3: "a background task launched at session open with the
    /// full ordered id list"), a no-op if the session was opened without
    /// one. Call this once, as soon as the chain to be played is known and
    /// before the decode worker starts consuming it, so the prefetcher
    /// warms the cache ahead of the consumer from the start rather than
    /// trailing a few frames behind it.
    pub fn start_prefetch(&self, chain: &[ChainEntry]) {
        if let Some(prefetcher) = &self.prefetcher {
            prefetcher.start(Arc::clone(&self.repo), Arc::clone(&self.cache), chain.to_vec());
        }
    }

    pub fn head(&self) -> Result<Option<gix::ObjectId>, GitFlixError> {
        self.repo.lock().unwrap().head()
    }

    /// Returns the full chain of commit ids from the root to `tip`, oldest
    /// first.
    pub fn chain(&self, tip: gix::ObjectId) -> Result<Vec<ChainEntry>, GitFlixError> {
        let ids = self.repo.lock().unwrap().walk_chain(tip)?;
        Ok(ids
            .into_iter()
            .enumerate()
            .map(|(frame_number, commit_id)| ChainEntry { frame_number: frame_number as u32, commit_id })
            .collect())
    }

    /// Stops and joins any in-flight prefetch walk. Called when the session
    /// is torn down so no background reads outlive the repository handle
    /// (spec §5's shutdown order: "stop the prefetcher and join it").
    pub fn close(&self) {
        if let Some(prefetcher) = &self.prefetcher {
            prefetcher.request_stop();
            prefetcher.drain();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
