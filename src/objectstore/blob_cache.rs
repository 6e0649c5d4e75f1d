//! `BlobCache` — a fixed-capacity FIFO cache of decompressed frame blobs
//! (spec §4.3's cache requirement), keyed by frame number.
//!
//! Eviction is strict FIFO: a circular slot pointer tracks the next slot to
//! evict, independent of access pattern. This mirrors the bounded-capacity,
//! no-recency-tracking cache the teacher's thread pool uses for in-flight
//! job slots (`threadpool.rs`'s bounded channel-as-semaphore), reapplied
//! here to a `HashMap` of blobs instead of job tokens.

use std::collections::HashMap;
use std::sync::Mutex;

struct Inner {
    slots: Vec<Option<u32>>,
    blobs: HashMap<u32, Vec<u8>>,
    next_evict: usize,
}

/// A capacity-bounded FIFO cache from frame number to decompressed bytes.
/// Safe for concurrent access — the [`super::Session`] serializes readers
/// and the background prefetcher behind a single [`Mutex`].
pub struct BlobCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl BlobCache {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "BlobCache capacity must be positive");
        BlobCache {
            inner: Mutex::new(Inner {
                slots: vec![None; capacity],
                blobs: HashMap::with_capacity(capacity),
                next_evict: 0,
            }),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a clone of the cached blob for `frame_number`, if present.
    pub fn get(&self, frame_number: u32) -> Option<Vec<u8>> {
        let inner = self.inner.lock().unwrap();
        inner.blobs.get(&frame_number).cloned()
    }

    /// Inserts a blob, evicting the oldest inserted slot first if the cache
    /// is already at capacity. Re-inserting an already-cached frame number
    /// is a no-op replacement, not a new slot.
    pub fn insert(&self, frame_number: u32, data: Vec<u8>) {
        let mut inner = self.inner.lock().unwrap();
        if inner.blobs.contains_key(&frame_number) {
            inner.blobs.insert(frame_number, data);
            return;
        }

        let evict_slot = inner.next_evict;
        if let Some(old) = inner.slots[evict_slot].take() {
            inner.blobs.remove(&old);
        }
        inner.slots[evict_slot] = Some(frame_number);
        inner.blobs.insert(frame_number, data);
        inner.next_evict = (evict_slot + 1) % inner.slots.len();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
