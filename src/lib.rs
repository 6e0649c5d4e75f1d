//! GitFlix: stores a raw video as a linear chain of git commits, one frame
//! per commit, one blob per frame.
//!
//! # Layout
//!
//! - [`container`] — the on-disk frame container (magic, header, CRC, payload).
//! - [`codec`] — the RAW/DELTA compression engine sitting on top of the
//!   container's payload.
//! - [`objectstore`] — the git-backed commit chain, blob cache, and prefetcher.
//! - [`pipeline`] — the encoder pipeline and the decode/display pipeline.
//! - [`sources`] — demo frame sources (gated behind the `demo` feature).
//! - [`config`], [`log`], [`error`] — the ambient configuration, logging, and
//!   error-handling layers shared by everything above.
//!
//! [`block`] and [`threadpool`] and [`timefn`] are lower-level building
//! blocks this crate's codec and object store are built on.

pub mod block;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod log;
pub mod objectstore;
pub mod pipeline;
pub mod raw_frame;
pub mod sources;
pub mod threadpool;
pub mod timefn;
pub mod util;

#[cfg(feature = "demo")]
pub mod cli;

pub use container::{CompressionType, FrameRecord};
pub use error::{GitFlixError, Result};
pub use raw_frame::RawFrame;
