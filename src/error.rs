//! Crate-level error type.
//!
//! Mirrors the teacher's hand-rolled `Lz4FError` (`frame/types.rs`): a plain
//! enum with a `Display` impl and a manual `std::error::Error` impl, rather
//! than a `thiserror` derive. Each variant carries the frame-identifying
//! context spec §7 requires — a `frame_number` where one is known, or the raw
//! commit id string for failures that happen before a frame number can be
//! read off the container.

use std::fmt;

/// The error kinds enumerated in spec §7, each carrying its offending frame
/// identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitFlixError {
    /// Magic/header/CRC/reserved/dimension mismatch while parsing a frame
    /// container. Fatal to the frame.
    MalformedFrame { frame_number: Option<u32>, detail: &'static str },
    /// A DELTA frame's predecessor has different `(width, height, channels)`.
    /// Fatal to the frame.
    DimensionMismatch { frame_number: u32 },
    /// A DELTA frame was decoded in strict mode with no predecessor on hand.
    /// Fatal to the frame.
    MissingReference { frame_number: u32 },
    /// Entropy-decoder failure, length mismatch, or truncated command stream.
    /// Fatal to the frame.
    DecompressError { frame_number: u32, detail: &'static str },
    /// Missing commit/tree/blob or I/O failure in the object store. Fatal to
    /// the frame during playback, fatal to the session during encoding.
    ObjectStoreError { commit_id: Option<String>, detail: String },
    /// Memory-allocation failure. Fatal to the session.
    AllocationError,
    /// The presenter sink reported a failure. Fatal to the session.
    PresenterError { detail: String },
}

impl fmt::Display for GitFlixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitFlixError::MalformedFrame { frame_number, detail } => match frame_number {
                Some(n) => write!(f, "malformed frame {n}: {detail}"),
                None => write!(f, "malformed frame: {detail}"),
            },
            GitFlixError::DimensionMismatch { frame_number } => {
                write!(f, "frame {frame_number}: delta predecessor dimension mismatch")
            }
            GitFlixError::MissingReference { frame_number } => {
                write!(f, "frame {frame_number}: delta frame has no predecessor")
            }
            GitFlixError::DecompressError { frame_number, detail } => {
                write!(f, "frame {frame_number}: decompression failed: {detail}")
            }
            GitFlixError::ObjectStoreError { commit_id, detail } => match commit_id {
                Some(id) => write!(f, "object store error at commit {id}: {detail}"),
                None => write!(f, "object store error: {detail}"),
            },
            GitFlixError::AllocationError => write!(f, "allocation failed"),
            GitFlixError::PresenterError { detail } => write!(f, "presenter error: {detail}"),
        }
    }
}

impl std::error::Error for GitFlixError {}

pub type Result<T> = std::result::Result<T, GitFlixError>;
