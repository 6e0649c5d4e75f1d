//! Frame sources. The [`FrameSource`] trait is the encoder pipeline's seam
//! for an external frame producer (spec §2); decoding an MP4 into frames is
//! explicitly out of scope (spec §7 Non-goals), so the only implementations
//! here are demo stand-ins, gated behind the `demo` feature: one that reads
//! pre-extracted PPM images, one that synthesizes frames programmatically.

#[cfg(feature = "demo")]
pub mod ppm;
#[cfg(feature = "demo")]
pub mod synthetic;

use crate::error::GitFlixError;
use crate::raw_frame::RawFrame;

/// Produces frames in order, one per call, until exhausted.
pub trait FrameSource: Send {
    /// Returns the next frame, or `Ok(None)` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<RawFrame>, GitFlixError>;

    /// The dimensions every frame from this source will have.
    fn dimensions(&self) -> (u32, u32, u32);
}
