//! `RawFrame` — an uncompressed image, spec §3.

/// A single uncompressed RGB image: `width * height * channels` bytes,
/// row-major, top-to-bottom, `[R, G, B]` per pixel.
///
/// Produced by a [`crate::sources::FrameSource`] or by [`crate::codec`]
/// decompression; consumed by a [`crate::pipeline::presenter::Presenter`] or
/// as the predecessor of the next delta frame. Holds a single contiguous
/// buffer so ownership moves cleanly through [`crate::pipeline::queue::FrameQueue`]
/// instead of being copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub pixels: Vec<u8>,
}

impl RawFrame {
    /// Builds a `RawFrame`, panicking in debug builds if
    /// `pixels.len() != width * height * channels`.
    ///
    /// This invariant (spec §3) is a programmer error to violate — frame
    /// sources and decoders are expected to size their buffers correctly —
    /// so it is a `debug_assert_eq!`, matching the teacher's own invariant
    /// checks (`block/types.rs`, `hc/types.rs`), rather than a recoverable
    /// `Result` or a release-mode panic.
    pub fn new(width: u32, height: u32, channels: u32, pixels: Vec<u8>) -> Self {
        let expected = (width as usize) * (height as usize) * (channels as usize);
        debug_assert_eq!(
            pixels.len(),
            expected,
            "RawFrame invariant violated: {} bytes, expected {width}x{height}x{channels}={expected}",
            pixels.len()
        );
        RawFrame { width, height, channels, pixels }
    }

    /// `true` when `other` has the same `(width, height, channels)` as `self`.
    pub fn same_dimensions(&self, other: &RawFrame) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }
}
