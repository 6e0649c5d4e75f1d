//! Compile-time configuration constants and environment-variable overrides.
//!
//! Mirrors the teacher's `config.rs` (migrated from `lz4conf.h`): a handful of
//! `const` defaults plus small helpers that let an environment variable or a
//! CLI flag override them at runtime. See spec §6 for the authoritative table.

use std::env;

/// Presentation rate in frames per second. Corresponds to spec §6 `TARGET_FPS`.
pub const TARGET_FPS: u32 = 60;

/// Fixed frame width in pixels. Corresponds to spec §6 `FRAME_WIDTH`.
pub const FRAME_WIDTH: u32 = 1920;

/// Fixed frame height in pixels. Corresponds to spec §6 `FRAME_HEIGHT`.
pub const FRAME_HEIGHT: u32 = 1080;

/// Fixed channel count (RGB). Corresponds to spec §6 `FRAME_CHANNELS`.
pub const FRAME_CHANNELS: u32 = 3;

/// Number of entries the blob cache holds before it starts overwriting the
/// oldest inserted entry. Corresponds to spec §6 `BLOB_CACHE_SIZE`.
pub const BLOB_CACHE_SIZE: usize = 32;

/// Depth of the bounded FIFO between the decode worker and the presenter.
/// Corresponds to spec §6 `FRAME_QUEUE_SIZE`.
pub const FRAME_QUEUE_SIZE: usize = 16;

/// Whether playback paces itself to `TARGET_FPS` by default.
/// Corresponds to spec §6 `PRESENT_PACED`.
pub const PRESENT_PACED: bool = true;

/// Poll interval used by blocking waits that must observe `should_exit`.
/// Corresponds to spec §5's "reference: 16 ms" cancellation polling interval.
pub const SHOULD_EXIT_POLL: std::time::Duration = std::time::Duration::from_millis(16);

/// Effective configuration for one encode or playback session.
///
/// Starts from the compile-time defaults above and can be overridden by
/// environment variables (`GITFLIX_*`, mirroring the teacher's `LZ4_CLEVEL`
/// convention) or by explicit CLI flags, in that precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub target_fps: u32,
    pub blob_cache_size: usize,
    pub frame_queue_size: usize,
    pub present_paced: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: env_override_u32("GITFLIX_FRAME_WIDTH", FRAME_WIDTH),
            height: env_override_u32("GITFLIX_FRAME_HEIGHT", FRAME_HEIGHT),
            channels: env_override_u32("GITFLIX_FRAME_CHANNELS", FRAME_CHANNELS),
            target_fps: env_override_u32("GITFLIX_TARGET_FPS", TARGET_FPS),
            blob_cache_size: env_override_usize("GITFLIX_BLOB_CACHE_SIZE", BLOB_CACHE_SIZE),
            frame_queue_size: env_override_usize("GITFLIX_FRAME_QUEUE_SIZE", FRAME_QUEUE_SIZE),
            present_paced: PRESENT_PACED,
        }
    }
}

impl Config {
    /// Bytes per frame under this configuration (`width * height * channels`).
    pub fn frame_byte_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * (self.channels as usize)
    }

    /// Target interval between presentations, `1 / target_fps`.
    pub fn target_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.target_fps))
    }
}

fn env_override_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_override_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
