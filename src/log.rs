//! Ambient logging — a small display-level macro family, migrated from the
//! teacher's `cli/constants.rs` (`DISPLAYLEVEL` / `DISPLAY` in `lz4cli.c`).
//!
//! `0` = silent, `1` = errors only, `2` = normal, `3` = verbose, `4` = trace.
//! The encoder, decode worker, prefetcher, and CLI all log through these
//! macros rather than printing directly, so the level can be raised or
//! lowered (`-v` / `-q` in the CLI) without touching call sites.

use std::sync::atomic::{AtomicU32, Ordering};

/// Process-wide display level, read by [`displaylevel!`] at every call site.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::log::display_level() >= $level {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_level_round_trips() {
        let prev = display_level();
        set_display_level(4);
        assert_eq!(display_level(), 4);
        set_display_level(prev);
    }
}
