//! Encoder and decode/display pipelines (spec §4.4, §4.5).
//!
//! A frame moves through the states `Fetching -> Deserialized -> Decoded ->
//! Queued -> Presented -> Released` on the decode side, with `Failed` as an
//! abort state at any step; see [`decode_worker`] for where each transition
//! happens and [`presenter`] for the final two.

pub mod decode_worker;
pub mod encoder;
pub mod presenter;
pub mod queue;
pub mod session;

pub use session::PlaybackSession;
