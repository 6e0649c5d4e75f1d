//! Command-line surface, built with `clap`'s derive API per the teacher's
//! declared dependency stack (the teacher's own CLI predates the derive
//! feature being wired up; this crate's CLI actually uses it).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gitflix", version, about = "Stores a video as a linear chain of git commits, one frame per commit")]
pub struct Cli {
    /// Display verbosity: 0 = silent, 1 = errors, 2 = default, 3 = verbose.
    #[arg(short = 'v', long, global = true, default_value_t = 2)]
    pub verbose: u32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a sequence of frames into a new commit chain.
    Encode(EncodeArgs),
    /// Play back a commit chain.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the repository to create or append to.
    #[arg(long)]
    pub repo: PathBuf,

    /// Directory of binary PPM (`.ppm`) frames, read in sorted order. If
    /// omitted, frames are synthesized instead (see `--synthetic-frames`).
    #[arg(long)]
    pub frames_dir: Option<PathBuf>,

    /// Number of synthetic frames to generate when `--frames-dir` is not given.
    #[arg(long, default_value_t = 0)]
    pub synthetic_frames: u32,

    /// Per-frame byte delta used by the synthetic source.
    #[arg(long, default_value_t = 1)]
    pub synthetic_step: u8,

    #[arg(long, default_value_t = crate::config::FRAME_WIDTH)]
    pub width: u32,

    #[arg(long, default_value_t = crate::config::FRAME_HEIGHT)]
    pub height: u32,

    #[arg(long, default_value_t = crate::config::FRAME_CHANNELS)]
    pub channels: u32,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Path to the repository to read from.
    #[arg(long)]
    pub repo: PathBuf,

    /// Disable frame-rate pacing; present frames as fast as they decode.
    #[arg(long)]
    pub no_pace: bool,

    /// Discard frames instead of printing a line per frame.
    #[arg(long)]
    pub silent: bool,

    #[arg(long, default_value_t = crate::config::FRAME_WIDTH)]
    pub width: u32,

    #[arg(long, default_value_t = crate::config::FRAME_HEIGHT)]
    pub height: u32,

    #[arg(long, default_value_t = crate::config::FRAME_CHANNELS)]
    pub channels: u32,
}
