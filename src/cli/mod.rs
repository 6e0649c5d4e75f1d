//! CLI entry points dispatched from `main.rs`.

pub mod args;

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::log::set_display_level;
use crate::objectstore::Session;
use crate::pipeline::presenter::{ConsolePresenter, NullPresenter, Presenter};
use crate::pipeline::{encoder, PlaybackSession};
use crate::sources::ppm::PpmFrameSource;
use crate::sources::synthetic::SyntheticFrameSource;
use crate::sources::FrameSource;

use args::{Cli, Command, EncodeArgs, PlayArgs};

pub fn run(cli: Cli) -> Result<()> {
    set_display_level(cli.verbose);
    match cli.command {
        Command::Encode(args) => run_encode(args),
        Command::Play(args) => run_play(args),
    }
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    let config = Config { width: args.width, height: args.height, channels: args.channels, ..Config::default() };
    let session = Session::open(&args.repo, config.blob_cache_size, num_cpus(), config.frame_queue_size)
        .with_context(|| format!("opening repository at {}", args.repo.display()))?;

    let mut source: Box<dyn FrameSource> = match &args.frames_dir {
        Some(dir) => Box::new(PpmFrameSource::open(dir).with_context(|| format!("reading frames from {}", dir.display()))?),
        None => {
            if args.synthetic_frames == 0 {
                bail!("either --frames-dir or --synthetic-frames must be given");
            }
            Box::new(SyntheticFrameSource::new(config.width, config.height, config.channels, args.synthetic_frames, args.synthetic_step))
        }
    };

    let (count, tip) = encoder::encode_chain(&session, source.as_mut())?;
    match tip {
        Some(id) => println!("encoded {count} frames, chain tip {id}"),
        None => println!("no frames encoded"),
    }
    Ok(())
}

fn run_play(args: PlayArgs) -> Result<()> {
    let config = Config {
        width: args.width,
        height: args.height,
        channels: args.channels,
        present_paced: !args.no_pace,
        ..Config::default()
    };
    let session = Arc::new(
        Session::open(&args.repo, config.blob_cache_size, num_cpus(), config.frame_queue_size)
            .with_context(|| format!("opening repository at {}", args.repo.display()))?,
    );
    let tip = session.head()?.with_context(|| format!("{} has no frames to play", args.repo.display()))?;

    let mut console_presenter = ConsolePresenter;
    let mut null_presenter = NullPresenter;
    let presenter: &mut dyn Presenter = if args.silent { &mut null_presenter } else { &mut console_presenter };

    let playback = PlaybackSession::new();
    let presented = playback.run(session, tip, &config, presenter)?;
    println!("presented {presented} frames");
    Ok(())
}

fn num_cpus() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}
