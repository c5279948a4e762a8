//! Dataset generation CLI.
//!
//! Reads `demo_<key>.json` episodes, replays them waypoint-by-waypoint
//! against the point-mass reference backend, and writes packaged
//! `seq_<key>.json` sequences (plus optional GIFs), or summarizes episode
//! lengths.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use replay_pipeline::{
    generate_dataset, DemonstrationSource, FrameEncoder, GifEncoder, JsonDirectorySink,
    JsonDirectorySource, LengthSummary, WaypointReplayer,
};
use replay_sim::PointMassSimulator;
use replay_types::{ReplayConfig, SubstepOrientationPolicy};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OrientationArg {
    /// Zero rotation per sub-step.
    Identity,
    /// Uniform interpolation toward the waypoint orientation.
    Slerp,
}

impl From<OrientationArg> for SubstepOrientationPolicy {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Identity => Self::Identity,
            OrientationArg::Slerp => Self::Slerp,
        }
    }
}

/// Convert recorded demonstrations into fixed-length training sequences.
#[derive(Debug, Parser)]
#[command(name = "replay-dataset", version, about)]
struct Args {
    /// Folder containing demo_<key>.json episode records.
    #[arg(long)]
    demo_folder: PathBuf,

    /// Output folder for sequences, scenes, GIFs and statistics.
    #[arg(long, default_value = ".")]
    output_path: PathBuf,

    /// Rendered frame height.
    #[arg(long, default_value_t = 64)]
    height: u32,

    /// Rendered frame width.
    #[arg(long, default_value_t = 64)]
    width: u32,

    /// Full-frequency steps skipped between retained samples.
    #[arg(long, default_value_t = 0)]
    skip_frame: usize,

    /// Sub-steps used to replay each waypoint's delta action.
    #[arg(long, default_value_t = 10)]
    n_substeps: usize,

    /// Orientation distribution across sub-steps.
    #[arg(long, value_enum, default_value_t = OrientationArg::Slerp)]
    substep_orientation: OrientationArg,

    /// Skip episodes retaining more waypoints than this.
    #[arg(long)]
    target_length: Option<usize>,

    /// Stop replay after this many waypoints (debug aid).
    #[arg(long)]
    max_waypoints: Option<usize>,

    /// Gripper command width of the recorded states.
    #[arg(long, default_value_t = 1)]
    gripper_dim: usize,

    /// Generate the packaged dataset.
    #[arg(long)]
    gen_dataset: bool,

    /// Summarize episode lengths into length_summary.json.
    #[arg(long)]
    length_stats: bool,

    /// Also encode a GIF per written episode.
    #[arg(long)]
    gifs: bool,

    /// GIF frame rate.
    #[arg(long, default_value_t = 15.0)]
    fps: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .init();

    let args = Args::parse();
    if !args.gen_dataset && !args.length_stats {
        bail!("nothing to do: pass --gen-dataset and/or --length-stats");
    }

    let source = JsonDirectorySource::new(&args.demo_folder);
    fs::create_dir_all(&args.output_path)
        .with_context(|| format!("creating output folder {}", args.output_path.display()))?;

    if args.gen_dataset {
        run_generation(&args, &source)?;
    }
    if args.length_stats {
        run_length_stats(&args, &source)?;
    }
    Ok(())
}

fn run_generation(args: &Args, source: &JsonDirectorySource) -> Result<()> {
    let config = {
        let mut config = ReplayConfig::with_skip(args.skip_frame)
            .substeps(args.n_substeps)
            .orientation(args.substep_orientation.into());
        if let Some(target_length) = args.target_length {
            config = config.target_length(target_length);
        }
        if let Some(max_waypoints) = args.max_waypoints {
            config = config.max_waypoints(max_waypoints);
        }
        config
    };
    let replayer = WaypointReplayer::new(config).context("invalid replay configuration")?;

    let mut sim =
        PointMassSimulator::new(args.width, args.height).with_gripper_dim(args.gripper_dim);
    let mut sink = JsonDirectorySink::new(&args.output_path);
    let mut gif_encoder;
    let encoder: Option<&mut dyn FrameEncoder> = if args.gifs {
        gif_encoder = GifEncoder::new(&args.output_path, args.fps);
        Some(&mut gif_encoder)
    } else {
        None
    };

    let stats = generate_dataset(&mut sim, source, &mut sink, encoder, &replayer)
        .context("dataset generation failed")?;

    info!(
        written = stats.episodes_written,
        skipped = stats.episodes_skipped,
        waypoints = stats.waypoints_replayed,
        encode_failures = stats.encode_failures,
        "done"
    );
    Ok(())
}

fn run_length_stats(args: &Args, source: &JsonDirectorySource) -> Result<()> {
    let keys = source.episode_keys().context("listing episodes")?;
    let mut lengths = Vec::with_capacity(keys.len());
    for key in &keys {
        let episode = source
            .load_episode(key)
            .with_context(|| format!("loading episode {key}"))?;
        lengths.push(episode.len());
    }

    let Some(summary) = LengthSummary::from_lengths(&lengths, 30) else {
        bail!("no episodes found in {}", args.demo_folder.display());
    };

    let path = args.output_path.join("length_summary.json");
    fs::write(&path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        episodes = summary.count,
        min = summary.min,
        max = summary.max,
        mean = summary.mean,
        "length statistics written"
    );
    Ok(())
}
