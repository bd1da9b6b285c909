use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fil", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the sequencer on a synthetic clock and print every state change.
    Trace(TraceArgs),
    /// Simulate up to a point in time and write the pattern as a PNG.
    Frame(FrameArgs),
    /// Print how many segments each preset shows.
    Presets(PresetsArgs),
}

#[derive(Args, Debug)]
struct Source {
    /// Segment document JSON.
    #[arg(long)]
    segments: PathBuf,

    /// Sequencer config JSON (defaults apply to missing keys).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the reveal-order seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    #[command(flatten)]
    source: Source,

    /// Simulated duration in seconds.
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    /// Simulated host frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Emit one JSON object per line instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: Source,

    /// Simulated time of the captured frame, in seconds.
    #[arg(long)]
    at: f64,

    /// Simulated host frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Output width in pixels.
    #[arg(long, default_value_t = 1550)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 960)]
    height: u32,

    /// Paint segments with their document colors instead of white.
    #[arg(long)]
    color: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    #[command(flatten)]
    source: Source,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Trace(args) => cmd_trace(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Presets(args) => cmd_presets(args),
    }
}

fn read_config(src: &Source) -> anyhow::Result<fil::SequencerConfig> {
    let mut cfg = match &src.config {
        Some(path) => fil::SequencerConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => fil::SequencerConfig::default(),
    };
    if src.seed.is_some() {
        cfg.seed = src.seed;
    }
    Ok(cfg)
}

// A document that cannot be loaded leaves the animation running with nothing to show.
fn read_segments(path: &Path) -> fil::SegmentStore {
    let store = fil::SegmentStore::load_or_empty(path);
    let report = store.report();
    if report.skipped > 0 {
        eprintln!(
            "loaded {} segments, skipped {} malformed entries",
            report.loaded, report.skipped
        );
    }
    store
}

fn build_controller(src: &Source) -> anyhow::Result<fil::AnimationController> {
    let cfg = read_config(src)?;
    let store = read_segments(&src.segments);
    Ok(fil::AnimationController::new(store, cfg)?)
}

fn frame_count(seconds: f64, fps: f64) -> anyhow::Result<u64> {
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    if !(seconds.is_finite() && seconds >= 0.0) {
        anyhow::bail!("time must be >= 0 seconds");
    }
    Ok((seconds * fps).round() as u64)
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let mut ctl = build_controller(&args.source)?;
    let frames = frame_count(args.seconds, args.fps)?;

    let mut last: Option<(fil::Preset, fil::Phase)> = None;
    for i in 0..=frames {
        let t = i as f64 / args.fps;
        ctl.tick(t);
        let status = ctl.status();
        let key = (status.preset, status.phase);
        if last == Some(key) {
            continue;
        }
        last = Some(key);

        if args.json {
            let line = serde_json::json!({ "t": t, "status": status });
            println!("{line}");
        } else {
            println!("{t:9.3}s  {status}");
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut ctl = build_controller(&args.source)?;
    let frames = frame_count(args.at, args.fps)?;
    for i in 0..=frames {
        ctl.tick(i as f64 / args.fps);
    }

    let settings = fil::RasterSettings {
        use_segment_colors: args.color,
        ..fil::RasterSettings::default()
    };
    let img = fil::rasterize(
        &ctl.render_list(),
        &ctl.viewport(),
        args.width,
        args.height,
        &settings,
    )?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({})", args.out.display(), ctl.status());
    Ok(())
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    let cfg = read_config(&args.source)?;
    let store = read_segments(&args.source.segments);
    let table = cfg.preset_table();
    for preset in fil::Preset::ALL {
        let visible = table.resolve(preset.name(), &store).len();
        println!("{:<14} {visible:>5} / {}", preset.name(), store.len());
    }
    Ok(())
}
