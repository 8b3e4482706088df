use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use flythew::{
    AnimationAsset, Canvas, CelebrationConfig, CelebrationPlugin, Clock, FileFeed, InMemorySink,
    ManualClock, PngSequenceSink, SystemClock,
};

#[derive(Parser, Debug)]
#[command(name = "flythew", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll once, render a few ticks and save the last frame as a PNG.
    Frame(FrameArgs),
    /// Poll and render in a loop, writing every presented frame.
    Run(RunArgs),
    /// Poll once and print the celebration status as JSON.
    Status(StatusArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Plugin config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scoreboard JSON document, re-read on every poll.
    #[arg(long)]
    scoreboard: PathBuf,

    /// Force a simulated win regardless of the scoreboard.
    #[arg(long)]
    simulate: bool,
}

#[derive(Parser, Debug)]
struct DisplayArgs {
    #[arg(long, default_value_t = 64)]
    width: u32,

    #[arg(long, default_value_t = 32)]
    height: u32,

    /// Animation file (GIF or still image). The flag is synthesized when omitted.
    #[arg(long)]
    asset: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    display: DisplayArgs,

    /// Render ticks before the frame is saved.
    #[arg(long, default_value_t = 1)]
    renders: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    display: DisplayArgs,

    /// Output directory for the PNG sequence.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of poll + render ticks.
    #[arg(long, default_value_t = 120)]
    ticks: u32,

    /// Wall time between ticks.
    #[arg(long, default_value_t = 83)]
    tick_ms: u64,
}

#[derive(Parser, Debug)]
struct StatusArgs {
    #[command(flatten)]
    source: SourceArgs,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Run(args) => cmd_run(args),
        Command::Status(args) => cmd_status(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(source: &SourceArgs) -> anyhow::Result<CelebrationConfig> {
    let mut cfg = match &source.config {
        Some(path) => {
            let s = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            CelebrationConfig::from_json_str(&s)?
        }
        None => CelebrationConfig::default(),
    };
    if source.simulate {
        cfg.simulate_win = true;
    }
    Ok(cfg)
}

fn build_plugin(
    source: &SourceArgs,
    display: Option<&DisplayArgs>,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<CelebrationPlugin> {
    let cfg = read_config(source)?;
    let (canvas, asset) = match display {
        Some(d) => (
            Canvas::new(d.width, d.height)?,
            d.asset
                .clone()
                .map_or(AnimationAsset::None, AnimationAsset::Path),
        ),
        None => (Canvas::new(64, 32)?, AnimationAsset::None),
    };
    let feed = Box::new(FileFeed::new(&source.scoreboard));
    Ok(CelebrationPlugin::new(cfg, canvas, asset, feed, clock)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let clock = Arc::new(ManualClock::new(chrono::Utc::now()));
    let mut plugin = build_plugin(&args.source, Some(&args.display), clock.clone())?;
    plugin.update();

    let step = Duration::from_secs_f64(plugin.config().synth_frame_secs());
    let mut sink = InMemorySink::new();
    for _ in 0..args.renders.max(1) {
        plugin.display(&mut sink);
        clock.advance(step);
    }

    let frame = sink
        .last()
        .context("no celebration is active; nothing was rendered")?;
    write_png(&args.out, frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut plugin = build_plugin(&args.source, Some(&args.display), Arc::new(SystemClock))?;
    let mut sink = PngSequenceSink::create(&args.out_dir)?;
    let tick = Duration::from_millis(args.tick_ms);

    for _ in 0..args.ticks {
        plugin.update();
        plugin.display(&mut sink);
        std::thread::sleep(tick);
    }

    plugin.cleanup();
    eprintln!(
        "wrote {} frames to {}",
        sink.written(),
        sink.dir().display()
    );
    Ok(())
}

fn cmd_status(args: StatusArgs) -> anyhow::Result<()> {
    let mut plugin = build_plugin(&args.source, None, Arc::new(SystemClock))?;
    plugin.update();
    let json = serde_json::to_string_pretty(&plugin.status()).context("serialize status")?;
    println!("{json}");
    Ok(())
}

fn write_png(path: &Path, frame: &image::RgbImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
