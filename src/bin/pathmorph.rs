use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use pathmorph::PathGeometry as _;

#[derive(Parser, Debug)]
#[command(name = "pathmorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the morph at one progress value as a PNG.
    Frame(FrameArgs),
    /// Play a transition and write every frame as a PNG sequence.
    Render(RenderArgs),
    /// List the identified paths of an SVG document with their lengths.
    Paths(PathsArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// SVG document holding the source and target paths.
    #[arg(long)]
    svg: PathBuf,

    /// Morph configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Canvas width in pixels (defaults to the SVG viewport width).
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (defaults to the SVG viewport height).
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Morph progress in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory for the PNG sequence.
    #[arg(long)]
    out_dir: PathBuf,

    /// Which run to play.
    #[arg(long, value_enum, default_value_t = Direction::Forwards)]
    direction: Direction,

    /// Frames per second of the sequence.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Stop after this many frames (loops never stop on their own).
    #[arg(long, default_value_t = 600)]
    max_frames: u64,
}

#[derive(Parser, Debug)]
struct PathsArgs {
    /// SVG document to inspect.
    #[arg(long)]
    svg: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Direction {
    Forwards,
    Backwards,
    Loop,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Paths(args) => cmd_paths(args),
    }
}

fn load_source(
    args: &SourceArgs,
) -> anyhow::Result<(pathmorph::MorphConfig, pathmorph::Document)> {
    let config = pathmorph::MorphConfig::from_json_file(&args.config)
        .with_context(|| format!("load config '{}'", args.config.display()))?;
    let doc = pathmorph::Document::from_svg_file(&args.svg)
        .with_context(|| format!("load svg '{}'", args.svg.display()))?;

    let viewport = doc.viewport();
    let width = args
        .width
        .or(viewport.map(|c| c.width))
        .context("canvas width unknown; pass --width")?;
    let height = args
        .height
        .or(viewport.map(|c| c.height))
        .context("canvas height unknown; pass --height")?;
    let canvas = pathmorph::Canvas::new(width, height)?;

    let doc = doc.with_canvas(config.canvas_id.clone(), canvas);
    Ok((config, doc))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.progress),
        "--progress must be within [0, 1], got {}",
        args.progress
    );
    let (config, doc) = load_source(&args.source)?;
    config.log_diagnostics();
    config.validate()?;

    let from = doc.sample(&config.from_path_id, config.sample_steps)?;
    let to = doc.sample(&config.to_path_id, config.sample_steps)?;
    let points = pathmorph::interpolate(&from, &to, args.progress)?;

    let canvas = doc.canvas(&config.canvas_id)?;
    let mut surface = pathmorph::CpuSurface::new(canvas, config.background)?;
    pathmorph::render_points(&mut surface, &points, &config.paint_style())?;

    ensure_parent_dir(&args.out)?;
    pathmorph::write_png(&args.out, &surface.snapshot())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (config, doc) = load_source(&args.source)?;

    let clock = pathmorph::ManualClock::new(0.0);
    let mut controller: pathmorph::MorphController =
        pathmorph::MorphController::new(config, &doc, clock.clone())?;
    match args.direction {
        Direction::Forwards => {
            controller.forwards();
        }
        Direction::Backwards => {
            // Settle on the target shape first so the run is visible.
            let handle = controller.forwards();
            clock.advance(controller.config().duration_ms);
            controller.on_frame(handle)?;
            controller.backwards();
        }
        Direction::Loop => {
            controller.start_loop();
        }
    }

    let player = pathmorph::Player::new(pathmorph::Fps::new(args.fps, 1)?, args.max_frames)?;
    let mut sink = pathmorph::PngSequenceSink::new(&args.out_dir);
    let stats = player.play_into_sink(&mut controller, &clock, &mut sink)?;

    eprintln!(
        "wrote {} frames to {} (final progress {:.3})",
        stats.frames,
        args.out_dir.display(),
        stats.final_progress
    );
    Ok(())
}

fn cmd_paths(args: PathsArgs) -> anyhow::Result<()> {
    let doc = pathmorph::Document::from_svg_file(&args.svg)
        .with_context(|| format!("load svg '{}'", args.svg.display()))?;
    if let Some(vp) = doc.viewport() {
        println!("viewport: {}x{}", vp.width, vp.height);
    }
    for id in doc.path_ids() {
        let outline = doc.path(id)?;
        println!("{id}: length {:.3}", outline.total_length());
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
