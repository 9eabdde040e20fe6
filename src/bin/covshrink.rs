use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use covshrink::{
    CpuBackend, FfmpegSink, FfmpegSinkOpts, FrameIndex, PngSequenceSink, RenderSettings,
    RenderThreading, SceneConfig, Timeline,
};

#[derive(Parser, Debug)]
#[command(name = "covshrink", version, about = "Animate covariance shrinkage")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` applies otherwise.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the animation to an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render the animation as a numbered PNG sequence.
    Frames(FramesArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print the shrunk matrix across evenly spaced coefficients.
    Table(TableArgs),
    /// Print the default scene configuration as JSON.
    Config,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene configuration JSON (defaults are used when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file for on-screen text; overrides the config and `$COVSHRINK_FONT`.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ThreadingArgs {
    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size in frames (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Rasterize every frame even when it repeats the previous one.
    #[arg(long, default_value_t = false)]
    no_elision: bool,
}

impl ThreadingArgs {
    fn to_threading(&self) -> RenderThreading {
        RenderThreading {
            parallel: self.parallel,
            chunk_size: self.chunk_size,
            threads: self.threads,
            static_frame_elision: !self.no_elision,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,
    #[command(flatten)]
    threading: ThreadingArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of replacing an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,
    #[command(flatten)]
    threading: ThreadingArgs,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Scene configuration JSON providing Σ, T and the precision.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of intervals between λ = 0 and λ = 1.
    #[arg(long, default_value_t = 4)]
    steps: u32,

    /// Emit JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Table(args) => cmd_table(args),
        Command::Config => cmd_config(),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(p) => SceneConfig::from_path(p)
            .with_context(|| format!("load scene config '{}'", p.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<(Timeline, CpuBackend)> {
    let cfg = load_config(args.config.as_ref())?;
    let font = args.font.as_deref().or(cfg.font.as_deref());
    let font_bytes = match covshrink::resolve_font(font)? {
        Some(path) => {
            tracing::info!(font = %path.display(), "using font");
            Some(covshrink::load_font_bytes(&path)?)
        }
        None => {
            tracing::warn!(
                "no font found; set --font or ${} to draw text",
                covshrink::FONT_ENV
            );
            None
        }
    };

    let tl = Timeline::build(&cfg)?;
    let backend = CpuBackend::new(RenderSettings { font_bytes })?;
    Ok((tl, backend))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (tl, mut backend) = load_scene(&args.scene)?;
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        overwrite: !args.no_overwrite,
        bg_rgba: tl.config().style.background.to_rgba8(),
        ..FfmpegSinkOpts::new(&args.out)
    });
    let stats = covshrink::render_range(
        &tl,
        tl.full_range(),
        &mut backend,
        &mut sink,
        &args.threading.to_threading(),
    )?;

    eprintln!(
        "wrote {} ({} frames, {} rendered, {} elided)",
        args.out.display(),
        stats.frames_total,
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (tl, mut backend) = load_scene(&args.scene)?;
    let mut sink = PngSequenceSink::new(&args.out_dir);
    let stats = covshrink::render_range(
        &tl,
        tl.full_range(),
        &mut backend,
        &mut sink,
        &args.threading.to_threading(),
    )?;

    eprintln!(
        "wrote {} frames to {} ({} rendered, {} elided)",
        sink.frames_written(),
        args.out_dir.display(),
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (tl, mut backend) = load_scene(&args.scene)?;
    let frame = covshrink::render_frame(&tl, FrameIndex(args.frame), &mut backend)?;
    covshrink::save_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_table(args: TableArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    cfg.validate()?;

    let mut rows = Vec::new();
    for lambda in covshrink::lambda_grid(args.steps)? {
        let shrunk = covshrink::shrink(&cfg.sigma, &cfg.target, lambda)?;
        rows.push((lambda, covshrink::format_matrix(&shrunk, cfg.precision)));
    }

    if args.json {
        let out = rows
            .iter()
            .map(|(lambda, m)| serde_json::json!({ "lambda": lambda, "matrix": m }))
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (lambda, m) in &rows {
            let body = m
                .iter()
                .map(|row| format!("[{}]", row.join(", ")))
                .collect::<Vec<_>>()
                .join(", ");
            println!("λ = {lambda:.prec$}  [{body}]", prec = cfg.precision);
        }
    }
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    println!("{}", SceneConfig::default().to_json_pretty()?);
    Ok(())
}
