use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "polytrace", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the extracted drawing as JSON.
    Extract(ExtractArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the tracing animation as a GIF.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input text document (one block per line).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Accept scientific-notation exponents inside tuples.
    #[arg(long, default_value_t = false)]
    allow_exponent: bool,
}

#[derive(Parser, Debug)]
struct CanvasArgs {
    /// Output width in pixels.
    #[arg(long, default_value_t = 600)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Free pixels kept on each side of the drawing.
    #[arg(long, default_value_t = 12)]
    margin: u32,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    canvas: CanvasArgs,

    /// Frame index (0-based).
    #[arg(long)]
    index: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    canvas: CanvasArgs,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Playback frame rate.
    #[arg(long, default_value_t = 20)]
    fps: u32,

    /// Fail instead of overwriting an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// GIF palette quantization speed (1 = best, 30 = fastest).
    #[arg(long, default_value_t = 10)]
    speed: i32,
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
        Command::Extract(args) => cmd_extract(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_drawing(input: &InputArgs) -> anyhow::Result<polytrace::Drawing> {
    let mut source = polytrace::PlainTextSource::open(&input.in_path);
    let opts = polytrace::ExtractOpts {
        allow_exponent: input.allow_exponent,
    };
    polytrace::extract_from(&mut source, opts)
        .with_context(|| format!("extract shapes from '{}'", input.in_path.display()))
}

fn render_opts(args: &CanvasArgs) -> polytrace::RenderOpts {
    polytrace::RenderOpts {
        canvas: polytrace::Canvas {
            width: args.width,
            height: args.height,
        },
        margin_px: args.margin,
        ..polytrace::RenderOpts::default()
    }
}

fn cmd_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let drawing = load_drawing(&args.input)?;
    let json = serde_json::to_string_pretty(&drawing)
        .map_err(|e| polytrace::PolytraceError::serde(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let drawing = load_drawing(&args.input)?;
    let frame = polytrace::render_frame_at(
        &drawing,
        polytrace::FrameIndex(args.index),
        &render_opts(&args.canvas),
    )?;
    polytrace::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let drawing = load_drawing(&args.input)?;
    let opts = render_opts(&args.canvas);
    let fps = polytrace::Fps::whole(args.fps)?;

    let mut sink = polytrace::GifSink::new(polytrace::GifSinkOpts {
        out_path: Some(args.out.clone()),
        overwrite: !args.no_overwrite,
        bg_rgba: opts.background,
        speed: args.speed,
    });
    let stats = polytrace::render_to_sink(&drawing, fps, &opts, &mut sink)?;

    eprintln!(
        "wrote {} ({} frames, {} shapes)",
        args.out.display(),
        stats.frames_rendered,
        stats.shapes_rendered
    );
    Ok(())
}
