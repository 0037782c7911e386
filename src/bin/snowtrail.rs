use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "snowtrail", version)]
struct Cli {
    /// Log progress at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the whole walk as a GIF, or an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single step as a PNG.
    Frame(FrameArgs),
    /// Print the GraphQL request body that fetches a contribution calendar.
    Query(QueryArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Activity JSON: a matrix, `{"contributions": [...]}`, or a contribution-calendar response.
    #[arg(long)]
    grid: PathBuf,

    /// Directory holding the sprite images (and optionally a `fonts/` directory).
    #[arg(long)]
    assets: PathBuf,

    /// Scene configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for scenery, bursts and snow; overrides the config.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output path; `.gif` or `.mp4`.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Step index (0-based).
    #[arg(long)]
    step: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct QueryArgs {
    /// Account login.
    #[arg(long)]
    login: String,

    /// Calendar year.
    #[arg(long)]
    year: i32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Query(args) => cmd_query(args),
    }
}

fn load_scene(
    args: &SceneArgs,
) -> anyhow::Result<(snowtrail::ActivityGrid, snowtrail::SceneAssets, snowtrail::SceneConfig)> {
    let mut config = match &args.config {
        Some(path) => snowtrail::SceneConfig::from_path(path)?,
        None => snowtrail::SceneConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    use snowtrail::ActivitySource as _;
    let grid =
        snowtrail::JsonFileSource::new(&args.grid).fetch(&snowtrail::ActivityQuery::default())?;
    let assets = snowtrail::SceneAssets::load(&snowtrail::DirAssetSource::new(&args.assets))?;
    Ok((grid, assets, config))
}

fn make_sink(
    out: &Path,
    config: &snowtrail::SceneConfig,
) -> anyhow::Result<Box<dyn snowtrail::FrameSink>> {
    let ext = out
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("gif") => Ok(Box::new(snowtrail::GifSink::new(snowtrail::GifSinkOpts {
            out_path: out.to_path_buf(),
            speed: config.gif_speed,
        }))),
        Some("mp4") => Ok(Box::new(snowtrail::FfmpegSink::new(
            snowtrail::FfmpegSinkOpts::new(out),
        ))),
        _ => anyhow::bail!(
            "unsupported output '{}': expected a .gif or .mp4 path",
            out.display()
        ),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (grid, assets, config) = load_scene(&args.scene)?;
    let mut sink = make_sink(&args.out, &config)?;
    let stats = snowtrail::run(grid, assets, &config, sink.as_mut())?;

    eprintln!(
        "wrote {} ({} frames, {}/{} blocks opened, seed {})",
        args.out.display(),
        stats.frames,
        stats.triggers_hit,
        stats.triggers_total,
        stats.seed
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (grid, assets, config) = load_scene(&args.scene)?;
    let frame = snowtrail::render_single_frame(grid, assets, &config, args.step)?;

    snowtrail::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_query(args: QueryArgs) -> anyhow::Result<()> {
    let body = snowtrail::ActivityQuery::new(args.login, args.year).graphql_request_body();
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
