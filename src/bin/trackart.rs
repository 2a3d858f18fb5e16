use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "trackart", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a track over a photo and write a PNG.
    Render(RenderArgs),
    /// Print point count and bounding box of a GPX track.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input GPX track.
    #[arg(long)]
    track: PathBuf,

    /// Input photo (PNG or JPEG).
    #[arg(long)]
    photo: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render settings as JSON; individual flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Map backend.
    #[arg(long, value_enum, default_value_t = ProviderChoice::Sketch)]
    provider: ProviderChoice,

    /// External map renderer program, required with `--provider command`.
    #[arg(long)]
    map_cmd: Option<PathBuf>,

    /// Extra argument for the map renderer (repeatable).
    #[arg(long = "map-arg", allow_hyphen_values = true)]
    map_args: Vec<String>,

    /// Kill the map renderer after this many seconds.
    #[arg(long, default_value_t = 30)]
    map_timeout_secs: u64,
}

#[derive(Args, Debug, Default)]
struct ConfigOverrides {
    /// Dot color as #RRGGBB.
    #[arg(long)]
    circle_color: Option<trackart::Rgb8>,

    /// Dot radius in pixels.
    #[arg(long)]
    circle_size: Option<u32>,

    /// Draw a dot for every Nth point.
    #[arg(long)]
    dot_spacing: Option<u32>,

    /// Fractional inset on each side, 0 to 0.25.
    #[arg(long)]
    margin: Option<f64>,

    /// Black overlay strength, 0 to 1.
    #[arg(long)]
    background_opacity: Option<f64>,

    /// Map weight against the photo, 0 to 1.
    #[arg(long)]
    map_opacity: Option<f64>,

    /// Percentage of points hidden at each end, 0 to 50.
    #[arg(long)]
    trim_percent: Option<u32>,
}

impl ConfigOverrides {
    fn apply(&self, cfg: &mut trackart::RenderConfig) {
        if let Some(v) = self.circle_color {
            cfg.circle_color = v;
        }
        if let Some(v) = self.circle_size {
            cfg.circle_size = v;
        }
        if let Some(v) = self.dot_spacing {
            cfg.dot_spacing = v;
        }
        if let Some(v) = self.margin {
            cfg.margin = v;
        }
        if let Some(v) = self.background_opacity {
            cfg.background_opacity = v;
        }
        if let Some(v) = self.map_opacity {
            cfg.map_opacity = v;
        }
        if let Some(v) = self.trim_percent {
            cfg.trim_percent = v;
        }
    }
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input GPX track.
    #[arg(long)]
    track: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProviderChoice {
    /// Built-in offline basemap.
    Sketch,
    /// External renderer speaking JSON on stdin and an image on stdout.
    Command,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_track(path: &Path) -> anyhow::Result<Vec<trackart::Coordinate>> {
    let bytes = std::fs::read(path).with_context(|| format!("read track '{}'", path.display()))?;
    let coords = trackart::parse_gpx(&bytes)
        .with_context(|| format!("parse track '{}'", path.display()))?;
    Ok(coords)
}

fn resolve_config(args: &RenderArgs) -> anyhow::Result<trackart::RenderConfig> {
    // Ranges are checked once, after flags are applied, so a flag can fix a bad file value.
    let mut cfg: trackart::RenderConfig = match &args.config {
        Some(path) => {
            let s = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            serde_json::from_str(&s)
                .with_context(|| format!("parse config '{}'", path.display()))?
        }
        None => trackart::RenderConfig::default(),
    };
    args.overrides.apply(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}

fn make_provider(args: &RenderArgs) -> anyhow::Result<Box<dyn trackart::MapSnapshotProvider>> {
    match args.provider {
        ProviderChoice::Sketch => Ok(Box::new(trackart::SketchMapProvider::default())),
        ProviderChoice::Command => {
            let program = args
                .map_cmd
                .as_ref()
                .context("--provider command requires --map-cmd")?;
            Ok(Box::new(
                trackart::CommandMapProvider::new(program)
                    .args(&args.map_args)
                    .timeout(Duration::from_secs(args.map_timeout_secs)),
            ))
        }
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let coords = read_track(&args.track)?;
    let photo = trackart::load_image(&args.photo)
        .with_context(|| format!("load photo '{}'", args.photo.display()))?;

    let provider = make_provider(&args)?;
    tracing::info!(
        provider = provider.name(),
        points = coords.len(),
        width = photo.width(),
        height = photo.height(),
        "rendering"
    );

    let mut pipeline = trackart::Pipeline::new(provider);
    let rendered = pipeline.render_with_stats(&photo, &coords, config)?;

    trackart::save_png(&rendered.image, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    let stats = &rendered.stats;
    tracing::info!(
        points = stats.trimmed_points,
        snapshot_ms = stats.snapshot_time.as_millis() as u64,
        composite_ms = stats.composite_time.as_millis() as u64,
        draw_ms = stats.draw_time.as_millis() as u64,
        "wrote {}",
        args.out.display()
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let coords = read_track(&args.track)?;
    let bbox = trackart::BoundingBox::compute(&coords)?;
    let center = bbox.center();
    println!("points: {}", coords.len());
    println!(
        "bounds: lat [{:.6}, {:.6}] lon [{:.6}, {:.6}]",
        bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon
    );
    println!("center: {:.6}, {:.6}", center.lat, center.lon);
    Ok(())
}
