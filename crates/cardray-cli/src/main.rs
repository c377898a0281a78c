//! Cardray CLI - render the business-card scene from the command line

use anyhow::{Context, Result, bail};
use cardray_core::output::{self, OutputFormat};
use cardray_core::prelude::*;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "cardray")]
#[command(about = "Path trace the business-card scene", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the scene to an image
    Render {
        /// Output file (.ppm or .png), or "-" for PPM on stdout
        #[arg(short, long, default_value = "card.ppm")]
        output: PathBuf,

        /// Settings file (JSON); missing keys use defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Image width
        #[arg(long)]
        width: Option<u32>,

        /// Image height
        #[arg(long)]
        height: Option<u32>,

        /// Samples per pixel
        #[arg(long)]
        samples: Option<u32>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Sample the scene at a point and march a camera ray through it
    Probe {
        x: f32,
        y: f32,
        z: f32,

        /// Settings file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the default settings as JSON
    Settings,
}

fn main() -> Result<()> {
    // stdout may carry the image, so logs go to stderr
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            output,
            config,
            width,
            height,
            samples,
            seed,
        } => {
            let mut settings = load_settings(config.as_deref())?;
            let image = &mut settings.image;
            image.width = width.unwrap_or(image.width);
            image.height = height.unwrap_or(image.height);
            image.samples = samples.unwrap_or(image.samples);
            image.seed = seed.unwrap_or(image.seed);
            run_render(&settings, &output)?;
        }
        Commands::Probe { x, y, z, config } => {
            let settings = load_settings(config.as_deref())?;
            run_probe(&settings, Vec3::new(x, y, z))?;
        }
        Commands::Settings => {
            println!("{}", RenderSettings::default().to_json()?);
        }
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<RenderSettings> {
    match path {
        Some(path) => RenderSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(RenderSettings::default()),
    }
}

fn run_render(settings: &RenderSettings, output: &Path) -> Result<()> {
    let renderer = Renderer::from_settings(settings).context("Invalid render settings")?;
    let mut sink = output::open(output)
        .with_context(|| format!("Failed to open output {}", output.display()))?;
    let format = OutputFormat::from_extension(output).unwrap_or_default();
    let mut rng = ChaCha20Rng::seed_from_u64(settings.image.seed);

    let stats = renderer
        .render(sink.as_mut(), &mut rng)
        .with_context(|| format!("Failed to render to {}", output.display()))?;

    info!(
        output = %output.display(),
        format = format.name(),
        width = stats.width,
        height = stats.height,
        seconds = stats.elapsed.as_secs_f64(),
        "wrote image"
    );
    Ok(())
}

fn run_probe(settings: &RenderSettings, point: Vec3) -> Result<()> {
    settings.validate().context("Invalid render settings")?;

    let scene = CardScene::new(&settings.scene);
    let sample = scene.sample(point);
    println!("Point:    {point}");
    println!("Distance: {:.4}", sample.distance);
    println!("Surface:  {}", sample.kind);

    let eye = settings.camera.eye;
    let offset = point - eye;
    if offset.length_squared() <= f32::EPSILON {
        bail!("Probe point coincides with the camera eye");
    }

    let marcher = Raymarcher::new(scene, settings.marcher);
    println!();
    println!("Ray from eye {eye}:");
    match marcher.march(eye, offset.normalize()) {
        MarchResult::Miss => println!("  miss"),
        MarchResult::Hit(hit) => {
            println!("  Surface:  {}", hit.kind);
            println!("  Traveled: {:.4}", hit.traveled);
            println!("  Position: {}", hit.position);
            println!("  Normal:   {}", hit.normal);
        }
    }

    Ok(())
}
