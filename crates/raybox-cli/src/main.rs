//! raybox CLI - offline ray tracer
//!
//! Renders the built-in demo scenes to PNG and traces single debug rays.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use raybox_render::{Camera, Renderer, Scene};

mod config;
mod scenes;

use config::Config;

#[derive(Parser)]
#[command(name = "raybox")]
#[command(about = "Offline ray tracer with CSG solids and adaptive antialiasing", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that builds a scene.
#[derive(Args)]
struct SceneArgs {
    /// Path to a raybox.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,
    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,
    /// Built-in scene to render (see `raybox scenes`)
    #[arg(short, long)]
    scene: Option<String>,
    /// Bitmap used by the `textured` scene
    #[arg(short, long)]
    texture: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene to a PNG file
    Render {
        #[command(flatten)]
        args: SceneArgs,
        /// Output PNG file
        #[arg(short, long, default_value = "raybox.png")]
        output: PathBuf,
        /// Disable adaptive antialiasing
        #[arg(long)]
        no_aa: bool,
    },
    /// Trace a single primary ray and log every step
    Trace {
        #[command(flatten)]
        args: SceneArgs,
        /// Pixel column (fractional values allowed)
        x: f64,
        /// Pixel row (fractional values allowed)
        y: f64,
    },
    /// List the built-in scenes
    Scenes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // tracing a ray is only useful with the debug records visible
    let debug = cli.verbose || matches!(cli.command, Commands::Trace { .. });
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if debug { "debug" } else { "info" }),
    )
    .init();

    match cli.command {
        Commands::Render {
            args,
            output,
            no_aa,
        } => {
            let mut config = load_config(&args)?;
            if no_aa {
                config.render.antialiasing = false;
            }
            render(&config, &output)?;
        }
        Commands::Trace { args, x, y } => {
            let config = load_config(&args)?;
            trace(&config, x, y)?;
        }
        Commands::Scenes => {
            for (name, description) in scenes::SCENES {
                println!("{:<10} {}", name, description);
            }
        }
    }

    Ok(())
}

/// Read the config file (or defaults) and apply command-line overrides.
fn load_config(args: &SceneArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(scene) = &args.scene {
        config.scene = scene.clone();
    }
    if let Some(texture) = &args.texture {
        config.texture = Some(texture.clone());
    }

    config.validate()?;
    Ok(config)
}

fn prepare(config: &Config) -> Result<(Scene, Camera)> {
    let (scene, mut camera) = scenes::build(config)?;
    camera.begin_render(config.width, config.height);
    log::debug!(
        "scene `{}`: {} nodes, {}x{}",
        config.scene,
        scene.nodes().len(),
        config.width,
        config.height
    );
    Ok((scene, camera))
}

fn render(config: &Config, output: &Path) -> Result<()> {
    let (scene, camera) = prepare(config)?;
    let renderer = Renderer::new(config.render);

    let (frame, stats) = renderer.render(&scene, &camera);
    log::info!(
        "render time: {:.2} seconds ({} rays, {} pixels antialiased)",
        stats.elapsed.as_secs_f64(),
        stats.primary_rays,
        stats.antialiased_pixels
    );

    let image = image::RgbImage::from_raw(frame.width(), frame.height(), frame.to_rgb8())
        .context("framebuffer size does not match its dimensions")?;
    image
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Rendered {} to {}", config.scene, output.display());

    Ok(())
}

fn trace(config: &Config, x: f64, y: f64) -> Result<()> {
    let (scene, camera) = prepare(config)?;
    let renderer = Renderer::new(config.render);

    let color = renderer.trace_pixel(&scene, &camera, x, y);
    let [r, g, b] = color.to_rgb8();
    println!(
        "({}, {}) -> ({:.4}, {:.4}, {:.4}) #{:02x}{:02x}{:02x}",
        x, y, color.r, color.g, color.b, r, g, b
    );

    Ok(())
}
