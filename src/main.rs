use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ascii_fps::render::render3d::RenderStyle;
use ascii_fps::{Config, Engine, Maze, MoveIntent};

#[cfg(feature = "window")]
mod display;

/// Fixed step used when no window drives the clock.
const HEADLESS_DT: f64 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "ascii_fps", about = "Tile-resolution ray-casting renderer")]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map file, overrides the config
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Sample wall textures instead of flat colours
    #[arg(long)]
    textured: bool,

    #[arg(long)]
    no_minimap: bool,

    /// Render without opening a window
    #[arg(long)]
    headless: bool,

    /// Frames to render in headless mode
    #[arg(long, default_value = "60")]
    frames: u32,

    /// Save the last headless frame as a PNG
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if cli.map.is_some() {
        config.map = cli.map.clone();
    }
    if cli.textured {
        config.style = RenderStyle::Textured;
    }
    if cli.no_minimap {
        config.minimap = false;
    }

    let maze = match &config.map {
        Some(path) => Maze::load(path).with_context(|| format!("loading map {}", path.display()))?,
        None => Maze::reference(),
    };
    let mut engine = Engine::new(&config, maze);

    if cli.headless {
        return run_headless(&mut engine, &config, cli.frames, cli.screenshot.as_deref());
    }

    #[cfg(feature = "window")]
    {
        display::run(&mut engine, &config)
    }
    #[cfg(not(feature = "window"))]
    {
        tracing::warn!("built without the `window` feature, running headless");
        run_headless(&mut engine, &config, cli.frames, cli.screenshot.as_deref())
    }
}

fn run_headless(
    engine: &mut Engine,
    config: &Config,
    frames: u32,
    screenshot: Option<&Path>,
) -> anyhow::Result<()> {
    let intent = MoveIntent::default();
    for n in 0..frames {
        let report = engine.frame(&intent, HEADLESS_DT);
        tracing::debug!(frame = n, sprites = report.sprites_drawn, "{}", report.diagnostics);
    }
    tracing::info!(frames, "headless run finished");

    if let Some(path) = screenshot {
        let ts = config.tile_size;
        let fb = &engine.framebuffer;
        let img = image::RgbaImage::from_raw(fb.width * ts, fb.height * ts, fb.upscale_rgba(ts))
            .context("framebuffer size does not match the image")?;
        img.save(path)
            .with_context(|| format!("saving screenshot {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved screenshot");
    }
    Ok(())
}
