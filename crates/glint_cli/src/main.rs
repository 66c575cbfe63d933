//! Glint driver: renders frames of the demo scene from an orbiting camera.
//!
//! One tracer lives across all frames, so its ray cache keeps growing and
//! the reuse count shows how often rays repeat between camera poses.

mod cli;
mod orbit;
mod scene;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use glint_tracer::{render_image, RayTracer, RenderConfig};

use cli::Args;
use orbit::Orbit;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    log::info!("Starting Glint");

    let config = build_config(&args)?;
    check_zoom(args.zoom)?;

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create output directory {}", args.output.display()))?;

    let mut tracer = RayTracer::from_config(&config);
    let mut orbit = Orbit::new(args.rotation, args.rotation_max, args.rotation_step, args.zoom);

    log::info!(
        "Rendering {} frame(s) at {}x{}, depth {}, caching {}, {}",
        args.frames,
        config.width,
        config.height,
        config.max_depth,
        if config.caching { "on" } else { "off" },
        if config.parallel { "parallel" } else { "sequential" }
    );

    for frame in 0..args.frames {
        let (x, z) = orbit.position();
        let scene = scene::default_scene(x, z).context("Failed to build demo scene")?;

        let image = render_image(&mut tracer, &scene, &config);

        let path = args.output.join(format!("frame_{frame:04}.png"));
        image
            .save_png(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?;

        let stats = tracer.stats();
        log::info!(
            "Frame {} (rotation {}) -> {} | rayCacheSize: {} reused: {}",
            frame,
            orbit.rotation,
            path.display(),
            stats.cache_size,
            stats.reused
        );

        if orbit.advance() {
            log::debug!("Orbit wrapped, resetting reuse count");
            tracer.reset_reused();
        }
    }

    Ok(())
}

/// Settings file (if any) with command line overrides applied.
fn build_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => RenderConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if args.no_cache {
        config.caching = false;
    }
    if args.parallel {
        config.parallel = true;
    }

    config.validate().context("Invalid render settings")?;
    Ok(config)
}

fn check_zoom(zoom: f64) -> Result<()> {
    ensure!(zoom.is_finite() && zoom > 0.0, "zoom must be a positive finite number, got {}", zoom);
    Ok(())
}
