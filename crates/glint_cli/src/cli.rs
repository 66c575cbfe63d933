use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Render an orbiting view of the demo scene with a caching ray tracer")]
pub struct Args {
    /// JSON render settings; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Logging level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Maximum reflection depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Disable the ray cache
    #[arg(long)]
    pub no_cache: bool,

    /// Render buckets in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of frames to render
    #[arg(short, long, default_value = "1")]
    pub frames: u32,

    /// Starting camera rotation, in slider steps
    #[arg(long, default_value = "0")]
    pub rotation: u32,

    /// Rotation steps for a full orbit
    #[arg(long, default_value = "360")]
    pub rotation_max: u32,

    /// Rotation steps advanced per frame
    #[arg(long, default_value = "4")]
    pub rotation_step: u32,

    /// Camera distance from the scene axis, in units of 5
    #[arg(short, long, default_value = "3")]
    pub zoom: f64,

    /// Directory for the rendered frames
    #[arg(short, long, default_value = "frames")]
    pub output: PathBuf,
}
