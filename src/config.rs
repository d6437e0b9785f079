//! Command-line options and the validated runtime configuration.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_SIZE: usize = 50;
pub const DEFAULT_MIN_VALUE: u32 = 10;
pub const DEFAULT_MAX_VALUE: u32 = 100;
pub const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("array size must be at least 1")]
    EmptyArray,
    #[error("frame rate must be at least 1")]
    ZeroFps,
    #[error("window must have a non-zero size (got {width}x{height})")]
    ZeroWindow { width: u32, height: u32 },
    #[error("minimum bar value must be at least 1")]
    ZeroMinimum,
    #[error("minimum bar value {min} exceeds maximum {max}")]
    InvertedRange { min: u32, max: u32 },
}

/// Animate bubble, insertion and selection sort on random bars.
///
/// Keys: R new array, Space sort, A/D ascending/descending,
/// B/I/S bubble/insertion/selection, Esc quit.
#[derive(Parser, Debug)]
#[command(name = "sort-visualizer", version)]
pub struct Cli {
    /// Window width in logical pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Number of bars
    #[arg(short = 'n', long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Smallest bar value
    #[arg(long, default_value_t = DEFAULT_MIN_VALUE)]
    pub min: u32,

    /// Largest bar value
    #[arg(long, default_value_t = DEFAULT_MAX_VALUE)]
    pub max: u32,

    /// Frames (and therefore sort steps) per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Seed for reproducible arrays and colors
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl Cli {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let config = Config {
            width: self.width,
            height: self.height,
            size: self.size,
            min_value: self.min,
            max_value: self.max,
            fps: self.fps,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub size: usize,
    pub min_value: u32,
    pub max_value: u32,
    pub fps: u32,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            size: DEFAULT_SIZE,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            fps: DEFAULT_FPS,
            seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroWindow { width: self.width, height: self.height });
        }
        if self.size == 0 {
            return Err(ConfigError::EmptyArray);
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.min_value == 0 {
            return Err(ConfigError::ZeroMinimum);
        }
        if self.min_value > self.max_value {
            return Err(ConfigError::InvertedRange { min: self.min_value, max: self.max_value });
        }
        Ok(())
    }

    /// Time budget of one frame at the configured rate.
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
