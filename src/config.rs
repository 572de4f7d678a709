//! Startup configuration
//!
//! Uses RON (Rusty Object Notation) for a human-readable config file.
//! A missing file falls back to the documented defaults; a file that
//! exists but fails to parse is a fatal startup error.

use crate::rasterizer::{HEIGHT, WIDTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file looked up next to the working directory at startup
pub const CONFIG_FILE: &str = "torus.ron";

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

/// Run parameters, fixed for the lifetime of the process.
///
/// Defaults: 800x600 viewport, tube radius 100, center radius 200,
/// 40x20 mesh resolution, camera distance 650, rotation step 0.02 rad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Viewport width in pixels
    pub width: usize,
    /// Viewport height in pixels
    pub height: usize,
    /// Torus tube radius (R1)
    pub tube_radius: f32,
    /// Torus center radius (R2)
    pub center_radius: f32,
    /// Major-circle samples
    pub num_circles: usize,
    /// Minor-circle samples
    pub num_segments: usize,
    /// Camera distance (K2). Must stay well above tube_radius +
    /// center_radius: there is no near-plane clip, only a skip of
    /// triangles that land on the camera plane itself.
    pub camera_distance: f32,
    /// Radians applied per frame while a rotation key is held
    pub angle_step: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            tube_radius: 100.0,
            center_radius: 200.0,
            num_circles: 40,
            num_segments: 20,
            camera_distance: 650.0,
            angle_step: 0.02,
        }
    }
}

impl Config {
    /// Load a config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = ron::from_str(&contents)?;
        Ok(config)
    }

    /// Load the config file if it exists, defaults otherwise.
    /// A present-but-broken file is an error, not a silent fallback.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }
}
