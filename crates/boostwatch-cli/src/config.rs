use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

/// Tool configuration, loaded from a TOML file.
///
/// Every field has a default so a missing or partial file still yields a
/// usable configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Executable name of the game process to attach to.
    pub process_name: String,
    /// Instance name of the monitored entity in the active world.
    pub entity_name: String,
    /// Whether to write the per-metric overlay files.
    pub overlay_enabled: bool,
    /// Directory the overlay files are written into.
    pub overlay_dir: PathBuf,
    /// File the spark spawn requests are appended to.
    pub effects_path: PathBuf,
    /// Frame interval of the sampling loop, in milliseconds.
    pub frame_interval_ms: u64,
    /// Resolved texture handle for the red spark material.
    pub spark_red_texture: u32,
    /// Resolved texture handle for the yellow spark material.
    pub spark_yellow_texture: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            process_name: "Rayman2.exe".to_string(),
            entity_name: "Rayman".to_string(),
            overlay_enabled: true,
            overlay_dir: PathBuf::from("overlay"),
            effects_path: PathBuf::from("effects.jsonl"),
            frame_interval_ms: 16,
            spark_red_texture: 0,
            spark_yellow_texture: 0,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
