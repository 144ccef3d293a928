//! Spawn-request delivery to the external particle subsystem.
//!
//! The bridge appends each request as one JSON line to a file the visual
//! layer tails. Delivery is fire-and-forget; the trigger already drops
//! failures silently, so nothing here retries.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::effect::{ParticleSink, SpawnRequest};
use crate::error::Result;

pub struct FileEffectBridge {
    path: PathBuf,
}

impl FileEffectBridge {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ParticleSink for FileEffectBridge {
    fn spawn(&self, request: &SpawnRequest) -> Result<()> {
        let mut line = serde_json::to_string(request)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Sink that discards every request, for headless runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullParticleSink;

impl ParticleSink for NullParticleSink {
    fn spawn(&self, _request: &SpawnRequest) -> Result<()> {
        Ok(())
    }
}
