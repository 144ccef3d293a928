use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::telemetry::TelemetrySnapshot;

/// File-based overlay output.
///
/// One text file per displayed metric, rewritten every refresh, so an
/// OBS-style text source can show each line independently.
pub struct OverlayOutput {
    enabled: bool,
    base_dir: PathBuf,
}

impl OverlayOutput {
    pub fn new(enabled: bool, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled,
            base_dir: base_dir.into(),
        }
    }

    /// Refresh every metric file from the snapshot.
    pub fn write_snapshot(&self, snap: &TelemetrySnapshot) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let particles_hint = if snap.particles_enabled {
            "disable"
        } else {
            "enable"
        };
        self.write_file(
            "particles.txt",
            &format!("Press P to {} particles", particles_hint),
        )?;
        self.write_file(
            "window.txt",
            &format!(
                "Press O to change rolling average duration ({})",
                snap.window_size
            ),
        )?;
        self.write_file(
            "rollboost.txt",
            &format!("Roll Boost Active: {}", snap.roll_boost_active),
        )?;
        self.write_file(
            "ground.txt",
            &format!("Time on Ground: {} frames", snap.ground_timer),
        )?;
        self.write_file(
            "hoverstart.txt",
            &format!("Time before hover start: {} frames", snap.hover_start_timer),
        )?;
        self.write_file(
            "hoverend.txt",
            &format!("Time before hover end: {} frames", snap.hover_end_timer),
        )?;
        self.write_file(
            "speedxy.txt",
            &format!(
                "Average XY Speed: {:.2} over {} frames",
                snap.average_speed_xy, snap.samples_xy
            ),
        )?;
        self.write_file(
            "speedxyz.txt",
            &format!(
                "Average XYZ Speed: {:.2} over {} frames",
                snap.average_speed_xyz, snap.samples_xyz
            ),
        )?;

        Ok(())
    }

    fn write_file(&self, filename: &str, content: &str) -> Result<()> {
        fs::write(self.base_dir.join(filename), content)?;
        Ok(())
    }
}
