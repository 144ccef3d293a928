//! Single-line console status, refreshed in place each frame.

use std::io::{self, Write};

use boostwatch_core::TelemetrySnapshot;
use owo_colors::OwoColorize;

pub fn print_status(snap: &TelemetrySnapshot, entity_present: bool) {
    let boost = if snap.roll_boost_active {
        "BOOST".green().bold().to_string()
    } else {
        "-----".dimmed().to_string()
    };
    let particles = if snap.particles_enabled { "on" } else { "off" };

    let line = if entity_present {
        format!(
            "\r[{:<11}] {} | ground {:>4} | pre-hover {:>4} | post-hover {:>4} | xy {:>6.2} | xyz {:>6.2} | win {:>3} | particles {:<3}",
            snap.state.to_string(),
            boost,
            snap.ground_timer,
            snap.hover_start_timer,
            snap.hover_end_timer,
            snap.average_speed_xy,
            snap.average_speed_xyz,
            snap.window_size,
            particles,
        )
    } else {
        format!("\r{} waiting for entity...", "[no entity  ]".dimmed())
    };

    let mut stdout = io::stdout();
    let _ = stdout.write_all(line.as_bytes());
    let _ = stdout.flush();
}
