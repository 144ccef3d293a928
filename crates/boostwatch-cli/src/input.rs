//! Keyboard handling for the two practice-tool hotkeys.
//!
//! Keys are drained non-blocking once per frame. The handlers only touch
//! the shared atomics in [`OverlaySettings`], so a press that lands
//! mid-tick simply applies on the next tick.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use boostwatch_core::OverlaySettings;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{info, warn};

use crate::shutdown::ShutdownSignal;

/// Toggles particle spawning.
pub const KEY_PARTICLES: char = 'p';
/// Cycles the rolling-average window size.
pub const KEY_WINDOW: char = 'o';

/// Raw-mode keyboard reader. Raw mode is held for the lifetime of the
/// value and restored on drop. Without an interactive terminal the reader
/// degrades to a no-op; ctrl-c handling still works through the signal
/// handler.
pub struct Keyboard {
    settings: Arc<OverlaySettings>,
    shutdown: Arc<ShutdownSignal>,
    interactive: bool,
}

impl Keyboard {
    pub fn new(settings: Arc<OverlaySettings>, shutdown: Arc<ShutdownSignal>) -> Self {
        let interactive = terminal::enable_raw_mode().is_ok();
        if !interactive {
            warn!("No interactive terminal, hotkeys disabled");
        }
        Self {
            settings,
            shutdown,
            interactive,
        }
    }

    /// Drain and dispatch all pending key presses without blocking.
    pub fn poll(&self) -> Result<()> {
        if !self.interactive {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            // Windows terminals report both press and release.
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.shutdown.trigger();
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.shutdown.trigger();
                }
                KeyCode::Char(c) if c.eq_ignore_ascii_case(&KEY_PARTICLES) => {
                    let enabled = self.settings.toggle_particles();
                    info!("Particles {}", if enabled { "enabled" } else { "disabled" });
                }
                KeyCode::Char(c) if c.eq_ignore_ascii_case(&KEY_WINDOW) => {
                    let window = self.settings.cycle_average_window();
                    info!("Rolling average window: {} frames", window);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Drop for Keyboard {
    fn drop(&mut self) {
        if self.interactive {
            let _ = terminal::disable_raw_mode();
        }
    }
}
