//! Shared user toggles.
//!
//! Both settings are flipped from the keyboard handler and read once per
//! tick by the telemetry loop, so they live in atomics: a toggle may land
//! mid-tick and take effect one tick late, and that is the whole contract.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Default rolling-average window, in frames.
pub const WINDOW_DEFAULT: usize = 60;
/// Increment applied per cycle keypress.
pub const WINDOW_STEP: usize = 60;
/// Largest window before the cycle wraps back to the default.
pub const WINDOW_MAX: usize = 600;

pub struct OverlaySettings {
    particles_enabled: AtomicBool,
    average_window: AtomicUsize,
}

impl OverlaySettings {
    pub fn new() -> Self {
        Self {
            particles_enabled: AtomicBool::new(false),
            average_window: AtomicUsize::new(WINDOW_DEFAULT),
        }
    }

    pub fn particles_enabled(&self) -> bool {
        self.particles_enabled.load(Ordering::SeqCst)
    }

    /// Flip the particle toggle, returning the new value.
    pub fn toggle_particles(&self) -> bool {
        !self.particles_enabled.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn average_window(&self) -> usize {
        self.average_window.load(Ordering::SeqCst)
    }

    /// Step the window size by [`WINDOW_STEP`], wrapping past
    /// [`WINDOW_MAX`] back to the default. Returns the new value.
    ///
    /// The keyboard handler is the only writer; the load/store pair does
    /// not need to be one atomic step.
    pub fn cycle_average_window(&self) -> usize {
        let next = match self.average_window.load(Ordering::SeqCst) + WINDOW_STEP {
            n if n > WINDOW_MAX => WINDOW_DEFAULT,
            n => n,
        };
        self.average_window.store(next, Ordering::SeqCst);
        next
    }
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self::new()
    }
}
