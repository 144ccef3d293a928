use strum::{Display, IntoStaticStr};

/// Player motion classification.
///
/// `AfterHover` covers the fall between releasing the hover and touching
/// ground; it exists so the hover-end timer freezes at the release frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IntoStaticStr)]
pub enum MotionState {
    #[default]
    #[strum(serialize = "GROUND")]
    Ground,
    #[strum(serialize = "JUMPING")]
    Jumping,
    #[strum(serialize = "HOVER")]
    Hover,
    #[strum(serialize = "AFTER HOVER")]
    AfterHover,
}

/// Frame counters owned by the tracker.
///
/// Each counter ticks at the start of every frame spent in its state,
/// including the frame that leaves the state, and is zeroed only on the
/// transitions below. `hover_start` and `hover_end` therefore freeze at
/// their last value once their state is left, which is what makes them
/// readable as "frames before hover started / ended" on the overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionTimers {
    /// Frames spent continuously on ground.
    pub ground: u32,
    /// Frames spent jumping before the hover began.
    pub hover_start: u32,
    /// Frames spent hovering before the hover ended.
    pub hover_end: u32,
}

/// Four-state motion classifier driven by the two per-frame booleans.
///
/// State is owned exclusively here; nothing else mutates it.
#[derive(Debug, Default)]
pub struct MotionTracker {
    state: MotionState,
    timers: MotionTimers,
}

impl MotionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn timers(&self) -> MotionTimers {
        self.timers
    }

    /// Advance one frame.
    ///
    /// The current state's timer ticks first, then the transition is
    /// evaluated. In `Jumping`, `hovering` takes priority over `on_ground`.
    pub fn advance(&mut self, on_ground: bool, hovering: bool) {
        match self.state {
            MotionState::Ground => {
                self.timers.ground += 1;
                if !on_ground {
                    self.state = MotionState::Jumping;
                    self.timers.hover_start = 0;
                    self.timers.hover_end = 0;
                }
            }
            MotionState::Jumping => {
                self.timers.hover_start += 1;
                if hovering {
                    self.state = MotionState::Hover;
                } else if on_ground {
                    self.timers.ground = 0;
                    self.state = MotionState::Ground;
                }
            }
            MotionState::Hover => {
                self.timers.hover_end += 1;
                if on_ground {
                    self.timers.ground = 0;
                    self.state = MotionState::Ground;
                } else if !hovering {
                    self.state = MotionState::AfterHover;
                }
            }
            MotionState::AfterHover => {
                if on_ground {
                    self.timers.ground = 0;
                    self.state = MotionState::Ground;
                }
            }
        }
    }
}
