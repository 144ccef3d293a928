//! Per-tick telemetry pipeline.
//!
//! [`Boostwatch`] owns the motion tracker, both speed windows, and the
//! effect trigger, and is driven once per frame with whatever the sampler
//! produced. A tick with no sample mutates nothing.

mod motion;
mod window;

pub use motion::*;
pub use window::*;

use std::sync::Arc;

use rand::Rng;

use crate::effect::{EffectTrigger, ParticleSink, SparkMaterials};
use crate::game::FrameSample;
use crate::settings::OverlaySettings;

/// Read-only view of the current telemetry for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    pub state: MotionState,
    pub ground_timer: u32,
    pub hover_start_timer: u32,
    pub hover_end_timer: u32,
    pub roll_boost_active: bool,
    pub particles_enabled: bool,
    pub window_size: usize,
    pub average_speed_xy: f32,
    pub samples_xy: usize,
    pub average_speed_xyz: f32,
    pub samples_xyz: usize,
}

/// Main telemetry loop state.
pub struct Boostwatch {
    settings: Arc<OverlaySettings>,
    motion: MotionTracker,
    speeds_xy: RollingWindow,
    speeds_xyz: RollingWindow,
    trigger: EffectTrigger,
    roll_boost_active: bool,
}

impl Boostwatch {
    pub fn new(settings: Arc<OverlaySettings>, materials: SparkMaterials) -> Self {
        let window = settings.average_window();
        Self {
            motion: MotionTracker::new(),
            speeds_xy: RollingWindow::new(window),
            speeds_xyz: RollingWindow::new(window),
            trigger: EffectTrigger::new(materials),
            roll_boost_active: false,
            settings,
        }
    }

    pub fn settings(&self) -> &Arc<OverlaySettings> {
        &self.settings
    }

    /// Run one frame of the pipeline.
    ///
    /// `None` means the player entity was absent this frame: the state
    /// machine, windows, and timers are left untouched.
    pub fn tick<S, R>(&mut self, sample: Option<&FrameSample>, sink: &S, rng: &mut R)
    where
        S: ParticleSink,
        R: Rng + ?Sized,
    {
        let Some(sample) = sample else {
            return;
        };

        // A window-size toggle lands here, before the pushes, so the
        // length <= capacity invariant holds at every step.
        let window = self.settings.average_window();
        self.speeds_xy.set_capacity(window);
        self.speeds_xyz.set_capacity(window);

        self.speeds_xy.push(sample.velocity.magnitude_xy());
        self.speeds_xyz.push(sample.velocity.magnitude());

        self.motion.advance(sample.on_ground(), sample.hovering);
        self.roll_boost_active = sample.roll_boost_active;

        self.trigger
            .maybe_spawn(sample, self.settings.particles_enabled(), sink, rng);
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        let timers = self.motion.timers();
        TelemetrySnapshot {
            state: self.motion.state(),
            ground_timer: timers.ground,
            hover_start_timer: timers.hover_start,
            hover_end_timer: timers.hover_end,
            roll_boost_active: self.roll_boost_active,
            particles_enabled: self.settings.particles_enabled(),
            window_size: self.settings.average_window(),
            average_speed_xy: self.speeds_xy.mean(),
            samples_xy: self.speeds_xy.len(),
            average_speed_xyz: self.speeds_xyz.mean(),
            samples_xyz: self.speeds_xyz.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{NullParticleSink, SpawnRequest};
    use crate::error::Result;
    use crate::game::Vec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::RefCell;

    fn sample(gravity: f32, hovering: bool) -> FrameSample {
        FrameSample {
            gravity,
            hovering,
            roll_boost_active: false,
            velocity: Vec3::new(3.0, 4.0, 0.0),
            position: Vec3::ZERO,
        }
    }

    fn boostwatch() -> Boostwatch {
        Boostwatch::new(
            Arc::new(OverlaySettings::new()),
            SparkMaterials::new(1, 2),
        )
    }

    struct CountingSink {
        count: RefCell<usize>,
    }

    impl ParticleSink for CountingSink {
        fn spawn(&self, _request: &SpawnRequest) -> Result<()> {
            *self.count.borrow_mut() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_absent_sample_changes_nothing() {
        let mut bw = boostwatch();
        let mut rng = StdRng::seed_from_u64(1);

        bw.tick(Some(&sample(9.81, false)), &NullParticleSink, &mut rng);
        let before = bw.snapshot();

        bw.tick(None, &NullParticleSink, &mut rng);
        assert_eq!(bw.snapshot(), before);
    }

    #[test]
    fn test_speeds_feed_both_windows() {
        let mut bw = boostwatch();
        let mut rng = StdRng::seed_from_u64(1);

        bw.tick(Some(&sample(9.81, false)), &NullParticleSink, &mut rng);

        let snap = bw.snapshot();
        assert_eq!(snap.samples_xy, 1);
        assert_eq!(snap.samples_xyz, 1);
        assert!((snap.average_speed_xy - 5.0).abs() < 1e-6);
        assert!((snap.average_speed_xyz - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_planar_and_full_speed_diverge_with_vertical_motion() {
        let mut bw = boostwatch();
        let mut rng = StdRng::seed_from_u64(1);

        let mut falling = sample(0.0, false);
        falling.velocity = Vec3::new(1.0, 2.0, 2.0);
        bw.tick(Some(&falling), &NullParticleSink, &mut rng);

        let snap = bw.snapshot();
        assert!((snap.average_speed_xy - 5.0f32.sqrt()).abs() < 1e-6);
        assert!((snap.average_speed_xyz - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_resize_applies_before_next_push() {
        let mut bw = boostwatch();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..70 {
            bw.tick(Some(&sample(9.81, false)), &NullParticleSink, &mut rng);
        }
        assert_eq!(bw.snapshot().samples_xy, 60);

        bw.settings().cycle_average_window();
        bw.tick(Some(&sample(9.81, false)), &NullParticleSink, &mut rng);
        let snap = bw.snapshot();
        assert_eq!(snap.window_size, 120);
        assert_eq!(snap.samples_xy, 61);
        assert_eq!(snap.samples_xyz, 61);
    }

    #[test]
    fn test_roll_boost_flag_tracks_sample() {
        let mut bw = boostwatch();
        let mut rng = StdRng::seed_from_u64(1);

        let mut boosting = sample(9.81, false);
        boosting.roll_boost_active = true;
        bw.tick(Some(&boosting), &NullParticleSink, &mut rng);
        assert!(bw.snapshot().roll_boost_active);

        bw.tick(Some(&sample(9.81, false)), &NullParticleSink, &mut rng);
        assert!(!bw.snapshot().roll_boost_active);
    }

    #[test]
    fn test_particles_spawn_only_with_both_flags() {
        let mut bw = boostwatch();
        let mut rng = StdRng::seed_from_u64(1);
        let sink = CountingSink {
            count: RefCell::new(0),
        };

        let mut boosting = sample(9.81, false);
        boosting.roll_boost_active = true;

        // Boost active but particles disabled.
        bw.tick(Some(&boosting), &sink, &mut rng);
        assert_eq!(*sink.count.borrow(), 0);

        bw.settings().toggle_particles();
        bw.tick(Some(&boosting), &sink, &mut rng);
        assert_eq!(*sink.count.borrow(), 1);

        // Particles enabled but no boost.
        bw.tick(Some(&sample(9.81, false)), &sink, &mut rng);
        assert_eq!(*sink.count.borrow(), 1);
    }

    #[test]
    fn test_full_hover_scenario_through_the_loop() {
        let mut bw = boostwatch();
        let mut rng = StdRng::seed_from_u64(1);
        let sink = NullParticleSink;

        let script: Vec<FrameSample> = std::iter::empty()
            .chain(std::iter::repeat_n(sample(9.81, false), 5))
            .chain(std::iter::repeat_n(sample(0.0, false), 3))
            .chain(std::iter::repeat_n(sample(0.0, true), 4))
            .chain(std::iter::repeat_n(sample(0.0, false), 2))
            .chain(std::iter::repeat_n(sample(9.81, false), 1))
            .collect();

        for s in &script {
            bw.tick(Some(s), &sink, &mut rng);
        }

        let snap = bw.snapshot();
        assert_eq!(snap.state, MotionState::Ground);
        assert_eq!(snap.ground_timer, 0);
        assert_eq!(snap.hover_start_timer, 3);
        assert_eq!(snap.hover_end_timer, 4);
        assert_eq!(snap.samples_xy, 15);
    }
}
