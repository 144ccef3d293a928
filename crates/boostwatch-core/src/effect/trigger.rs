//! Roll-boost spark trigger.
//!
//! Fires at most one spark per tick, only while the roll-boost flag and the
//! user's particle toggle are both set. The effect is cosmetic: a failed
//! spawn is dropped without retry.

use rand::Rng;
use tracing::trace;

use crate::effect::{MaterialDescriptor, SparkMaterials};
use crate::error::Result;
use crate::game::{FrameSample, Vec3};

/// Effect kind the particle subsystem renders as a spark burst.
pub const SPARK_EFFECT_KIND: i32 = 9;
/// Particle size scalar.
pub const SPARK_SIZE: f32 = 0.05;

/// One particle-spawn request, ready for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpawnRequest {
    pub kind: i32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub material: MaterialDescriptor,
    pub size: f32,
}

/// External particle subsystem seam.
pub trait ParticleSink {
    fn spawn(&self, request: &SpawnRequest) -> Result<()>;
}

pub struct EffectTrigger {
    materials: SparkMaterials,
}

impl EffectTrigger {
    pub fn new(materials: SparkMaterials) -> Self {
        Self { materials }
    }

    /// Spawn one spark at the sample's position if the guard holds.
    ///
    /// The material is a uniform 50/50 pick between red and yellow; no
    /// statistical property beyond that is required of `rng`.
    pub fn maybe_spawn<S, R>(
        &self,
        sample: &FrameSample,
        particles_enabled: bool,
        sink: &S,
        rng: &mut R,
    ) where
        S: ParticleSink,
        R: Rng + ?Sized,
    {
        if !sample.roll_boost_active || !particles_enabled {
            return;
        }

        let material = if rng.r#gen::<bool>() {
            self.materials.red
        } else {
            self.materials.yellow
        };

        let request = SpawnRequest {
            kind: SPARK_EFFECT_KIND,
            position: sample.position,
            velocity: Vec3::ZERO,
            material,
            size: SPARK_SIZE,
        };

        if let Err(e) = sink.spawn(&request) {
            trace!("spark spawn dropped: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::RefCell;

    struct RecordingSink {
        requests: RefCell<Vec<SpawnRequest>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl ParticleSink for RecordingSink {
        fn spawn(&self, request: &SpawnRequest) -> Result<()> {
            self.requests.borrow_mut().push(*request);
            Ok(())
        }
    }

    struct FailingSink;

    impl ParticleSink for FailingSink {
        fn spawn(&self, _request: &SpawnRequest) -> Result<()> {
            Err(Error::EntityNotFound("particle subsystem gone".to_string()))
        }
    }

    fn boosting_sample() -> FrameSample {
        FrameSample {
            gravity: 9.81,
            hovering: false,
            roll_boost_active: true,
            velocity: Vec3::new(10.0, 0.0, 0.0),
            position: Vec3::new(1.0, 2.0, 3.0),
        }
    }

    #[test]
    fn test_no_spawn_without_roll_boost() {
        let trigger = EffectTrigger::new(SparkMaterials::new(1, 2));
        let sink = RecordingSink::new();
        let mut rng = StdRng::seed_from_u64(1);

        let mut sample = boosting_sample();
        sample.roll_boost_active = false;

        trigger.maybe_spawn(&sample, true, &sink, &mut rng);
        trigger.maybe_spawn(&sample, false, &sink, &mut rng);
        assert!(sink.requests.borrow().is_empty());
    }

    #[test]
    fn test_no_spawn_with_particles_disabled() {
        let trigger = EffectTrigger::new(SparkMaterials::new(1, 2));
        let sink = RecordingSink::new();
        let mut rng = StdRng::seed_from_u64(1);

        trigger.maybe_spawn(&boosting_sample(), false, &sink, &mut rng);
        assert!(sink.requests.borrow().is_empty());
    }

    #[test]
    fn test_spawn_request_shape() {
        let trigger = EffectTrigger::new(SparkMaterials::new(1, 2));
        let sink = RecordingSink::new();
        let mut rng = StdRng::seed_from_u64(1);

        trigger.maybe_spawn(&boosting_sample(), true, &sink, &mut rng);

        let requests = sink.requests.borrow();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.kind, SPARK_EFFECT_KIND);
        assert_eq!(request.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(request.velocity, Vec3::ZERO);
        assert_eq!(request.size, SPARK_SIZE);
        assert!(request.material.texture == 1 || request.material.texture == 2);
    }

    #[test]
    fn test_material_choice_is_roughly_even() {
        let trigger = EffectTrigger::new(SparkMaterials::new(1, 2));
        let sink = RecordingSink::new();
        let mut rng = StdRng::seed_from_u64(0xB005);

        for _ in 0..1000 {
            trigger.maybe_spawn(&boosting_sample(), true, &sink, &mut rng);
        }

        let red = sink
            .requests
            .borrow()
            .iter()
            .filter(|r| r.material.texture == 1)
            .count();
        assert_eq!(sink.requests.borrow().len(), 1000);
        assert!((400..=600).contains(&red), "red chosen {} of 1000", red);
    }

    #[test]
    fn test_spawn_failure_is_swallowed() {
        let trigger = EffectTrigger::new(SparkMaterials::new(1, 2));
        let mut rng = StdRng::seed_from_u64(1);
        trigger.maybe_spawn(&boosting_sample(), true, &FailingSink, &mut rng);
    }
}
