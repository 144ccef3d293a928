use crate::game::Vec3;

/// Gravity magnitude the engine applies while the entity stands on ground.
pub const GROUND_GRAVITY: f32 = 9.81;

/// Tolerance around [`GROUND_GRAVITY`] for the on-ground test.
pub const GRAVITY_TOLERANCE: f32 = 0.05;

/// One frame's worth of player state, read from the live entity.
///
/// A sample is a value snapshot: nothing in it points back into the target
/// process, so holding one across a level load is harmless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Current gravity magnitude acting on the entity.
    pub gravity: f32,
    /// Hover move held this frame.
    pub hovering: bool,
    /// Roll-boost window active this frame.
    pub roll_boost_active: bool,
    /// Linear velocity in world units per frame.
    pub velocity: Vec3,
    /// World position of the entity's transform.
    pub position: Vec3,
}

impl FrameSample {
    /// Ground contact, inferred from the gravity the engine is applying.
    pub fn on_ground(&self) -> bool {
        (self.gravity - GROUND_GRAVITY).abs() < GRAVITY_TOLERANCE
    }
}
