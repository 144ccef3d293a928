//! # boostwatch-core
//!
//! Core library for the Boostwatch roll-boost practice tool.
//!
//! This crate provides:
//! - Per-frame sampling of the player entity from game process memory
//! - Motion state classification (ground / jumping / hover / after-hover)
//!   with the frame timers speedrunners practice against
//! - Rolling averages of planar and full 3D speed
//! - The roll-boost spark trigger and its delivery bridge
//! - Overlay text output for external display

pub mod effect;
pub mod error;
pub mod game;
pub mod memory;
pub mod overlay;
pub mod settings;
pub mod telemetry;

pub use effect::{
    EffectTrigger, FileEffectBridge, MaterialDescriptor, NullParticleSink, ParticleSink,
    SPARK_EFFECT_KIND, SPARK_SIZE, SparkMaterials, SpawnRequest, TextureHandle,
};
pub use error::{Error, Result};
pub use game::{
    FrameSample, GRAVITY_TOLERANCE, GROUND_GRAVITY, PlayerSampler, Vec3,
};
pub use memory::{MemoryReader, ProcessHandle, ReadMemory};
pub use overlay::OverlayOutput;
pub use settings::{OverlaySettings, WINDOW_DEFAULT, WINDOW_MAX, WINDOW_STEP};
pub use telemetry::{
    Boostwatch, MotionState, MotionTimers, MotionTracker, RollingWindow, TelemetrySnapshot,
};
