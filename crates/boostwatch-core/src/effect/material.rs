use serde::{Deserialize, Serialize};

/// Opaque handle to a texture already resolved by the asset loader.
pub type TextureHandle = u32;

/// Render flags the engine expects on an additive spark material.
pub const SPARK_FLAGS: u32 = 1_306_265_599;
/// Ambient coefficient shared by both spark materials.
pub const SPARK_AMBIENT: [f32; 4] = [0.3, 0.3, 0.3, 0.3];
/// Diffuse coefficient shared by both spark materials.
pub const SPARK_DIFFUSE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Visual material handed to the particle subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub flags: u32,
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub texture: TextureHandle,
}

impl MaterialDescriptor {
    /// Spark material over the given texture.
    pub fn spark(texture: TextureHandle) -> Self {
        Self {
            flags: SPARK_FLAGS,
            ambient: SPARK_AMBIENT,
            diffuse: SPARK_DIFFUSE,
            texture,
        }
    }
}

/// The two preconfigured spark materials the trigger picks between.
#[derive(Debug, Clone, Copy)]
pub struct SparkMaterials {
    pub red: MaterialDescriptor,
    pub yellow: MaterialDescriptor,
}

impl SparkMaterials {
    pub fn new(red_texture: TextureHandle, yellow_texture: TextureHandle) -> Self {
        Self {
            red: MaterialDescriptor::spark(red_texture),
            yellow: MaterialDescriptor::spark(yellow_texture),
        }
    }
}
