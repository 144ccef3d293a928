//! Memory layout constants for the game's engine structures
//!
//! This module centralizes the offsets used to walk from the engine
//! structure down to the player entity's physics and flag data. The target
//! executable is 32-bit with a fixed image base, so all top-level addresses
//! are absolute and all embedded pointers are 4 bytes.

/// Size of an embedded pointer in the target process (32-bit)
pub const PTR_SIZE: u64 = 4;

/// Engine structure (fixed address in the target image)
pub mod engine {
    /// Absolute address of the engine structure
    pub const STRUCTURE: u64 = 0x0050_0380;

    /// Pointer to the root superobject of the active dynamic world
    pub const ACTIVE_DYNAMIC_WORLD: u64 = 0x1C;
}

/// Superobject node (the world is a tree of these)
pub mod superobject {
    /// Object type tag
    pub const TYPE: u64 = 0x0;
    /// Pointer to the engine object (perso for actors)
    pub const DATA: u64 = 0x4;
    /// Pointer to the first child superobject
    pub const FIRST_CHILD: u64 = 0x8;
    /// Pointer to the next sibling superobject
    pub const NEXT_SIBLING: u64 = 0x14;
    /// Pointer to the world transform matrix
    pub const MATRIX: u64 = 0x20;

    /// Upper bound on children walked per lookup; a corrupt sibling chain
    /// (mid level-load) must not spin the sampler forever.
    pub const MAX_CHILDREN: usize = 512;
}

/// Transform matrix (type tag followed by a 4x4 column-major float matrix)
pub mod transform {
    /// Translation column within the matrix structure
    pub const TRANSLATION: u64 = 0x34;
}

/// Perso (actor) structure
pub mod perso {
    /// Pointer to the standard game structure (names, object types)
    pub const STD_GAME: u64 = 0x4;
    /// Pointer to the dynam wrapper (physics)
    pub const DYNAM: u64 = 0x8;
    /// Pointer to the designer-variable memory block
    pub const DSG_MEM: u64 = 0xC;
}

/// Standard game structure
pub mod stdgame {
    /// Pointer to the instance name (NUL-terminated)
    pub const INSTANCE_NAME: u64 = 0xC;

    /// Longest instance name read before giving up on the terminator
    pub const NAME_MAX_LEN: usize = 64;
}

/// Dynamics structures hanging off the perso's dynam pointer
pub mod dynamics {
    /// Dynam: pointer to the dynamics base block
    pub const BASE: u64 = 0x0;
    /// Dynamics base: pointer to the per-frame report
    pub const REPORT: u64 = 0x10;
    /// Dynamics base: current gravity magnitude (f32)
    pub const GRAVITY: u64 = 0x38;
    /// Report: absolute current linear speed vector (3 x f32)
    pub const ABSOLUTE_SPEED_LINEAR: u64 = 0x18;
}

/// Designer-variable (dsg) memory block
pub mod dsg {
    /// DsgMem: pointer to the variable-description table
    pub const INFO: u64 = 0x0;
    /// DsgMem: pointer to the current-values buffer
    pub const BUFFER_CURRENT: u64 = 0x8;
    /// Stride of one entry in the variable-description table
    pub const INFO_ENTRY_SIZE: u64 = 8;
    /// Offset-in-buffer field within a description entry
    pub const INFO_ENTRY_OFFSET: u64 = 0x0;

    /// Index of the hover flag variable
    pub const HOVER_INDEX: u64 = 9;
    /// Hover flag byte value while the hover move is held
    pub const HOVER_ACTIVE: u8 = 15;
    /// Index of the roll-boost flag variable
    pub const ROLL_BOOST_INDEX: u64 = 33;
    /// Roll-boost flag byte value while the boost window is active
    pub const ROLL_BOOST_ACTIVE: u8 = 1;
}
