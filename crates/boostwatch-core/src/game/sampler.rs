//! Per-frame sampling of the player entity.
//!
//! The sampler walks the active dynamic world's superobject children for
//! the configured entity name and reads the five fields the telemetry loop
//! consumes. Every failure mode (entity missing, null pointer, dangling
//! pointer across a level load) collapses to `None`; sampling runs every
//! frame forever and the entity is allowed to come and go.

use memchr::memchr;
use tracing::trace;

use crate::error::{Error, Result};
use crate::game::FrameSample;
use crate::memory::ReadMemory;
use crate::memory::layout::{dsg, dynamics, engine, perso, stdgame, superobject, transform};

/// Bytes fetched per read while scanning for a name's NUL terminator.
const NAME_CHUNK: usize = 16;

pub struct PlayerSampler {
    entity_name: String,
}

impl PlayerSampler {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
        }
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Take one value snapshot of the player entity, or `None` if the
    /// entity is absent or any read fails this frame.
    pub fn sample<R: ReadMemory>(&self, reader: &R) -> Option<FrameSample> {
        match self.try_sample(reader) {
            Ok(sample) => Some(sample),
            Err(e) => {
                trace!("tick skipped: {}", e);
                None
            }
        }
    }

    fn try_sample<R: ReadMemory>(&self, reader: &R) -> Result<FrameSample> {
        let spo = self.find_entity(reader)?;

        let perso_ptr = non_null(reader.read_ptr(spo + superobject::DATA)?, "perso")?;
        let dynam = non_null(reader.read_ptr(perso_ptr + perso::DYNAM)?, "dynam")?;
        let base = non_null(reader.read_ptr(dynam + dynamics::BASE)?, "dynamics base")?;
        let gravity = reader.read_f32(base + dynamics::GRAVITY)?;

        let report = non_null(reader.read_ptr(base + dynamics::REPORT)?, "dynamics report")?;
        let velocity = reader.read_vec3(report + dynamics::ABSOLUTE_SPEED_LINEAR)?;

        let hovering = read_flag(reader, perso_ptr, dsg::HOVER_INDEX)? == dsg::HOVER_ACTIVE;
        let roll_boost_active =
            read_flag(reader, perso_ptr, dsg::ROLL_BOOST_INDEX)? == dsg::ROLL_BOOST_ACTIVE;

        let matrix = non_null(reader.read_ptr(spo + superobject::MATRIX)?, "matrix")?;
        let position = reader.read_vec3(matrix + transform::TRANSLATION)?;

        Ok(FrameSample {
            gravity,
            hovering,
            roll_boost_active,
            velocity,
            position,
        })
    }

    /// Walk the active dynamic world's children for the named entity.
    fn find_entity<R: ReadMemory>(&self, reader: &R) -> Result<u64> {
        let world = reader.read_ptr(engine::STRUCTURE + engine::ACTIVE_DYNAMIC_WORLD)?;
        if world == 0 {
            return Err(Error::EntityNotFound(self.entity_name.clone()));
        }

        let mut node = reader.read_ptr(world + superobject::FIRST_CHILD)?;
        let mut visited = 0usize;
        while node != 0 && visited < superobject::MAX_CHILDREN {
            visited += 1;
            // Non-actor superobjects have no perso/name chain; skip them.
            if let Ok(name) = node_name(reader, node) {
                if name == self.entity_name {
                    return Ok(node);
                }
            }
            node = reader.read_ptr(node + superobject::NEXT_SIBLING)?;
        }

        Err(Error::EntityNotFound(self.entity_name.clone()))
    }
}

fn node_name<R: ReadMemory>(reader: &R, node: u64) -> Result<String> {
    let perso_ptr = non_null(reader.read_ptr(node + superobject::DATA)?, "perso")?;
    let std_game = non_null(reader.read_ptr(perso_ptr + perso::STD_GAME)?, "stdgame")?;
    let name_ptr = non_null(reader.read_ptr(std_game + stdgame::INSTANCE_NAME)?, "name")?;
    read_name(reader, name_ptr)
}

/// Read a NUL-terminated name in small chunks, bounded by
/// [`stdgame::NAME_MAX_LEN`]. A read failure past the first chunk ends the
/// name instead of failing the node.
fn read_name<R: ReadMemory>(reader: &R, address: u64) -> Result<String> {
    let mut name: Vec<u8> = Vec::new();
    let mut offset = 0usize;
    while offset < stdgame::NAME_MAX_LEN {
        let chunk = match reader.read_bytes(address + offset as u64, NAME_CHUNK) {
            Ok(chunk) => chunk,
            Err(e) if offset == 0 => return Err(e),
            Err(_) => break,
        };
        if let Some(nul) = memchr(0, &chunk) {
            name.extend_from_slice(&chunk[..nul]);
            return Ok(String::from_utf8_lossy(&name).into_owned());
        }
        name.extend_from_slice(&chunk);
        offset += NAME_CHUNK;
    }
    Ok(String::from_utf8_lossy(&name).into_owned())
}

/// Read the byte value of the dsg variable at `index`.
fn read_flag<R: ReadMemory>(reader: &R, perso_ptr: u64, index: u64) -> Result<u8> {
    let dsg_mem = non_null(reader.read_ptr(perso_ptr + perso::DSG_MEM)?, "dsg mem")?;
    let info = non_null(reader.read_ptr(dsg_mem + dsg::INFO)?, "dsg info")?;
    let buffer = non_null(reader.read_ptr(dsg_mem + dsg::BUFFER_CURRENT)?, "dsg buffer")?;

    let entry = info + index * dsg::INFO_ENTRY_SIZE;
    let value_offset = reader.read_u32(entry + dsg::INFO_ENTRY_OFFSET)? as u64;
    reader.read_u8(buffer + value_offset)
}

fn non_null(ptr: u64, what: &str) -> Result<u64> {
    if ptr == 0 {
        Err(Error::MemoryReadFailed {
            address: 0,
            message: format!("null {} pointer", what),
        })
    } else {
        Ok(ptr)
    }
}
