//! In-memory fake of the target address space for tests.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::memory::ReadMemory;

/// Byte-addressed fake memory. Unmapped addresses fail like a dangling
/// pointer would, which is exactly what the sampler has to tolerate.
pub struct MockMemoryReader {
    bytes: HashMap<u64, u8>,
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, len: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(len);
        for i in 0..len as u64 {
            match self.bytes.get(&(address + i)) {
                Some(b) => out.push(*b),
                None => {
                    return Err(Error::MemoryReadFailed {
                        address: address + i,
                        message: "unmapped address".to_string(),
                    });
                }
            }
        }
        Ok(out)
    }
}

#[derive(Default)]
pub struct MockMemoryBuilder {
    bytes: HashMap<u64, u8>,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(mut self, address: u64, data: &[u8]) -> Self {
        for (i, b) in data.iter().enumerate() {
            self.bytes.insert(address + i as u64, *b);
        }
        self
    }

    pub fn with_u32(self, address: u64, value: u32) -> Self {
        self.with_bytes(address, &value.to_le_bytes())
    }

    pub fn with_f32(self, address: u64, value: f32) -> Self {
        self.with_bytes(address, &value.to_le_bytes())
    }

    pub fn with_vec3(self, address: u64, x: f32, y: f32, z: f32) -> Self {
        self.with_f32(address, x)
            .with_f32(address + 4, y)
            .with_f32(address + 8, z)
    }

    /// Map a NUL-terminated ASCII string, zero-padded the way a string
    /// inside a mapped page would be.
    pub fn with_cstr(self, address: u64, value: &str) -> Self {
        let mut data = value.as_bytes().to_vec();
        data.resize(crate::memory::layout::stdgame::NAME_MAX_LEN, 0);
        self.with_bytes(address, &data)
    }

    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader { bytes: self.bytes }
    }
}
