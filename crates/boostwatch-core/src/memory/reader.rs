//! Typed reads into the target process's address space.
//!
//! Everything above this module consumes the [`ReadMemory`] trait, never a
//! process handle, so the sampling pipeline can run against a mock in tests.
//! Reads return owned values; no reference into the target survives a call.

use crate::error::{Error, Result};
use crate::game::Vec3;

#[cfg(target_os = "windows")]
use crate::memory::ProcessHandle;

/// Typed field access into a foreign address space.
///
/// Only `read_bytes` is required; the typed accessors decode little-endian
/// values on top of it. Target pointers are 32 bits wide and are widened to
/// `u64` addresses on read.
pub trait ReadMemory {
    fn read_bytes(&self, address: u64, len: usize) -> Result<Vec<u8>>;

    fn read_u8(&self, address: u64) -> Result<u8> {
        let bytes = self.read_bytes(address, 1)?;
        Ok(bytes[0])
    }

    fn read_u32(&self, address: u64) -> Result<u32> {
        let bytes = self.read_bytes(address, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_f32(&self, address: u64) -> Result<f32> {
        let bytes = self.read_bytes(address, 4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read an embedded 32-bit pointer, widened to an address.
    fn read_ptr(&self, address: u64) -> Result<u64> {
        Ok(self.read_u32(address)? as u64)
    }

    /// Read three consecutive f32 values as a vector.
    fn read_vec3(&self, address: u64) -> Result<Vec3> {
        let bytes = self.read_bytes(address, 12)?;
        Ok(Vec3::new(
            f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            f32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        ))
    }
}

/// Reader over a live process handle.
#[cfg(target_os = "windows")]
pub struct MemoryReader<'a> {
    process: &'a ProcessHandle,
}

#[cfg(target_os = "windows")]
impl<'a> MemoryReader<'a> {
    pub fn new(process: &'a ProcessHandle) -> Self {
        Self { process }
    }
}

#[cfg(target_os = "windows")]
impl ReadMemory for MemoryReader<'_> {
    fn read_bytes(&self, address: u64, len: usize) -> Result<Vec<u8>> {
        use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;

        let mut buffer = vec![0u8; len];
        let mut bytes_read = 0usize;

        // SAFETY: the buffer outlives the call and is exactly `len` bytes;
        // a failed or short read is mapped to an error below.
        let result = unsafe {
            ReadProcessMemory(
                self.process.handle(),
                address as *const std::ffi::c_void,
                buffer.as_mut_ptr() as *mut std::ffi::c_void,
                len,
                Some(&mut bytes_read),
            )
        };

        if let Err(e) = result {
            return Err(Error::MemoryReadFailed {
                address,
                message: e.to_string(),
            });
        }
        if bytes_read != len {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!("short read: {} of {} bytes", bytes_read, len),
            });
        }

        Ok(buffer)
    }
}

// --- Non-Windows stub ---

#[cfg(not(target_os = "windows"))]
pub struct MemoryReader<'a> {
    _process: std::marker::PhantomData<&'a ()>,
}

#[cfg(not(target_os = "windows"))]
impl<'a> MemoryReader<'a> {
    pub fn new(_process: &'a crate::memory::ProcessHandle) -> Self {
        Self {
            _process: std::marker::PhantomData,
        }
    }
}

#[cfg(not(target_os = "windows"))]
impl ReadMemory for MemoryReader<'_> {
    fn read_bytes(&self, address: u64, _len: usize) -> Result<Vec<u8>> {
        Err(Error::MemoryReadFailed {
            address,
            message: "process memory access is only supported on Windows".to_string(),
        })
    }
}
