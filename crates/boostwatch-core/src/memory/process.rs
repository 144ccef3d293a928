//! Locating and opening the target game process.

use crate::error::{Error, Result};

#[cfg(target_os = "windows")]
use windows::Win32::Foundation::{CloseHandle, HANDLE};

/// An open read handle to the target process.
///
/// The handle is closed on drop. The module base is resolved once at open
/// time; the target executable is not relocatable, so it never moves.
#[cfg(target_os = "windows")]
pub struct ProcessHandle {
    handle: HANDLE,
    pub pid: u32,
    pub base_address: u64,
}

#[cfg(target_os = "windows")]
impl ProcessHandle {
    /// Find a running process by executable name and open it for reading.
    pub fn find_and_open(process_name: &str) -> Result<Self> {
        let pid = find_pid_by_name(process_name)?
            .ok_or_else(|| Error::ProcessNotFound(process_name.to_string()))?;

        let handle = open_for_read(pid).map_err(|e| {
            Error::ProcessOpenFailed(format!("{} (pid {}): {}", process_name, pid, e))
        })?;

        let base_address = match module_base(pid) {
            Ok(base) => base,
            Err(e) => {
                // SAFETY: handle came from OpenProcess above and is not
                // reachable anywhere else yet.
                unsafe {
                    let _ = CloseHandle(handle);
                }
                return Err(e);
            }
        };

        Ok(Self {
            handle,
            pid,
            base_address,
        })
    }

    pub(crate) fn handle(&self) -> HANDLE {
        self.handle
    }
}

#[cfg(target_os = "windows")]
impl Drop for ProcessHandle {
    fn drop(&mut self) {
        // SAFETY: the handle was opened by find_and_open and is owned
        // exclusively by this struct.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}

#[cfg(target_os = "windows")]
fn find_pid_by_name(process_name: &str) -> Result<Option<u32>> {
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
        TH32CS_SNAPPROCESS,
    };

    // SAFETY: the snapshot handle is closed before returning on every path.
    unsafe {
        let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)
            .map_err(|e| Error::ProcessOpenFailed(format!("process snapshot: {}", e)))?;

        let mut entry = PROCESSENTRY32W {
            dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
            ..Default::default()
        };

        let mut found = None;
        if Process32FirstW(snapshot, &mut entry).is_ok() {
            loop {
                let name = utf16_until_nul(&entry.szExeFile);
                if name.eq_ignore_ascii_case(process_name) {
                    found = Some(entry.th32ProcessID);
                    break;
                }
                if Process32NextW(snapshot, &mut entry).is_err() {
                    break;
                }
            }
        }

        let _ = CloseHandle(snapshot);
        Ok(found)
    }
}

#[cfg(target_os = "windows")]
fn open_for_read(pid: u32) -> std::result::Result<HANDLE, windows::core::Error> {
    use windows::Win32::System::Threading::{
        OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ,
    };

    // SAFETY: OpenProcess returns an owned handle or an error.
    unsafe { OpenProcess(PROCESS_VM_READ | PROCESS_QUERY_INFORMATION, false, pid) }
}

/// Base address of the process's main module. The first entry in a module
/// snapshot is always the executable itself.
#[cfg(target_os = "windows")]
fn module_base(pid: u32) -> Result<u64> {
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, MODULEENTRY32W, Module32FirstW, TH32CS_SNAPMODULE,
        TH32CS_SNAPMODULE32,
    };

    // SAFETY: the snapshot handle is closed before returning on every path.
    unsafe {
        let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid)
            .map_err(|e| Error::ProcessOpenFailed(format!("module snapshot: {}", e)))?;

        let mut entry = MODULEENTRY32W {
            dwSize: std::mem::size_of::<MODULEENTRY32W>() as u32,
            ..Default::default()
        };

        let base = if Module32FirstW(snapshot, &mut entry).is_ok() {
            Some(entry.modBaseAddr as u64)
        } else {
            None
        };

        let _ = CloseHandle(snapshot);
        base.ok_or_else(|| Error::ProcessOpenFailed(format!("no modules in snapshot (pid {})", pid)))
    }
}

#[cfg(target_os = "windows")]
fn utf16_until_nul(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

// --- Non-Windows stub ---

#[cfg(not(target_os = "windows"))]
pub struct ProcessHandle {
    pub pid: u32,
    pub base_address: u64,
}

#[cfg(not(target_os = "windows"))]
impl ProcessHandle {
    pub fn find_and_open(process_name: &str) -> Result<Self> {
        Err(Error::ProcessNotFound(format!(
            "{} (process attach is only supported on Windows)",
            process_name
        )))
    }
}
