//! Process handles for reading another process's memory.
//!
//! Only Windows is supported; on other targets every constructor fails with
//! [`Error::ProcessOpenFailed`].

use crate::error::{Error, Result};
use crate::process::Address;

/// Default executable name of the observed game.
pub const DEFAULT_PROCESS_NAME: &str = "SkyrimSE.exe";

/// Basic information about a running process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
}

/// An opened process with read access to its memory
pub struct ProcessHandle {
    pub pid: u32,
    #[cfg(target_os = "windows")]
    handle: windows::Win32::Foundation::HANDLE,
    #[cfg(target_os = "windows")]
    owned: bool,
}

#[cfg(target_os = "windows")]
mod imp {
    use std::ffi::c_void;

    use tracing::debug;
    use windows::Win32::Foundation::CloseHandle;
    use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
        TH32CS_SNAPPROCESS,
    };
    use windows::Win32::System::Threading::{
        GetCurrentProcess, GetCurrentProcessId, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION,
        PROCESS_VM_READ,
    };

    use super::*;

    impl ProcessHandle {
        /// Open a process by PID with read-only access
        pub fn open(pid: u32) -> Result<Self> {
            let handle = unsafe {
                OpenProcess(PROCESS_VM_READ | PROCESS_QUERY_LIMITED_INFORMATION, false, pid)
            }
            .map_err(|e| Error::ProcessOpenFailed(format!("pid {}: {}", pid, e)))?;

            debug!("Opened process {}", pid);
            Ok(Self {
                pid,
                handle,
                owned: true,
            })
        }

        /// Handle to the calling process, for in-process lookups
        pub fn current() -> Result<Self> {
            let handle = unsafe { GetCurrentProcess() };
            let pid = unsafe { GetCurrentProcessId() };
            Ok(Self {
                pid,
                handle,
                owned: false,
            })
        }

        /// List running processes
        pub fn list() -> Result<Vec<ProcessInfo>> {
            let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
                .map_err(|e| Error::ProcessOpenFailed(format!("process snapshot: {}", e)))?;

            let mut processes = Vec::new();
            let mut entry = PROCESSENTRY32W {
                dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
                ..Default::default()
            };

            let mut more = unsafe { Process32FirstW(snapshot, &mut entry) }.is_ok();
            while more {
                let len = entry
                    .szExeFile
                    .iter()
                    .position(|&c| c == 0)
                    .unwrap_or(entry.szExeFile.len());
                processes.push(ProcessInfo {
                    pid: entry.th32ProcessID,
                    name: String::from_utf16_lossy(&entry.szExeFile[..len]),
                });
                more = unsafe { Process32NextW(snapshot, &mut entry) }.is_ok();
            }

            let _ = unsafe { CloseHandle(snapshot) };
            Ok(processes)
        }

        pub(crate) fn read_into(&self, address: Address, buffer: &mut [u8]) -> Result<()> {
            let mut bytes_read = 0usize;
            unsafe {
                ReadProcessMemory(
                    self.handle,
                    address.value() as *const c_void,
                    buffer.as_mut_ptr() as *mut c_void,
                    buffer.len(),
                    Some(&mut bytes_read),
                )
            }
            .map_err(|e| Error::inaccessible(address, e.to_string()))?;

            if bytes_read != buffer.len() {
                return Err(Error::inaccessible(
                    address,
                    format!("short read: expected {} bytes, got {}", buffer.len(), bytes_read),
                ));
            }
            Ok(())
        }

        pub(super) fn close(&mut self) {
            if self.owned {
                let _ = unsafe { CloseHandle(self.handle) };
                self.owned = false;
            }
        }
    }

    // Handles are process-wide kernel objects; ReadProcessMemory is thread-safe.
    unsafe impl Send for ProcessHandle {}
    unsafe impl Sync for ProcessHandle {}
}

#[cfg(not(target_os = "windows"))]
mod imp {
    use super::*;

    const UNSUPPORTED: &str = "process memory access is only supported on Windows";

    impl ProcessHandle {
        pub fn open(pid: u32) -> Result<Self> {
            Err(Error::ProcessOpenFailed(format!("pid {}: {}", pid, UNSUPPORTED)))
        }

        pub fn current() -> Result<Self> {
            Err(Error::ProcessOpenFailed(UNSUPPORTED.to_string()))
        }

        pub fn list() -> Result<Vec<ProcessInfo>> {
            Err(Error::ProcessOpenFailed(UNSUPPORTED.to_string()))
        }

        pub(crate) fn read_into(&self, address: Address, _buffer: &mut [u8]) -> Result<()> {
            Err(Error::inaccessible(address, UNSUPPORTED))
        }

        pub(super) fn close(&mut self) {}
    }
}

impl ProcessHandle {
    /// Find a process by executable name (case-insensitive) and open it
    pub fn find_by_name(name: &str) -> Result<Self> {
        let info = Self::list()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::ProcessNotFound(name.to_string()))?;
        Self::open(info.pid)
    }

    /// Find and open the default game process
    pub fn find_and_open() -> Result<Self> {
        Self::find_by_name(DEFAULT_PROCESS_NAME)
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        self.close();
    }
}
