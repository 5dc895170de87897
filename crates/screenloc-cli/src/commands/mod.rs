//! CLI command implementations.

pub mod regions;
pub mod resolve;

use anyhow::Result;
use screenloc::ProcessHandle;
use tracing::info;

/// Which process to attach to
pub struct Target {
    pub pid: Option<u32>,
    pub process: String,
}

impl Target {
    pub fn open(&self) -> Result<ProcessHandle> {
        let process = match self.pid {
            Some(pid) => ProcessHandle::open(pid)?,
            None => ProcessHandle::find_by_name(&self.process)?,
        };
        info!("Attached to process {}", process.pid);
        Ok(process)
    }
}
