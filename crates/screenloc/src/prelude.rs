//! Prelude module for convenient imports
//!
//! ```ignore
//! use screenloc::prelude::*;
//! ```
//!
//! This brings the following into scope:
//!
//! - Memory access: `Address`, `ReadMemory`, `MemoryReader`, `ProcessHandle`
//! - Resolution: `Cell`, `LocationResolver`, `ResolverConfig`, `MapData`
//! - Error handling: `Error`, `Result`

// Memory access
pub use crate::process::{Address, MemoryReader, ProcessHandle, ReadMemory};

// Resolution
pub use crate::cell::Cell;
pub use crate::config::ResolverConfig;
pub use crate::record::MapData;
pub use crate::resolve::{LocationResolver, resolve_location_name};

// Error handling
pub use crate::error::{Error, Result};
