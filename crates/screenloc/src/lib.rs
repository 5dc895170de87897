//! # screenloc
//!
//! Resolves the location name the game shows for the player's current cell
//! by reading the game's memory from outside the process.
//!
//! This crate provides:
//! - Read-only access to another process's memory (`ReadMemory`, Windows handles)
//! - A bounded walker for the game's two-pointer linked lists
//! - Classification of region and extra data records by discriminator
//! - Priority-based location name resolution with a cell-name fallback
//!
//! ## Example
//!
//! ```ignore
//! use screenloc::{Cell, LocationResolver, MemoryReader, ProcessHandle, ResolverConfig};
//!
//! let process = ProcessHandle::find_and_open()?;
//! let reader = MemoryReader::new(&process);
//! let config = ResolverConfig::default();
//!
//! let cell = Cell::read(&reader, cell_address, &config)?;
//! let name = LocationResolver::with_config(&reader, config).resolve_location_name(&cell);
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod list;
pub mod prelude;
pub mod process;
pub mod record;
pub mod resolve;

// Re-export from cell module
pub use cell::{Cell, WorldSpacePosition};

// Re-export from config module
pub use config::{ResolverConfig, ResolverConfigBuilder};

// Re-export from error module
pub use error::{Error, Result};

// Re-export from list module
pub use list::{LinkedList, ListLayout, ListNode, Values, walk};

// Re-export from process module
pub use process::{
    Address, DEFAULT_PROCESS_NAME, MemoryReader, ProcessHandle, ProcessInfo, ReadMemory,
    decode_windows_1252, read_c_string,
};

// Re-export from record module
pub use record::{
    ExtraData, MapData, RegionData, RegionDataKind, classify_extra_data, classify_region_data,
};

// Re-export from resolve module
pub use resolve::{
    LocationResolver, highest_priority, highest_priority_index, resolve_location_name,
};
