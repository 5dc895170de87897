//! Access to the observed process's memory.
//!
//! Everything that touches raw memory goes through [`ReadMemory`]; the rest of
//! the crate only sees decoded values.

mod address;
mod handle;
pub mod layout;
mod reader;
mod text;

#[cfg(test)]
pub mod mock;

pub use address::Address;
pub use handle::{DEFAULT_PROCESS_NAME, ProcessHandle, ProcessInfo};
pub use reader::{MemoryReader, ReadMemory};
pub use text::{decode_windows_1252, read_c_string};

#[cfg(test)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
