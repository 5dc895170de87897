//! Memory layout constants for the game's data structures
//!
//! This module centralizes every field offset and discriminator value the
//! crate relies on. Pointers are 8 bytes; all integers are little-endian.

/// Two-pointer singly linked list node
pub mod node {
    pub const VALUE: u64 = 0x00;
    pub const NEXT: u64 = 0x08;
}

/// Cell record
pub mod cell {
    /// Pointer to the NUL-terminated full name
    pub const NAME: u64 = 0x28;
    /// Pointer to the NUL-terminated editor id, null when not loaded
    pub const EDITOR_ID: u64 = 0x30;
    /// Cell flags (u16)
    pub const FLAGS: u64 = 0x40;
    /// Head node of the extra data list
    pub const EXTRA_LIST: u64 = 0x48;
    /// Exterior grid X coordinate (i32, exterior cells only)
    pub const GRID_X: u64 = 0x50;
    /// Exterior grid Y coordinate (i32, exterior cells only)
    pub const GRID_Y: u64 = 0x54;
    /// Pointer to the parent world space record (exterior cells only)
    pub const WORLD_SPACE: u64 = 0x58;

    pub const FLAG_INTERIOR: u16 = 0x0001;
}

/// World space record
pub mod world_space {
    /// Pointer to the NUL-terminated editor id
    pub const EDITOR_ID: u64 = 0x30;
}

/// Entries of a cell's extra data list
pub mod extra {
    /// Type discriminator (u8)
    pub const TYPE: u64 = 0x10;
    /// Head node of the region list (RegionList entries only)
    pub const REGION_LIST: u64 = 0x18;

    pub const TYPE_REGION_LIST: u8 = 0x08;
}

/// Region record
pub mod region {
    /// Head node of the region's data list
    pub const DATA_LIST: u64 = 0x28;
}

/// Entries of a region's data list
pub mod region_data {
    /// Type discriminator (u32)
    pub const TYPE: u64 = 0x08;
    /// Priority (u16)
    pub const PRIORITY: u64 = 0x0C;
    /// Pointer to the NUL-terminated map name (Map entries only)
    pub const MAP_NAME: u64 = 0x10;
}

/// Traversal and decoding limits
pub mod limits {
    /// Maximum nodes visited by a single list walk
    pub const MAX_NODES: usize = 4096;
    /// Maximum length of a decoded name, excluding the terminator
    pub const MAX_TEXT_LEN: usize = 256;
    /// Bytes requested per read when scanning for a string terminator
    pub const TEXT_CHUNK: usize = 64;
    pub const PAGE_SIZE: u64 = 0x1000;
}
