//! Snapshot of the cell the player occupies.

use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::process::layout::{cell, world_space};
use crate::process::{Address, ReadMemory, read_c_string};

/// Editor id of the generic exterior cell, which `coc` cannot target.
const WILDERNESS: &str = "Wilderness";

/// Exterior position within a world space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSpacePosition {
    pub editor_id: String,
    pub x: i32,
    pub y: i32,
}

/// Read-only view of a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub is_interior: bool,
    pub name: String,
    pub extra_data_list_head: Address,
    pub editor_id: Option<String>,
    pub world_space: Option<WorldSpacePosition>,
}

impl Cell {
    pub fn interior(name: impl Into<String>) -> Self {
        Self {
            is_interior: true,
            name: name.into(),
            extra_data_list_head: Address::NULL,
            editor_id: None,
            world_space: None,
        }
    }

    pub fn exterior(name: impl Into<String>, extra_data_list_head: Address) -> Self {
        Self {
            is_interior: false,
            name: name.into(),
            extra_data_list_head,
            editor_id: None,
            world_space: None,
        }
    }

    pub fn with_editor_id(mut self, editor_id: impl Into<String>) -> Self {
        self.editor_id = Some(editor_id.into());
        self
    }

    pub fn with_world_space(mut self, editor_id: impl Into<String>, x: i32, y: i32) -> Self {
        self.world_space = Some(WorldSpacePosition {
            editor_id: editor_id.into(),
            x,
            y,
        });
        self
    }

    /// Decode a cell record from memory.
    ///
    /// A null name pointer gives an empty name and a null editor id pointer
    /// leaves the editor id unset. The world space position is only read for
    /// exterior cells whose world space pointer is set.
    pub fn read<R: ReadMemory + ?Sized>(
        reader: &R,
        address: Address,
        config: &ResolverConfig,
    ) -> Result<Self> {
        let flags = reader.read_u16(address.offset(cell::FLAGS))?;
        let is_interior = flags & cell::FLAG_INTERIOR != 0;
        let name =
            read_optional_text(reader, address.offset(cell::NAME), config)?.unwrap_or_default();
        let editor_id = read_optional_text(reader, address.offset(cell::EDITOR_ID), config)?;
        let extra_data_list_head = reader.read_pointer(address.offset(cell::EXTRA_LIST))?;

        let world_space = if is_interior {
            None
        } else {
            read_world_space(reader, address, config)?
        };

        let snapshot = Self {
            is_interior,
            name,
            extra_data_list_head,
            editor_id,
            world_space,
        };
        debug!(
            "Cell at {}: interior={} name={:?} editor_id={:?} extra={}",
            address,
            snapshot.is_interior,
            snapshot.name,
            snapshot.editor_id,
            snapshot.extra_data_list_head
        );
        Ok(snapshot)
    }

    /// Console command that returns the player to this cell (or nearby).
    ///
    /// `coc <EditorId>` when the cell has a usable editor id, otherwise
    /// `cow <WorldSpace> <X> <Y>` for exterior cells with a known position.
    pub fn console_command(&self) -> Option<String> {
        if let Some(editor_id) = self
            .editor_id
            .as_deref()
            .filter(|id| !id.is_empty() && *id != WILDERNESS)
        {
            return Some(format!("coc {}", editor_id));
        }

        self.world_space
            .as_ref()
            .filter(|ws| !ws.editor_id.is_empty())
            .map(|ws| format!("cow {} {} {}", ws.editor_id, ws.x, ws.y))
    }
}

/// Follow the string pointer stored at `field`; `None` when it is null.
fn read_optional_text<R: ReadMemory + ?Sized>(
    reader: &R,
    field: Address,
    config: &ResolverConfig,
) -> Result<Option<String>> {
    let ptr = reader.read_pointer(field)?;
    if ptr.is_null() {
        return Ok(None);
    }
    read_c_string(reader, ptr, config.max_text_len).map(Some)
}

fn read_world_space<R: ReadMemory + ?Sized>(
    reader: &R,
    cell_addr: Address,
    config: &ResolverConfig,
) -> Result<Option<WorldSpacePosition>> {
    let ws = reader.read_pointer(cell_addr.offset(cell::WORLD_SPACE))?;
    if ws.is_null() {
        return Ok(None);
    }

    let Some(editor_id) = read_optional_text(reader, ws.offset(world_space::EDITOR_ID), config)?
    else {
        return Ok(None);
    };
    let x = reader.read_i32(cell_addr.offset(cell::GRID_X))?;
    let y = reader.read_i32(cell_addr.offset(cell::GRID_Y))?;
    Ok(Some(WorldSpacePosition { editor_id, x, y }))
}
