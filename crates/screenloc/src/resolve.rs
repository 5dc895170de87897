//! Location name resolution.
//!
//! Interior cells are named by their own name. Exterior cells take the map
//! name of the highest-priority map entry across all of their regions,
//! falling back to the cell name when there is none or when any list on the
//! way cannot be read in full.
//!
//! The candidate order is load-bearing: regions in listed order, and within a
//! region its data list in chain order. Among entries sharing the highest
//! priority the last one in that order wins, which matches what the game
//! shows on load doors and save games.

use tracing::{debug, warn};

use crate::cell::Cell;
use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::list::LinkedList;
use crate::process::layout::region;
use crate::process::{Address, ReadMemory};
use crate::record::{ExtraData, MapData, RegionData, classify_extra_data, classify_region_data};

/// Index of the map entry with the highest priority.
///
/// Same result as a stable ascending sort by priority followed by taking the
/// last element: ties go to the entry that comes last in `records`.
pub fn highest_priority_index(records: &[MapData]) -> Option<usize> {
    // max_by_key returns the last of several equal maxima
    records
        .iter()
        .enumerate()
        .max_by_key(|(_, record)| record.priority)
        .map(|(index, _)| index)
}

/// Pick the map entry with the highest priority, see [`highest_priority_index`].
pub fn highest_priority<I>(records: I) -> Option<MapData>
where
    I: IntoIterator<Item = MapData>,
{
    let mut records: Vec<MapData> = records.into_iter().collect();
    let index = highest_priority_index(&records)?;
    Some(records.swap_remove(index))
}

/// Resolve a cell's location name with the default configuration.
pub fn resolve_location_name<R: ReadMemory + ?Sized>(reader: &R, cell: &Cell) -> String {
    LocationResolver::new(reader).resolve_location_name(cell)
}

/// Resolves location names against one process's memory
pub struct LocationResolver<'a, R: ReadMemory + ?Sized> {
    reader: &'a R,
    config: ResolverConfig,
}

impl<'a, R: ReadMemory + ?Sized> LocationResolver<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self::with_config(reader, ResolverConfig::default())
    }

    pub fn with_config(reader: &'a R, config: ResolverConfig) -> Self {
        Self { reader, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Name shown for `cell`. Never fails: a missing region list, a list
    /// without map data, or any failed read or traversal falls back to
    /// `cell.name`.
    pub fn resolve_location_name(&self, cell: &Cell) -> String {
        if cell.is_interior {
            return cell.name.clone();
        }

        let candidates = match self.map_candidates(cell) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Failed to read regions of cell {:?}, using cell name: {}", cell.name, e);
                return cell.name.clone();
            }
        };

        match highest_priority(candidates) {
            Some(winner) => {
                debug!(
                    "Location for {:?}: {:?} (priority {})",
                    cell.name, winner.map_name, winner.priority
                );
                winner.map_name
            }
            None => {
                debug!("No map data for {:?}, using cell name", cell.name);
                cell.name.clone()
            }
        }
    }

    /// Every map entry reachable from the cell's regions, in resolution order.
    ///
    /// Empty for interior cells and for cells without a region list. A failed
    /// read or an exceeded traversal bound anywhere on the way fails the whole
    /// collection, since the winner may sit past the failure. Malformed
    /// records are skipped one by one.
    pub fn map_candidates(&self, cell: &Cell) -> Result<Vec<MapData>> {
        if cell.is_interior {
            return Ok(Vec::new());
        }

        let Some(regions) = self.find_region_list(cell.extra_data_list_head)? else {
            debug!("Cell {:?} has no region list", cell.name);
            return Ok(Vec::new());
        };

        let mut candidates = Vec::new();
        for region in regions {
            self.collect_region_maps(region, &mut candidates)?;
        }
        Ok(candidates)
    }

    /// Regions of the first region list entry in the extra data list.
    fn find_region_list(&self, head: Address) -> Result<Option<Vec<Address>>> {
        for entry in self.list(head).iter() {
            let entry = entry?;
            match classify_extra_data(self.reader, entry, &self.config) {
                Ok(ExtraData::RegionList { regions }) => return Ok(Some(regions)),
                Ok(ExtraData::Other { .. }) => {}
                Err(e @ Error::MalformedRecord { .. }) => debug!("Ignoring extra data: {}", e),
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// Append the region's map entries to `out` in chain order.
    fn collect_region_maps(&self, region_addr: Address, out: &mut Vec<MapData>) -> Result<()> {
        let head = self
            .reader
            .read_pointer(region_addr.offset(region::DATA_LIST))?;

        for entry in self.list(head).iter() {
            let entry = entry?;
            match classify_region_data(self.reader, entry, &self.config) {
                Ok(RegionData::Map(map)) => out.push(map),
                Ok(RegionData::Other { .. }) => {}
                Err(e @ Error::MalformedRecord { .. }) => debug!("Ignoring region data: {}", e),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn list(&self, head: Address) -> LinkedList<'a, R> {
        LinkedList::new(self.reader, head)
            .with_layout(self.config.list_layout)
            .with_max_nodes(self.config.max_nodes)
    }
}
