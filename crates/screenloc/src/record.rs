//! Classification of tagged records by their embedded type discriminator.
//!
//! Two record families are decoded here:
//!
//! - **Region data**: entries of a region's data list. Only map entries carry a
//!   decoded payload (priority and map name).
//! - **Extra data**: entries of a cell's extra data list. Only the region list
//!   entry is decoded.
//!
//! Unknown discriminators decode to an `Other` variant so undocumented record
//! kinds never abort a traversal.

use strum::{Display, IntoStaticStr};
use tracing::trace;

use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::list::LinkedList;
use crate::process::layout::{extra, region_data};
use crate::process::{Address, ReadMemory, read_c_string};

/// Error for a discriminator outside the known set
#[derive(Debug, thiserror::Error)]
#[error("Unknown {type_name} discriminator: {value}")]
pub struct UnknownDiscriminatorError {
    type_name: &'static str,
    value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[repr(u32)]
pub enum RegionDataKind {
    #[strum(serialize = "Objects")]
    Object = 2,
    Weather = 3,
    Map = 4,
    Land = 5,
    Grass = 6,
    Sound = 7,
}

impl TryFrom<u32> for RegionDataKind {
    type Error = UnknownDiscriminatorError;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Object),
            3 => Ok(Self::Weather),
            4 => Ok(Self::Map),
            5 => Ok(Self::Land),
            6 => Ok(Self::Grass),
            7 => Ok(Self::Sound),
            _ => Err(UnknownDiscriminatorError {
                type_name: "RegionDataKind",
                value,
            }),
        }
    }
}

/// Map entry of a region's data list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapData {
    pub priority: u16,
    pub map_name: String,
}

/// Decoded entry of a region's data list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionData {
    Map(MapData),
    /// Any non-map entry, including unrecognized discriminators
    Other { kind: u32 },
}

impl RegionData {
    pub fn into_map(self) -> Option<MapData> {
        match self {
            RegionData::Map(map) => Some(map),
            RegionData::Other { .. } => None,
        }
    }
}

/// Decoded entry of a cell's extra data list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraData {
    /// The cell's regions, in listed order
    RegionList { regions: Vec<Address> },
    Other { kind: u8 },
}

/// Classify the region data record at `address`.
///
/// A map entry whose name pointer is null or whose name is unterminated
/// yields [`Error::MalformedRecord`].
pub fn classify_region_data<R: ReadMemory + ?Sized>(
    reader: &R,
    address: Address,
    config: &ResolverConfig,
) -> Result<RegionData> {
    let raw = reader.read_u32(address.offset(region_data::TYPE))?;

    match RegionDataKind::try_from(raw) {
        Ok(RegionDataKind::Map) => {
            let priority = reader.read_u16(address.offset(region_data::PRIORITY))?;
            let name_ptr = reader.read_pointer(address.offset(region_data::MAP_NAME))?;
            if name_ptr.is_null() {
                return Err(Error::malformed(address, "map entry without a name"));
            }
            let map_name = read_c_string(reader, name_ptr, config.max_text_len)?;
            trace!("Map data at {}: priority={} name={:?}", address, priority, map_name);
            Ok(RegionData::Map(MapData { priority, map_name }))
        }
        Ok(kind) => {
            trace!("{} data at {}", kind, address);
            Ok(RegionData::Other { kind: raw })
        }
        Err(e) => {
            trace!("{} at {}", e, address);
            Ok(RegionData::Other { kind: raw })
        }
    }
}

/// Classify the extra data record at `address`.
///
/// For a region list entry the referenced region list is walked eagerly;
/// any failure during that walk is returned.
pub fn classify_extra_data<R: ReadMemory + ?Sized>(
    reader: &R,
    address: Address,
    config: &ResolverConfig,
) -> Result<ExtraData> {
    let kind = reader.read_u8(address.offset(extra::TYPE))?;
    if kind != extra::TYPE_REGION_LIST {
        return Ok(ExtraData::Other { kind });
    }

    let head = reader.read_pointer(address.offset(extra::REGION_LIST))?;
    let regions = LinkedList::new(reader, head)
        .with_layout(config.list_layout)
        .with_max_nodes(config.max_nodes)
        .iter()
        .collect::<Result<Vec<_>>>()?;

    trace!("Region list at {}: {} regions", address, regions.len());
    Ok(ExtraData::RegionList { regions })
}
