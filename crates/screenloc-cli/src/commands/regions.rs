//! Regions command: list map candidates of a cell.
//!
//! # Output Format
//!
//! ```text
//! Cell 0x1F2E3D40 "Wilderness" (exterior)
//!   #  PRIO  NAME
//!   0    10  Skyrim
//!   1    20  Haafingar
//!   2    20  Winter Hold  <- selected
//! ```

use anyhow::Result;
use screenloc::{
    Address, Cell, LocationResolver, MemoryReader, ResolverConfig, highest_priority_index,
};

use super::Target;

pub fn run(target: &Target, cell_addr: Address, config: ResolverConfig) -> Result<()> {
    let process = target.open()?;
    let reader = MemoryReader::new(&process);

    let cell = Cell::read(&reader, cell_addr, &config)?;
    let kind = if cell.is_interior { "interior" } else { "exterior" };
    println!("Cell {} {:?} ({})", cell_addr, cell.name, kind);

    if cell.is_interior {
        println!("  Interior cells are named by the cell itself");
        return Ok(());
    }

    let resolver = LocationResolver::with_config(&reader, config);
    let candidates = match resolver.map_candidates(&cell) {
        Ok(candidates) => candidates,
        Err(e) if e.is_traversal_failure() => {
            println!("  Region data unreadable ({}); falling back to the cell name", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if candidates.is_empty() {
        println!("  No map data; falling back to the cell name");
        return Ok(());
    }

    let selected = highest_priority_index(&candidates);

    println!("  {:>2}  {:>4}  NAME", "#", "PRIO");
    for (i, candidate) in candidates.iter().enumerate() {
        let marker = if Some(i) == selected { "  <- selected" } else { "" };
        println!(
            "  {:>2}  {:>4}  {}{}",
            i, candidate.priority, candidate.map_name, marker
        );
    }

    Ok(())
}
