//! Resolve command: print the location name for a cell.

use anyhow::Result;
use screenloc::{Address, Cell, LocationResolver, MemoryReader, ResolverConfig};

use super::Target;

pub fn run(target: &Target, cell_addr: Address, config: ResolverConfig) -> Result<()> {
    let process = target.open()?;
    let reader = MemoryReader::new(&process);

    let cell = Cell::read(&reader, cell_addr, &config)?;
    let resolver = LocationResolver::with_config(&reader, config);

    println!("{}", resolver.resolve_location_name(&cell));
    if let Some(command) = cell.console_command() {
        println!("{}", command);
    }

    Ok(())
}
