//! Sparse in-memory stand-in for a foreign process, used by tests.

use std::cell::Cell;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::process::layout::node;
use crate::process::{Address, ReadMemory};

/// Reader over a sparse byte map. Any byte that was never written is unreadable.
#[derive(Debug, Default)]
pub struct MockMemoryReader {
    bytes: HashMap<u64, u8>,
    reads: Cell<usize>,
}

impl MockMemoryReader {
    /// Number of successful `read_bytes` calls so far
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: Address, size: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(size);
        for i in 0..size as u64 {
            let at = address.value().wrapping_add(i);
            match self.bytes.get(&at) {
                Some(byte) => out.push(*byte),
                None => {
                    return Err(Error::inaccessible(
                        Address::new(at),
                        "address not mapped in mock memory",
                    ));
                }
            }
        }
        self.reads.set(self.reads.get() + 1);
        Ok(out)
    }
}

#[derive(Debug, Default)]
pub struct MockMemoryBuilder {
    bytes: HashMap<u64, u8>,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bytes(mut self, address: u64, data: &[u8]) -> Self {
        for (i, byte) in data.iter().enumerate() {
            self.bytes.insert(address + i as u64, *byte);
        }
        self
    }

    pub fn write_u8(self, address: u64, value: u8) -> Self {
        self.write_bytes(address, &[value])
    }

    pub fn write_u16(self, address: u64, value: u16) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u32(self, address: u64, value: u32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_i32(self, address: u64, value: i32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u64(self, address: u64, value: u64) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    /// Write a NUL-terminated string
    pub fn write_c_str(self, address: u64, text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        self.write_bytes(address, &data)
    }

    /// Write a list node with the default two-pointer layout
    pub fn write_node(self, address: u64, value: u64, next: u64) -> Self {
        self.write_u64(address + node::VALUE, value)
            .write_u64(address + node::NEXT, next)
    }

    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader {
            bytes: self.bytes,
            reads: Cell::new(0),
        }
    }
}
