use crate::error::{Error, Result};
use crate::process::{Address, ProcessHandle};

/// Read-only access to the observed process's memory.
///
/// Implementors only provide [`read_bytes`](ReadMemory::read_bytes); every
/// typed read is decoded from it as little-endian.
pub trait ReadMemory {
    /// Read exactly `size` bytes at `address`.
    ///
    /// Implementations must fail with [`Error::InaccessibleMemory`] rather
    /// than return a short buffer.
    fn read_bytes(&self, address: Address, size: usize) -> Result<Vec<u8>>;

    fn read_u8(&self, address: Address) -> Result<u8> {
        read_array::<_, 1>(self, address).map(u8::from_le_bytes)
    }

    fn read_u16(&self, address: Address) -> Result<u16> {
        read_array(self, address).map(u16::from_le_bytes)
    }

    fn read_u32(&self, address: Address) -> Result<u32> {
        read_array(self, address).map(u32::from_le_bytes)
    }

    fn read_i32(&self, address: Address) -> Result<i32> {
        read_array(self, address).map(i32::from_le_bytes)
    }

    fn read_u64(&self, address: Address) -> Result<u64> {
        read_array(self, address).map(u64::from_le_bytes)
    }

    /// Read a pointer-sized value (64-bit target).
    fn read_pointer(&self, address: Address) -> Result<Address> {
        self.read_u64(address).map(Address::new)
    }
}

impl<R: ReadMemory + ?Sized> ReadMemory for &R {
    fn read_bytes(&self, address: Address, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(address, size)
    }
}

fn read_array<R: ReadMemory + ?Sized, const N: usize>(
    reader: &R,
    address: Address,
) -> Result<[u8; N]> {
    let bytes = reader.read_bytes(address, N)?;
    bytes.as_slice().try_into().map_err(|_| {
        Error::inaccessible(
            address,
            format!("short read: expected {} bytes, got {}", N, bytes.len()),
        )
    })
}

/// [`ReadMemory`] over an opened process handle.
pub struct MemoryReader<'a> {
    process: &'a ProcessHandle,
}

impl<'a> MemoryReader<'a> {
    pub fn new(process: &'a ProcessHandle) -> Self {
        Self { process }
    }

    pub fn process(&self) -> &ProcessHandle {
        self.process
    }
}

impl ReadMemory for MemoryReader<'_> {
    fn read_bytes(&self, address: Address, size: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; size];
        self.process.read_into(address, &mut buffer)?;
        Ok(buffer)
    }
}
