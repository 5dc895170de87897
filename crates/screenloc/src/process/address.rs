use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A location in the observed process's address space.
///
/// An `Address` is a coordinate, not a pointer: it can only be dereferenced
/// through a [`ReadMemory`](super::ReadMemory) implementation.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Address(u64);

impl Address {
    pub const NULL: Address = Address(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Address of a field `offset` bytes past this one.
    pub const fn offset(self, offset: u64) -> Self {
        Self(self.0.wrapping_add(offset))
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Address> for u64 {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{:X})", self.0)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Parses hexadecimal text with or without a `0x` prefix.
impl FromStr for Address {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        u64::from_str_radix(digits, 16).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_wraps() {
        assert_eq!(Address::new(0x1000).offset(0x18), Address::new(0x1018));
        assert_eq!(Address::new(u64::MAX).offset(1), Address::NULL);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("0x7FF6A000".parse::<Address>().unwrap(), Address::new(0x7FF6_A000));
        assert_eq!("7ff6a000".parse::<Address>().unwrap(), Address::new(0x7FF6_A000));
        assert!("0xZZ".parse::<Address>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Address::new(0xABC).to_string(), "0xABC");
        assert_eq!(format!("{:?}", Address::NULL), "Address(0x0)");
    }
}
