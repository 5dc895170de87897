//! Game string decoding.

use encoding_rs::WINDOWS_1252;
use memchr::memchr;

use crate::error::{Error, Result};
use crate::process::layout::limits::{PAGE_SIZE, TEXT_CHUNK};
use crate::process::{Address, ReadMemory};

/// Decode Windows-1252 bytes (the game's string encoding) into a `String`.
///
/// Stops at the first NUL byte if one is present.
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    let end = memchr(0, bytes).unwrap_or(bytes.len());
    let (text, _, had_errors) = WINDOWS_1252.decode(&bytes[..end]);
    if had_errors {
        tracing::trace!("Replaced undecodable bytes in {:?}", text);
    }
    text.into_owned()
}

/// Read a NUL-terminated string of at most `max_len` bytes at `address`.
///
/// Reads are chunked so they never cross a page boundary. A missing
/// terminator within `max_len` bytes is a [`Error::MalformedRecord`].
pub fn read_c_string<R: ReadMemory + ?Sized>(
    reader: &R,
    address: Address,
    max_len: usize,
) -> Result<String> {
    let limit = max_len.saturating_add(1);
    let mut bytes = Vec::new();
    let mut cursor = address;

    while bytes.len() < limit {
        let to_page_end = (PAGE_SIZE - cursor.value() % PAGE_SIZE) as usize;
        let want = TEXT_CHUNK.min(limit - bytes.len()).min(to_page_end);

        let chunk = match reader.read_bytes(cursor, want) {
            Ok(chunk) => chunk,
            Err(e) => {
                let prefix = read_prefix(reader, cursor, want);
                if prefix.is_empty() {
                    return Err(e);
                }
                prefix
            }
        };

        if let Some(end) = memchr(0, &chunk) {
            bytes.extend_from_slice(&chunk[..end]);
            return Ok(decode_windows_1252(&bytes));
        }

        bytes.extend_from_slice(&chunk);
        cursor = cursor.offset(chunk.len() as u64);

        if chunk.len() < want {
            return Err(Error::inaccessible(
                cursor,
                "string runs into unreadable memory",
            ));
        }
    }

    Err(Error::malformed(
        address,
        format!("no string terminator within {} bytes", max_len),
    ))
}

/// Byte-by-byte read up to the first unreadable byte or terminator.
fn read_prefix<R: ReadMemory + ?Sized>(reader: &R, address: Address, len: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..len as u64 {
        match reader.read_u8(address.offset(i)) {
            Ok(byte) => {
                out.push(byte);
                if byte == 0 {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::MockMemoryBuilder;

    #[test]
    fn test_decode_windows_1252() {
        assert_eq!(decode_windows_1252(b"Whiterun Hold"), "Whiterun Hold");
        // 0xE9 = e acute, 0xF6 = o umlaut
        assert_eq!(decode_windows_1252(&[0x43, 0x61, 0x66, 0xE9]), "Caf\u{e9}");
        assert_eq!(decode_windows_1252(&[0x46, 0xF6, 0x00, 0x41]), "F\u{f6}");
    }

    #[test]
    fn test_read_c_string_exact_allocation() {
        // String ends exactly at the end of mapped memory; chunked read must fall back
        let reader = MockMemoryBuilder::new().write_c_str(0x2000, "Haafingar").build();
        assert_eq!(
            read_c_string(&reader, Address::new(0x2000), 256).unwrap(),
            "Haafingar"
        );
    }

    #[test]
    fn test_read_c_string_spans_chunks() {
        let long = "The Pale ".repeat(12);
        let reader = MockMemoryBuilder::new().write_c_str(0x3000, &long).build();
        assert_eq!(read_c_string(&reader, Address::new(0x3000), 256).unwrap(), long);
    }

    #[test]
    fn test_read_c_string_crosses_page_boundary() {
        let reader = MockMemoryBuilder::new().write_c_str(0x1FFA, "Falkreath").build();
        assert_eq!(
            read_c_string(&reader, Address::new(0x1FFA), 256).unwrap(),
            "Falkreath"
        );
    }

    #[test]
    fn test_read_c_string_without_terminator_is_malformed() {
        let reader = MockMemoryBuilder::new()
            .write_bytes(0x4000, &[b'A'; 32])
            .write_bytes(0x4020, &[0])
            .build();
        let err = read_c_string(&reader, Address::new(0x4000), 16).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { .. }));
        assert_eq!(
            read_c_string(&reader, Address::new(0x4000), 32).unwrap(),
            "A".repeat(32)
        );
    }

    #[test]
    fn test_read_c_string_runs_into_unmapped_memory() {
        let reader = MockMemoryBuilder::new().write_bytes(0x5000, b"Riften").build();
        let err = read_c_string(&reader, Address::new(0x5000), 256).unwrap_err();
        assert!(matches!(err, Error::InaccessibleMemory { .. }));
    }

    #[test]
    fn test_read_c_string_unmapped_address() {
        let reader = MockMemoryBuilder::new().build();
        let err = read_c_string(&reader, Address::new(0x6000), 256).unwrap_err();
        assert!(matches!(err, Error::InaccessibleMemory { .. }));
    }
}
