//! Little-endian primitive fields
//!
//! Every multi-byte value on the tsctl wire is little-endian with no padding.
//! Writers append to any [`BufMut`]; readers pull from any [`Read`], which
//! covers sockets as well as in-memory slices and [`Buf::reader`].
//!
//! [`Buf::reader`]: bytes::Buf::reader

use std::io::{ErrorKind, Read};

use bytes::BufMut;

use super::{Error, Result};

/// Append an unsigned byte
#[inline]
pub fn put_u8(dst: &mut impl BufMut, value: u8) {
    dst.put_u8(value);
}

/// Append an unsigned 16-bit value
#[inline]
pub fn put_u16(dst: &mut impl BufMut, value: u16) {
    dst.put_u16_le(value);
}

/// Append an unsigned 32-bit value
#[inline]
pub fn put_u32(dst: &mut impl BufMut, value: u32) {
    dst.put_u32_le(value);
}

/// Append a signed 32-bit value
#[inline]
pub fn put_i32(dst: &mut impl BufMut, value: i32) {
    dst.put_i32_le(value);
}

/// Append raw bytes with no length prefix or terminator
#[inline]
pub fn put_bytes(dst: &mut impl BufMut, value: &[u8]) {
    dst.put_slice(value);
}

fn read_array<const N: usize>(src: &mut impl Read, field: &'static str) -> Result<[u8; N]> {
    let mut raw = [0u8; N];
    src.read_exact(&mut raw).map_err(|err| map_read_error(err, field, N))?;
    Ok(raw)
}

fn map_read_error(err: std::io::Error, field: &'static str, needed: usize) -> Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        Error::ShortRead { field, needed }
    } else {
        Error::Io(err)
    }
}

/// Read an unsigned byte
pub fn read_u8(src: &mut impl Read, field: &'static str) -> Result<u8> {
    let [value] = read_array::<1>(src, field)?;
    Ok(value)
}

/// Read an unsigned 16-bit value
pub fn read_u16(src: &mut impl Read, field: &'static str) -> Result<u16> {
    read_array(src, field).map(u16::from_le_bytes)
}

/// Read an unsigned 32-bit value
pub fn read_u32(src: &mut impl Read, field: &'static str) -> Result<u32> {
    read_array(src, field).map(u32::from_le_bytes)
}

/// Read exactly `len` raw bytes.
///
/// The buffer grows with the data actually received, so a bogus length from
/// the wire fails with [`Error::ShortRead`] instead of a huge allocation.
pub fn read_bytes(src: &mut impl Read, len: usize, field: &'static str) -> Result<Vec<u8>> {
    let mut value = Vec::new();
    src.by_ref()
        .take(len as u64)
        .read_to_end(&mut value)
        .map_err(|err| map_read_error(err, field, len))?;

    if value.len() < len {
        return Err(Error::ShortRead {
            field,
            needed: len - value.len(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_are_little_endian() {
        let mut buf = Vec::new();
        put_u8(&mut buf, 0xAB);
        put_u16(&mut buf, 0x1234);
        put_u32(&mut buf, 0xDEAD_BEEF);
        put_i32(&mut buf, -3);
        put_bytes(&mut buf, b"io");

        assert_eq!(
            buf,
            [
                0xAB, 0x34, 0x12, 0xEF, 0xBE, 0xAD, 0xDE, 0xFD, 0xFF, 0xFF, 0xFF, b'i', b'o'
            ]
        );
    }

    #[test]
    fn test_reads_consume_in_order() {
        let wire = [0x7F, 0x01, 0x02, 0x2A, 0x00, 0x00, 0x00, b'x', b'y', 0x80];
        let mut src = &wire[..];

        assert_eq!(read_u8(&mut src, "a").unwrap(), 0x7F);
        assert_eq!(read_u16(&mut src, "b").unwrap(), 0x0201);
        assert_eq!(read_u32(&mut src, "c").unwrap(), 42);
        assert_eq!(read_bytes(&mut src, 2, "d").unwrap(), b"xy");
        assert_eq!(src, [0x80]);
    }

    #[test]
    fn test_short_read() {
        let mut src = &[0x01, 0x02][..];
        let err = read_u32(&mut src, "value").unwrap_err();
        assert!(matches!(
            err,
            Error::ShortRead {
                field: "value",
                needed: 4
            }
        ));
    }

    #[test]
    fn test_short_bytes_reports_missing() {
        let mut src = &b"abc"[..];
        let err = read_bytes(&mut src, 10, "payload").unwrap_err();
        assert!(matches!(err, Error::ShortRead { needed: 7, .. }));
    }

    #[test]
    fn test_other_io_errors_propagate() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(ErrorKind::ConnectionReset))
            }
        }

        let err = read_u8(&mut Broken, "tag").unwrap_err();
        assert!(matches!(err, Error::Io(ref io) if io.kind() == ErrorKind::ConnectionReset));
    }
}
