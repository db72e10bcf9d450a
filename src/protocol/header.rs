//! tsctl request and reply headers
//!
//! Both headers share one 4-byte layout; only the meaning of the last byte
//! differs.

use std::io::Read;

use bytes::BufMut;

use super::field;
use super::{Class, HEADER_SIZE, Result};

/// Request header (4 bytes)
///
/// # Wire Format
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |         Class (LE)            |   Instance    |    Command    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHeader {
    class: Class,
    instance: u8,
    command: u8,
}

impl RequestHeader {
    /// Create a new request header
    #[must_use]
    pub const fn new(class: Class, instance: u8, command: u8) -> Self {
        Self {
            class,
            instance,
            command,
        }
    }

    /// Get class
    #[must_use]
    pub const fn class(&self) -> Class {
        self.class
    }

    /// Get instance
    #[must_use]
    pub const fn instance(&self) -> u8 {
        self.instance
    }

    /// Get command opcode
    #[must_use]
    pub const fn command(&self) -> u8 {
        self.command
    }

    /// Append the header to `dst`
    pub fn encode(&self, dst: &mut impl BufMut) {
        field::put_u16(dst, self.class.as_u16());
        field::put_u8(dst, self.instance);
        field::put_u8(dst, self.command);
    }

    /// Convert to bytes (little-endian)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        self.encode(&mut &mut bytes[..]);
        bytes
    }
}

/// Reply header (4 bytes)
///
/// Same layout as [`RequestHeader`], with the last byte carrying a tag that
/// selects the payload shape. The class is kept as its raw value so replies
/// for classes this crate has no enum entry for still decode.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplyHeader {
    class: u16,
    instance: u8,
    tag: u8,
}

impl ReplyHeader {
    /// Create a reply header from its raw fields
    #[must_use]
    pub const fn new(class: u16, instance: u8, tag: u8) -> Self {
        Self {
            class,
            instance,
            tag,
        }
    }

    /// Get raw class id
    #[must_use]
    pub const fn class_id(&self) -> u16 {
        self.class
    }

    /// Get class, if known
    #[must_use]
    pub fn class(&self) -> Option<Class> {
        Class::from_u16(self.class)
    }

    /// Get instance
    #[must_use]
    pub const fn instance(&self) -> u8 {
        self.instance
    }

    /// Get tag byte
    #[must_use]
    pub const fn tag(&self) -> u8 {
        self.tag
    }

    /// Check that this reply answers a request sent with `request`
    #[must_use]
    pub fn answers(&self, request: &RequestHeader) -> bool {
        self.class == request.class().as_u16() && self.instance == request.instance()
    }

    /// Read exactly 4 bytes from `src`
    pub fn decode(src: &mut impl Read) -> Result<Self> {
        let class = field::read_u16(src, "header.class")?;
        let instance = field::read_u8(src, "header.instance")?;
        let tag = field::read_u8(src, "header.tag")?;
        Ok(Self {
            class,
            instance,
            tag,
        })
    }

    /// Convert to bytes (little-endian)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..2].copy_from_slice(&self.class.to_le_bytes());
        bytes[2] = self.instance;
        bytes[3] = self.tag;
        bytes
    }
}
