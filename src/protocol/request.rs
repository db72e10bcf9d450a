//! tsctl request encoder

use std::io::Write;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use super::field;
use super::{Class, DioState, HEADER_SIZE, LockType, RequestHeader, Result};

/// One trailing request parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// Unsigned byte
    U8(u8),
    /// Unsigned 16-bit value
    U16(u16),
    /// Unsigned 32-bit value
    U32(u32),
    /// Signed 32-bit value
    I32(i32),
    /// Raw bytes, no length prefix
    Bytes(Bytes),
}

impl Param {
    /// Encoded size in bytes
    #[must_use]
    pub fn wire_size(&self) -> usize {
        match self {
            Self::U8(_) => 1,
            Self::U16(_) => 2,
            Self::U32(_) | Self::I32(_) => 4,
            Self::Bytes(value) => value.len(),
        }
    }

    /// Append the parameter to `dst`
    pub fn encode(&self, dst: &mut impl BufMut) {
        match self {
            Self::U8(value) => field::put_u8(dst, *value),
            Self::U16(value) => field::put_u16(dst, *value),
            Self::U32(value) => field::put_u32(dst, *value),
            Self::I32(value) => field::put_i32(dst, *value),
            Self::Bytes(value) => field::put_bytes(dst, value),
        }
    }
}

impl From<u8> for Param {
    fn from(value: u8) -> Self {
        Self::U8(value)
    }
}

impl From<u16> for Param {
    fn from(value: u16) -> Self {
        Self::U16(value)
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Self::U32(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}

impl From<LockType> for Param {
    fn from(value: LockType) -> Self {
        Self::U32(value.as_u32())
    }
}

impl From<DioState> for Param {
    fn from(value: DioState) -> Self {
        Self::I32(value.as_i32())
    }
}

impl From<Bytes> for Param {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for Param {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(Bytes::copy_from_slice(value))
    }
}

/// Outgoing tsctl message: one header plus ordered parameters
///
/// # Format
///
/// ```text
/// [CLASS (2)] [INSTANCE (1)] [COMMAND (1)] [PARAMS (variable)]
/// ```
///
/// Parameters follow the header in push order with no padding and no
/// overall length prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    header: RequestHeader,
    params: Vec<Param>,
}

impl Request {
    /// Create a request with no parameters
    #[must_use]
    pub fn new(class: Class, instance: u8, command: u8) -> Self {
        Self {
            header: RequestHeader::new(class, instance, command),
            params: Vec::new(),
        }
    }

    /// Append a parameter
    #[must_use]
    pub fn param(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Get header
    #[must_use]
    pub const fn header(&self) -> &RequestHeader {
        &self.header
    }

    /// Get parameters in wire order
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Total encoded size in bytes
    #[must_use]
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.params.iter().map(Param::wire_size).sum::<usize>()
    }

    /// Append the encoded request to `dst`
    pub fn encode_into(&self, dst: &mut impl BufMut) {
        self.header.encode(dst);
        for param in &self.params {
            param.encode(dst);
        }
    }

    /// Encode to bytes
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(self.wire_size());
        self.encode_into(&mut bytes);

        trace!(
            class = %self.header.class(),
            instance = self.header.instance(),
            command = self.header.command(),
            len = bytes.len(),
            "encoded request"
        );
        bytes.freeze()
    }

    /// Encode and write to `sink`; sink failures propagate unchanged
    pub fn write_to(&self, sink: &mut impl Write) -> Result<()> {
        sink.write_all(&self.encode())?;
        Ok(())
    }
}
