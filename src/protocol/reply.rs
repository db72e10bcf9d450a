//! tsctl reply decoder
//!
//! Replies carry no shape field, so the caller says which shape it expects
//! based on the request it sent. For scalar replies the tag byte then picks
//! the payload width. Getting either choice wrong leaves the stream
//! misaligned for every later reply on the same connection.

use std::io::Read;

use bytes::{Buf, Bytes};
use tracing::{debug, trace};

use super::field;
use super::{Error, ReplyHeader, Result, ScalarWidth, tag};

/// Reply shape expected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// Bare 4-byte header
    RawHeader,
    /// Header, 1/2/4-byte value, end sentinel
    Scalar,
    /// Header, u32 length, bytes, end sentinel
    String,
}

/// Reply carrying a single integer
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarReply {
    /// Reply header
    pub header: ReplyHeader,
    /// Payload widened to i32
    pub value: i32,
    /// Trailing sentinel byte, stored as received
    pub end_tag: u8,
}

/// Reply carrying a single length-prefixed string
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringReply {
    /// Reply header
    pub header: ReplyHeader,
    /// Number of payload bytes read
    pub len: u32,
    /// Raw payload
    pub value: Bytes,
    /// Trailing sentinel byte, stored as received
    pub end_tag: u8,
}

impl StringReply {
    /// Payload as UTF-8, if valid
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }
}

/// Decoded reply, one variant per [`ReplyShape`]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Bare header
    Header(ReplyHeader),
    /// Scalar reply
    Scalar(ScalarReply),
    /// String reply
    String(StringReply),
}

impl Reply {
    /// Header of any reply shape
    #[must_use]
    pub const fn header(&self) -> &ReplyHeader {
        match self {
            Self::Header(header) => header,
            Self::Scalar(reply) => &reply.header,
            Self::String(reply) => &reply.header,
        }
    }

    /// Shape this reply was decoded as
    #[must_use]
    pub const fn shape(&self) -> ReplyShape {
        match self {
            Self::Header(_) => ReplyShape::RawHeader,
            Self::Scalar(_) => ReplyShape::Scalar,
            Self::String(_) => ReplyShape::String,
        }
    }

    /// Unwrap a scalar reply
    pub fn into_scalar(self) -> Result<ScalarReply> {
        match self {
            Self::Scalar(reply) => Ok(reply),
            _ => Err(Error::InvalidState("reply is not a scalar")),
        }
    }

    /// Unwrap a string reply
    pub fn into_string(self) -> Result<StringReply> {
        match self {
            Self::String(reply) => Ok(reply),
            _ => Err(Error::InvalidState("reply is not a string")),
        }
    }
}

/// Decode one reply of the expected shape from `src`
///
/// # Errors
///
/// Returns an error if:
/// - Input ends before the reply is complete
/// - A scalar reply's tag is not in the width table
/// - A string reply's tag is not the string marker
///
/// On error the stream position is wherever decoding stopped; it is not
/// rewound.
pub fn decode_reply(src: &mut impl Read, shape: ReplyShape) -> Result<Reply> {
    let result = match shape {
        ReplyShape::RawHeader => decode_header(src).map(Reply::Header),
        ReplyShape::Scalar => decode_scalar(src).map(Reply::Scalar),
        ReplyShape::String => decode_string(src).map(Reply::String),
    };

    match &result {
        Ok(reply) => trace!(?shape, tag = reply.header().tag(), "decoded reply"),
        Err(err) => debug!(?shape, error = %err, "failed to decode reply"),
    }
    result
}

/// Decode one reply of the expected shape from an in-memory buffer,
/// advancing it past the consumed bytes
pub fn decode_reply_buf(buf: &mut impl Buf, shape: ReplyShape) -> Result<Reply> {
    decode_reply(&mut buf.reader(), shape)
}

/// Decode a bare 4-byte header
pub fn decode_header(src: &mut impl Read) -> Result<ReplyHeader> {
    ReplyHeader::decode(src)
}

/// Decode a scalar reply, picking the payload width from the tag
#[allow(clippy::cast_possible_wrap)]
pub fn decode_scalar(src: &mut impl Read) -> Result<ScalarReply> {
    let header = ReplyHeader::decode(src)?;

    let width = ScalarWidth::from_tag(header.tag())
        .ok_or(Error::UnknownReplyTag { tag: header.tag() })?;

    let value = match width {
        ScalarWidth::Byte => i32::from(field::read_u8(src, "scalar.value")?),
        ScalarWidth::Word => i32::from(field::read_u16(src, "scalar.value")?),
        ScalarWidth::Int => field::read_u32(src, "scalar.value")? as i32,
    };
    let end_tag = field::read_u8(src, "scalar.end")?;

    Ok(ScalarReply {
        header,
        value,
        end_tag,
    })
}

/// Decode a string reply; the tag must be the string marker
pub fn decode_string(src: &mut impl Read) -> Result<StringReply> {
    let header = ReplyHeader::decode(src)?;

    if header.tag() != tag::STRLEN {
        return Err(Error::UnexpectedReplyTag {
            expected: tag::STRLEN,
            found: header.tag(),
        });
    }

    let declared = field::read_u32(src, "string.len")?;
    let value = field::read_bytes(src, declared as usize, "string.value")?;
    let end_tag = field::read_u8(src, "string.end")?;

    Ok(StringReply {
        header,
        // read_bytes returns exactly `declared` bytes, so this always fits
        len: u32::try_from(value.len()).unwrap_or(declared),
        value: Bytes::from(value),
        end_tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_header() {
        let mut src = &[0x00, 0x00, 0x00, 0x13, 0x99][..];
        let reply = decode_reply(&mut src, ReplyShape::RawHeader).unwrap();

        assert_eq!(reply, Reply::Header(ReplyHeader::new(0, 0, 0x13)));
        assert_eq!(src, [0x99]);
    }

    #[test]
    fn test_scalar_byte_zero_extends() {
        let mut src = &[0x00, 0x00, 0x00, 0x00, 0xFF, 0x80][..];
        let reply = decode_scalar(&mut src).unwrap();

        assert_eq!(reply.value, 255);
        assert_eq!(reply.end_tag, 0x80);
        assert!(src.is_empty());
    }

    #[test]
    fn test_scalar_word_zero_extends() {
        let mut src = &[0x01, 0x00, 0x00, 0x01, 0xFF, 0xFF, 0x80][..];
        let reply = decode_scalar(&mut src).unwrap();

        assert_eq!(reply.value, 65535);
        assert!(src.is_empty());
    }

    #[test]
    fn test_scalar_int_reinterprets_sign() {
        let mut src = &[0x05, 0x00, 0x00, 0x13, 0xFD, 0xFF, 0xFF, 0xFF, 0x80][..];
        let reply = decode_scalar(&mut src).unwrap();

        assert_eq!(reply.value, -3);
        assert!(src.is_empty());
    }

    #[test]
    fn test_scalar_legacy_tags_are_32_bit() {
        for legacy in tag::LEGACY_INT {
            let wire = [0x00, 0x00, 0x00, legacy, 0x2A, 0x00, 0x00, 0x00, 0x80];
            let mut src = &wire[..];
            let reply = decode_scalar(&mut src).unwrap();

            assert_eq!(reply.value, 42);
            assert!(src.is_empty());
        }
    }

    #[test]
    fn test_scalar_unknown_tag_stops_after_header() {
        let mut src = &[0x00, 0x00, 0x00, 0x50, 0x01, 0x02][..];
        let result = decode_scalar(&mut src);

        assert!(matches!(result, Err(Error::UnknownReplyTag { tag: 0x50 })));
        assert_eq!(src, [0x01, 0x02]);
    }

    #[test]
    fn test_end_sentinel_not_validated() {
        let mut src = &[0x00, 0x00, 0x00, 0x00, 0x07, 0x42][..];
        let reply = decode_scalar(&mut src).unwrap();
        assert_eq!(reply.end_tag, 0x42);
    }

    #[test]
    fn test_string_reply() {
        let mut src = &b"\x00\x00\x11\x50\x04\x00\x00\x001.42\x80"[..];
        let reply = decode_string(&mut src).unwrap();

        assert_eq!(reply.header.instance(), 0x11);
        assert_eq!(reply.as_str(), Some("1.42"));
        assert_eq!(reply.len, 4);
        assert_eq!(reply.end_tag, 0x80);
        assert!(src.is_empty());
    }

    #[test]
    fn test_string_wrong_tag() {
        let mut src = &[0x00, 0x00, 0x00, 0x13, 0x01, 0x00, 0x00, 0x00, 0x80][..];
        let result = decode_string(&mut src);

        assert!(matches!(
            result,
            Err(Error::UnexpectedReplyTag {
                expected: 0x50,
                found: 0x13
            })
        ));
    }

    #[test]
    fn test_string_truncated_payload() {
        let mut src = &b"\x00\x00\x00\x50\x08\x00\x00\x00abc"[..];
        let result = decode_string(&mut src);
        assert!(matches!(
            result,
            Err(Error::ShortRead {
                field: "string.value",
                needed: 5
            })
        ));
    }

    #[test]
    fn test_missing_end_sentinel() {
        let mut src = &[0x00, 0x00, 0x00, 0x00, 0x01][..];
        let result = decode_scalar(&mut src);
        assert!(matches!(
            result,
            Err(Error::ShortRead {
                field: "scalar.end",
                ..
            })
        ));
    }

    #[test]
    fn test_consecutive_replies_stay_aligned() {
        let mut buf = Bytes::from_static(
            b"\x00\x00\x00\x01\x34\x12\x80\x00\x00\x00\x50\x02\x00\x00\x00ok\x80\x05\x00\x00\x00\x01\x80",
        );

        let first = decode_reply_buf(&mut buf, ReplyShape::Scalar).unwrap();
        let second = decode_reply_buf(&mut buf, ReplyShape::String).unwrap();
        let third = decode_reply_buf(&mut buf, ReplyShape::Scalar).unwrap();

        assert_eq!(first.into_scalar().unwrap().value, 0x1234);
        assert_eq!(second.into_string().unwrap().value.as_ref(), b"ok");
        assert_eq!(third.header().class_id(), 5);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_wrong_variant_is_invalid_state() {
        let reply = Reply::Header(ReplyHeader::default());
        assert_eq!(reply.shape(), ReplyShape::RawHeader);
        assert!(matches!(reply.into_scalar(), Err(Error::InvalidState(_))));
    }

    // Property-based tests
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn known_tag() -> impl Strategy<Value = u8> {
            prop_oneof![
                Just(tag::BYTE),
                Just(tag::WORD),
                Just(tag::INT),
                Just(0xc4_u8),
                Just(0xc0_u8),
                Just(0x03_u8),
            ]
        }

        proptest! {
            /// Property: unknown tags fail and consume only the header
            #[test]
            fn prop_unknown_tag_rejected(
                tag_byte in any::<u8>().prop_filter("not in width table", |t| ScalarWidth::from_tag(*t).is_none()),
                class in any::<u16>(),
                trailing in prop::collection::vec(any::<u8>(), 0..16),
            ) {
                let mut wire = class.to_le_bytes().to_vec();
                wire.extend_from_slice(&[0x00, tag_byte]);
                wire.extend_from_slice(&trailing);
                let mut src = &wire[..];

                let result = decode_scalar(&mut src);
                prop_assert!(
                    matches!(result, Err(Error::UnknownReplyTag { tag }) if tag == tag_byte),
                    "expected UnknownReplyTag"
                );
                prop_assert_eq!(src, &trailing[..]);
            }

            /// Property: known tags consume exactly header + width + sentinel
            #[test]
            fn prop_known_tag_consumes_exact_width(
                tag_byte in known_tag(),
                payload in any::<[u8; 4]>(),
                end in any::<u8>(),
                trailing in prop::collection::vec(any::<u8>(), 0..16),
            ) {
                let width = ScalarWidth::from_tag(tag_byte).unwrap().size();
                let mut wire = vec![0x01, 0x00, 0x00, tag_byte];
                wire.extend_from_slice(&payload[..width]);
                wire.push(end);
                wire.extend_from_slice(&trailing);
                let mut src = &wire[..];

                let reply = decode_scalar(&mut src).unwrap();
                let mut padded = [0u8; 4];
                padded[..width].copy_from_slice(&payload[..width]);

                prop_assert_eq!(reply.value, i32::from_le_bytes(padded));
                prop_assert_eq!(reply.end_tag, end);
                prop_assert_eq!(src, &trailing[..]);
            }

            /// Property: a decoded header re-encodes to the same 4 bytes
            #[test]
            fn prop_header_bytes_preserved(raw in any::<[u8; 4]>()) {
                let header = decode_header(&mut &raw[..]).unwrap();
                prop_assert_eq!(header.to_bytes(), raw);
            }

            /// Property: string payloads of any length come back intact
            #[test]
            fn prop_string_payload_intact(
                payload in prop::collection::vec(any::<u8>(), 0..512),
                end in any::<u8>(),
            ) {
                let len = u32::try_from(payload.len()).unwrap();
                let mut wire = vec![0x00, 0x00, 0x00, tag::STRLEN];
                wire.extend_from_slice(&len.to_le_bytes());
                wire.extend_from_slice(&payload);
                wire.push(end);

                let reply = decode_string(&mut &wire[..]).unwrap();
                prop_assert_eq!(reply.len, len);
                prop_assert_eq!(reply.value.as_ref(), &payload[..]);
                prop_assert_eq!(reply.end_tag, end);
            }
        }
    }
}
