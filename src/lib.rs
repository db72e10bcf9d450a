//! tsctl - client side of the Technologic Systems tsctl TCP control protocol
//!
//! This library encodes requests to the System, Bus and DIO classes and
//! decodes the server's replies. All fields are little-endian with no
//! padding.
//!
//! # Quick Start
//!
//! ```rust
//! use tsctl::{ReplyShape, command::system, decode_reply};
//!
//! // Encode a request
//! let bytes = system::map_lookup("foo").encode();
//! assert_eq!(bytes.as_ref(), b"\x00\x00\x00\x0c\x03\x00\x00\x00foo");
//!
//! // Decode the reply the caller expects for it
//! let mut wire = &b"\x00\x00\x00\x50\x04\x00\x00\x001.42\x80"[..];
//! let reply = decode_reply(&mut wire, ReplyShape::String)?.into_string()?;
//! assert_eq!(reply.as_str(), Some("1.42"));
//! # Ok::<(), tsctl::Error>(())
//! ```
//!
//! # Reply shapes
//!
//! Replies do not say what they are. The caller picks a [`ReplyShape`]
//! from the request it sent; for scalar replies the tag byte in the header
//! then picks a 1, 2 or 4-byte payload. Only one request may be in flight
//! per connection; [`Connection`] enforces this by borrowing mutably.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod command;
pub mod protocol;
pub mod transport;

pub use protocol::{
    Class, DioState, Error, HEADER_SIZE, LockType, Param, Reply, ReplyHeader, ReplyShape,
    Request, RequestHeader, Result, ScalarReply, StringReply, decode_reply, decode_reply_buf,
};
pub use transport::{Connection, ConnectionConfig, DEFAULT_PORT};
