//! tsctl wire codec
//!
//! This module provides the header layout, primitive fields, request encoder
//! and reply decoder for the tsctl protocol.

mod error;
pub mod field;
mod header;
mod reply;
mod request;
mod types;

pub use error::{Error, Result};
pub use header::{ReplyHeader, RequestHeader};
pub use reply::{
    Reply, ReplyShape, ScalarReply, StringReply, decode_header, decode_reply, decode_reply_buf,
    decode_scalar, decode_string,
};
pub use request::{Param, Request};
pub use types::{Class, DioState, LockType, ScalarWidth, tag};

/// Header size in bytes (requests and replies)
pub const HEADER_SIZE: usize = 4;
