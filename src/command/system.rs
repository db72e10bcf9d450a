//! System class messages

use bytes::Bytes;

use crate::protocol::{Class, Request};

/// System class opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum SystemCommand {
    ClassCount = 0,
    InstanceCount = 1,
    ApiCount = 2,
    LockCount = 3,
    LockHolderInfo = 4,
    ConnWaitInfo = 5,
    CANBusGet = 6,
    BuildTime = 7,
    ModelId = 8,
    BaseBoardId = 9,
    MapLength = 10,
    MapGet = 11,
    MapLookup = 12,
    MapLookupPartial = 13,
    MapAdd = 14,
    MapDelete = 15,
    Note = 16,
    Version = 17,
    UptimeServer = 18,
    UptimeHost = 19,
    FPGARevision = 20,
    EchoNumber = 21,
}

impl SystemCommand {
    /// Convert to opcode byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    fn request(self) -> Request {
        Request::new(Class::System, 0, self.as_u8())
    }
}

/// Number of classes supported by the server
#[must_use]
pub fn class_count() -> Request {
    SystemCommand::ClassCount.request()
}

/// Number of instances of `class`
#[must_use]
pub fn instance_count(class: u32) -> Request {
    SystemCommand::InstanceCount.request().param(class)
}

/// Model id of the CPU board
#[must_use]
pub fn model_id() -> Request {
    SystemCommand::ModelId.request()
}

/// Model id of the base board
#[must_use]
pub fn base_board_id() -> Request {
    SystemCommand::BaseBoardId.request()
}

/// Look up a DIO number by name.
///
/// The name goes out as its UTF-8 byte length followed by the bytes, with no
/// terminator.
#[must_use]
pub fn map_lookup(name: &str) -> Request {
    let len = u32::try_from(name.len()).unwrap_or(u32::MAX);
    SystemCommand::MapLookup
        .request()
        .param(len)
        .param(Bytes::copy_from_slice(name.as_bytes()))
}
