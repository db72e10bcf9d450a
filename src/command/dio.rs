//! DIO class messages

use crate::protocol::{Class, DioState, LockType, Request};

/// DIO class opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum DioCommand {
    Lock = 0,
    Unlock = 1,
    Prempt = 2,
    Refresh = 3,
    Commit = 4,
    Set = 5,
    Get = 6,
    SetAsync = 7,
    GetAsync = 8,
    Wait = 9,
    Count = 10,
    Capabilities = 11,
    GetMulti = 12,
}

impl DioCommand {
    /// Convert to opcode byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    fn request(self) -> Request {
        Request::new(Class::Dio, 0, self.as_u8())
    }
}

/// Lock the DIO class
#[must_use]
pub fn lock(lock: LockType) -> Request {
    DioCommand::Lock.request().param(0_u32).param(lock)
}

/// Unlock the DIO class
#[must_use]
pub fn unlock(lock: LockType) -> Request {
    DioCommand::Unlock.request().param(0_u32).param(lock)
}

/// Read the current state of line `num`
#[must_use]
pub fn get_async(num: u32) -> Request {
    DioCommand::GetAsync.request().param(num)
}

/// Drive line `num` to `state`
#[must_use]
pub fn set_async(num: u32, state: DioState) -> Request {
    DioCommand::SetAsync.request().param(num).param(state)
}
