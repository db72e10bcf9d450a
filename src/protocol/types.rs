//! tsctl class ids, lock flags, DIO states and reply tags

use std::fmt;

/// Logical classes addressable on the controller
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Class {
    /// System introspection and name map
    System = 0,
    /// Memory-mapped bus
    Bus = 1,
    /// Timers
    Time = 2,
    /// Pin muxing
    Pin = 3,
    /// Raw DIO banks
    Dioraw = 4,
    /// Digital I/O lines
    Dio = 5,
    /// I2C
    Twi = 6,
    /// CAN bus
    Can = 7,
    /// SPI
    Spi = 8,
    /// Analog I/O
    Aio = 9,
    /// Edge-counting DIO
    Edio = 10,
}

impl Class {
    /// Convert from wire value
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::System),
            1 => Some(Self::Bus),
            2 => Some(Self::Time),
            3 => Some(Self::Pin),
            4 => Some(Self::Dioraw),
            5 => Some(Self::Dio),
            6 => Some(Self::Twi),
            7 => Some(Self::Can),
            8 => Some(Self::Spi),
            9 => Some(Self::Aio),
            10 => Some(Self::Edio),
            _ => None,
        }
    }

    /// Convert to wire value
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::System => "System",
            Self::Bus => "Bus",
            Self::Time => "Time",
            Self::Pin => "Pin",
            Self::Dioraw => "Dioraw",
            Self::Dio => "Dio",
            Self::Twi => "Twi",
            Self::Can => "Can",
            Self::Spi => "Spi",
            Self::Aio => "Aio",
            Self::Edio => "Edio",
        };
        write!(f, "{name}")
    }
}

/// Lock flags passed to the Bus/DIO lock and unlock commands
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LockType(u32);

impl LockType {
    /// Valid flag bits mask
    pub const VALID_MASK: u32 = Self::NON_BLOCKING | Self::SHARED | Self::NO_UNLOCK;
    /// Fail instead of waiting for the lock
    pub const NON_BLOCKING: u32 = 1;
    /// Shared (reader) lock
    pub const SHARED: u32 = 2;
    /// Keep the lock across disconnects
    pub const NO_UNLOCK: u32 = 4;

    /// Create empty flags (blocking, exclusive)
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Create from wire value, rejecting unknown bits
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        if value & !Self::VALID_MASK == 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Convert to wire value
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Set a flag
    #[must_use]
    pub const fn with(mut self, flag: u32) -> Self {
        self.0 |= flag & Self::VALID_MASK;
        self
    }

    /// Check if flag is set
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.has(Self::NON_BLOCKING) {
            parts.push("NON_BLOCKING");
        }
        if self.has(Self::SHARED) {
            parts.push("SHARED");
        }
        if self.has(Self::NO_UNLOCK) {
            parts.push("NO_UNLOCK");
        }
        if parts.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", parts.join(" | "))
        }
    }
}

/// State of a DIO line as sent on the wire (signed 32-bit)
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum DioState {
    /// Input, currently reading low
    InputLow = -3,
    /// Input, currently reading high
    InputHigh = -2,
    /// Input (tristated)
    Input = -1,
    /// Driven low
    Low = 0,
    /// Driven high
    High = 1,
}

impl DioState {
    /// Convert from the value of a scalar reply
    #[must_use]
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            -3 => Some(Self::InputLow),
            -2 => Some(Self::InputHigh),
            -1 => Some(Self::Input),
            0 => Some(Self::Low),
            1 => Some(Self::High),
            _ => None,
        }
    }

    /// Convert to wire value
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Reply tag bytes.
///
/// None of these are officially documented; their meaning is inferred from
/// the packets they appear in.
pub mod tag {
    /// Scalar payload is one unsigned byte
    pub const BYTE: u8 = 0x00;
    /// Scalar payload is an unsigned 16-bit word
    pub const WORD: u8 = 0x01;
    /// Scalar payload is a 32-bit integer
    pub const INT: u8 = 0x13;
    /// Length-prefixed string payload
    pub const STRLEN: u8 = 0x50;
    /// Integer array payload
    pub const INT_ARRAY: u8 = 0x53;
    /// Usual value of the trailing end-sentinel byte
    pub const END: u8 = 0x80;
    /// Later server revisions also tag 32-bit scalars with these
    pub const LEGACY_INT: [u8; 3] = [0xc4, 0xc0, 0x03];
}

/// Wire width of a scalar reply payload, selected by the reply tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarWidth {
    /// 1 byte, zero-extended
    Byte,
    /// 2 bytes, zero-extended
    Word,
    /// 4 bytes, reinterpreted as signed
    Int,
}

impl ScalarWidth {
    /// Look up the payload width for a reply tag
    #[must_use]
    pub const fn from_tag(value: u8) -> Option<Self> {
        match value {
            tag::BYTE => Some(Self::Byte),
            tag::WORD => Some(Self::Word),
            tag::INT | 0xc4 | 0xc0 | 0x03 => Some(Self::Int),
            _ => None,
        }
    }

    /// Payload size in bytes
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Word => 2,
            Self::Int => 4,
        }
    }
}
