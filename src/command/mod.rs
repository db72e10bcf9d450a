//! Per-class message builders
//!
//! Each builder picks an opcode and parameter list and hands back a
//! [`Request`](crate::Request); nothing here touches the wire directly.

pub mod bus;
pub mod dio;
pub mod system;

pub use bus::{BusCommand, BusWidth};
pub use dio::DioCommand;
pub use system::SystemCommand;
