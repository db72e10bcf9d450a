//! Lock-step TCP client for the tsctl protocol

mod connection;

pub use connection::{Connection, ConnectionConfig};

/// Default tsctl server port
pub const DEFAULT_PORT: u16 = 5001;
