//! Blocking lock-step connection to a tsctl server.

use std::io::{self, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, instrument};

use crate::protocol::{Reply, ReplyShape, Request, Result, ScalarReply, StringReply, decode_reply};

/// Connection configuration options.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Optional timeout for establishing the TCP connection.
    pub connect_timeout: Option<Duration>,
    /// Optional read timeout for sockets.
    pub read_timeout: Option<Duration>,
    /// Optional write timeout for sockets.
    pub write_timeout: Option<Duration>,
    /// Disable Nagle's algorithm; requests are small and latency-bound.
    pub nodelay: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            read_timeout: None,
            write_timeout: None,
            nodelay: true,
        }
    }
}

/// One request/reply channel over a byte stream.
///
/// The protocol has no request ids, so a reply can only be matched to the
/// request sent just before it. `call` takes `&mut self` and reads the whole
/// reply before returning, which keeps at most one request outstanding.
/// There is no resynchronisation: after a decode error the stream position
/// is unknown and the connection should be dropped.
#[derive(Debug)]
pub struct Connection<S: Read + Write> {
    stream: BufReader<S>,
}

impl Connection<TcpStream> {
    /// Connect to a tsctl server.
    pub fn connect(addr: impl ToSocketAddrs, config: &ConnectionConfig) -> Result<Self> {
        let stream = match config.connect_timeout {
            None => TcpStream::connect(addr)?,
            Some(timeout) => connect_with_timeout(addr, timeout)?,
        };

        stream.set_read_timeout(config.read_timeout)?;
        stream.set_write_timeout(config.write_timeout)?;
        stream.set_nodelay(config.nodelay)?;

        debug!(peer = ?stream.peer_addr().ok(), "connected");
        Ok(Self::new(stream))
    }
}

fn connect_with_timeout(addr: impl ToSocketAddrs, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_err = None;
    for candidate in addr.to_socket_addrs()? {
        match TcpStream::connect_timeout(&candidate, timeout) {
            Ok(stream) => return Ok(stream),
            Err(err) => {
                debug!(%candidate, error = %err, "connect attempt failed");
                last_err = Some(err);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")
    }))
}

impl<S: Read + Write> Connection<S> {
    /// Wrap an already-open stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }

    /// Send `request` and decode exactly one reply of `shape`.
    #[instrument(
        level = "trace",
        skip(self, request),
        fields(class = %request.header().class(), command = request.header().command())
    )]
    pub fn call(&mut self, request: &Request, shape: ReplyShape) -> Result<Reply> {
        let inner = self.stream.get_mut();
        request.write_to(&mut *inner)?;
        inner.flush()?;

        let reply = decode_reply(&mut self.stream, shape)?;
        if !reply.header().answers(request.header()) {
            debug!(
                reply_class = reply.header().class_id(),
                reply_instance = reply.header().instance(),
                "reply header does not match request"
            );
        }
        Ok(reply)
    }

    /// Send `request` and decode a scalar reply.
    pub fn call_scalar(&mut self, request: &Request) -> Result<ScalarReply> {
        self.call(request, ReplyShape::Scalar)?.into_scalar()
    }

    /// Send `request` and decode a string reply.
    pub fn call_string(&mut self, request: &Request) -> Result<StringReply> {
        self.call(request, ReplyShape::String)?.into_string()
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &S {
        self.stream.get_ref()
    }

    /// Unwrap the underlying stream. Bytes already buffered are dropped.
    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }
}
