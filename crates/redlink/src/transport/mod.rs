//! Pluggable byte-stream transports.
//!
//! The dispatcher drives a transport through three operations: `write`,
//! `read_block` and `read_some` (the read side is the [`ByteSource`] the
//! parser consumes). Which constructor applies is expressed through the
//! capability traits [`TcpConnect`] and [`StreamConnect`], one per
//! destination shape.
//!
//! Transports are opened per call and never shared across tasks. Any
//! process-wide state a backend might need stays inside the backend; the
//! std-socket backends here need none.

mod tcp;
#[cfg(unix)]
mod unix;

use std::fmt;
use std::time::Duration;

use redlink_wire::ByteSource;
use redlink_wire::TransportError;

pub use tcp::TcpTransport;
#[cfg(unix)]
pub use unix::UnixTransport;

/// A connected byte stream the dispatcher can drive.
pub trait Transport: ByteSource + Send {
	/// Write the whole buffer or fail.
	fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

/// Transports reachable by hostname and port.
pub trait TcpConnect: Transport + Sized {
	fn connect(host: &str, port: u16) -> Result<Self, TransportError>;
}

/// Transports reachable by filesystem path (local stream sockets).
pub trait StreamConnect: Transport + Sized {
	fn open(path: &str) -> Result<Self, TransportError>;
}

/// Where a connection points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
	Tcp { host: String, port: u16 },
	Stream { path: String },
	/// No destination; used with transports that ignore it (mocks).
	Detached,
}

impl fmt::Display for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Endpoint::Tcp { host, port } => write!(f, "{host}:{port}"),
			Endpoint::Stream { path } => f.write_str(path),
			Endpoint::Detached => f.write_str("detached"),
		}
	}
}

/// Socket-level options for the TCP backend.
///
/// Timeouts live here rather than in the dispatcher: the core stays
/// timeout-free, and callers that need a deadline either configure the
/// socket or race the returned handle against a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketConfig {
	pub connect_timeout: Option<Duration>,
	pub read_timeout: Option<Duration>,
	pub write_timeout: Option<Duration>,
	pub nodelay: bool,
}

impl Default for SocketConfig {
	fn default() -> Self {
		Self {
			connect_timeout: None,
			read_timeout: None,
			write_timeout: None,
			nodelay: true,
		}
	}
}
