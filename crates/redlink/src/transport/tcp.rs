//! TCP backend over the standard library socket.

use std::io::Read;
use std::io::Write;
use std::net::TcpStream;
use std::net::ToSocketAddrs;
use std::time::Duration;

use redlink_wire::ByteSource;
use redlink_wire::TransportError;
use tracing::debug;

use super::SocketConfig;
use super::TcpConnect;
use super::Transport;

/// Blocking TCP transport.
pub struct TcpTransport {
	stream: TcpStream,
	endpoint: String,
}

impl TcpTransport {
	/// Connect with explicit socket options.
	pub fn connect_with(host: &str, port: u16, config: &SocketConfig) -> Result<Self, TransportError> {
		let endpoint = format!("{host}:{port}");
		let stream = match config.connect_timeout {
			Some(timeout) => connect_deadline(&endpoint, timeout)?,
			None => TcpStream::connect((host, port))
				.map_err(|e| TransportError::new(e.to_string(), &endpoint))?,
		};
		stream
			.set_nodelay(config.nodelay)
			.and_then(|_| stream.set_read_timeout(config.read_timeout))
			.and_then(|_| stream.set_write_timeout(config.write_timeout))
			.map_err(|e| TransportError::new(e.to_string(), &endpoint))?;
		debug!(%endpoint, "tcp transport connected");
		Ok(Self { stream, endpoint })
	}

	fn io_error(&self, err: std::io::Error) -> TransportError {
		TransportError::new(err.to_string(), &self.endpoint)
	}
}

fn connect_deadline(endpoint: &str, timeout: Duration) -> Result<TcpStream, TransportError> {
	let addrs = endpoint
		.to_socket_addrs()
		.map_err(|e| TransportError::new(e.to_string(), endpoint))?;
	let mut last_error = None;
	for addr in addrs {
		match TcpStream::connect_timeout(&addr, timeout) {
			Ok(stream) => return Ok(stream),
			Err(err) => last_error = Some(err),
		}
	}
	Err(match last_error {
		Some(err) => TransportError::new(err.to_string(), endpoint),
		None => TransportError::new("destination resolved to no addresses", endpoint),
	})
}

impl TcpConnect for TcpTransport {
	fn connect(host: &str, port: u16) -> Result<Self, TransportError> {
		Self::connect_with(host, port, &SocketConfig::default())
	}
}

impl Transport for TcpTransport {
	fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
		self.stream.write_all(bytes).map_err(|e| self.io_error(e))
	}
}

impl ByteSource for TcpTransport {
	fn read_block(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
		self.stream.read_exact(buf).map_err(|e| self.io_error(e))
	}

	fn read_some(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
		self.stream.read(buf).map_err(|e| self.io_error(e))
	}
}
