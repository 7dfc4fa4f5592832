//! Local stream backend over a Unix domain socket.

use std::io::Read;
use std::io::Write;
use std::os::unix::net::UnixStream;

use redlink_wire::ByteSource;
use redlink_wire::TransportError;
use tracing::debug;

use super::StreamConnect;
use super::Transport;

/// Blocking Unix-domain-socket transport.
pub struct UnixTransport {
	stream: UnixStream,
	endpoint: String,
}

impl UnixTransport {
	fn io_error(&self, err: std::io::Error) -> TransportError {
		TransportError::new(err.to_string(), &self.endpoint)
	}
}

impl StreamConnect for UnixTransport {
	fn open(path: &str) -> Result<Self, TransportError> {
		let stream =
			UnixStream::connect(path).map_err(|e| TransportError::new(e.to_string(), path))?;
		debug!(endpoint = path, "unix transport connected");
		Ok(Self {
			stream,
			endpoint: path.to_string(),
		})
	}
}

impl Transport for UnixTransport {
	fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
		self.stream.write_all(bytes).map_err(|e| self.io_error(e))
	}
}

impl ByteSource for UnixTransport {
	fn read_block(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
		self.stream.read_exact(buf).map_err(|e| self.io_error(e))
	}

	fn read_some(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
		self.stream.read(buf).map_err(|e| self.io_error(e))
	}
}
