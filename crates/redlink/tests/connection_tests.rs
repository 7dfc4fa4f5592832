//! Dispatch over scripted mock transports, no real networking involved.

use redlink::BatchType;
use redlink::ByteSource;
use redlink::Command;
use redlink::CommandList;
use redlink::Connection;
use redlink::ProtocolError;
use redlink::Reply;
use redlink::ReplyType;
use redlink::Transport;
use redlink::TransportError;
use redlink::WireError;

/// Answers `PING` with `+PONG` and anything else with an error line,
/// serving reads in the small increments a real socket would.
#[derive(Default)]
struct MockTransport {
	buffer: Vec<u8>,
	pos: usize,
}

impl ByteSource for MockTransport {
	fn read_block(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
		if self.buffer.len() - self.pos < buf.len() {
			return Err(TransportError::new("unexpected end of stream", "mock"));
		}
		buf.copy_from_slice(&self.buffer[self.pos..self.pos + buf.len()]);
		self.pos += buf.len();
		Ok(())
	}

	fn read_some(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
		let n = buf.len().min(self.buffer.len() - self.pos);
		buf[..n].copy_from_slice(&self.buffer[self.pos..self.pos + n]);
		self.pos += n;
		Ok(n)
	}
}

impl Transport for MockTransport {
	fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
		if bytes == b"*1\r\n$4\r\nPING\r\n" {
			self.buffer.extend_from_slice(b"+PONG\r\n");
		} else {
			self.buffer.extend_from_slice(b"-Unknown Command\r\n");
		}
		Ok(())
	}
}

/// Fails every operation, standing in for an unreachable server.
#[derive(Default)]
struct BrokenTransport;

impl ByteSource for BrokenTransport {
	fn read_block(&mut self, _buf: &mut [u8]) -> Result<(), TransportError> {
		Err(TransportError::new("connection reset", "mock"))
	}

	fn read_some(&mut self, _buf: &mut [u8]) -> Result<usize, TransportError> {
		Err(TransportError::new("connection reset", "mock"))
	}
}

impl Transport for BrokenTransport {
	fn write(&mut self, _bytes: &[u8]) -> Result<(), TransportError> {
		Err(TransportError::new("connection reset", "mock"))
	}
}

/// Replies with bytes that are not part of the reply grammar.
#[derive(Default)]
struct GarblingTransport {
	buffer: Vec<u8>,
	pos: usize,
}

impl ByteSource for GarblingTransport {
	fn read_block(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
		if self.buffer.len() - self.pos < buf.len() {
			return Err(TransportError::new("unexpected end of stream", "mock"));
		}
		buf.copy_from_slice(&self.buffer[self.pos..self.pos + buf.len()]);
		self.pos += buf.len();
		Ok(())
	}

	fn read_some(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
		let n = buf.len().min(self.buffer.len() - self.pos);
		buf[..n].copy_from_slice(&self.buffer[self.pos..self.pos + n]);
		self.pos += n;
		Ok(n)
	}
}

impl Transport for GarblingTransport {
	fn write(&mut self, _bytes: &[u8]) -> Result<(), TransportError> {
		self.buffer.extend_from_slice(b"!bogus\r\n");
		Ok(())
	}
}

fn ping() -> Command {
	let mut cmd = Command::new();
	cmd.arg("PING");
	cmd
}

#[tokio::test]
async fn ping_gets_a_status_reply() {
	let conn = Connection::<MockTransport>::default();
	let reply = conn.call(&ping()).await.unwrap();
	assert_eq!(reply.reply_type(), ReplyType::Status);
	// PONG is a status line, but not OK
	assert!(!reply.status().unwrap());
}

#[tokio::test]
async fn unknown_commands_come_back_as_error_replies() {
	let conn = Connection::<MockTransport>::default();
	let mut cmd = Command::new();
	cmd.arg("NOSUCH").arg("thing");

	// a server-side error is a reply, not a failed call
	let reply = conn.call(&cmd).await.unwrap();
	assert_eq!(reply, Reply::Error("Unknown Command".into()));
}

#[tokio::test]
async fn wait_is_equivalent_to_awaiting() {
	let conn = Connection::<MockTransport>::default();
	let reply = conn.call(&ping()).wait().await.unwrap();
	assert_eq!(reply.reply_type(), ReplyType::Status);
}

#[tokio::test]
async fn command_lists_dispatch_like_commands() {
	let conn = Connection::<MockTransport>::default();
	let mut list = CommandList::new(BatchType::Pipeline);
	list.push(ping());

	// a one-command pipeline is byte-identical to the bare command, so the
	// mock recognises it
	let reply = conn.call(&list).await.unwrap();
	assert_eq!(reply.reply_type(), ReplyType::Status);
}

#[tokio::test]
async fn concurrent_calls_share_one_connection() {
	let conn = Connection::<MockTransport>::default();
	let first = conn.call(&ping());
	let second = conn.call(&ping());

	let (a, b) = tokio::join!(first, second);
	assert_eq!(a.unwrap().reply_type(), ReplyType::Status);
	assert_eq!(b.unwrap().reply_type(), ReplyType::Status);
}

#[tokio::test]
async fn clones_dispatch_independently() {
	let conn = Connection::<MockTransport>::default();
	let other = conn.clone();
	let reply = other.call(&ping()).await.unwrap();
	assert_eq!(reply.reply_type(), ReplyType::Status);
}

#[tokio::test]
async fn transport_failures_surface_on_await() {
	let conn = Connection::<BrokenTransport>::default();
	match conn.call(&ping()).await {
		Err(WireError::Transport(err)) => {
			assert_eq!(err.endpoint, "mock");
			assert_eq!(err.message, "connection reset");
		}
		other => panic!("expected transport error, got {other:?}"),
	}
}

#[tokio::test]
async fn malformed_replies_surface_as_protocol_errors() {
	let conn = Connection::<GarblingTransport>::default();
	match conn.call(&ping()).await {
		Err(WireError::Protocol(ProtocolError::InvalidTypeMarker(b'!'))) => {}
		other => panic!("expected protocol error, got {other:?}"),
	}
}
