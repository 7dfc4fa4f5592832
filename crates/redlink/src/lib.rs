//! # redlink
//!
//! Client core for RESP key-value servers: build requests from typed
//! argument lists, dispatch them over a pluggable byte-stream transport,
//! and get the structured reply back through an awaitable handle.
//!
//! The codec lives in `redlink-wire` and is re-exported here. This crate
//! adds the [`Transport`] capability traits, the TCP and Unix-socket
//! backends, and the per-call [`Connection`] dispatcher. Every call opens
//! its own transport; pooling, retries and timeouts beyond socket options
//! are left to higher layers.
//!
//! ## Example
//!
//! ```no_run
//! use redlink::Command;
//! use redlink::Connection;
//! use redlink::TcpTransport;
//!
//! # async fn demo() -> Result<(), redlink::WireError> {
//! let conn = Connection::<TcpTransport>::tcp("127.0.0.1", 6379);
//! let mut cmd = Command::new();
//! cmd.arg("PING");
//! let reply = conn.call(&cmd).await?;
//! println!("{reply:?}");
//! # Ok(())
//! # }
//! ```

mod connection;
mod transport;

pub use connection::Connection;
pub use connection::ReplyHandle;
pub use transport::Endpoint;
pub use transport::SocketConfig;
pub use transport::StreamConnect;
pub use transport::TcpConnect;
pub use transport::TcpTransport;
pub use transport::Transport;
#[cfg(unix)]
pub use transport::UnixTransport;

pub use redlink_wire::read_reply;
pub use redlink_wire::read_reply_raw;
pub use redlink_wire::BatchType;
pub use redlink_wire::ByteSource;
pub use redlink_wire::Command;
pub use redlink_wire::CommandArg;
pub use redlink_wire::CommandList;
pub use redlink_wire::ProtocolError;
pub use redlink_wire::Reply;
pub use redlink_wire::ReplyType;
pub use redlink_wire::ScalarArg;
pub use redlink_wire::ShapeError;
pub use redlink_wire::SliceSource;
pub use redlink_wire::TransportError;
pub use redlink_wire::WireEncode;
pub use redlink_wire::WireError;
pub use redlink_wire::WireResult;
