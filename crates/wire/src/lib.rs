//! # redlink-wire
//!
//! Codec core for the `redlink` client: request building and reply parsing
//! for the line-oriented RESP wire format.
//!
//! Requests are arrays of length-prefixed bulk strings, assembled by
//! [`Command`] from a typed argument list and batched by [`CommandList`] as
//! either a pipeline or a `MULTI`/`EXEC` transaction. Replies of unknown
//! shape are read back by [`read_reply`] (structured) or [`read_reply_raw`]
//! (exact on-wire bytes).
//!
//! The crate is transport-free: the parser reads from any [`ByteSource`],
//! so it runs against in-memory buffers in tests and against real sockets
//! in the `redlink` dispatcher.
//!
//! ## Example
//!
//! ```rust
//! use redlink_wire::Command;
//! use redlink_wire::WireEncode;
//!
//! let mut cmd = Command::new();
//! cmd.arg("set").arg("answer").arg(42i64);
//! assert_eq!(
//! 	&cmd.encode()[..],
//! 	b"*3\r\n$3\r\nset\r\n$6\r\nanswer\r\n$2\r\n42\r\n"
//! );
//! ```

mod arg;
mod command;
mod error;
mod parser;
mod source;
mod types;
mod utils;

pub use arg::CommandArg;
pub use arg::ScalarArg;
pub use command::BatchType;
pub use command::Command;
pub use command::CommandList;
pub use command::WireEncode;
pub use error::ProtocolError;
pub use error::ShapeError;
pub use error::TransportError;
pub use error::WireError;
pub use error::WireResult;
pub use parser::read_reply;
pub use parser::read_reply_raw;
pub use source::ByteSource;
pub use source::SliceSource;
pub use types::Reply;
pub use types::ReplyType;
