//! Error types for the codec and the dispatcher.

use thiserror::Error;

use crate::types::ReplyType;

/// Result alias used across the crate.
pub type WireResult<T> = Result<T, WireError>;

/// Umbrella error surfaced when a dispatched request is awaited.
///
/// A server-side error line (`-ERR ...`) is *not* represented here; it
/// parses into [`crate::Reply::Error`] and the call succeeds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
	/// Byte-level I/O failed.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The byte stream did not conform to the reply grammar.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
}

/// I/O failure while connecting, writing or reading a transport.
///
/// Carries the destination so failures from concurrent calls against
/// different servers stay distinguishable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} ({endpoint})")]
pub struct TransportError {
	pub message: String,
	pub endpoint: String,
}

impl TransportError {
	pub fn new(message: impl Into<String>, endpoint: impl ToString) -> Self {
		Self {
			message: message.into(),
			endpoint: endpoint.to_string(),
		}
	}
}

/// The reply stream violated the wire grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
	/// First byte of a reply was none of `+ - : $ *`.
	#[error("invalid type marker: 0x{0:02x}")]
	InvalidTypeMarker(u8),

	/// Stream ended cleanly in the middle of a reply.
	#[error("unexpected end of stream")]
	UnexpectedEof,

	/// A CR inside a line was not followed by LF.
	#[error("CR not followed by LF")]
	BareCarriageReturn,

	#[error("invalid integer: {0:?}")]
	InvalidInteger(String),

	/// Bulk length that is negative but not the null marker `-1`.
	#[error("invalid bulk length: {0}")]
	InvalidBulkLength(i64),

	#[error("bulk of {0} bytes exceeds the size limit")]
	BulkTooLarge(i64),

	/// Array length that is negative but not the null marker `-1`.
	#[error("invalid array length: {0}")]
	InvalidArrayLength(i64),

	#[error("array nesting deeper than {0}")]
	NestingTooDeep(usize),

	/// Bulk payload was not followed by CRLF.
	#[error("missing CRLF after bulk payload")]
	MissingCrlf,

	/// A complete reply left unconsumed bytes in the buffer.
	#[error("{0} trailing bytes after a complete reply")]
	TrailingBytes(usize),
}

/// A typed accessor was used on a reply of a different shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {} but got {}", join_expected(.expected), .got)]
pub struct ShapeError {
	pub expected: Vec<ReplyType>,
	pub got: ReplyType,
}

impl ShapeError {
	pub fn new(expected: Vec<ReplyType>, got: ReplyType) -> Self {
		Self { expected, got }
	}
}

fn join_expected(types: &[ReplyType]) -> String {
	let mut out = String::new();
	for (idx, ty) in types.iter().enumerate() {
		out.push_str(&ty.to_string());
		if idx + 2 < types.len() {
			out.push_str(", ");
		} else if idx + 2 == types.len() {
			out.push_str(" or ");
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shape_error_joins_the_expected_list() {
		let err = ShapeError::new(vec![ReplyType::Array], ReplyType::Status);
		assert_eq!(err.to_string(), "expected array but got status");

		let err = ShapeError::new(vec![ReplyType::String, ReplyType::Error], ReplyType::Integer);
		assert_eq!(err.to_string(), "expected string or error but got integer");

		let err = ShapeError::new(
			vec![ReplyType::Null, ReplyType::Error, ReplyType::Status],
			ReplyType::Array,
		);
		assert_eq!(err.to_string(), "expected null, error or status but got array");
	}

	#[test]
	fn transport_error_names_the_destination() {
		let err = TransportError::new("connection refused", "127.0.0.1:6379");
		assert_eq!(err.to_string(), "connection refused (127.0.0.1:6379)");
	}
}
