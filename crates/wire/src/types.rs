//! Structured reply values.

use std::fmt;
use std::ops;

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;

use crate::error::ShapeError;
use crate::utils::put_bulk;
use crate::utils::ARRAY_MARKER;
use crate::utils::CRLF;
use crate::utils::ERROR_MARKER;
use crate::utils::INTEGER_MARKER;

/// Discriminant of a [`Reply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyType {
	Null,
	Status,
	Error,
	String,
	Integer,
	Array,
}

impl fmt::Display for ReplyType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ReplyType::Null => "null",
			ReplyType::Status => "status",
			ReplyType::Error => "error",
			ReplyType::String => "string",
			ReplyType::Integer => "integer",
			ReplyType::Array => "array",
		};
		f.write_str(name)
	}
}

/// One structured reply.
///
/// Immutable once constructed; equality is structural. A server error line
/// is an ordinary reply variant, not a dispatch failure, so callers decide
/// whether `-ERR ...` is fatal for the command they sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
	/// The null bulk `$-1\r\n` (or the null array `*-1\r\n`).
	Null,
	/// Status line; `true` iff the line text was exactly `OK`.
	Status(bool),
	/// Bulk string payload, raw bytes.
	String(Bytes),
	/// Server-reported error line.
	Error(String),
	/// Signed 64-bit integer line.
	Integer(i64),
	/// Arbitrarily nested; elements may be `Null`.
	Array(Vec<Reply>),
}

impl Reply {
	pub fn reply_type(&self) -> ReplyType {
		match self {
			Reply::Null => ReplyType::Null,
			Reply::Status(_) => ReplyType::Status,
			Reply::Error(_) => ReplyType::Error,
			Reply::String(_) => ReplyType::String,
			Reply::Integer(_) => ReplyType::Integer,
			Reply::Array(_) => ReplyType::Array,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Reply::Null)
	}

	/// Status flag of a status reply.
	pub fn status(&self) -> Result<bool, ShapeError> {
		match self {
			Reply::Status(flag) => Ok(*flag),
			other => Err(ShapeError::new(vec![ReplyType::Status], other.reply_type())),
		}
	}

	/// Payload of a bulk string reply.
	pub fn bytes(&self) -> Result<&Bytes, ShapeError> {
		match self {
			Reply::String(payload) => Ok(payload),
			other => Err(ShapeError::new(vec![ReplyType::String], other.reply_type())),
		}
	}

	/// Message of an error reply.
	pub fn message(&self) -> Result<&str, ShapeError> {
		match self {
			Reply::Error(message) => Ok(message),
			other => Err(ShapeError::new(vec![ReplyType::Error], other.reply_type())),
		}
	}

	pub fn integer(&self) -> Result<i64, ShapeError> {
		match self {
			Reply::Integer(value) => Ok(*value),
			other => Err(ShapeError::new(vec![ReplyType::Integer], other.reply_type())),
		}
	}

	/// Elements of an array reply.
	pub fn array(&self) -> Result<&[Reply], ShapeError> {
		match self {
			Reply::Array(items) => Ok(items),
			other => Err(ShapeError::new(vec![ReplyType::Array], other.reply_type())),
		}
	}

	/// Element count of an array reply.
	pub fn array_len(&self) -> Result<usize, ShapeError> {
		Ok(self.array()?.len())
	}

	/// Append the canonical wire form.
	///
	/// Parsing discards the original status line text, so `Status(true)`
	/// re-encodes as `+OK` and `Status(false)` as `+NO`.
	pub fn encode_to(&self, buf: &mut BytesMut) {
		match self {
			Reply::Null => buf.put_slice(b"$-1\r\n"),
			Reply::Status(true) => buf.put_slice(b"+OK\r\n"),
			Reply::Status(false) => buf.put_slice(b"+NO\r\n"),
			Reply::String(payload) => put_bulk(buf, payload),
			Reply::Error(message) => {
				buf.put_u8(ERROR_MARKER);
				buf.put_slice(message.as_bytes());
				buf.put_slice(CRLF);
			}
			Reply::Integer(value) => {
				buf.put_u8(INTEGER_MARKER);
				buf.put_slice(value.to_string().as_bytes());
				buf.put_slice(CRLF);
			}
			Reply::Array(items) => {
				buf.put_u8(ARRAY_MARKER);
				buf.put_slice(items.len().to_string().as_bytes());
				buf.put_slice(CRLF);
				for item in items {
					item.encode_to(buf);
				}
			}
		}
	}

	/// Produce the canonical wire form as a frozen buffer.
	pub fn encode(&self) -> Bytes {
		let mut buf = BytesMut::new();
		self.encode_to(&mut buf);
		buf.freeze()
	}
}

impl ops::Index<usize> for Reply {
	type Output = Reply;

	/// # Panics
	///
	/// Panics if the reply is not an array or the index is out of range,
	/// like slice indexing. Use [`Reply::array`] for checked access.
	fn index(&self, index: usize) -> &Self::Output {
		match self {
			Reply::Array(items) => &items[index],
			other => panic!("cannot index into a {} reply", other.reply_type()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn null_reply_rejects_every_accessor() {
		let reply = Reply::Null;
		assert_eq!(reply.reply_type(), ReplyType::Null);
		assert!(reply.is_null());
		assert!(reply.status().is_err());
		assert!(reply.bytes().is_err());
		assert!(reply.message().is_err());
		assert!(reply.integer().is_err());
		assert!(reply.array().is_err());
		assert!(reply.array_len().is_err());
	}

	#[test]
	fn status_reply_exposes_the_flag() {
		let reply = Reply::Status(false);
		assert_eq!(reply.reply_type(), ReplyType::Status);
		assert!(!reply.status().unwrap());
		assert_eq!(reply, Reply::Status(false));

		assert!(reply.bytes().is_err());
		assert!(reply.message().is_err());
		assert!(reply.integer().is_err());
		assert!(reply.array().is_err());
		assert!(reply.array_len().is_err());
	}

	#[test]
	fn string_reply_exposes_the_payload() {
		let reply = Reply::String(Bytes::from_static(b"hello world"));
		assert_eq!(reply.reply_type(), ReplyType::String);
		assert_eq!(&reply.bytes().unwrap()[..], b"hello world");

		assert!(reply.status().is_err());
		assert!(reply.message().is_err());
		assert!(reply.integer().is_err());
		assert!(reply.array().is_err());
		assert!(reply.array_len().is_err());
	}

	#[test]
	fn error_reply_exposes_the_message() {
		let reply = Reply::Error("something went wrong".into());
		assert_eq!(reply.reply_type(), ReplyType::Error);
		assert_eq!(reply.message().unwrap(), "something went wrong");

		assert!(reply.status().is_err());
		assert!(reply.bytes().is_err());
		assert!(reply.integer().is_err());
		assert!(reply.array().is_err());
		assert!(reply.array_len().is_err());
	}

	#[test]
	fn integer_reply_exposes_the_value() {
		let reply = Reply::Integer(123);
		assert_eq!(reply.reply_type(), ReplyType::Integer);
		assert_eq!(reply.integer().unwrap(), 123);

		assert!(reply.status().is_err());
		assert!(reply.bytes().is_err());
		assert!(reply.message().is_err());
		assert!(reply.array().is_err());
		assert!(reply.array_len().is_err());
	}

	#[test]
	fn array_reply_supports_iteration_and_indexing() {
		let reply = Reply::Array(vec![
			Reply::Status(true),
			Reply::String(Bytes::from_static(b"test test")),
			Reply::Error("oops".into()),
		]);
		assert_eq!(reply.reply_type(), ReplyType::Array);
		assert_eq!(reply.array_len().unwrap(), 3);
		for (idx, child) in reply.array().unwrap().iter().enumerate() {
			assert_eq!(&reply[idx], child);
		}

		assert!(reply.status().is_err());
		assert!(reply.bytes().is_err());
		assert!(reply.message().is_err());
		assert!(reply.integer().is_err());
	}

	#[test]
	#[should_panic(expected = "out of")]
	fn indexing_past_the_end_panics() {
		let reply = Reply::Array(vec![Reply::Null]);
		let _ = &reply[4];
	}

	#[test]
	#[should_panic(expected = "cannot index")]
	fn indexing_a_scalar_panics() {
		let reply = Reply::Integer(1);
		let _ = &reply[0];
	}

	#[test]
	fn shape_error_names_expected_and_got() {
		let err = Reply::Null.integer().unwrap_err();
		assert_eq!(err.to_string(), "expected integer but got null");
	}

	#[test]
	fn encodes_canonical_wire_forms() {
		assert_eq!(&Reply::Null.encode()[..], b"$-1\r\n");
		assert_eq!(&Reply::Status(true).encode()[..], b"+OK\r\n");
		assert_eq!(&Reply::Status(false).encode()[..], b"+NO\r\n");
		assert_eq!(&Reply::Integer(-7).encode()[..], b":-7\r\n");
		assert_eq!(&Reply::String(Bytes::from_static(b"hi")).encode()[..], b"$2\r\nhi\r\n");
		assert_eq!(&Reply::Error("oops".into()).encode()[..], b"-oops\r\n");
		assert_eq!(
			&Reply::Array(vec![Reply::Status(true), Reply::Null]).encode()[..],
			b"*2\r\n+OK\r\n$-1\r\n"
		);
	}
}
