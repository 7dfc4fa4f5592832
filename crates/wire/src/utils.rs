//! Wire constants and helpers shared by the builder and the parser.

use bytes::BufMut;
use bytes::BytesMut;

use crate::error::ProtocolError;

/// CRLF line terminator.
pub const CRLF: &[u8] = b"\r\n";

/// Type markers.
pub const STATUS_MARKER: u8 = b'+';
pub const ERROR_MARKER: u8 = b'-';
pub const INTEGER_MARKER: u8 = b':';
pub const BULK_MARKER: u8 = b'$';
pub const ARRAY_MARKER: u8 = b'*';

/// Largest bulk payload the parser accepts (512 MiB).
pub const MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Deepest array nesting the parser follows.
pub const MAX_ARRAY_DEPTH: usize = 32;

/// Append one length-prefixed bulk: `$<len>\r\n<payload>\r\n`.
pub fn put_bulk(buf: &mut BytesMut, payload: &[u8]) {
	buf.put_u8(BULK_MARKER);
	buf.put_slice(payload.len().to_string().as_bytes());
	buf.put_slice(CRLF);
	buf.put_slice(payload);
	buf.put_slice(CRLF);
}

/// Append the in-band null marker `$-1\r\n`.
pub fn put_null_bulk(buf: &mut BytesMut) {
	buf.put_slice(b"$-1\r\n");
}

/// Parse a signed decimal line payload.
pub fn parse_integer(line: &[u8]) -> Result<i64, ProtocolError> {
	let text = std::str::from_utf8(line)
		.map_err(|_| ProtocolError::InvalidInteger(String::from_utf8_lossy(line).into_owned()))?;
	text.parse::<i64>()
		.map_err(|_| ProtocolError::InvalidInteger(text.to_string()))
}
