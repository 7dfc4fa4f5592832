//! Reply parsing.
//!
//! One state machine drives both modes: raw (the exact on-wire bytes of one
//! reply) and structured ([`Reply`]). Reads are forward-only and stop at
//! the reply boundary, so consecutive replies come off a single stream
//! without any lookahead or buffering between them.
//!
//! Lines are pulled bytewise with `read_some`; bulk payloads are size-driven
//! and fetched with `read_block`, so CR or LF inside a length-prefixed
//! payload is ordinary data.

use bytes::Bytes;
use bytes::BytesMut;

use crate::error::ProtocolError;
use crate::error::WireResult;
use crate::source::ByteSource;
use crate::source::SliceSource;
use crate::types::Reply;
use crate::utils::parse_integer;
use crate::utils::ARRAY_MARKER;
use crate::utils::BULK_MARKER;
use crate::utils::CRLF;
use crate::utils::ERROR_MARKER;
use crate::utils::INTEGER_MARKER;
use crate::utils::MAX_ARRAY_DEPTH;
use crate::utils::MAX_BULK_LEN;
use crate::utils::STATUS_MARKER;

/// Read one reply, returning its exact wire bytes.
///
/// This is the mode the dispatcher uses; higher layers re-parse with
/// [`Reply::from_wire`] when they want the structured form.
pub fn read_reply_raw<S: ByteSource>(source: &mut S) -> WireResult<Bytes> {
	let mut raw = BytesMut::new();
	read_node(source, &mut raw, 0)?;
	Ok(raw.freeze())
}

/// Read one reply as a structured value.
pub fn read_reply<S: ByteSource>(source: &mut S) -> WireResult<Reply> {
	let mut raw = BytesMut::new();
	read_node(source, &mut raw, 0)
}

impl Reply {
	/// Parse exactly one reply from a complete buffer.
	///
	/// Trailing bytes after the reply are a protocol error; use
	/// [`read_reply`] to pull several replies off one stream.
	pub fn from_wire(bytes: &[u8]) -> WireResult<Reply> {
		let mut source = SliceSource::new(bytes);
		let reply = read_reply(&mut source)?;
		if source.remaining() > 0 {
			return Err(ProtocolError::TrailingBytes(source.remaining()).into());
		}
		Ok(reply)
	}
}

fn read_node<S: ByteSource>(source: &mut S, raw: &mut BytesMut, depth: usize) -> WireResult<Reply> {
	let marker = next_byte(source, raw)?;
	match marker {
		STATUS_MARKER => {
			let line = read_line(source, raw)?;
			Ok(Reply::Status(line == b"OK"))
		}
		ERROR_MARKER => {
			let line = read_line(source, raw)?;
			Ok(Reply::Error(String::from_utf8_lossy(&line).into_owned()))
		}
		INTEGER_MARKER => {
			let line = read_line(source, raw)?;
			Ok(Reply::Integer(parse_integer(&line)?))
		}
		BULK_MARKER => read_bulk(source, raw),
		ARRAY_MARKER => read_array(source, raw, depth),
		other => Err(ProtocolError::InvalidTypeMarker(other).into()),
	}
}

fn read_bulk<S: ByteSource>(source: &mut S, raw: &mut BytesMut) -> WireResult<Reply> {
	let line = read_line(source, raw)?;
	let declared = parse_integer(&line)?;
	if declared == -1 {
		return Ok(Reply::Null);
	}
	if declared < 0 {
		return Err(ProtocolError::InvalidBulkLength(declared).into());
	}
	if declared > MAX_BULK_LEN as i64 {
		return Err(ProtocolError::BulkTooLarge(declared).into());
	}

	// payload plus terminator in one exact-size read
	let len = declared as usize;
	let mut payload = vec![0u8; len + 2];
	source.read_block(&mut payload)?;
	if &payload[len..] != CRLF {
		return Err(ProtocolError::MissingCrlf.into());
	}
	raw.extend_from_slice(&payload);
	payload.truncate(len);
	Ok(Reply::String(Bytes::from(payload)))
}

fn read_array<S: ByteSource>(source: &mut S, raw: &mut BytesMut, depth: usize) -> WireResult<Reply> {
	if depth >= MAX_ARRAY_DEPTH {
		return Err(ProtocolError::NestingTooDeep(MAX_ARRAY_DEPTH).into());
	}
	let line = read_line(source, raw)?;
	let declared = parse_integer(&line)?;
	if declared == -1 {
		// null array, same in-band absence as the null bulk
		return Ok(Reply::Null);
	}
	if declared < 0 {
		return Err(ProtocolError::InvalidArrayLength(declared).into());
	}

	let mut items = Vec::with_capacity((declared as usize).min(1024));
	for _ in 0..declared {
		items.push(read_node(source, raw, depth + 1)?);
	}
	Ok(Reply::Array(items))
}

fn next_byte<S: ByteSource>(source: &mut S, raw: &mut BytesMut) -> WireResult<u8> {
	let mut byte = [0u8; 1];
	if source.read_some(&mut byte)? == 0 {
		return Err(ProtocolError::UnexpectedEof.into());
	}
	raw.extend_from_slice(&byte);
	Ok(byte[0])
}

fn read_line<S: ByteSource>(source: &mut S, raw: &mut BytesMut) -> WireResult<Vec<u8>> {
	let mut line = Vec::new();
	loop {
		let byte = next_byte(source, raw)?;
		if byte != b'\r' {
			line.push(byte);
			continue;
		}
		if next_byte(source, raw)? != b'\n' {
			return Err(ProtocolError::BareCarriageReturn.into());
		}
		return Ok(line);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_a_status_line() {
		assert_eq!(Reply::from_wire(b"+OK\r\n").unwrap(), Reply::Status(true));
		assert_eq!(Reply::from_wire(b"+PONG\r\n").unwrap(), Reply::Status(false));
	}

	#[test]
	fn parses_a_bulk_string() {
		assert_eq!(
			Reply::from_wire(b"$6\r\nfoobar\r\n").unwrap(),
			Reply::String(Bytes::from_static(b"foobar"))
		);
	}

	#[test]
	fn parses_the_null_bulk() {
		assert_eq!(Reply::from_wire(b"$-1\r\n").unwrap(), Reply::Null);
	}

	#[test]
	fn parses_an_array() {
		let reply = Reply::from_wire(b"*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n").unwrap();
		assert_eq!(
			reply,
			Reply::Array(vec![
				Reply::String(Bytes::from_static(b"foo")),
				Reply::String(Bytes::from_static(b"bar")),
			])
		);
	}

	#[test]
	fn rejects_an_unknown_marker() {
		match Reply::from_wire(b"?\r\n") {
			Err(crate::WireError::Protocol(ProtocolError::InvalidTypeMarker(b'?'))) => {}
			other => panic!("expected marker error, got {other:?}"),
		}
	}

	#[test]
	fn rejects_an_oversized_bulk_header() {
		let wire = format!("${}\r\n", MAX_BULK_LEN as i64 + 1);
		match Reply::from_wire(wire.as_bytes()) {
			Err(crate::WireError::Protocol(ProtocolError::BulkTooLarge(_))) => {}
			other => panic!("expected size error, got {other:?}"),
		}
	}
}
