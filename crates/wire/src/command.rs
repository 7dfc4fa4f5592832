//! Request construction and batching.

use std::ops;

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;

use crate::arg::CommandArg;
use crate::utils::put_bulk;
use crate::utils::ARRAY_MARKER;
use crate::utils::CRLF;

/// Serialisation to the request wire form.
///
/// Anything the dispatcher can send implements this.
pub trait WireEncode {
	/// Append the full wire form to `buf`.
	fn encode_to(&self, buf: &mut BytesMut);

	/// Produce the wire form as a frozen buffer.
	fn encode(&self) -> Bytes {
		let mut buf = BytesMut::new();
		self.encode_to(&mut buf);
		buf.freeze()
	}
}

/// One request: an array of length-prefixed bulk strings.
///
/// The buffer holds the already-encoded bulks and `count` tracks how many,
/// so serialisation only prepends the array header. The two stay in sync
/// because arguments are only ever appended through [`Command::arg`].
///
/// ```rust
/// use redlink_wire::Command;
/// use redlink_wire::WireEncode;
///
/// let mut cmd = Command::new();
/// cmd.arg("get").arg("key");
/// assert_eq!(&cmd.encode()[..], b"*2\r\n$3\r\nget\r\n$3\r\nkey\r\n");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Command {
	bulks: BytesMut,
	count: usize,
}

impl Command {
	/// Create an empty command; it serialises as `*0\r\n`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append one argument.
	///
	/// Scalars contribute one bulk; containers one per element (two per
	/// map entry, key first).
	pub fn arg(&mut self, value: impl CommandArg) -> &mut Self {
		self.count += value.bulk_count();
		value.write_bulks(&mut self.bulks);
		self
	}

	/// Number of bulks accumulated so far.
	pub fn bulk_count(&self) -> usize {
		self.count
	}

	pub fn is_empty(&self) -> bool {
		self.count == 0
	}

	/// Reset to the freshly-constructed state.
	pub fn clear(&mut self) {
		self.bulks.clear();
		self.count = 0;
	}

	/// The encoded bulks without the array header.
	pub(crate) fn raw_bulks(&self) -> &[u8] {
		&self.bulks
	}
}

impl WireEncode for Command {
	fn encode_to(&self, buf: &mut BytesMut) {
		buf.put_u8(ARRAY_MARKER);
		buf.put_slice(self.count.to_string().as_bytes());
		buf.put_slice(CRLF);
		buf.put_slice(&self.bulks);
	}
}

/// How a [`CommandList`] frames its commands on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchType {
	/// One outer array covering every bulk of every command.
	Pipeline,
	/// `MULTI` .. `EXEC` framing for server-side atomicity.
	#[default]
	Transaction,
}

/// An insertion-ordered batch of commands with a framing mode.
///
/// A thin facade over a vector: commands are only ever appended, never
/// reordered, and the usual size queries are forwarded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandList {
	commands: Vec<Command>,
	batch_type: BatchType,
}

impl CommandList {
	pub fn new(batch_type: BatchType) -> Self {
		Self {
			commands: Vec::new(),
			batch_type,
		}
	}

	/// Append a command to the batch.
	pub fn push(&mut self, command: Command) -> &mut Self {
		self.commands.push(command);
		self
	}

	pub fn reserve(&mut self, additional: usize) {
		self.commands.reserve(additional);
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn capacity(&self) -> usize {
		self.commands.capacity()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	/// Drop every command; the batch type is kept.
	pub fn clear(&mut self) {
		self.commands.clear();
	}

	pub fn get(&self, index: usize) -> Option<&Command> {
		self.commands.get(index)
	}

	pub fn get_mut(&mut self, index: usize) -> Option<&mut Command> {
		self.commands.get_mut(index)
	}

	pub fn batch_type(&self) -> BatchType {
		self.batch_type
	}

	pub fn set_batch_type(&mut self, batch_type: BatchType) {
		self.batch_type = batch_type;
	}
}

impl WireEncode for CommandList {
	fn encode_to(&self, buf: &mut BytesMut) {
		match self.batch_type {
			// The outer header subsumes the per-command headers: its count
			// is the sum of every child's bulk count.
			BatchType::Pipeline => {
				let total: usize = self.commands.iter().map(Command::bulk_count).sum();
				buf.put_u8(ARRAY_MARKER);
				buf.put_slice(total.to_string().as_bytes());
				buf.put_slice(CRLF);
				for command in &self.commands {
					buf.put_slice(command.raw_bulks());
				}
			}
			BatchType::Transaction => {
				put_bulk(buf, b"MULTI");
				for command in &self.commands {
					buf.put_slice(command.raw_bulks());
				}
				put_bulk(buf, b"EXEC");
			}
		}
	}
}

impl ops::Index<usize> for CommandList {
	type Output = Command;

	fn index(&self, index: usize) -> &Self::Output {
		&self.commands[index]
	}
}

impl ops::IndexMut<usize> for CommandList {
	fn index_mut(&mut self, index: usize) -> &mut Self::Output {
		&mut self.commands[index]
	}
}
