//! Command-argument encoding.
//!
//! The set of accepted argument kinds is closed: scalars (text, bytes,
//! numbers), the explicit null via `Option`, and one level of container
//! (sequence, set, map) holding scalars. Containers only accept
//! [`ScalarArg`] elements, so nesting a container inside a container is
//! rejected at compile time rather than at runtime.
//!
//! Raw byte arguments travel as [`Bytes`], `Vec<u8>` or `&[u8]`: byte
//! slices collapse to a single binary bulk through the slice hooks on
//! [`ScalarArg`], so they never encode as the run of decimal numbers that
//! other integer sequences produce.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;

use bytes::Bytes;
use bytes::BytesMut;

use crate::utils::put_bulk;
use crate::utils::put_null_bulk;

/// A value that encodes as exactly one bulk string.
pub trait ScalarArg {
	/// Append this value's bulk to `buf`.
	fn write_bulk(&self, buf: &mut BytesMut);

	/// Bulks a slice of this scalar contributes. `u8` overrides this so a
	/// byte slice stays one binary bulk.
	fn slice_bulk_count(items: &[Self]) -> usize
	where
		Self: Sized,
	{
		items.len()
	}

	/// Append the bulks for a slice of this scalar.
	fn write_slice_bulks(items: &[Self], buf: &mut BytesMut)
	where
		Self: Sized,
	{
		for item in items {
			item.write_bulk(buf);
		}
	}
}

/// A value that contributes zero or more bulks to a command.
///
/// Implemented for every scalar and for one level of container. The count
/// reported here is what keeps the outer array header honest.
pub trait CommandArg {
	/// Number of bulks [`write_bulks`](Self::write_bulks) will append.
	fn bulk_count(&self) -> usize;

	/// Append every bulk for this value.
	fn write_bulks(&self, buf: &mut BytesMut);
}

impl ScalarArg for str {
	fn write_bulk(&self, buf: &mut BytesMut) {
		put_bulk(buf, self.as_bytes());
	}
}

impl ScalarArg for String {
	fn write_bulk(&self, buf: &mut BytesMut) {
		put_bulk(buf, self.as_bytes());
	}
}

impl ScalarArg for Bytes {
	fn write_bulk(&self, buf: &mut BytesMut) {
		put_bulk(buf, self);
	}
}

impl ScalarArg for u8 {
	fn write_bulk(&self, buf: &mut BytesMut) {
		put_bulk(buf, self.to_string().as_bytes());
	}

	fn slice_bulk_count(_items: &[u8]) -> usize {
		1
	}

	fn write_slice_bulks(items: &[u8], buf: &mut BytesMut) {
		put_bulk(buf, items);
	}
}

impl ScalarArg for [u8] {
	fn write_bulk(&self, buf: &mut BytesMut) {
		put_bulk(buf, self);
	}
}

impl ScalarArg for Vec<u8> {
	fn write_bulk(&self, buf: &mut BytesMut) {
		put_bulk(buf, self);
	}
}

macro_rules! integer_scalars {
	($($ty:ty),* $(,)?) => {$(
		impl ScalarArg for $ty {
			fn write_bulk(&self, buf: &mut BytesMut) {
				put_bulk(buf, self.to_string().as_bytes());
			}
		}
	)*};
}

integer_scalars!(i8, i16, i32, i64, u16, u32, u64, isize, usize);

macro_rules! float_scalars {
	($($ty:ty),* $(,)?) => {$(
		impl ScalarArg for $ty {
			fn write_bulk(&self, buf: &mut BytesMut) {
				// fixed-point with six fractional digits
				put_bulk(buf, format!("{self:.6}").as_bytes());
			}
		}
	)*};
}

float_scalars!(f32, f64);

impl<T: ScalarArg + ?Sized> ScalarArg for &T {
	fn write_bulk(&self, buf: &mut BytesMut) {
		(**self).write_bulk(buf);
	}
}

macro_rules! scalar_args {
	($($ty:ty),* $(,)?) => {$(
		impl CommandArg for $ty {
			fn bulk_count(&self) -> usize {
				1
			}

			fn write_bulks(&self, buf: &mut BytesMut) {
				self.write_bulk(buf);
			}
		}
	)*};
}

scalar_args!(str, String, Bytes, u8, i8, i16, i32, i64, u16, u32, u64, isize, usize, f32, f64);

impl<T: CommandArg + ?Sized> CommandArg for &T {
	fn bulk_count(&self) -> usize {
		(**self).bulk_count()
	}

	fn write_bulks(&self, buf: &mut BytesMut) {
		(**self).write_bulks(buf);
	}
}

/// The explicit null: `None` encodes as the null bulk `$-1\r\n`.
impl<T: ScalarArg> CommandArg for Option<T> {
	fn bulk_count(&self) -> usize {
		1
	}

	fn write_bulks(&self, buf: &mut BytesMut) {
		match self {
			Some(value) => value.write_bulk(buf),
			None => put_null_bulk(buf),
		}
	}
}

impl<T: ScalarArg> CommandArg for [T] {
	fn bulk_count(&self) -> usize {
		T::slice_bulk_count(self)
	}

	fn write_bulks(&self, buf: &mut BytesMut) {
		T::write_slice_bulks(self, buf);
	}
}

impl<T: ScalarArg> CommandArg for Vec<T> {
	fn bulk_count(&self) -> usize {
		T::slice_bulk_count(self)
	}

	fn write_bulks(&self, buf: &mut BytesMut) {
		T::write_slice_bulks(self, buf);
	}
}

impl<T: ScalarArg> CommandArg for HashSet<T> {
	fn bulk_count(&self) -> usize {
		self.len()
	}

	fn write_bulks(&self, buf: &mut BytesMut) {
		for value in self {
			value.write_bulk(buf);
		}
	}
}

impl<T: ScalarArg> CommandArg for BTreeSet<T> {
	fn bulk_count(&self) -> usize {
		self.len()
	}

	fn write_bulks(&self, buf: &mut BytesMut) {
		for value in self {
			value.write_bulk(buf);
		}
	}
}

/// Maps contribute two bulks per entry, key first.
impl<K: ScalarArg, V: ScalarArg> CommandArg for HashMap<K, V> {
	fn bulk_count(&self) -> usize {
		self.len() * 2
	}

	fn write_bulks(&self, buf: &mut BytesMut) {
		for (key, value) in self {
			key.write_bulk(buf);
			value.write_bulk(buf);
		}
	}
}

impl<K: ScalarArg, V: ScalarArg> CommandArg for BTreeMap<K, V> {
	fn bulk_count(&self) -> usize {
		self.len() * 2
	}

	fn write_bulks(&self, buf: &mut BytesMut) {
		for (key, value) in self {
			key.write_bulk(buf);
			value.write_bulk(buf);
		}
	}
}
