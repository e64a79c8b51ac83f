use std::borrow::Cow;

use crate::{DataType, Error, Result};

/// RESP data. Read the [Redis documenation](https://redis.io/commands) for details on which type
/// to expect as a response.
///
/// Both bulk strings and arrays can represent nulls in RESP, but in this representation they are
/// not optional. They will be represented with [Data::Null] if the bulk string or array is null.
///
/// Errors are not represented here for two reasons: 1) it's never correct to send an error to the
/// Redis server, and 2) it's more ergonomic to have errors returned in a [Result]. Error replies
/// are carried as [ReplyError](crate::ReplyError) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Data<'a> {
	SimpleString(Cow<'a, str>),
	Integer(i64),
	BulkString(Cow<'a, [u8]>),
	Array(Vec<Data<'a>>),
	Null,
}

impl<'a> Data<'a> {
	/// Convenience method to create a [Data::SimpleString].
	pub fn simple_string<T>(str: &'a T) -> Self
	where
		T: AsRef<str> + ?Sized,
	{
		Self::SimpleString(str.as_ref().into())
	}

	/// Convenience method to create a [Data::BulkString].
	pub fn bulk_string<T>(bytes: &'a T) -> Self
	where
		T: AsRef<[u8]> + ?Sized,
	{
		Self::BulkString(bytes.as_ref().into())
	}

	/// Convert this data into owned data.
	pub fn into_owned(self) -> Data<'static> {
		match self {
			Self::SimpleString(str) => Data::SimpleString(str.into_owned().into()),
			Self::Integer(int) => Data::Integer(int),
			Self::BulkString(bytes) => Data::BulkString(bytes.into_owned().into()),
			Self::Array(arr) => Data::Array(arr.into_iter().map(Data::into_owned).collect()),
			Self::Null => Data::Null,
		}
	}

	/// Build a command array where every item is a bulk string.
	pub fn from_bytes_iter<I, B>(iter: I) -> Data<'a>
	where
		I: IntoIterator<Item = &'a B>,
		B: 'a + AsRef<[u8]> + ?Sized,
	{
		Data::Array(iter.into_iter().map(Data::bulk_string).collect())
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Data::Null)
	}

	pub fn into_integer(self) -> Result<'a, i64> {
		match self {
			Data::Integer(int) => Ok(int),
			other => Err(Error::new(DataType::Integer, other)),
		}
	}

	pub fn into_array(self) -> Result<'a, Vec<Data<'a>>> {
		match self {
			Data::Array(arr) => Ok(arr),
			other => Err(Error::new(DataType::Array, other)),
		}
	}

	pub fn into_bulk_str(self) -> Result<'a, Cow<'a, [u8]>> {
		match self {
			Data::BulkString(bytes) => Ok(bytes),
			other => Err(Error::new(DataType::BulkString, other)),
		}
	}

	/// Convert a simple or bulk string into a [String]. Bulk strings must be valid UTF-8.
	pub fn into_string(self) -> Result<'a, String> {
		match self {
			Data::SimpleString(str) => Ok(str.into_owned()),
			Data::BulkString(bytes) => String::from_utf8(bytes.into_owned()).map_err(|err| {
				Error::new(DataType::BulkString, Data::BulkString(err.into_bytes().into()))
			}),
			other => Err(Error::new(DataType::BulkString, other)),
		}
	}
}

impl<'a> From<&'a str> for Data<'a> {
	fn from(str: &'a str) -> Self {
		Data::SimpleString(Cow::Borrowed(str))
	}
}

impl From<String> for Data<'_> {
	fn from(str: String) -> Self {
		Data::SimpleString(Cow::Owned(str))
	}
}

impl From<i64> for Data<'_> {
	fn from(int: i64) -> Self {
		Data::Integer(int)
	}
}

impl<'a, const N: usize> From<&'a [u8; N]> for Data<'a> {
	fn from(bytes: &'a [u8; N]) -> Self {
		Data::BulkString(Cow::Borrowed(&bytes[..]))
	}
}

/// `()` stands in for a null reply.
impl From<()> for Data<'_> {
	fn from(_: ()) -> Self {
		Data::Null
	}
}

// Comparisons used by tests and callers inspecting raw replies: text compares against simple
// strings, byte arrays against bulk strings.
impl PartialEq<&str> for Data<'_> {
	fn eq(&self, other: &&str) -> bool {
		match self {
			Data::SimpleString(str) => str == other,
			_ => false,
		}
	}
}

impl<const N: usize> PartialEq<&[u8; N]> for Data<'_> {
	fn eq(&self, other: &&[u8; N]) -> bool {
		match self {
			Data::BulkString(bytes) => bytes[..] == other[..],
			_ => false,
		}
	}
}

impl PartialEq<i64> for Data<'_> {
	fn eq(&self, other: &i64) -> bool {
		*self == Data::Integer(*other)
	}
}

/// Macro to simplify making a [Data::Array].
///
/// Changes:
/// ```rust
/// # use storepool_resp::Data;
/// Data::Array(vec![Data::simple_string("foo"), Data::simple_string("bar")]);
/// ```
/// into
/// ```rust
/// # use storepool_resp::array;
/// array!("foo", "bar");
/// ```
#[macro_export]
macro_rules! array {
	($($items:expr),*) => {
		$crate::Data::Array(vec![$($crate::Data::from($items)),*])
	};
}
