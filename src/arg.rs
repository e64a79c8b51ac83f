use std::borrow::Cow;

use bytes::Bytes;
use resp::Data;

/// A single command argument. Every variant is sent to the server as a bulk string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg<'a> {
	Int(i64),
	Str(Cow<'a, str>),
	Bytes(Cow<'a, [u8]>),
}

impl<'a> Arg<'a> {
	pub fn to_data(&self) -> Data<'_> {
		match self {
			Arg::Int(int) => Data::BulkString(int.to_string().into_bytes().into()),
			Arg::Str(str) => Data::BulkString(Cow::Borrowed(str.as_bytes())),
			Arg::Bytes(bytes) => Data::BulkString(Cow::Borrowed(&bytes[..])),
		}
	}

	pub fn into_owned(self) -> Arg<'static> {
		match self {
			Arg::Int(int) => Arg::Int(int),
			Arg::Str(str) => Arg::Str(str.into_owned().into()),
			Arg::Bytes(bytes) => Arg::Bytes(bytes.into_owned().into()),
		}
	}
}

macro_rules! impl_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Arg<'_> {
				fn from(int: $ty) -> Self {
					Arg::Int(int.into())
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl<'a> From<&'a str> for Arg<'a> {
	fn from(str: &'a str) -> Self {
		Arg::Str(str.into())
	}
}

impl<'a> From<&'a String> for Arg<'a> {
	fn from(str: &'a String) -> Self {
		Arg::Str(str.as_str().into())
	}
}

impl From<String> for Arg<'_> {
	fn from(str: String) -> Self {
		Arg::Str(str.into())
	}
}

impl<'a> From<&'a [u8]> for Arg<'a> {
	fn from(bytes: &'a [u8]) -> Self {
		Arg::Bytes(bytes.into())
	}
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
	fn from(bytes: &'a [u8; N]) -> Self {
		Arg::Bytes(bytes.as_slice().into())
	}
}

impl From<Vec<u8>> for Arg<'_> {
	fn from(bytes: Vec<u8>) -> Self {
		Arg::Bytes(bytes.into())
	}
}

impl From<Bytes> for Arg<'_> {
	fn from(bytes: Bytes) -> Self {
		Arg::Bytes(bytes.to_vec().into())
	}
}
