use thiserror::Error;

use crate::Data;

/// A RESP data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
	SimpleString,
	BulkString,
	Array,
	Integer,
}

/// An error that can occur when transforming [Data].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Expected {expected:?} but got {found:?}")]
pub struct Error<'a> {
	/// The data type which was expected.
	pub expected: DataType,
	/// The data which was found.
	pub found: Data<'a>,
}

impl<'a> Error<'a> {
	pub fn new(expected: DataType, found: Data<'a>) -> Self {
		Self { expected, found }
	}

	pub fn into_owned(self) -> Error<'static> {
		Error {
			expected: self.expected,
			found: self.found.into_owned(),
		}
	}
}

/// An error reply sent by the server, such as `-ERR unknown command`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ReplyError(pub String);

impl From<&str> for ReplyError {
	fn from(msg: &str) -> Self {
		Self(msg.to_owned())
	}
}

pub type Result<'a, T, E = Error<'a>> = std::result::Result<T, E>;
