use std::io;

use deadpool::managed::PoolError;
use resp::codec::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error")]
	Io(#[from] io::Error),
	#[error("Parse error")]
	Parse,
	#[error("Connection closed by the server")]
	ConnectionClosed,
	#[error("Could not connect to {target}")]
	Dial {
		target: String,
		#[source]
		source: io::Error,
	},
	#[error("Invalid target {target:?}: {reason}")]
	InvalidTarget { target: String, reason: &'static str },
	#[error("Invalid pool configuration: {0}")]
	Config(String),
	#[error("Connection pool exhausted")]
	PoolExhausted,
	#[error("Connection pool closed")]
	PoolClosed,
	#[error("Redis error: {0}")]
	Redis(String),
	#[error("Unexpected response: {0}")]
	Decode(#[source] resp::Error<'static>),
	#[error("Timed out waiting for a list element")]
	Timeout,
}

impl From<CodecError> for Error {
	fn from(err: CodecError) -> Self {
		match err {
			CodecError::Io(err) => Self::Io(err),
			CodecError::Parse => Self::Parse,
		}
	}
}

impl<'a> From<resp::Error<'a>> for Error {
	fn from(err: resp::Error<'a>) -> Self {
		Self::Decode(err.into_owned())
	}
}

impl From<PoolError<Error>> for Error {
	fn from(err: PoolError<Error>) -> Self {
		match err {
			PoolError::Backend(err) => err,
			PoolError::Timeout(_) => Self::PoolExhausted,
			PoolError::Closed => Self::PoolClosed,
			other => Self::Config(other.to_string()),
		}
	}
}

pub type Result<T, E = Error> = ::std::result::Result<T, E>;
