use std::io;

use bytes::{Buf, BufMut, BytesMut};
use nom::Err;
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

use crate::{parser::parse, to_bytes, Data, ReplyError};

/// Errors which leave the underlying stream unusable.
#[derive(Debug, Error)]
pub enum CodecError {
	#[error("IO error")]
	Io(#[from] io::Error),
	#[error("Invalid RESP data")]
	Parse,
}

/// Tokio codec with [`Encoder`] and [`Decoder`] for RESP.
///
/// This codec has a Result as its Item in order to represent error replies, which don't affect
/// the stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct Codec;

impl Decoder for Codec {
	type Item = Result<Data<'static>, ReplyError>;

	type Error = CodecError;

	fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
		let start_len = src.len();
		if start_len == 0 {
			return Ok(None);
		}

		let (consumed, item) = match parse(&src[..]) {
			Ok((rem, reply)) => (
				start_len - rem.len(),
				reply.map(Data::into_owned).map_err(ReplyError::from),
			),
			Err(Err::Incomplete(_)) => return Ok(None),
			Err(_) => return Err(CodecError::Parse),
		};

		trace!(consumed, "decoded reply");
		src.advance(consumed);
		Ok(Some(item))
	}
}

impl<'a> Encoder<Data<'a>> for Codec {
	type Error = CodecError;

	fn encode(&mut self, item: Data<'a>, dst: &mut BytesMut) -> Result<(), Self::Error> {
		to_bytes(&item, dst);
		Ok(())
	}
}

/// Encodes an error reply. Only useful when acting as a server.
impl Encoder<ReplyError> for Codec {
	type Error = CodecError;

	fn encode(&mut self, item: ReplyError, dst: &mut BytesMut) -> Result<(), Self::Error> {
		dst.put_u8(b'-');
		dst.put_slice(item.0.replace(&['\r', '\n'][..], " ").as_bytes());
		dst.put_slice(b"\r\n");
		Ok(())
	}
}
