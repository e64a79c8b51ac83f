use std::str::from_utf8;

use nom::{
	branch::alt,
	bytes::streaming::take,
	character::streaming::{char, crlf, i64, not_line_ending},
	combinator::{map, map_res},
	error::ErrorKind,
	sequence::{delimited, terminated},
	IResult,
};

use crate::Data;

pub type Error<'a> = nom::Err<nom::error::Error<&'a [u8]>>;

/// A single reply: either data or the message of an error reply.
pub type Reply<'a> = Result<Data<'a>, &'a str>;

pub fn parse_str(data: &[u8]) -> IResult<&[u8], &str> {
	map_res(delimited(char('+'), not_line_ending, crlf), from_utf8)(data)
}

pub fn parse_err(data: &[u8]) -> IResult<&[u8], &str> {
	map_res(delimited(char('-'), not_line_ending, crlf), from_utf8)(data)
}

pub fn parse_int(data: &[u8]) -> IResult<&[u8], i64> {
	delimited(char(':'), i64, crlf)(data)
}

pub fn parse_bytes(data: &[u8]) -> IResult<&[u8], Option<&[u8]>> {
	let (data, len) = delimited(char('$'), i64, crlf)(data)?;
	match len {
		-1 => Ok((data, None)),
		0.. => map(terminated(take(len as usize), crlf), Some)(data),
		_ => Err(nom::Err::Failure(nom::error::Error::new(
			data,
			ErrorKind::Digit,
		))),
	}
}

pub fn parse_array(data: &[u8]) -> IResult<&[u8], i64> {
	delimited(char('*'), i64, crlf)(data)
}

fn parse_array_reply(data: &[u8]) -> IResult<&[u8], Reply<'_>> {
	let (mut rem, len) = parse_array(data)?;
	if len == -1 {
		return Ok((rem, Ok(Data::Null)));
	}
	if len < -1 {
		return Err(nom::Err::Failure(nom::error::Error::new(
			rem,
			ErrorKind::Digit,
		)));
	}

	// the length comes off the wire, so don't trust it for the allocation
	let mut items = Vec::with_capacity((len as usize).min(64));
	let mut error = None;
	for _ in 0..len {
		let (next, item) = parse(rem)?;
		rem = next;

		// an array carrying an error reply surfaces the first error
		match item {
			Ok(data) => items.push(data),
			Err(msg) => {
				error.get_or_insert(msg);
			}
		}
	}

	Ok((rem, error.map_or(Ok(Data::Array(items)), Err)))
}

/// Parse one complete reply. Returns [nom::Err::Incomplete] when more input is needed.
pub fn parse(data: &[u8]) -> IResult<&[u8], Reply<'_>> {
	alt((
		map(parse_str, |str| Ok(Data::SimpleString(str.into()))),
		map(parse_err, Err),
		map(parse_int, |int| Ok(Data::Integer(int))),
		map(parse_bytes, |bytes| {
			Ok(bytes.map_or(Data::Null, |bytes| Data::BulkString(bytes.into())))
		}),
		parse_array_reply,
	))(data)
}
