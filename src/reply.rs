//! Conversions from raw replies into the result types of [StoreClient](crate::StoreClient)
//! methods.
//!
//! The `*_or_zero` family treats a null reply as the zero value of the target type. Use them only
//! where a missing key is an expected outcome and can't be confused with real data.

use std::collections::HashMap;

use resp::{Data, DataType};

use crate::Result;

pub fn string(data: Data<'_>) -> Result<String> {
	Ok(data.into_string()?)
}

pub fn string_or_empty(data: Data<'_>) -> Result<String> {
	match data {
		Data::Null => Ok(String::new()),
		data => string(data),
	}
}

pub fn optional_string(data: Data<'_>) -> Result<Option<String>> {
	match data {
		Data::Null => Ok(None),
		data => string(data).map(Some),
	}
}

pub fn integer(data: Data<'_>) -> Result<i64> {
	Ok(data.into_integer()?)
}

pub fn integer_or_zero(data: Data<'_>) -> Result<i64> {
	match data {
		Data::Null => Ok(0),
		data => integer(data),
	}
}

/// `1` is true, `0` (or null) is false.
pub fn boolean(data: Data<'_>) -> Result<bool> {
	match data {
		Data::Null => Ok(false),
		Data::Integer(0) => Ok(false),
		Data::Integer(1) => Ok(true),
		other => Err(resp::Error::new(DataType::Integer, other).into()),
	}
}

pub fn strings(data: Data<'_>) -> Result<Vec<String>> {
	match data {
		Data::Null => Ok(Vec::new()),
		data => data.into_array()?.into_iter().map(string).collect(),
	}
}

/// A flat `[field, value, ...]` array as a map.
pub fn string_map(data: Data<'_>) -> Result<HashMap<String, String>> {
	let items = strings(data)?;
	if items.len() % 2 != 0 {
		return Err(resp::Error::new(
			DataType::Array,
			Data::Array(items.into_iter().map(Data::from).collect()),
		)
		.into());
	}

	let mut map = HashMap::with_capacity(items.len() / 2);
	let mut items = items.into_iter();
	while let (Some(field), Some(value)) = (items.next(), items.next()) {
		map.insert(field, value);
	}

	Ok(map)
}
