use std::collections::HashMap;

use crate::{reply, Arg, Result, StoreClient};

use super::with_key;

impl StoreClient {
	/// <https://redis.io/commands/hget>
	///
	/// A missing key or field reads as an empty string.
	pub async fn hget(&self, key: &str, field: &str) -> Result<String> {
		self.call_as("HGET", &[key.into(), field.into()], reply::string_or_empty)
			.await
	}

	/// <https://redis.io/commands/hgetall>
	pub async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>> {
		self.call_as("HGETALL", &[key.into()], reply::string_map)
			.await
	}

	/// <https://redis.io/commands/hset>
	pub async fn hset<'a>(
		&self,
		key: &str,
		field: &str,
		value: impl Into<Arg<'a>>,
	) -> Result<()> {
		self.call("HSET", &[key.into(), field.into(), value.into()])
			.await
			.map(drop)
	}

	/// <https://redis.io/commands/hsetnx>
	///
	/// Returns `false` without changing anything when the field already exists.
	pub async fn hset_nx<'a>(
		&self,
		key: &str,
		field: &str,
		value: impl Into<Arg<'a>>,
	) -> Result<bool> {
		self.call_as(
			"HSETNX",
			&[key.into(), field.into(), value.into()],
			reply::boolean,
		)
		.await
	}

	/// <https://redis.io/commands/hlen>
	pub async fn hlen(&self, key: &str) -> Result<i64> {
		self.call_as("HLEN", &[key.into()], reply::integer).await
	}

	/// <https://redis.io/commands/hdel>
	///
	/// Returns the number of fields removed. Fields which don't exist are ignored.
	pub async fn hdel<'a, I>(&self, key: &'a str, fields: I) -> Result<i64>
	where
		I: IntoIterator,
		I::Item: Into<Arg<'a>>,
	{
		self.call_as("HDEL", &with_key(key, fields), reply::integer)
			.await
	}

	/// <https://redis.io/commands/hvals>
	pub async fn hvals(&self, key: &str) -> Result<Vec<String>> {
		self.call_as("HVALS", &[key.into()], reply::strings).await
	}
}
