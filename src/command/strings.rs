use resp::Data;

use crate::{reply, Arg, Result, StoreClient};

impl StoreClient {
	/// <https://redis.io/commands/get>
	///
	/// A missing key reads as an empty string. Use [Self::get_raw] to tell the two apart.
	pub async fn get(&self, key: &str) -> Result<String> {
		self.call_as("GET", &[key.into()], reply::string_or_empty)
			.await
	}

	/// <https://redis.io/commands/get>, returning the undecoded reply.
	pub async fn get_raw(&self, key: &str) -> Result<Data<'static>> {
		self.call("GET", &[key.into()]).await
	}

	/// <https://redis.io/commands/exists>
	pub async fn exists(&self, key: &str) -> Result<bool> {
		self.call_as("EXISTS", &[key.into()], reply::boolean).await
	}

	/// <https://redis.io/commands/del>
	///
	/// Returns the number of keys removed, so 0 for a missing key.
	pub async fn del(&self, key: &str) -> Result<i64> {
		self.call_as("DEL", &[key.into()], reply::integer_or_zero)
			.await
	}

	/// <https://redis.io/commands/incr>
	///
	/// A missing key starts from 0, so the first call returns 1.
	pub async fn incr(&self, key: &str) -> Result<i64> {
		self.call_as("INCR", &[key.into()], reply::integer_or_zero)
			.await
	}

	/// <https://redis.io/commands/decr>
	pub async fn decr(&self, key: &str) -> Result<i64> {
		self.call_as("DECR", &[key.into()], reply::integer_or_zero)
			.await
	}

	/// <https://redis.io/commands/append>
	///
	/// Returns the length of the string after the append. A missing key behaves like
	/// [Self::set].
	pub async fn append<'a>(&self, key: &str, value: impl Into<Arg<'a>>) -> Result<i64> {
		self.call_as(
			"APPEND",
			&[key.into(), value.into()],
			reply::integer_or_zero,
		)
		.await
	}

	/// <https://redis.io/commands/set>
	///
	/// Returns the status reply, `OK`.
	pub async fn set<'a>(&self, key: &str, value: impl Into<Arg<'a>>) -> Result<String> {
		self.call_as("SET", &[key.into(), value.into()], reply::string)
			.await
	}

	/// <https://redis.io/commands/set> with `EX`: the key expires after `seconds`.
	pub async fn set_ex<'a>(
		&self,
		key: &str,
		value: impl Into<Arg<'a>>,
		seconds: i64,
	) -> Result<String> {
		self.call_as(
			"SET",
			&[key.into(), value.into(), "EX".into(), seconds.into()],
			reply::string,
		)
		.await
	}

	/// <https://redis.io/commands/setnx>
	///
	/// Returns `true` if the key was set and `false` if it already existed.
	pub async fn set_nx<'a>(&self, key: &str, value: impl Into<Arg<'a>>) -> Result<bool> {
		self.call_as("SETNX", &[key.into(), value.into()], reply::boolean)
			.await
	}

	/// <https://redis.io/commands/expire>
	///
	/// Returns 1 if the timeout was set and 0 if the key doesn't exist.
	pub async fn expire(&self, key: &str, seconds: i64) -> Result<i64> {
		self.call_as("EXPIRE", &[key.into(), seconds.into()], reply::integer)
			.await
	}
}
