use crate::{reply, Arg, Result, StoreClient};

use super::with_key;

impl StoreClient {
	/// <https://redis.io/commands/sadd>
	///
	/// Returns the number of members that weren't already in the set.
	pub async fn sadd<'a, I>(&self, key: &'a str, members: I) -> Result<i64>
	where
		I: IntoIterator,
		I::Item: Into<Arg<'a>>,
	{
		self.call_as("SADD", &with_key(key, members), reply::integer)
			.await
	}

	/// <https://redis.io/commands/scard>
	pub async fn scard(&self, key: &str) -> Result<i64> {
		self.call_as("SCARD", &[key.into()], reply::integer).await
	}

	/// <https://redis.io/commands/spop>
	///
	/// `None` when the set is empty or missing.
	pub async fn spop(&self, key: &str) -> Result<Option<String>> {
		self.call_as("SPOP", &[key.into()], reply::optional_string)
			.await
	}

	/// <https://redis.io/commands/srandmember>
	///
	/// `None` when the set is empty or missing.
	pub async fn srandmember(&self, key: &str) -> Result<Option<String>> {
		self.call_as("SRANDMEMBER", &[key.into()], reply::optional_string)
			.await
	}

	/// <https://redis.io/commands/srem>
	///
	/// Returns the number of members removed.
	pub async fn srem<'a, I>(&self, key: &'a str, members: I) -> Result<i64>
	where
		I: IntoIterator,
		I::Item: Into<Arg<'a>>,
	{
		self.call_as("SREM", &with_key(key, members), reply::integer)
			.await
	}
}
