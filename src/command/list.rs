use std::time::Duration;

use resp::{Data, DataType};

use crate::{reply, Arg, Error, Result, StoreClient};

/// Server-side timeout used by [StoreClient::brpop].
pub const DEFAULT_BLOCKING_TIMEOUT: Duration = Duration::from_secs(600);

impl StoreClient {
	/// <https://redis.io/commands/lpush>
	///
	/// Returns the length of the list after the push.
	pub async fn lpush<'a>(&self, key: &str, value: impl Into<Arg<'a>>) -> Result<i64> {
		self.call_as("LPUSH", &[key.into(), value.into()], reply::integer)
			.await
	}

	/// <https://redis.io/commands/brpop>
	///
	/// Pops the last element of the list, waiting up to [DEFAULT_BLOCKING_TIMEOUT] for one to
	/// arrive. The connection stays borrowed for the whole wait.
	pub async fn brpop(&self, key: &str) -> Result<String> {
		self.brpop_timeout(key, DEFAULT_BLOCKING_TIMEOUT).await
	}

	/// <https://redis.io/commands/brpop> with an explicit server-side timeout, rounded up to
	/// whole seconds. A zero timeout blocks indefinitely.
	///
	/// Fails with [Error::Timeout] when nothing was popped in time.
	pub async fn brpop_timeout(&self, key: &str, timeout: Duration) -> Result<String> {
		self.call_as(
			"BRPOP",
			&[key.into(), timeout_secs(timeout).into()],
			popped,
		)
		.await
	}
}

/// Whole seconds for a blocking command. Rounds up so a short timeout never becomes 0, which the
/// server reads as "block forever".
fn timeout_secs(timeout: Duration) -> i64 {
	let secs = timeout
		.as_secs()
		.saturating_add(u64::from(timeout.subsec_nanos() > 0));
	i64::try_from(secs).unwrap_or(i64::MAX)
}

/// BRPOP replies with `[key, element]`, or null on timeout.
fn popped(data: Data<'_>) -> Result<String> {
	if data.is_null() {
		return Err(Error::Timeout);
	}

	let [_, element]: [Data; 2] = data
		.into_array()?
		.try_into()
		.map_err(|items| resp::Error::new(DataType::Array, Data::Array(items)))?;

	reply::string(element)
}
