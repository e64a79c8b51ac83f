use tracing::warn;

use crate::{reply, Result, StoreClient};

impl StoreClient {
	/// Wipes the server with <https://redis.io/commands/flushall>: every database is emptied, not
	/// just the one this target selects. Never fails: errors are logged and otherwise ignored.
	pub async fn flushdb(&self) {
		if let Err(error) = self.call("FLUSHALL", &[]).await {
			warn!(addr = %self.pool().target(), %error, "FLUSHALL failed");
		}
	}

	/// <https://redis.io/commands/dbsize>
	pub async fn dbsize(&self) -> Result<i64> {
		self.call_as("DBSIZE", &[], reply::integer).await
	}

	/// <https://redis.io/commands/ping>
	pub async fn ping(&self) -> Result<()> {
		self.call("PING", &[]).await.map(drop)
	}
}
