use async_trait::async_trait;
use deadpool::managed::{self, RecycleError, RecycleResult};
use tracing::trace;

use crate::{connection::Connection, error::Error, Target};

/// A Deadpool [managed::Manager] dialing [Connection]s to one [Target].
#[derive(Debug, Clone)]
pub struct Manager {
	target: Target,
}

impl Manager {
	pub fn new(target: Target) -> Self {
		Self { target }
	}

	pub fn target(&self) -> &Target {
		&self.target
	}
}

#[async_trait]
impl managed::Manager for Manager {
	type Type = Connection;
	type Error = Error;

	async fn create(&self) -> Result<Connection, Error> {
		Connection::open(&self.target).await
	}

	async fn recycle(&self, conn: &mut Connection) -> RecycleResult<Error> {
		if conn.is_broken() {
			trace!(addr = %self.target, "discarding broken connection");
			return Err(RecycleError::StaticMessage("connection is broken"));
		}

		Ok(())
	}
}
