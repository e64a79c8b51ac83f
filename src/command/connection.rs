use std::fmt;

use async_trait::async_trait;
use tracing::instrument;

use crate::{Connection, Result, Target};

use super::Command;

/// Authenticates with [`AUTH`](https://redis.io/commands/auth/) when a password is set, then
/// switches to the logical database with [`SELECT`](https://redis.io/commands/select/) when it
/// isn't the default one.
#[derive(Clone)]
pub struct Handshake<'a> {
	pub username: Option<&'a str>,
	pub password: Option<&'a str>,
	pub db: u32,
}

impl<'a> From<&'a Target> for Handshake<'a> {
	fn from(target: &'a Target) -> Self {
		Self {
			username: target.username.as_deref(),
			password: target.password.as_deref(),
			db: target.db,
		}
	}
}

impl fmt::Debug for Handshake<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Handshake")
			.field("username", &self.username)
			.field("password", &self.password.map(|_| "<redacted>"))
			.field("db", &self.db)
			.finish()
	}
}

#[async_trait]
impl<'a> Command for Handshake<'a> {
	type Response = ();

	#[instrument(level = "debug", skip_all)]
	async fn run(self, connection: &mut Connection) -> Result<Self::Response> {
		if let Some(password) = self.password {
			match self.username {
				Some(username) => connection.cmd(["AUTH", username, password]).await?,
				None => connection.cmd(["AUTH", password]).await?,
			};
		}

		if self.db != 0 {
			let db = self.db.to_string();
			connection.cmd(["SELECT", db.as_str()]).await?;
		}

		Ok(())
	}
}
