use std::iter;

use async_trait::async_trait;
use resp::Data;

use crate::{Arg, Connection, Result};

/// Connection setup commands.
pub mod connection;
/// [Generic](https://redis.io/commands/?group=generic) and
/// [string](https://redis.io/commands/?group=string) commands.
mod strings;
/// [Hash](https://redis.io/commands/?group=hash) commands.
mod hash;
/// [List](https://redis.io/commands/?group=list) commands.
mod list;
/// [Server](https://redis.io/commands/?group=server) commands.
mod server;
/// [Set](https://redis.io/commands/?group=set) commands.
mod set;

/// Types that can be executed on the Redis server as a command.
#[async_trait]
pub trait Command {
	/// The expected response type of this command.
	type Response;

	/// Run the command using the given connection.
	async fn run(self, connection: &mut Connection) -> Result<Self::Response>;
}

#[async_trait]
impl Command for Data<'_> {
	type Response = Data<'static>;

	async fn run(self, connection: &mut Connection) -> Result<Self::Response> {
		connection.send(self).await?;
		connection.read_cmd().await
	}
}

/// `key` followed by every item of `rest`.
fn with_key<'a, I>(key: &'a str, rest: I) -> Vec<Arg<'a>>
where
	I: IntoIterator,
	I::Item: Into<Arg<'a>>,
{
	iter::once(Arg::from(key))
		.chain(rest.into_iter().map(Into::into))
		.collect()
}
