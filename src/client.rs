use std::{fmt, sync::Arc};

use resp::Data;
use tracing::instrument;

use crate::{
	command::Command,
	pool::{ConnectionPool, PoolConfig, PoolStatus, PooledConnection},
	Arg, Result, Target,
};

/// A handle to one target and its [ConnectionPool].
///
/// Every command borrows a connection, sends exactly one request, reads exactly one reply and
/// returns the connection to the pool before the reply is decoded, whether the command succeeded
/// or not. Clones share the same pool.
#[derive(Clone)]
pub struct StoreClient {
	inner: Arc<Inner>,
}

struct Inner {
	target: String,
	pool: ConnectionPool,
}

impl StoreClient {
	/// Build a client and its pool. No connection is opened until the first command.
	pub fn new(target: &str, config: PoolConfig) -> Result<Self> {
		let pool = ConnectionPool::new(Target::parse(target)?, config)?;

		Ok(Self {
			inner: Arc::new(Inner {
				target: target.to_owned(),
				pool,
			}),
		})
	}

	/// The target identifier this client was created for.
	pub fn target(&self) -> &str {
		&self.inner.target
	}

	pub fn pool(&self) -> &ConnectionPool {
		&self.inner.pool
	}

	pub fn status(&self) -> PoolStatus {
		self.inner.pool.status()
	}

	/// Whether both handles share one pool.
	pub fn same_pool(&self, other: &StoreClient) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	/// Borrow a raw connection. It returns to the pool when dropped or
	/// [released](PooledConnection::release); holding it keeps one pool slot occupied.
	pub async fn connection(&self) -> Result<PooledConnection> {
		self.inner.pool.acquire().await
	}

	/// Run any [Command] on a pooled connection.
	pub async fn run<C>(&self, cmd: C) -> Result<C::Response>
	where
		C: Command + Send,
	{
		let mut conn = self.connection().await?;
		let res = cmd.run(&mut *conn).await;
		conn.release();

		res
	}

	/// Send the command `name` with `args` and return the raw reply.
	#[instrument(level = "debug", skip(self, args), fields(addr = %self.inner.pool.target()))]
	pub async fn call(&self, name: &str, args: &[Arg<'_>]) -> Result<Data<'static>> {
		let mut conn = self.connection().await?;
		let res = conn.call(name, args).await;
		conn.release();

		res
	}

	/// [Self::call], then decode the reply with `decode`.
	pub(crate) async fn call_as<T>(
		&self,
		name: &str,
		args: &[Arg<'_>],
		decode: fn(Data<'static>) -> Result<T>,
	) -> Result<T> {
		decode(self.call(name, args).await?)
	}
}

impl fmt::Debug for StoreClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StoreClient")
			.field("pool", &self.inner.pool)
			.finish()
	}
}
