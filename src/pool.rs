use std::{
	fmt,
	ops::{Deref, DerefMut},
	time::Duration,
};

use deadpool::{
	managed::{self, Object},
	Runtime,
};
use tracing::{debug, instrument, trace};

use crate::{connection::Connection, manager::Manager, Error, Result, Target};

/// Limits for one [ConnectionPool].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Deserialize, serde::Serialize),
	serde(default)
)]
pub struct PoolConfig {
	/// Connections kept open while unused. Extra connections are closed when released.
	pub max_idle: usize,
	/// Connections open at once, idle or in use. Must be greater than zero.
	pub max_active: usize,
	/// How long [ConnectionPool::acquire] waits for a connection once `max_active` is reached.
	/// `None` waits forever; zero fails immediately with [Error::PoolExhausted].
	pub wait_timeout: Option<Duration>,
}

impl Default for PoolConfig {
	fn default() -> Self {
		Self {
			max_idle: 5,
			max_active: 20,
			wait_timeout: Some(Duration::ZERO),
		}
	}
}

/// A snapshot of a pool's connection accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
	pub max_active: usize,
	/// Open connections, idle or in use.
	pub size: usize,
	pub idle: usize,
	/// Connections currently lent out.
	pub active: usize,
}

/// A bounded pool of [Connection]s to one [Target].
///
/// Building a pool performs no IO: connections are dialed on demand by [Self::acquire].
#[derive(Clone)]
pub struct ConnectionPool {
	pool: managed::Pool<Manager>,
	target: Target,
	config: PoolConfig,
}

impl ConnectionPool {
	pub fn new(target: Target, config: PoolConfig) -> Result<Self> {
		if config.max_active == 0 {
			return Err(Error::Config(
				"max_active must be greater than zero".to_owned(),
			));
		}

		let pool = managed::Pool::builder(Manager::new(target.clone()))
			.max_size(config.max_active)
			.wait_timeout(config.wait_timeout)
			.runtime(Runtime::Tokio1)
			.build()
			.map_err(|err| Error::Config(err.to_string()))?;

		debug!(
			addr = %target,
			max_idle = config.max_idle,
			max_active = config.max_active,
			"created connection pool"
		);
		Ok(Self {
			pool,
			target,
			config,
		})
	}

	/// Borrow a connection, reusing an idle one or dialing a new one.
	///
	/// Fails with [Error::PoolExhausted] when `max_active` connections are lent out and none is
	/// released within the configured wait timeout, and with [Error::Dial] when the target is
	/// unreachable. Neither failure affects later calls.
	#[instrument(level = "trace", skip(self), fields(addr = %self.target), err)]
	pub async fn acquire(&self) -> Result<PooledConnection> {
		let conn = self.pool.get().await?;

		Ok(PooledConnection {
			conn: Some(conn),
			pool: self.pool.clone(),
			max_idle: self.config.max_idle,
		})
	}

	/// Return a connection to the pool. Equivalent to dropping it.
	pub fn release(&self, conn: PooledConnection) {
		drop(conn);
	}

	pub fn status(&self) -> PoolStatus {
		status_of(&self.pool)
	}

	pub fn target(&self) -> &Target {
		&self.target
	}

	pub fn config(&self) -> &PoolConfig {
		&self.config
	}
}

fn status_of(pool: &managed::Pool<Manager>) -> PoolStatus {
	let status = pool.status();
	let idle = status.available.max(0) as usize;

	PoolStatus {
		max_active: status.max_size,
		size: status.size,
		idle,
		active: status.size.saturating_sub(idle),
	}
}

impl fmt::Debug for ConnectionPool {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConnectionPool")
			.field("target", &self.target)
			.field("config", &self.config)
			.field("status", &self.status())
			.finish()
	}
}

/// A [Connection] borrowed from a [ConnectionPool]. It goes back to the pool when dropped.
///
/// Connections which are broken, or which would grow the idle set past `max_idle`, are closed
/// instead.
pub struct PooledConnection {
	conn: Option<Object<Manager>>,
	pool: managed::Pool<Manager>,
	max_idle: usize,
}

impl PooledConnection {
	/// Return this connection to its pool. Equivalent to dropping it.
	pub fn release(self) {}
}

impl Deref for PooledConnection {
	type Target = Connection;

	fn deref(&self) -> &Connection {
		self.conn.as_ref().expect("connection is present until drop")
	}
}

impl DerefMut for PooledConnection {
	fn deref_mut(&mut self) -> &mut Connection {
		self.conn.as_mut().expect("connection is present until drop")
	}
}

impl Drop for PooledConnection {
	fn drop(&mut self) {
		let conn = match self.conn.take() {
			Some(conn) => conn,
			None => return,
		};

		// this connection is still counted as in use, so `idle` excludes it
		let idle = status_of(&self.pool).idle;
		if conn.is_broken() || idle >= self.max_idle {
			trace!(broken = conn.is_broken(), idle, "closing connection");
			drop(Object::take(conn));
		}
	}
}

impl fmt::Debug for PooledConnection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PooledConnection")
			.field("conn", &self.conn.as_deref())
			.field("max_idle", &self.max_idle)
			.finish()
	}
}
