//! Pooled Redis clients, one per target.
//!
//! A [Registry] maps target identifiers such as `redis://:password@10.0.1.11:6379/0` to
//! [StoreClient]s. Each client owns a bounded [ConnectionPool] which is created on first use and
//! kept for the life of the registry. Commands borrow a connection for exactly one
//! request/response and always give it back.
//!
//! ```no_run
//! # async fn demo() -> storepool::Result<()> {
//! let client = storepool::client("redis://localhost:6379/0")?;
//!
//! client.set("greeting", "hello").await?;
//! assert_eq!(client.get("greeting").await?, "hello");
//! assert_eq!(client.incr("visits").await?, 1);
//! # Ok(())
//! # }
//! ```

/// Typed command arguments.
pub mod arg;
/// Pooled command execution.
pub mod client;
/// Redis commands.
pub mod command;
/// Items for connecting to Redis.
pub mod connection;
mod error;
/// Items for managing Redis connections with Deadpool.
pub mod manager;
/// Connection pools.
pub mod pool;
/// The per-target client cache.
pub mod registry;
pub mod reply;
/// Target identifiers.
pub mod target;

pub use arg::Arg;
pub use client::StoreClient;
pub use command::Command;
pub use connection::Connection;
pub use error::{Error, Result};
pub use pool::{ConnectionPool, PoolConfig, PoolStatus, PooledConnection};
pub use registry::Registry;
pub use resp;
pub use target::Target;

/// Get the client for `target` from the [global registry](Registry::global).
pub fn client(target: &str) -> Result<StoreClient> {
	Registry::global().get(target)
}
