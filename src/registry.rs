use std::{
	collections::HashMap,
	sync::{PoisonError, RwLock},
};

use lazy_static::lazy_static;
use tracing::debug;

use crate::{pool::PoolConfig, Result, StoreClient};

lazy_static! {
	static ref GLOBAL: Registry = Registry::new();
}

/// A cache of [StoreClient]s keyed by target identifier.
///
/// Each target gets exactly one client, and so exactly one pool, for the lifetime of the
/// registry. Entries are never removed.
#[derive(Debug, Default)]
pub struct Registry {
	config: PoolConfig,
	clients: RwLock<HashMap<String, StoreClient>>,
}

impl Registry {
	/// A registry whose pools use [PoolConfig::default].
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry whose pools use `config` unless [Self::get_with] says otherwise.
	pub fn with_config(config: PoolConfig) -> Self {
		Self {
			config,
			clients: RwLock::default(),
		}
	}

	/// The process-wide registry used by [crate::client].
	pub fn global() -> &'static Registry {
		&GLOBAL
	}

	/// Get the client for `target`, creating it on first use.
	///
	/// Creating a client parses the target and sets up an empty pool; no connection is opened
	/// until a command runs. Errors are limited to invalid targets and pool configuration.
	pub fn get(&self, target: &str) -> Result<StoreClient> {
		self.get_with(target, &self.config)
	}

	/// Like [Self::get], using `config` if the client has to be created. An existing client keeps
	/// the configuration it was created with.
	pub fn get_with(&self, target: &str, config: &PoolConfig) -> Result<StoreClient> {
		if let Some(client) = self.read().get(target) {
			return Ok(client.clone());
		}

		// built outside the lock: this is cheap and does no IO, but other lookups shouldn't wait
		let client = StoreClient::new(target, config.clone())?;

		let mut clients = self
			.clients
			.write()
			.unwrap_or_else(PoisonError::into_inner);

		// another caller may have inserted the target since the read lock was released
		if let Some(existing) = clients.get(target) {
			return Ok(existing.clone());
		}

		debug!(addr = %client.pool().target(), "registered client");
		clients.insert(target.to_owned(), client.clone());
		Ok(client)
	}

	/// Whether a client for exactly this target identifier has been created.
	pub fn contains(&self, target: &str) -> bool {
		self.read().contains_key(target)
	}

	/// Number of cached clients.
	pub fn len(&self) -> usize {
		self.read().len()
	}

	/// Whether no client has been created yet.
	pub fn is_empty(&self) -> bool {
		self.read().is_empty()
	}

	fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, StoreClient>> {
		self.clients.read().unwrap_or_else(PoisonError::into_inner)
	}
}
