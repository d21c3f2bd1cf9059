//! Settings service with per-session snapshots and replace-on-save
//!
//! The settings record is read from the external store once per user session
//! and handed out as an immutable `Arc` snapshot. A save replaces the stored
//! record as a whole and drops every cached snapshot, so the next load sees
//! the new matrix.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::perm::PermissionContext;
use crate::prelude::*;
use bizdesk_types::settings_adapter::{SettingsAdapter, SettingsRecord};

const DEFAULT_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
	Some(n) => n,
	None => NonZeroUsize::MIN,
};

/// One fetched settings record
#[derive(Debug, Clone)]
pub struct SettingsSnapshot {
	pub user_id: Box<str>,
	pub record: SettingsRecord,
	pub fetched_at: Timestamp,
}

impl SettingsSnapshot {
	/// Permission context for `role` over this snapshot's matrix
	pub fn permissions(&self, role: Option<Role>) -> PermissionContext<'_> {
		PermissionContext::new(self.record.module_permissions.as_ref(), role)
	}
}

/// LRU cache of snapshots, keyed by user id
pub struct SettingsCache {
	cache: parking_lot::Mutex<LruCache<Box<str>, Arc<SettingsSnapshot>>>,
}

impl SettingsCache {
	pub fn new(capacity: usize) -> Self {
		let non_zero = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CACHE_SIZE);
		Self { cache: parking_lot::Mutex::new(LruCache::new(non_zero)) }
	}

	pub fn get(&self, user_id: &str) -> Option<Arc<SettingsSnapshot>> {
		self.cache.lock().get(user_id).cloned()
	}

	pub fn put(&self, snapshot: Arc<SettingsSnapshot>) {
		self.cache.lock().put(snapshot.user_id.clone(), snapshot);
	}

	pub fn remove(&self, user_id: &str) {
		self.cache.lock().pop(user_id);
	}

	pub fn clear(&self) {
		self.cache.lock().clear();
	}
}

/// Settings service - single owner of settings fetch, refresh and save
pub struct SettingsService {
	adapter: Arc<dyn SettingsAdapter>,
	cache: SettingsCache,
}

impl SettingsService {
	pub fn new(adapter: Arc<dyn SettingsAdapter>, cache_size: usize) -> Self {
		Self { adapter, cache: SettingsCache::new(cache_size) }
	}

	/// Snapshot for a user, fetched only if none is cached for that user id
	///
	/// Overlapping first loads for the same user may both fetch; the last one
	/// stored wins.
	pub async fn load_for(&self, user_id: &str) -> BdResult<Arc<SettingsSnapshot>> {
		if let Some(snapshot) = self.cache.get(user_id) {
			debug!(user_id = %user_id, "Settings snapshot cache hit");
			return Ok(snapshot);
		}
		self.fetch(user_id).await
	}

	/// Unconditional refetch for a user
	pub async fn refresh(&self, user_id: &str) -> BdResult<Arc<SettingsSnapshot>> {
		self.fetch(user_id).await
	}

	/// Cached snapshot without fetching
	pub fn snapshot(&self, user_id: &str) -> Option<Arc<SettingsSnapshot>> {
		self.cache.get(user_id)
	}

	/// Drops a user's snapshot (sign-out)
	pub fn clear(&self, user_id: &str) {
		self.cache.remove(user_id);
	}

	/// Replaces the stored record and refetches it for the actor
	///
	/// Requires `settings:edit` under the currently stored matrix. The new
	/// matrix must only name known modules, actions and roles.
	pub async fn save(
		&self,
		actor: &UserIdentity,
		record: SettingsRecord,
	) -> BdResult<Arc<SettingsSnapshot>> {
		let current = self.load_for(&actor.id).await?;
		if let Err(err) = current.permissions(actor.role).require(ModuleName::Settings, Action::Edit)
		{
			warn!(user_id = %actor.id, role = ?actor.role, "Settings save denied");
			return Err(err);
		}

		if let Some(matrix) = &record.module_permissions {
			matrix.validate()?;
		}

		self.adapter.replace_settings(&record).await?;
		self.cache.clear();
		info!(user_id = %actor.id, "Settings replaced");

		self.fetch(&actor.id).await
	}

	async fn fetch(&self, user_id: &str) -> BdResult<Arc<SettingsSnapshot>> {
		let record = self.adapter.read_settings().await?.unwrap_or_default();
		let snapshot = Arc::new(SettingsSnapshot {
			user_id: user_id.into(),
			record,
			fetched_at: Timestamp::now(),
		});
		self.cache.put(snapshot.clone());
		debug!(user_id = %user_id, "Settings snapshot fetched");
		Ok(snapshot)
	}
}


// vim: ts=4
