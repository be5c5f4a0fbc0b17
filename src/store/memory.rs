//! Thread-safe in-memory [`SessionStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	session::{ConnectionStatus, Credential, FailureReason, SessionKey},
	store::{BeginOutcome, SessionSnapshot, SessionStore, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<SessionKey, SessionSnapshot>>>;

/// Thread-safe process-wide store that keeps session entries in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	fn begin_now(map: StoreMap, key: SessionKey) -> BeginOutcome {
		let mut guard = map.write();
		let entry = guard.entry(key).or_default();

		if entry.status.is_connecting() {
			return BeginOutcome::AlreadyConnecting;
		}

		entry.status = ConnectionStatus::Connecting;
		entry.updated_at = Some(OffsetDateTime::now_utc());

		BeginOutcome::Started
	}

	fn complete_now(map: StoreMap, key: SessionKey, credential: Credential) {
		map.write().insert(
			key,
			SessionSnapshot {
				status: ConnectionStatus::Connected,
				credential: Some(credential),
				updated_at: Some(OffsetDateTime::now_utc()),
			},
		);
	}

	fn fail_now(map: StoreMap, key: SessionKey, reason: FailureReason) {
		map.write().insert(
			key,
			SessionSnapshot {
				status: ConnectionStatus::Failed(reason),
				credential: None,
				updated_at: Some(OffsetDateTime::now_utc()),
			},
		);
	}

	fn reset_now(map: StoreMap, key: SessionKey) -> ConnectionStatus {
		let mut guard = map.write();
		let entry = guard.entry(key).or_default();
		let restored = if entry.credential.is_some() {
			ConnectionStatus::Connected
		} else {
			ConnectionStatus::Idle
		};

		entry.status = restored;
		entry.updated_at = Some(OffsetDateTime::now_utc());

		restored
	}

	fn snapshot_now(map: StoreMap, key: SessionKey) -> SessionSnapshot {
		map.read().get(&key).cloned().unwrap_or_default()
	}
}
impl SessionStore for MemoryStore {
	fn begin<'a>(&'a self, key: &'a SessionKey) -> StoreFuture<'a, BeginOutcome> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::begin_now(map, key)) })
	}

	fn complete<'a>(&'a self, key: &'a SessionKey, credential: Credential) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move {
			Self::complete_now(map, key, credential);

			Ok(())
		})
	}

	fn fail<'a>(&'a self, key: &'a SessionKey, reason: FailureReason) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move {
			Self::fail_now(map, key, reason);

			Ok(())
		})
	}

	fn reset<'a>(&'a self, key: &'a SessionKey) -> StoreFuture<'a, ConnectionStatus> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::reset_now(map, key)) })
	}

	fn snapshot<'a>(&'a self, key: &'a SessionKey) -> StoreFuture<'a, SessionSnapshot> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::snapshot_now(map, key)) })
	}
}
