//! Storage contracts and the built-in in-memory session store.
//!
//! The store is the single owner of committed credentials. Two invariants shape the contract:
//! a key reads `Connected` iff a non-empty credential is held for it, and committed credentials
//! are replaced atomically—observers never see a half-updated value.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	session::{ConnectionStatus, Credential, FailureReason, SessionKey},
};

/// Boxed future returned by session store operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for per-key connection state.
///
/// Only the connection controller mutates the store; every other component is pure
/// request/response. `begin` must check-and-set atomically so at most one attempt per key is in
/// flight at a time.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Atomically claims the key for a new attempt, moving it to `Connecting`.
	///
	/// Returns [`BeginOutcome::AlreadyConnecting`] without touching the entry when an attempt is
	/// already in flight. A previously committed credential stays visible until the attempt
	/// settles.
	fn begin<'a>(&'a self, key: &'a SessionKey) -> StoreFuture<'a, BeginOutcome>;

	/// Commits a credential, replacing any prior one atomically, and moves the key to
	/// `Connected`.
	fn complete<'a>(&'a self, key: &'a SessionKey, credential: Credential) -> StoreFuture<'a, ()>;

	/// Settles the attempt as `Failed(reason)`, discarding any previously committed credential.
	fn fail<'a>(&'a self, key: &'a SessionKey, reason: FailureReason) -> StoreFuture<'a, ()>;

	/// Discards a canceled attempt, restoring the pre-attempt settled status: `Connected` when a
	/// credential is still held, `Idle` otherwise.
	fn reset<'a>(&'a self, key: &'a SessionKey) -> StoreFuture<'a, ConnectionStatus>;

	/// Reads the current status and credential view for the key.
	///
	/// Keys never touched by an attempt report [`ConnectionStatus::Idle`] with no credential.
	fn snapshot<'a>(&'a self, key: &'a SessionKey) -> StoreFuture<'a, SessionSnapshot>;
}

/// Result of a `begin` claim attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeginOutcome {
	/// The key was claimed and now reads `Connecting`.
	Started,
	/// Another attempt already holds the key; the caller must back off.
	AlreadyConnecting,
}

/// Point-in-time view of one session entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
	/// Connection status at the time of the read.
	pub status: ConnectionStatus,
	/// Committed credential, if the key holds one.
	pub credential: Option<Credential>,
	/// Instant of the last transition, or `None` for untouched keys.
	pub updated_at: Option<OffsetDateTime>,
}
impl SessionSnapshot {
	/// Snapshot reported for keys the store has never seen.
	pub fn untouched() -> Self {
		Self { status: ConnectionStatus::Idle, credential: None, updated_at: None }
	}
}
impl Default for SessionSnapshot {
	fn default() -> Self {
		Self::untouched()
	}
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
