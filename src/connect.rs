//! Connect orchestration: one entry point driving initiate → open → watch → exchange → commit.
//!
//! The connector exposes [`Connector::connect`] to the presentation layer and owns every store
//! mutation. Each attempt is strictly sequential; the only repeating suspension is the watch
//! interval. Reentrant connects for a key are rejected before any suspension via a per-key
//! singleflight guard plus the store's atomic `begin` claim, so two rapid calls produce exactly
//! one authority request.

mod metrics;

pub use metrics::HandshakeMetrics;

// self
use crate::{
	_prelude::*,
	authority::AuthorityClient,
	obs::{self, ConnectOutcome, HandshakeSpan},
	session::{ConnectionStatus, Credential, FailureReason, SessionKey},
	store::{BeginOutcome, SessionSnapshot, SessionStore},
	surface::SurfaceOpener,
	watch::{CompletionWatcher, WatchConfig, WatchOutcome},
};
#[cfg(feature = "reqwest")] use crate::authority::ReqwestAuthorityClient;

#[cfg(feature = "reqwest")]
/// Connector specialized for the crate's default reqwest authority transport.
pub type ReqwestConnector = Connector<ReqwestAuthorityClient>;

/// Observer notified synchronously after every settled status transition.
pub trait StatusListener
where
	Self: Send + Sync,
{
	/// Called with the new status immediately after the store commits it.
	fn status_changed(&self, key: &SessionKey, status: &ConnectionStatus);
}

/// Coordinates the authorization handshake for session keys.
///
/// The connector owns the authority client, session store, surface opener, and completion
/// watcher so the presentation layer only sees `connect`, `status`, and `credential`. Committed
/// credentials are owned by the store; callers receive clones of the opaque value and the
/// initiating surface never persists them.
pub struct Connector<A>
where
	A: ?Sized + AuthorityClient,
{
	/// Remote authority that mints authorization URLs and yields exchanged credentials.
	pub authority: Arc<A>,
	/// Session store holding per-key status and committed credentials.
	pub store: Arc<dyn SessionStore>,
	/// Host-environment capability for opening authorization surfaces.
	pub opener: Arc<dyn SurfaceOpener>,
	/// Watcher polling the surface for completion.
	pub watcher: CompletionWatcher,
	/// Shared counters for attempt outcomes.
	pub handshake_metrics: Arc<HandshakeMetrics>,
	listeners: Arc<Mutex<Vec<Arc<dyn StatusListener>>>>,
	attempt_guards: Arc<Mutex<HashMap<SessionKey, Arc<AsyncMutex<()>>>>>,
}
impl<A> Connector<A>
where
	A: ?Sized + AuthorityClient,
{
	/// Creates a connector that reuses the caller-provided authority client.
	pub fn with_authority(
		store: Arc<dyn SessionStore>,
		opener: Arc<dyn SurfaceOpener>,
		authority: impl Into<Arc<A>>,
	) -> Self {
		Self {
			authority: authority.into(),
			store,
			opener,
			watcher: CompletionWatcher::default(),
			handshake_metrics: Default::default(),
			listeners: Default::default(),
			attempt_guards: Default::default(),
		}
	}

	/// Overrides the watch configuration (polling interval).
	pub fn with_watch(mut self, config: WatchConfig) -> Self {
		self.watcher = CompletionWatcher::new(config);

		self
	}

	/// Registers a listener notified synchronously on every settled transition.
	pub fn subscribe(&self, listener: Arc<dyn StatusListener>) {
		self.listeners.lock().push(listener);
	}

	/// Runs one full handshake attempt for the key and returns the committed credential.
	///
	/// Equivalent to [`connect_with_cancel`](Self::connect_with_cancel) with a token that never
	/// fires; the watch then runs until the surface closes.
	pub async fn connect(&self, key: SessionKey) -> Result<Credential> {
		self.connect_with_cancel(key, CancellationToken::new()).await
	}

	/// Runs one full handshake attempt, abortable at any suspension point via `cancel`.
	///
	/// A canceled attempt never commits a credential: the watch stops without emitting
	/// completion, any in-flight exchange result is discarded, the store restores the
	/// pre-attempt settled status, and [`Error::Canceled`] is returned. A reentrant call while
	/// the key is `Connecting` is rejected with [`Error::AttemptInFlight`] without contacting
	/// the authority.
	pub async fn connect_with_cancel(
		&self,
		key: SessionKey,
		cancel: CancellationToken,
	) -> Result<Credential> {
		let provider = key.provider;
		let span = HandshakeSpan::new(provider, "connect");

		obs::record_connect_outcome(provider, ConnectOutcome::Attempt);
		self.handshake_metrics.record_attempt();

		let result = span.instrument(self.run_attempt(key, cancel)).await;

		match &result {
			Ok(_) => {
				self.handshake_metrics.record_success();
				obs::record_connect_outcome(provider, ConnectOutcome::Success);
			},
			Err(Error::Canceled) => {
				self.handshake_metrics.record_cancellation();
				obs::record_connect_outcome(provider, ConnectOutcome::Canceled);
			},
			Err(_) => {
				self.handshake_metrics.record_failure();
				obs::record_connect_outcome(provider, ConnectOutcome::Failure);
			},
		}

		result
	}

	/// Reads the current status for the key.
	pub async fn status(&self, key: &SessionKey) -> Result<ConnectionStatus> {
		Ok(self.snapshot(key).await?.status)
	}

	/// Reads the committed credential for the key, if any.
	pub async fn credential(&self, key: &SessionKey) -> Result<Option<Credential>> {
		Ok(self.snapshot(key).await?.credential)
	}

	/// Reads the full status + credential view for the key.
	pub async fn snapshot(&self, key: &SessionKey) -> Result<SessionSnapshot> {
		Ok(self.store.snapshot(key).await?)
	}

	async fn run_attempt(&self, key: SessionKey, cancel: CancellationToken) -> Result<Credential> {
		let guard = self.attempt_guard(&key);
		let Some(_singleflight) = guard.try_lock() else {
			return Err(Error::AttemptInFlight);
		};

		if self.store.begin(&key).await? == BeginOutcome::AlreadyConnecting {
			return Err(Error::AttemptInFlight);
		}

		self.notify(&key, ConnectionStatus::Connecting);

		match self.drive(&key, &cancel).await {
			Ok(credential) => match self.store.complete(&key, credential.clone()).await {
				Ok(()) => {
					self.notify(&key, ConnectionStatus::Connected);

					Ok(credential)
				},
				// A commit that cannot land must still settle the key, or it would stay
				// `Connecting` and reject every retry.
				Err(e) => {
					let _ = self.store.fail(&key, FailureReason::RemoteUnavailable).await;

					self.notify(&key, ConnectionStatus::Failed(FailureReason::RemoteUnavailable));

					Err(e.into())
				},
			},
			Err(Error::Canceled) => {
				let restored = self.store.reset(&key).await?;

				self.notify(&key, restored);

				Err(Error::Canceled)
			},
			Err(err) => {
				if let Some(reason) = err.failure_reason() {
					// Best effort when storage itself is what failed.
					let _ = self.store.fail(&key, reason).await;

					self.notify(&key, ConnectionStatus::Failed(reason));
				}

				Err(err)
			},
		}
	}

	/// Strictly sequential attempt body: initiate → open → watch → exchange. No credential is
	/// fetched before the watcher reports the surface closed.
	async fn drive(&self, key: &SessionKey, cancel: &CancellationToken) -> Result<Credential> {
		if cancel.is_cancelled() {
			return Err(Error::Canceled);
		}

		let url = self.authority.authorization_url(key).await?;

		if cancel.is_cancelled() {
			return Err(Error::Canceled);
		}

		let surface = self.opener.open(&url)?;

		match self.watcher.watch(surface.as_ref(), cancel).await {
			WatchOutcome::Canceled => return Err(Error::Canceled),
			WatchOutcome::SurfaceClosed => (),
		}

		let fetched = self.authority.credential(key).await;

		// A cancellation racing the exchange discards the in-flight result uncommitted.
		if cancel.is_cancelled() {
			return Err(Error::Canceled);
		}

		fetched?.ok_or(Error::NoCredentialYet)
	}

	// One guard per distinct key, kept for the life of the connector; the map mirrors the
	// store's entries, which a connect lifecycle creates but never destroys.
	fn attempt_guard(&self, key: &SessionKey) -> Arc<AsyncMutex<()>> {
		let mut guards = self.attempt_guards.lock();

		guards.entry(key.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
	}

	fn notify(&self, key: &SessionKey, status: ConnectionStatus) {
		let listeners = self.listeners.lock().clone();

		for listener in listeners {
			listener.status_changed(key, &status);
		}
	}
}
#[cfg(feature = "reqwest")]
impl Connector<ReqwestAuthorityClient> {
	/// Creates a connector for the authority at `base` with a default reqwest transport.
	pub fn new(store: Arc<dyn SessionStore>, opener: Arc<dyn SurfaceOpener>, base: Url) -> Self {
		Self::with_authority(store, opener, ReqwestAuthorityClient::new(base))
	}
}
impl<A> Clone for Connector<A>
where
	A: ?Sized + AuthorityClient,
{
	fn clone(&self) -> Self {
		Self {
			authority: self.authority.clone(),
			store: self.store.clone(),
			opener: self.opener.clone(),
			watcher: self.watcher,
			handshake_metrics: self.handshake_metrics.clone(),
			listeners: self.listeners.clone(),
			attempt_guards: self.attempt_guards.clone(),
		}
	}
}
impl<A> Debug for Connector<A>
where
	A: ?Sized + AuthorityClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Connector")
			.field("watcher", &self.watcher)
			.field("listeners", &self.listeners.lock().len())
			.finish()
	}
}
