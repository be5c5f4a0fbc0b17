//! Account-linking handshake broker—open out-of-band authorization surfaces, watch them to
//! completion, and hand off opaque credentials through one keyed session store.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod authority;
pub mod connect;
pub mod error;
pub mod obs;
pub mod provider;
pub mod session;
pub mod store;
pub mod surface;
pub mod watch;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	// std
	use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

	pub use crate::_prelude::*;

	// self
	use crate::{
		provider::Provider,
		session::{OrganizationId, SessionKey, UserId},
		surface::{SurfaceBlocked, SurfaceHandle, SurfaceOpener},
	};
	#[cfg(feature = "reqwest")]
	use crate::{
		authority::ReqwestAuthorityClient,
		connect::Connector,
		store::{MemoryStore, SessionStore},
		watch::WatchConfig,
	};

	/// Builds the session key fixture shared across tests.
	pub fn test_session_key(provider: Provider) -> SessionKey {
		let user = UserId::new("user-1").expect("User fixture should be valid.");
		let organization =
			OrganizationId::new("org-1").expect("Organization fixture should be valid.");

		SessionKey::new(user, organization, provider)
	}

	/// Surface fake whose window stays open for a scripted number of polls.
	#[derive(Debug, Default)]
	pub struct ScriptedSurface {
		open_polls: AtomicU32,
		polled: AtomicU32,
	}
	impl ScriptedSurface {
		/// Creates a surface that reports open for the first `open_polls` polls, then closed.
		pub fn closes_after(open_polls: u32) -> Arc<Self> {
			Arc::new(Self { open_polls: AtomicU32::new(open_polls), polled: AtomicU32::new(0) })
		}

		/// Creates a surface that never closes on its own.
		pub fn never_closes() -> Arc<Self> {
			Self::closes_after(u32::MAX)
		}

		/// Number of `is_open` polls observed so far.
		pub fn polls(&self) -> u32 {
			self.polled.load(Ordering::SeqCst)
		}
	}
	impl SurfaceHandle for ScriptedSurface {
		fn is_open(&self) -> bool {
			let seen = self.polled.fetch_add(1, Ordering::SeqCst);

			seen < self.open_polls.load(Ordering::SeqCst)
		}
	}

	/// Opener fake that hands out scripted surfaces and records every opened URL.
	#[derive(Debug, Default)]
	pub struct ScriptedOpener {
		blocked: AtomicBool,
		opened: Mutex<Vec<Url>>,
		surfaces: Mutex<Vec<Arc<ScriptedSurface>>>,
	}
	impl ScriptedOpener {
		/// Queues a surface handed out by the next `open` call (FIFO).
		pub fn push_surface(&self, surface: Arc<ScriptedSurface>) {
			self.surfaces.lock().push(surface);
		}

		/// Makes every subsequent `open` call fail as blocked.
		pub fn block(&self) {
			self.blocked.store(true, Ordering::SeqCst);
		}

		/// URLs opened so far, in order.
		pub fn opened(&self) -> Vec<Url> {
			self.opened.lock().clone()
		}
	}
	impl SurfaceOpener for ScriptedOpener {
		fn open(&self, url: &Url) -> Result<Arc<dyn SurfaceHandle>, SurfaceBlocked> {
			if self.blocked.load(Ordering::SeqCst) {
				return Err(SurfaceBlocked::new("pop-up blocked by test opener"));
			}

			self.opened.lock().push(url.clone());

			let mut surfaces = self.surfaces.lock();
			let surface = if surfaces.is_empty() {
				ScriptedSurface::closes_after(0)
			} else {
				surfaces.remove(0)
			};

			Ok(surface)
		}
	}

	#[cfg(feature = "reqwest")]
	/// Connector type alias used by reqwest-backed integration tests.
	pub type ReqwestTestConnector = Connector<ReqwestAuthorityClient>;

	#[cfg(feature = "reqwest")]
	/// Builds a reqwest authority client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_authority(base: Url) -> ReqwestAuthorityClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestAuthorityClient::with_client(base, client)
	}

	#[cfg(feature = "reqwest")]
	/// Constructs a [`Connector`] backed by an in-memory store, a scripted opener, and the reqwest
	/// authority transport used across integration tests. Tests tune the watch interval down so
	/// polling scenarios stay fast.
	pub fn build_reqwest_test_connector(
		base: Url,
		interval: core::time::Duration,
	) -> (ReqwestTestConnector, Arc<MemoryStore>, Arc<ScriptedOpener>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn SessionStore> = store_backend.clone();
		let opener_backend = Arc::new(ScriptedOpener::default());
		let opener: Arc<dyn SurfaceOpener> = opener_backend.clone();
		let authority = test_reqwest_authority(base);
		let connector = Connector::with_authority(store, opener, authority)
			.with_watch(WatchConfig::default().with_interval(interval));

		(connector, store_backend, opener_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use tokio_util::sync::CancellationToken;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use link_broker as _;
#[cfg(all(test, feature = "reqwest"))] use httpmock as _;
