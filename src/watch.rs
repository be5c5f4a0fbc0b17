//! Completion watcher bridging an externally controlled surface back into program flow.
//!
//! The watcher polls [`SurfaceHandle::is_open`] on a fixed interval and ends the watch on the
//! first poll that observes a closed surface. There is no built-in timeout: a user legitimately
//! may sit on the approval page for minutes, and aborting early is the orchestrator's call via
//! the cancellation token (or `tokio::time::timeout` around the whole attempt).

// std
use std::time::Duration;
// self
use crate::{_prelude::*, surface::SurfaceHandle};

/// Polling configuration for [`CompletionWatcher`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchConfig {
	/// Interval between `is_open` polls.
	pub interval: Duration,
}
impl WatchConfig {
	const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

	/// Overrides the polling interval (defaults to 200 ms).
	pub fn with_interval(mut self, interval: Duration) -> Self {
		self.interval = interval;

		self
	}
}
impl Default for WatchConfig {
	fn default() -> Self {
		Self { interval: Self::DEFAULT_INTERVAL }
	}
}

/// How a watch ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchOutcome {
	/// The surface reported closed; emitted exactly once per watch.
	SurfaceClosed,
	/// The orchestrator canceled the watch; no completion was emitted.
	Canceled,
}

/// Polls a surface handle until it closes or the watch is canceled.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompletionWatcher {
	config: WatchConfig,
}
impl CompletionWatcher {
	/// Creates a watcher with the provided polling configuration.
	pub fn new(config: WatchConfig) -> Self {
		Self { config }
	}

	/// The active polling configuration.
	pub fn config(&self) -> WatchConfig {
		self.config
	}

	/// Watches the surface until it closes or `cancel` fires.
	///
	/// The first poll happens immediately, so a surface that is already closed completes without
	/// sleeping. After [`WatchOutcome::SurfaceClosed`] is returned no further poll is issued, and
	/// cancellation wins over a sleep already in progress.
	pub async fn watch(
		&self,
		surface: &dyn SurfaceHandle,
		cancel: &CancellationToken,
	) -> WatchOutcome {
		loop {
			if cancel.is_cancelled() {
				return WatchOutcome::Canceled;
			}
			if !surface.is_open() {
				return WatchOutcome::SurfaceClosed;
			}

			tokio::select! {
				_ = cancel.cancelled() => return WatchOutcome::Canceled,
				_ = tokio::time::sleep(self.config.interval) => {},
			}
		}
	}
}
