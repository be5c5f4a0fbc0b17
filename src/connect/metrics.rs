// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for connect attempts.
#[derive(Debug, Default)]
pub struct HandshakeMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
	canceled: AtomicU64,
}
impl HandshakeMetrics {
	/// Returns the total number of connect attempts (including rejected reentries).
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of attempts that committed a credential.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of attempts that settled as failed or were rejected.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Returns the number of attempts canceled before settling.
	pub fn cancellations(&self) -> u64 {
		self.canceled.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_cancellation(&self) {
		self.canceled.fetch_add(1, Ordering::Relaxed);
	}
}
