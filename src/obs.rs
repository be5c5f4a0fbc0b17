//! Optional observability helpers for handshake attempts.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `link_broker.handshake` with the `provider`
//!   and `stage` fields.
//! - Enable `metrics` to increment the `link_broker_connect_total` counter for every
//!   attempt/success/failure/cancellation, labeled by `provider` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each connect attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectOutcome {
	/// Entry to the connect orchestrator.
	Attempt,
	/// The attempt committed a credential.
	Success,
	/// The attempt settled as failed.
	Failure,
	/// The attempt was canceled before settling.
	Canceled,
}
impl ConnectOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ConnectOutcome::Attempt => "attempt",
			ConnectOutcome::Success => "success",
			ConnectOutcome::Failure => "failure",
			ConnectOutcome::Canceled => "canceled",
		}
	}
}
impl Display for ConnectOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
