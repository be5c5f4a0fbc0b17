//! Authorization surface capabilities: opening the user-facing window and probing it.
//!
//! The authorization authority has no callback channel into this process, so the surface is
//! modeled as a capability that only reports whether it is still open. Host environments
//! (a desktop webview, a browser shim, a test fake) implement these traits at the seam.

// self
use crate::_prelude::*;

/// Handle to an externally controlled authorization window or tab.
///
/// The only capability the broker requires is "report whether still open"; everything else about
/// the surface belongs to the host environment.
pub trait SurfaceHandle
where
	Self: Send + Sync,
{
	/// Returns `true` while the user-facing surface remains open.
	fn is_open(&self) -> bool;
}

/// Opens authorization surfaces on behalf of the broker.
pub trait SurfaceOpener
where
	Self: Send + Sync,
{
	/// Opens a surface for the authorization URL, sized for an approval flow.
	///
	/// Fails with [`SurfaceBlocked`] when the host environment prevents opening (e.g. pop-up
	/// blocking); the failure is surfaced to the caller, never swallowed.
	fn open(&self, url: &Url) -> Result<Arc<dyn SurfaceHandle>, SurfaceBlocked>;
}

/// The host environment refused to open the authorization surface.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Authorization surface could not be opened: {reason}.")]
pub struct SurfaceBlocked {
	/// Host-supplied reason string (e.g. the pop-up blocker's message).
	pub reason: String,
}
impl SurfaceBlocked {
	/// Wraps the host environment's reason string.
	pub fn new(reason: impl Into<String>) -> Self {
		Self { reason: reason.into() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn blocked_error_carries_the_host_reason() {
		let err = SurfaceBlocked::new("pop-up blocked");

		assert_eq!(err.to_string(), "Authorization surface could not be opened: pop-up blocked.");
	}
}
