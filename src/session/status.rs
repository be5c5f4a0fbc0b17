//! Connection status state machine values observed by the presentation layer.

// self
use crate::_prelude::*;

/// Current connection status for a session key. Exactly one status exists per key at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
	/// No attempt has been made yet, or the last attempt was canceled before settling.
	#[default]
	Idle,
	/// An authorization attempt is in flight.
	Connecting,
	/// A credential is committed for the key.
	Connected,
	/// The last attempt settled without a credential.
	Failed(FailureReason),
}
impl ConnectionStatus {
	/// Returns `true` while an attempt is in flight.
	pub fn is_connecting(&self) -> bool {
		matches!(self, Self::Connecting)
	}

	/// Returns `true` when a credential is committed for the key.
	pub fn is_connected(&self) -> bool {
		matches!(self, Self::Connected)
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Idle => "idle",
			Self::Connecting => "connecting",
			Self::Connected => "connected",
			Self::Failed(_) => "failed",
		}
	}
}
impl Display for ConnectionStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Failed(reason) => write!(f, "failed({reason})"),
			status => f.write_str(status.as_str()),
		}
	}
}

/// Terminal reason attached to a `Failed` status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
	/// The remote authority rejected the session identifiers.
	InvalidSession,
	/// The host environment prevented opening the authorization surface.
	SurfaceBlocked,
	/// The authority could not be reached; retriable with a fresh connect.
	RemoteUnavailable,
	/// The user closed the surface without completing authorization; expected, not a defect.
	NoCredentialYet,
}
impl FailureReason {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::InvalidSession => "invalid_session",
			Self::SurfaceBlocked => "surface_blocked",
			Self::RemoteUnavailable => "remote_unavailable",
			Self::NoCredentialYet => "no_credential_yet",
		}
	}
}
impl Display for FailureReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
