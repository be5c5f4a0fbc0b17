//! Broker-level error types shared across the handshake, authority, and store layers.

// self
use crate::{_prelude::*, session::FailureReason, surface::SurfaceBlocked};

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// The remote authority rejected the session identifiers.
	#[error("Authority rejected the session: {reason}.")]
	InvalidSession {
		/// Authority- or broker-supplied reason string.
		reason: String,
	},
	/// The host environment prevented opening the authorization surface.
	#[error(transparent)]
	SurfaceBlocked(#[from] SurfaceBlocked),
	/// Transient authority failure; retry with a fresh `connect`.
	#[error(transparent)]
	Remote(#[from] RemoteError),
	/// The user closed the surface without completing authorization.
	#[error("No credential is available for the session yet.")]
	NoCredentialYet,
	/// A connect attempt for the same session key is already in flight.
	#[error("A connect attempt is already in flight for this session.")]
	AttemptInFlight,
	/// The attempt was canceled by its orchestrator before settling.
	#[error("The connect attempt was canceled.")]
	Canceled,
}
impl Error {
	/// Maps the error onto the terminal [`FailureReason`] observers see, if any.
	///
	/// [`Error::AttemptInFlight`] and [`Error::Canceled`] return `None`: neither settles the
	/// attempt, so neither produces a `Failed` transition. Storage failures surface as
	/// [`FailureReason::RemoteUnavailable`].
	pub fn failure_reason(&self) -> Option<FailureReason> {
		match self {
			Self::Storage(_) | Self::Remote(_) => Some(FailureReason::RemoteUnavailable),
			Self::InvalidSession { .. } => Some(FailureReason::InvalidSession),
			Self::SurfaceBlocked(_) => Some(FailureReason::SurfaceBlocked),
			Self::NoCredentialYet => Some(FailureReason::NoCredentialYet),
			Self::AttemptInFlight | Self::Canceled => None,
		}
	}
}

/// Failures raised while calling the remote authority (network, IO, bad responses).
///
/// All variants land in the retriable [`FailureReason::RemoteUnavailable`] bucket; the nested
/// split exists so callers and logs can tell a dead network from a misbehaving backend.
#[derive(Debug, ThisError)]
pub enum RemoteError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the authority.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the authority.")]
	Io(#[from] std::io::Error),
	/// Authority answered with an unexpected HTTP status.
	#[error("Authority returned an unexpected response: {message}.")]
	UnexpectedStatus {
		/// Authority- or broker-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Authority responded with malformed JSON that could not be parsed.
	#[error("Authority returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl RemoteError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for RemoteError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
