//! Remote authority contracts: minting authorization URLs and fetching exchanged credentials.
//!
//! The authority is the backend that owns the actual token exchange and credential storage; this
//! crate only talks to it. Two operations exist per provider: `authorize` mints a one-time
//! authorization URL for a session key, and `credentials` yields the exchanged credential once
//! the user has approved access—or nothing, when they have not.

// self
use crate::{
	_prelude::*,
	session::{Credential, SessionKey},
};
#[cfg(feature = "reqwest")] use crate::error::RemoteError;

/// Boxed future returned by authority operations.
pub type AuthorityFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Contract for the remote authority that backs the handshake.
///
/// Implementations are pure request/response with no shared mutable state; the connection
/// controller owns all sequencing. Errors map onto the broker taxonomy: transport and backend
/// failures become [`Error::Remote`](crate::error::Error::Remote), rejected identifiers become
/// [`Error::InvalidSession`](crate::error::Error::InvalidSession).
pub trait AuthorityClient
where
	Self: Send + Sync,
{
	/// Requests a one-time authorization URL for the session key.
	fn authorization_url<'a>(&'a self, key: &'a SessionKey) -> AuthorityFuture<'a, Url>;

	/// Asks whether a credential now exists for the session key and retrieves it.
	///
	/// `None` means the user has not completed authorization—an expected outcome, distinct from
	/// any transport failure.
	fn credential<'a>(&'a self, key: &'a SessionKey) -> AuthorityFuture<'a, Option<Credential>>;
}

#[cfg(feature = "reqwest")]
#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
	url: String,
}

/// Reqwest-backed [`AuthorityClient`] speaking the form-encoded integration protocol.
///
/// Both calls POST `user_id` and `org_id` as form fields to the provider-specific path under the
/// configured base URL. The authorize response is `{ "url": "..." }`; the credentials response is
/// an arbitrary JSON bag, with empty payloads normalized to `None`.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestAuthorityClient {
	base: Url,
	client: ReqwestClient,
}
#[cfg(feature = "reqwest")]
impl ReqwestAuthorityClient {
	/// Creates a client for the authority at `base` with a default reqwest transport.
	pub fn new(base: Url) -> Self {
		Self::with_client(base, ReqwestClient::default())
	}

	/// Creates a client reusing a caller-provided reqwest transport.
	///
	/// The base URL is normalized to end in `/` so joining the relative provider paths keeps any
	/// path prefix the base carries (`…/api` and `…/api/` behave identically).
	pub fn with_client(mut base: Url, client: ReqwestClient) -> Self {
		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());

			base.set_path(&path);
		}

		Self { base, client }
	}

	/// The configured authority base URL.
	pub fn base(&self) -> &Url {
		&self.base
	}

	fn endpoint(&self, path: &str) -> Result<Url> {
		self.base.join(path).map_err(|e| {
			Error::Remote(RemoteError::UnexpectedStatus {
				message: format!("invalid authority endpoint `{path}`: {e}"),
				status: None,
			})
		})
	}

	async fn post_form(&self, url: Url, key: &SessionKey) -> Result<(u16, Vec<u8>)> {
		let form =
			[("user_id", key.user.as_ref().to_owned()), ("org_id", key.organization.as_ref().to_owned())];
		let response =
			self.client.post(url).form(&form).send().await.map_err(RemoteError::from)?;
		let status = response.status().as_u16();
		let body = response.bytes().await.map_err(RemoteError::from)?.to_vec();

		Ok((status, body))
	}

	fn classify_status(status: u16, body: &[u8]) -> Result<()> {
		if (200..300).contains(&status) {
			return Ok(());
		}

		let message = String::from_utf8_lossy(body).trim().to_owned();

		// FastAPI-style backends report identifier problems as 400s with a detail payload.
		if status == 400 || status == 422 {
			return Err(Error::InvalidSession {
				reason: if message.is_empty() { format!("status {status}") } else { message },
			});
		}

		Err(Error::Remote(RemoteError::UnexpectedStatus {
			message: if message.is_empty() { format!("status {status}") } else { message },
			status: Some(status),
		}))
	}

	fn parse_json<T>(body: &[u8]) -> Result<T>
	where
		T: for<'de> Deserialize<'de>,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Remote(RemoteError::ResponseParse { source }))
	}
}
#[cfg(feature = "reqwest")]
impl AuthorityClient for ReqwestAuthorityClient {
	fn authorization_url<'a>(&'a self, key: &'a SessionKey) -> AuthorityFuture<'a, Url> {
		Box::pin(async move {
			let endpoint = self.endpoint(&key.provider.authorize_path())?;
			let (status, body) = self.post_form(endpoint, key).await?;

			Self::classify_status(status, &body)?;

			let response: AuthorizeResponse = Self::parse_json(&body)?;

			Url::parse(&response.url).map_err(|e| {
				Error::Remote(RemoteError::UnexpectedStatus {
					message: format!("authority returned an unparsable authorization URL: {e}"),
					status: Some(status),
				})
			})
		})
	}

	fn credential<'a>(&'a self, key: &'a SessionKey) -> AuthorityFuture<'a, Option<Credential>> {
		Box::pin(async move {
			let endpoint = self.endpoint(&key.provider.credentials_path())?;
			let (status, body) = self.post_form(endpoint, key).await?;

			Self::classify_status(status, &body)?;

			if body.is_empty() {
				return Ok(None);
			}

			let value: serde_json::Value = Self::parse_json(&body)?;

			Ok(Credential::from_value(value))
		})
	}
}
