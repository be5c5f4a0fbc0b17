//! Session key scoping all connection state to one user/organization/provider tuple.

// self
use crate::{
	_prelude::*,
	provider::Provider,
	session::{OrganizationId, UserId},
};

/// Identity tuple scoping connection state to a user, organization, and provider.
///
/// The triple is the whole identity: two sessions with the same triple never coexist, and a new
/// connect attempt overwrites the prior state for the key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
	/// End user linking the account.
	pub user: UserId,
	/// Organization the user acts within.
	pub organization: OrganizationId,
	/// Third-party provider being linked.
	pub provider: Provider,
}
impl SessionKey {
	/// Creates a key for the provided user, organization, and provider.
	pub fn new(user: UserId, organization: OrganizationId, provider: Provider) -> Self {
		Self { user, organization, provider }
	}
}
impl Display for SessionKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}:{}:{}", self.user, self.organization, self.provider)
	}
}
