//! Closed set of supported third-party providers and their authority endpoint paths.
//!
//! Adding a provider is a closed, reviewable change: one new variant plus its endpoint paths.
//! Nothing else in the broker branches on the provider.

// self
use crate::_prelude::*;

/// Third-party system a user can link to the host application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
	/// Airtable bases.
	Airtable,
	/// Notion workspaces.
	Notion,
	/// HubSpot CRM accounts.
	HubSpot,
}
impl Provider {
	/// All supported providers, in a stable order.
	pub const ALL: [Self; 3] = [Self::Airtable, Self::Notion, Self::HubSpot];

	/// Returns the stable slug used in endpoint paths and metric labels.
	pub const fn slug(&self) -> &'static str {
		match self {
			Self::Airtable => "airtable",
			Self::Notion => "notion",
			Self::HubSpot => "hubspot",
		}
	}

	/// Authority path that mints a one-time authorization URL for this provider.
	///
	/// Relative on purpose: joined against the authority base URL, so a base carrying a path
	/// prefix (`https://gateway.example.com/api/`) keeps it.
	pub fn authorize_path(&self) -> String {
		format!("integrations/{}/authorize", self.slug())
	}

	/// Authority path that yields the exchanged credential, if one exists. Relative, like
	/// [`authorize_path`](Self::authorize_path).
	pub fn credentials_path(&self) -> String {
		format!("integrations/{}/credentials", self.slug())
	}

	/// Authority path the presentation layer uses to load records with a committed credential.
	/// The broker itself never issues this call.
	pub fn load_path(&self) -> String {
		format!("integrations/{}/load", self.slug())
	}
}
impl Display for Provider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.slug())
	}
}
impl FromStr for Provider {
	type Err = ProviderParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.iter()
			.find(|provider| provider.slug().eq_ignore_ascii_case(s))
			.copied()
			.ok_or_else(|| ProviderParseError { raw: s.to_owned() })
	}
}

/// Error returned when parsing an unknown provider slug.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown provider `{raw}`.")]
pub struct ProviderParseError {
	/// The unrecognized input.
	pub raw: String,
}
