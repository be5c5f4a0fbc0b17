//! Opaque credential wrapper that redacts sensitive material.

// crates.io
use serde_json::Value;
// self
use crate::_prelude::*;

/// Provider-defined credential bag treated as an opaque value by the broker.
///
/// The broker never inspects the contents—it only stores and forwards them. Debug and Display
/// output is redacted so credentials cannot leak through logs. JSON `null`, `""`, `{}`, and `[]`
/// count as empty and are never committed to a session store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(Value);
impl Credential {
	/// Wraps a raw authority payload; returns `None` when the payload counts as empty.
	pub fn from_value(value: Value) -> Option<Self> {
		if value_is_empty(&value) { None } else { Some(Self(value)) }
	}

	/// Read-only view of the opaque payload, for forwarding to a `load` call.
	pub fn as_value(&self) -> &Value {
		&self.0
	}

	/// Consumes the credential, yielding the opaque payload.
	pub fn into_value(self) -> Value {
		self.0
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Credential").field(&"<redacted>").finish()
	}
}
impl Display for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

fn value_is_empty(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.is_empty(),
		Value::Object(map) => map.is_empty(),
		Value::Array(items) => items.is_empty(),
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn empty_payloads_never_become_credentials() {
		assert!(Credential::from_value(Value::Null).is_none());
		assert!(Credential::from_value(json!("")).is_none());
		assert!(Credential::from_value(json!({})).is_none());
		assert!(Credential::from_value(json!([])).is_none());
		assert!(Credential::from_value(json!({ "access_token": "tok" })).is_some());
	}

	#[test]
	fn formatters_redact() {
		let credential = Credential::from_value(json!({ "access_token": "super-secret" }))
			.expect("Non-empty payload should become a credential.");

		assert_eq!(format!("{credential:?}"), "Credential(\"<redacted>\")");
		assert_eq!(format!("{credential}"), "<redacted>");
	}

	#[test]
	fn payload_round_trips_opaquely() {
		let payload = json!({ "access_token": "tok", "expires_in": 3600 });
		let credential = Credential::from_value(payload.clone())
			.expect("Non-empty payload should become a credential.");

		assert_eq!(credential.as_value(), &payload);

		let serialized =
			serde_json::to_value(&credential).expect("Credential should serialize transparently.");

		assert_eq!(serialized, payload);
	}
}
