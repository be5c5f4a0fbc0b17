// crates.io
use serde_json::json;
// self
use link_broker::{
	_preludet::*,
	provider::Provider,
	session::{ConnectionStatus, Credential, FailureReason},
	store::{BeginOutcome, MemoryStore, SessionStore},
};

fn credential(token: &str) -> Credential {
	Credential::from_value(json!({ "access_token": token }))
		.expect("Credential fixture should be non-empty.")
}

#[tokio::test]
async fn untouched_keys_read_idle_without_credential() {
	let store = MemoryStore::default();
	let key = test_session_key(Provider::HubSpot);
	let snapshot = store.snapshot(&key).await.expect("Snapshot should succeed.");

	assert_eq!(snapshot.status, ConnectionStatus::Idle);
	assert!(snapshot.credential.is_none());
	assert!(snapshot.updated_at.is_none());
}

#[tokio::test]
async fn begin_claims_the_key_exactly_once() {
	let store = MemoryStore::default();
	let key = test_session_key(Provider::Notion);

	assert_eq!(store.begin(&key).await.expect("First begin should succeed."), BeginOutcome::Started);
	assert_eq!(
		store.begin(&key).await.expect("Second begin should succeed."),
		BeginOutcome::AlreadyConnecting
	);

	let snapshot = store.snapshot(&key).await.expect("Snapshot should succeed.");

	assert_eq!(snapshot.status, ConnectionStatus::Connecting);
}

#[tokio::test]
async fn concurrent_begin_allows_single_winner() {
	let store = MemoryStore::default();
	let key = test_session_key(Provider::Airtable);
	let store_a = store.clone();
	let store_b = store.clone();
	let key_a = key.clone();
	let key_b = key.clone();
	let task_a =
		tokio::spawn(
			async move { store_a.begin(&key_a).await.expect("Begin task A should succeed.") },
		);
	let task_b =
		tokio::spawn(
			async move { store_b.begin(&key_b).await.expect("Begin task B should succeed.") },
		);
	let (outcome_a, outcome_b) = tokio::join!(task_a, task_b);
	let outcome_a = outcome_a.expect("Begin task A should not panic.");
	let outcome_b = outcome_b.expect("Begin task B should not panic.");
	let winners = [outcome_a, outcome_b]
		.iter()
		.filter(|outcome| matches!(outcome, BeginOutcome::Started))
		.count();

	assert_eq!(winners, 1, "only one begin may claim the key");
}

#[tokio::test]
async fn complete_commits_the_credential_and_connected_status() {
	let store = MemoryStore::default();
	let key = test_session_key(Provider::HubSpot);

	store.begin(&key).await.expect("Begin should succeed.");
	store.complete(&key, credential("tok-1")).await.expect("Complete should succeed.");

	let snapshot = store.snapshot(&key).await.expect("Snapshot should succeed.");

	assert_eq!(snapshot.status, ConnectionStatus::Connected);
	assert_eq!(snapshot.credential, Some(credential("tok-1")));
	assert!(snapshot.updated_at.is_some());
}

#[tokio::test]
async fn connected_iff_credential_held_across_transitions() {
	let store = MemoryStore::default();
	let key = test_session_key(Provider::Notion);

	for _ in 0..3 {
		store.begin(&key).await.expect("Begin should succeed.");
		store.complete(&key, credential("tok")).await.expect("Complete should succeed.");

		let snapshot = store.snapshot(&key).await.expect("Snapshot should succeed.");

		assert_eq!(snapshot.status.is_connected(), snapshot.credential.is_some());

		store.begin(&key).await.expect("Reconnect begin should succeed.");
		store.fail(&key, FailureReason::NoCredentialYet).await.expect("Fail should succeed.");

		let snapshot = store.snapshot(&key).await.expect("Snapshot should succeed.");

		assert_eq!(snapshot.status.is_connected(), snapshot.credential.is_some());
	}
}

#[tokio::test]
async fn fail_discards_any_prior_credential() {
	let store = MemoryStore::default();
	let key = test_session_key(Provider::Airtable);

	store.begin(&key).await.expect("Begin should succeed.");
	store.complete(&key, credential("tok-old")).await.expect("Complete should succeed.");
	store.begin(&key).await.expect("Reconnect begin should succeed.");
	store.fail(&key, FailureReason::RemoteUnavailable).await.expect("Fail should succeed.");

	let snapshot = store.snapshot(&key).await.expect("Snapshot should succeed.");

	assert_eq!(snapshot.status, ConnectionStatus::Failed(FailureReason::RemoteUnavailable));
	assert!(snapshot.credential.is_none());
}

#[tokio::test]
async fn reconnect_replaces_the_credential_atomically() {
	let store = MemoryStore::default();
	let key = test_session_key(Provider::HubSpot);

	store.begin(&key).await.expect("Begin should succeed.");
	store.complete(&key, credential("tok-old")).await.expect("First complete should succeed.");
	store.begin(&key).await.expect("Reconnect begin should succeed.");

	// The old credential stays visible while the reconnect attempt is in flight.
	let mid_flight = store.snapshot(&key).await.expect("Snapshot should succeed.");

	assert_eq!(mid_flight.status, ConnectionStatus::Connecting);
	assert_eq!(mid_flight.credential, Some(credential("tok-old")));

	store.complete(&key, credential("tok-new")).await.expect("Second complete should succeed.");

	let snapshot = store.snapshot(&key).await.expect("Snapshot should succeed.");

	assert_eq!(snapshot.credential, Some(credential("tok-new")));
}

#[tokio::test]
async fn reset_restores_the_pre_attempt_settled_status() {
	let store = MemoryStore::default();
	let fresh = test_session_key(Provider::Notion);

	store.begin(&fresh).await.expect("Begin should succeed.");

	let restored = store.reset(&fresh).await.expect("Reset should succeed.");

	assert_eq!(restored, ConnectionStatus::Idle);

	let connected = test_session_key(Provider::HubSpot);

	store.begin(&connected).await.expect("Begin should succeed.");
	store.complete(&connected, credential("tok")).await.expect("Complete should succeed.");
	store.begin(&connected).await.expect("Reconnect begin should succeed.");

	let restored = store.reset(&connected).await.expect("Reset should succeed.");

	assert_eq!(restored, ConnectionStatus::Connected);

	let snapshot = store.snapshot(&connected).await.expect("Snapshot should succeed.");

	assert_eq!(snapshot.status, ConnectionStatus::Connected);
	assert_eq!(snapshot.credential, Some(credential("tok")));
}

#[tokio::test]
async fn keys_are_scoped_per_provider() {
	let store = MemoryStore::default();
	let hubspot = test_session_key(Provider::HubSpot);
	let notion = test_session_key(Provider::Notion);

	store.begin(&hubspot).await.expect("Begin should succeed.");
	store.complete(&hubspot, credential("tok-hs")).await.expect("Complete should succeed.");

	let snapshot = store.snapshot(&notion).await.expect("Snapshot should succeed.");

	assert_eq!(snapshot.status, ConnectionStatus::Idle);
	assert!(snapshot.credential.is_none());
}
