#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use link_broker::{
	_preludet::*,
	authority::AuthorityClient,
	error::RemoteError,
	provider::Provider,
};

fn base(server: &MockServer) -> Url {
	Url::parse(&server.base_url()).expect("Mock server base URL should parse successfully.")
}

#[tokio::test]
async fn authorize_posts_the_session_form_and_returns_the_url() {
	let server = MockServer::start_async().await;
	let authority = test_reqwest_authority(base(&server));
	let key = test_session_key(Provider::HubSpot);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/integrations/hubspot/authorize")
				.body("user_id=user-1&org_id=org-1");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"url\":\"https://auth.example.com/approve?state=abc\"}");
		})
		.await;
	let url = authority
		.authorization_url(&key)
		.await
		.expect("Authorization URL request should succeed.");

	mock.assert_async().await;

	assert_eq!(url.as_str(), "https://auth.example.com/approve?state=abc");
}

#[tokio::test]
async fn authorize_keeps_the_base_path_prefix() {
	let server = MockServer::start_async().await;
	let prefixed = Url::parse(&format!("{}/api", server.base_url()))
		.expect("Prefixed base URL should parse successfully.");
	let authority = test_reqwest_authority(prefixed);
	let key = test_session_key(Provider::HubSpot);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/integrations/hubspot/authorize");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"url\":\"https://auth.example.com/approve\"}");
		})
		.await;

	authority
		.authorization_url(&key)
		.await
		.expect("Authorization URL request should succeed against a prefixed base.");

	mock.assert_async().await;
}

#[tokio::test]
async fn authorize_maps_backend_rejections_to_invalid_session() {
	let server = MockServer::start_async().await;
	let authority = test_reqwest_authority(base(&server));
	let key = test_session_key(Provider::Notion);

	server
		.mock_async(|when, then| {
			when.method(POST).path("/integrations/notion/authorize");
			then.status(400).body("user_id is required");
		})
		.await;

	let err = authority
		.authorization_url(&key)
		.await
		.expect_err("Backend rejection should surface as an error.");

	assert!(matches!(err, Error::InvalidSession { .. }));
	assert!(err.to_string().contains("user_id is required"));
}

#[tokio::test]
async fn authorize_maps_server_errors_to_remote_unavailable() {
	let server = MockServer::start_async().await;
	let authority = test_reqwest_authority(base(&server));
	let key = test_session_key(Provider::Airtable);

	server
		.mock_async(|when, then| {
			when.method(POST).path("/integrations/airtable/authorize");
			then.status(503);
		})
		.await;

	let err = authority
		.authorization_url(&key)
		.await
		.expect_err("Server errors should surface as remote failures.");

	assert!(matches!(
		err,
		Error::Remote(RemoteError::UnexpectedStatus { status: Some(503), .. })
	));
}

#[tokio::test]
async fn authorize_rejects_malformed_payloads() {
	let server = MockServer::start_async().await;
	let authority = test_reqwest_authority(base(&server));
	let key = test_session_key(Provider::HubSpot);

	server
		.mock_async(|when, then| {
			when.method(POST).path("/integrations/hubspot/authorize");
			then.status(200).header("content-type", "application/json").body("{\"link\":1}");
		})
		.await;

	let err = authority
		.authorization_url(&key)
		.await
		.expect_err("Payload without a url field should fail to parse.");

	assert!(matches!(err, Error::Remote(RemoteError::ResponseParse { .. })));
}

#[tokio::test]
async fn credentials_return_the_opaque_bag() {
	let server = MockServer::start_async().await;
	let authority = test_reqwest_authority(base(&server));
	let key = test_session_key(Provider::HubSpot);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/integrations/hubspot/credentials")
				.body("user_id=user-1&org_id=org-1");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"tok\",\"expires_in\":3600}");
		})
		.await;
	let credential = authority
		.credential(&key)
		.await
		.expect("Credential request should succeed.")
		.expect("A non-empty payload should yield a credential.");

	mock.assert_async().await;

	assert_eq!(
		credential.as_value(),
		&serde_json::json!({ "access_token": "tok", "expires_in": 3600 })
	);
}

#[tokio::test]
async fn empty_credential_payloads_normalize_to_none() {
	for body in ["", "null", "\"\"", "{}", "[]"] {
		let server = MockServer::start_async().await;
		let authority = test_reqwest_authority(base(&server));
		let key = test_session_key(Provider::Notion);

		server
			.mock_async(move |when, then| {
				when.method(POST).path("/integrations/notion/credentials");
				then.status(200).header("content-type", "application/json").body(body);
			})
			.await;

		let credential =
			authority.credential(&key).await.expect("Credential request should succeed.");

		assert!(credential.is_none(), "body {body:?} must normalize to no credential");
	}
}
