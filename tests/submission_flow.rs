//! End-to-end tests of the submit-and-poll flow against a mock service.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sp_core::sr25519;
use sp_core::Pair as _;

use txd_client::auth::token::request_digest;
use txd_client::auth::Signer as _;
use txd_client::{DidKeypair, Shutdown, StatusPoller, SubmissionStatus, TxdClient, TxdError};

mod common;

const TEST_SEED: &str = "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

fn test_client(base_url: url::Url) -> (TxdClient, Arc<DidKeypair>) {
    let keypair = Arc::new(DidKeypair::from_seed_phrase(TEST_SEED).unwrap());
    (TxdClient::new(base_url, keypair.clone()), keypair)
}

#[tokio::test]
async fn test_submit_and_poll_to_finalization() {
    let mock = common::MockTxd::start(
        "abc",
        vec!["Pending", "Pending", "InBlock", "Finalized"],
    )
    .await;
    let (client, _) = test_client(mock.base_url());

    let id = client.submit("0x00").await.unwrap();
    assert_eq!(id.as_str(), "abc");

    let shutdown = Shutdown::new();
    let status = StatusPoller::new(client)
        .with_interval(Duration::from_millis(25))
        .with_timeout(Duration::from_secs(5))
        .poll_until_terminal(&id, shutdown.subscribe())
        .await
        .unwrap();

    assert_eq!(status, SubmissionStatus::Finalized);
    assert_eq!(mock.status_calls(), 4);
}

#[tokio::test]
async fn test_endless_pending_ends_in_timeout() {
    let mock = common::MockTxd::start("xyz", vec!["Pending"]).await;
    let (client, _) = test_client(mock.base_url());

    let id = client.submit("0x00").await.unwrap();
    assert_eq!(id.as_str(), "xyz");

    let shutdown = Shutdown::new();
    let err = StatusPoller::new(client)
        .with_interval(Duration::from_millis(100))
        .with_timeout(Duration::from_millis(350))
        .poll_until_terminal(&id, shutdown.subscribe())
        .await
        .unwrap_err();

    assert!(matches!(err, TxdError::PollTimeout { .. }));
    assert!(mock.status_calls() >= 2);
}

#[tokio::test]
async fn test_remote_failure_is_terminal_and_distinct_from_timeout() {
    let mock = common::MockTxd::start("abc", vec!["Pending", "Failed"]).await;
    let (client, _) = test_client(mock.base_url());

    let id = client.submit("0x00").await.unwrap();

    let shutdown = Shutdown::new();
    let status = StatusPoller::new(client)
        .with_interval(Duration::from_millis(25))
        .with_timeout(Duration::from_secs(5))
        .poll_until_terminal(&id, shutdown.subscribe())
        .await
        .unwrap();

    assert_eq!(status, SubmissionStatus::Failed);
    assert_eq!(mock.status_calls(), 2);
}

#[tokio::test]
async fn test_rejected_submission_is_fatal() {
    let mock = common::MockTxd::start_rejecting(403).await;
    let (client, _) = test_client(mock.base_url());

    let err = client.submit("0x00").await.unwrap_err();
    assert!(matches!(err, TxdError::Rejected { status: 403, .. }));
    // Exactly one attempt; submission is never retried by the client.
    assert_eq!(mock.submissions().len(), 1);
}

#[tokio::test]
async fn test_submission_token_binds_path_and_body() {
    let mock = common::MockTxd::start("abc", vec!["Finalized"]).await;
    let (client, keypair) = test_client(mock.base_url());

    client.submit("0x00").await.unwrap();

    let captured = mock.submissions();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].body, "0x00");

    let segments: Vec<&str> = captured[0].token.split('.').collect();
    assert_eq!(segments.len(), 3);

    // Header names the DID key that signed the request.
    let header = URL_SAFE_NO_PAD.decode(segments[0]).unwrap();
    let header: serde_json::Value = serde_json::from_slice(&header).unwrap();
    assert_eq!(header["kid"], keypair.key_uri());

    // Payload is the digest of exactly this path and body.
    let payload = URL_SAFE_NO_PAD.decode(segments[1]).unwrap();
    let digest = request_digest("/api/v1/submission", b"0x00");
    assert_eq!(payload, digest);

    // Signature verifies against the DID authentication key.
    let signature = URL_SAFE_NO_PAD.decode(segments[2]).unwrap();
    let signature = sr25519::Signature::from_raw(<[u8; 64]>::try_from(&signature[..]).unwrap());
    assert!(sr25519::Pair::verify(&signature, digest, &keypair.public()));
}

#[tokio::test]
async fn test_status_token_binds_the_id_specific_path() {
    let mock = common::MockTxd::start("abc", vec!["Finalized"]).await;
    let (client, _) = test_client(mock.base_url());

    let id = client.submit("0x00").await.unwrap();

    let shutdown = Shutdown::new();
    StatusPoller::new(client)
        .with_interval(Duration::from_millis(25))
        .poll_until_terminal(&id, shutdown.subscribe())
        .await
        .unwrap();

    let captured = mock.status_requests();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].body, "abc");

    // Status GETs carry a token over the id-specific path with an empty body.
    let payload = URL_SAFE_NO_PAD
        .decode(captured[0].token.split('.').nth(1).unwrap())
        .unwrap();
    assert_eq!(payload, request_digest("/api/v1/submission/abc", b""));
}
