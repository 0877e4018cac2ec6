use std::collections::HashMap;

use memory_sidecar_impl::MemorySidecar;
use serde::{Deserialize, Serialize};
use valet_core::client::{ClientError, RuntimeClient};
use valet_core::options::{Concurrency, StateOptions};


#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
struct Account {
    owner: String,
    balance: i64,
}

#[tokio::test]
async fn conditional_writes_follow_the_etag() {
    let client = RuntimeClient::new(MemorySidecar::default());

    client
        .save_state("store1", "k1", &42, None, None)
        .await
        .unwrap();

    let (value, etag) = client
        .get_state_and_etag::<i32>("store1", "k1", None)
        .await
        .unwrap();
    assert_eq!(value, 42);

    let accepted = client
        .try_save_state("store1", "k1", &43, &etag, None, None)
        .await
        .unwrap();
    assert!(accepted, "write with a fresh etag must succeed");

    let accepted = client
        .try_save_state("store1", "k1", &44, &etag, None, None)
        .await
        .unwrap();
    assert!(!accepted, "write with a stale etag must be rejected");

    // The rejected write left no mutation behind.
    let current: i32 = client.get_state("store1", "k1", None).await.unwrap();
    assert_eq!(current, 43);
}

#[tokio::test]
async fn unconditional_save_overwrites_any_version() {
    let client = RuntimeClient::new(MemorySidecar::default());

    client
        .save_state("store1", "k1", &1, None, None)
        .await
        .unwrap();
    client
        .save_state("store1", "k1", &2, None, None)
        .await
        .unwrap();

    let current: i32 = client.get_state("store1", "k1", None).await.unwrap();
    assert_eq!(current, 2);
}

#[tokio::test]
async fn missing_key_reads_as_the_default_value() {
    let client = RuntimeClient::new(MemorySidecar::default());

    let account: Account = client.get_state("store1", "absent", None).await.unwrap();
    assert_eq!(account, Account::default());
}

#[tokio::test]
async fn state_round_trips_a_struct() {
    let client = RuntimeClient::new(MemorySidecar::default());
    let account = Account {
        owner: "ada".to_string(),
        balance: 1200,
    };

    let options = StateOptions {
        concurrency: Some(Concurrency::FirstWrite),
        ..StateOptions::default()
    };
    client
        .save_state("store1", "acct", &account, Some(&options), None)
        .await
        .unwrap();

    let read: Account = client.get_state("store1", "acct", None).await.unwrap();
    assert_eq!(read, account);
}

#[tokio::test]
async fn conditional_delete_follows_the_etag() {
    let client = RuntimeClient::new(MemorySidecar::default());

    client
        .save_state("store1", "k1", &"v1", None, None)
        .await
        .unwrap();
    let (_, etag) = client
        .get_state_and_etag::<String>("store1", "k1", None)
        .await
        .unwrap();

    let deleted = client
        .try_delete_state("store1", "k1", Some("stale"), None)
        .await
        .unwrap();
    assert!(!deleted, "delete with a stale etag must be rejected");

    // The rejected delete left the value in place.
    let current: String = client.get_state("store1", "k1", None).await.unwrap();
    assert_eq!(current, "v1");

    let deleted = client
        .try_delete_state("store1", "k1", Some(&etag), None)
        .await
        .unwrap();
    assert!(deleted);

    let current: String = client.get_state("store1", "k1", None).await.unwrap();
    assert_eq!(current, String::default());
}

#[tokio::test]
async fn unconditional_delete_of_a_missing_key_succeeds() {
    let client = RuntimeClient::new(MemorySidecar::default());
    client.delete_state("store1", "absent", None).await.unwrap();
}

#[tokio::test]
async fn publishing_no_payload_differs_from_an_empty_one() {
    let sidecar = MemorySidecar::default();
    let client = RuntimeClient::new(sidecar.clone());

    client
        .publish_event::<serde_json::Value>("topic1", None)
        .await
        .unwrap();
    client.publish_event("topic1", Some("")).await.unwrap();

    let published = sidecar.published();
    assert_eq!(published.len(), 2);
    assert!(
        published[0].data.is_none(),
        "publishing nothing must set no payload on the wire"
    );
    assert!(
        published[1].data.is_some(),
        "publishing an empty value must still set a payload"
    );
}

#[tokio::test]
async fn binding_invocation_forwards_metadata_verbatim() {
    let sidecar = MemorySidecar::default();
    let client = RuntimeClient::new(sidecar.clone());

    let metadata = HashMap::from([("ttl".to_string(), "60".to_string())]);
    client
        .invoke_binding("queue", &"job-1", Some(metadata.clone()))
        .await
        .unwrap();

    let bindings = sidecar.bindings();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].name, "queue");
    assert_eq!(bindings[0].metadata, metadata);
}

#[tokio::test]
async fn invoking_with_no_argument_yields_the_default_response() {
    let client = RuntimeClient::new(MemorySidecar::default());

    // The in-memory sidecar echoes the request payload, so an argument-less call
    // comes back with an empty payload.
    let response: Account = client
        .invoke_method::<serde_json::Value, Account>("app1", "method1", None, None)
        .await
        .unwrap();
    assert_eq!(response, Account::default());
}

#[tokio::test]
async fn invoking_with_a_typed_argument_round_trips() {
    let client = RuntimeClient::new(MemorySidecar::default());
    let account = Account {
        owner: "grace".to_string(),
        balance: 7,
    };

    let response: Account = client
        .invoke_method("app1", "echo", Some(&account), None)
        .await
        .unwrap();
    assert_eq!(response, account);
}

#[tokio::test]
async fn secrets_are_returned_as_a_flat_mapping() {
    let sidecar = MemorySidecar::default();
    let client = RuntimeClient::new(sidecar.clone());

    let secret = HashMap::from([("password".to_string(), "hunter2".to_string())]);
    sidecar.insert_secret("vault", "db", secret.clone());

    let fetched = client.get_secret("vault", "db", None).await.unwrap();
    assert_eq!(fetched, secret);
}

#[tokio::test]
async fn missing_secrets_propagate_the_remote_error() {
    let client = RuntimeClient::new(MemorySidecar::default());

    let result = client.get_secret("vault", "absent", None).await;
    assert!(matches!(result, Err(ClientError::Rpc(_))));
}

#[tokio::test]
async fn empty_identifiers_fail_before_any_sidecar_call() {
    let sidecar = MemorySidecar::default();
    let client = RuntimeClient::new(sidecar.clone());

    let result = client.publish_event("", Some(&1)).await;
    assert!(matches!(
        result,
        Err(ClientError::InvalidArgument { name: "topic", .. })
    ));

    let result = client.get_state::<i32>("store1", "", None).await;
    assert!(matches!(
        result,
        Err(ClientError::InvalidArgument { name: "key", .. })
    ));

    let result = client.invoke_method::<i32, i32>("", "method1", None, None).await;
    assert!(matches!(
        result,
        Err(ClientError::InvalidArgument { name: "app_id", .. })
    ));

    assert!(sidecar.published().is_empty());
}

#[tokio::test]
async fn try_variants_do_not_swallow_validation_errors() {
    let client = RuntimeClient::new(MemorySidecar::default());

    // Only the RPC failure category converts to a boolean; a local validation
    // failure must still surface as an error.
    let result = client.try_save_state("store1", "", &1, "1", None, None).await;
    assert!(matches!(
        result,
        Err(ClientError::InvalidArgument { name: "key", .. })
    ));

    let result = client.try_delete_state("", "k1", None, None).await;
    assert!(matches!(
        result,
        Err(ClientError::InvalidArgument { name: "store_name", .. })
    ));
}
