//! Message types for `runtime.v1.Sidecar`.
//!
//! Payload-carrying fields are `Option<prost_types::Any>`: `None` means "no payload
//! set" on the wire, which is distinct from an `Any` holding zero bytes. Optional
//! scalar fields use proto3 `optional` semantics and are only serialized when present.
use std::collections::HashMap;

/// Publishes a payload to a pub/sub topic.
#[derive(Clone, PartialEq, prost::Message)]
pub struct PublishEventRequest {
    #[prost(string, tag = "1")]
    pub topic: String,
    #[prost(message, optional, tag = "2")]
    pub data: Option<prost_types::Any>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct PublishEventResponse {}

/// Triggers an output binding.
#[derive(Clone, PartialEq, prost::Message)]
pub struct InvokeBindingRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub data: Option<prost_types::Any>,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct InvokeBindingResponse {}

/// Calls a method on another application through the sidecar.
#[derive(Clone, PartialEq, prost::Message)]
pub struct InvokeServiceRequest {
    /// Identifier of the target application.
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub method: String,
    #[prost(message, optional, tag = "3")]
    pub data: Option<prost_types::Any>,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct InvokeServiceResponse {
    #[prost(message, optional, tag = "1")]
    pub data: Option<prost_types::Any>,
}

/// Reads a key from a state store.
#[derive(Clone, PartialEq, prost::Message)]
pub struct GetStateRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(message, optional, tag = "3")]
    pub options: Option<StateReadOptions>,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetStateResponse {
    #[prost(message, optional, tag = "1")]
    pub data: Option<prost_types::Any>,
    /// Opaque version token gating subsequent conditional writes.
    #[prost(string, tag = "2")]
    pub etag: String,
}

/// Writes a batch of state items to a store.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SaveStateRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(message, repeated, tag = "2")]
    pub states: Vec<StateItem>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct SaveStateResponse {}

/// A single keyed value within a [`SaveStateRequest`].
#[derive(Clone, PartialEq, prost::Message)]
pub struct StateItem {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(message, optional, tag = "2")]
    pub value: Option<prost_types::Any>,
    /// When present the store rejects the write unless its current version matches.
    #[prost(string, optional, tag = "3")]
    pub etag: Option<String>,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
    #[prost(message, optional, tag = "5")]
    pub options: Option<StateWriteOptions>,
}

/// Deletes a key from a state store.
#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteStateRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(string, optional, tag = "3")]
    pub etag: Option<String>,
    #[prost(message, optional, tag = "4")]
    pub options: Option<StateWriteOptions>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct DeleteStateResponse {}

/// Retrieves a secret from a secret store.
#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSecretRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSecretResponse {
    #[prost(map = "string, string", tag = "1")]
    pub data: HashMap<String, String>,
}

/// Options attached to state reads. Reads carry a consistency hint only.
#[derive(Clone, PartialEq, prost::Message)]
pub struct StateReadOptions {
    #[prost(string, optional, tag = "1")]
    pub consistency: Option<String>,
}

/// Options attached to state writes and deletes.
#[derive(Clone, PartialEq, prost::Message)]
pub struct StateWriteOptions {
    #[prost(string, optional, tag = "1")]
    pub concurrency: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub consistency: Option<String>,
    #[prost(message, optional, tag = "3")]
    pub retry_policy: Option<RetryPolicy>,
}

/// Retry hint forwarded to the store. Describes how the store should retry its own
/// internal operation; the client never retries on the caller's behalf.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RetryPolicy {
    #[prost(string, optional, tag = "1")]
    pub pattern: Option<String>,
    #[prost(message, optional, tag = "2")]
    pub interval: Option<prost_types::Duration>,
    #[prost(int32, optional, tag = "3")]
    pub threshold: Option<i32>,
}
