//! # Runtime Client
//!
//! This module implements the high-level facade over the sidecar RPC contract.
//!
//! Every operation follows the same shape: validate arguments locally, build a wire
//! envelope (payloads through the [`PayloadCodec`], state options through the
//! [`options`] builders), dispatch through [`SidecarRpc`], and unwrap the response.
//! No operation retains state across calls; the client holds only its transport
//! handle and codec, both immutable after construction, and is safe for concurrent
//! use from many tasks.
//!
//! ## Error Handling
//!
//! * **[`ClientError::InvalidArgument`]** — empty required identifiers. Raised
//!   before any network activity.
//! * **[`ClientError::Rpc`]** — any failure surfaced by the transport, including a
//!   conditional write rejected over an etag mismatch. Propagated unchanged, except
//!   on [`try_save_state`](RuntimeClient::try_save_state) and
//!   [`try_delete_state`](RuntimeClient::try_delete_state), which convert exactly
//!   this category into `false`.
//! * **[`ClientError::Codec`]** — payload serialization or deserialization
//!   failures. Never swallowed, never retried.
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tonic::Status;

use crate::codec::{CodecError, JsonCodec, PayloadCodec};
use crate::options::{self, Consistency, StateOptions};
use crate::proto::runtime_v1 as pb;
use crate::rpc::SidecarRpc;
use crate::rpc::grpc::{ConnectError, GrpcSidecar};

/// Errors returned by [`RuntimeClient`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },
    #[error("Sidecar call failed: '{0}'")]
    Rpc(#[source] Status),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// The main client for interacting with the sidecar runtime.
///
/// Generic over the transport `T` and the payload codec `C`. The codec is fixed at
/// construction and applied to every payload in both directions; it cannot be
/// overridden per call.
#[derive(Debug, Clone)]
pub struct RuntimeClient<T, C = JsonCodec> {
    rpc: T,
    codec: C,
}

impl RuntimeClient<GrpcSidecar> {
    /// Connects to the sidecar and initializes a client with the default JSON codec.
    ///
    /// # Arguments
    ///
    /// * `addr` - The sidecar gRPC address (e.g. `http://localhost:50001`).
    pub async fn connect(addr: &str) -> Result<Self, ConnectError> {
        Ok(Self::new(GrpcSidecar::connect(addr).await?))
    }
}

impl<T: SidecarRpc> RuntimeClient<T> {
    /// Creates a client over an existing transport with the default JSON codec.
    pub fn new(rpc: T) -> Self {
        Self {
            rpc,
            codec: JsonCodec,
        }
    }
}

impl<T, C> RuntimeClient<T, C>
where
    T: SidecarRpc,
    C: PayloadCodec,
{
    /// Creates a client with a caller-supplied payload codec.
    pub fn with_codec(rpc: T, codec: C) -> Self {
        Self { rpc, codec }
    }

    /// Publishes a payload to a pub/sub topic.
    ///
    /// Fire-and-forget from the caller's perspective: the result signals completion,
    /// not a value. Passing `data: None` sends an envelope with no payload set,
    /// which is distinguishable on the wire from publishing an empty value.
    pub async fn publish_event<V>(&self, topic: &str, data: Option<&V>) -> Result<(), ClientError>
    where
        V: Serialize + ?Sized,
    {
        require("topic", topic)?;

        let request = pb::PublishEventRequest {
            topic: topic.to_string(),
            data: self.codec.encode(data)?,
        };

        self.rpc
            .publish_event(request)
            .await
            .map_err(ClientError::Rpc)?;
        Ok(())
    }

    /// Triggers an output binding with a payload and optional metadata.
    ///
    /// Metadata is forwarded to the binding verbatim.
    pub async fn invoke_binding<V>(
        &self,
        name: &str,
        data: &V,
        metadata: Option<HashMap<String, String>>,
    ) -> Result<(), ClientError>
    where
        V: Serialize + ?Sized,
    {
        require("name", name)?;

        let request = pb::InvokeBindingRequest {
            name: name.to_string(),
            data: self.codec.encode(Some(data))?,
            metadata: metadata.unwrap_or_default(),
        };

        self.rpc
            .invoke_binding(request)
            .await
            .map_err(ClientError::Rpc)?;
        Ok(())
    }

    /// Calls a method on another application through the sidecar.
    ///
    /// Covers every request/response shape: pass `data: None` for an argument-less
    /// call, and request `Resp = ()` for a void one. An empty response payload
    /// decodes to `Resp::default()`, never an error.
    ///
    /// # Arguments
    ///
    /// * `app_id` - Identifier of the target application.
    /// * `method` - Name of the method to invoke.
    /// * `data` - Optional request payload.
    /// * `metadata` - Forwarded to the target application verbatim.
    pub async fn invoke_method<Req, Resp>(
        &self,
        app_id: &str,
        method: &str,
        data: Option<&Req>,
        metadata: Option<HashMap<String, String>>,
    ) -> Result<Resp, ClientError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned + Default,
    {
        require("app_id", app_id)?;
        require("method", method)?;

        let request = pb::InvokeServiceRequest {
            id: app_id.to_string(),
            method: method.to_string(),
            data: self.codec.encode(data)?,
            metadata: metadata.unwrap_or_default(),
        };

        let response = self
            .rpc
            .invoke_service(request)
            .await
            .map_err(ClientError::Rpc)?;

        Ok(self.codec.decode(response.data)?)
    }

    /// Reads a key from a state store.
    ///
    /// An empty response payload yields `V::default()`: at this layer "key not
    /// found" is indistinguishable from "key found with an intentionally empty
    /// value". Callers that need the version token for a later conditional write
    /// should use [`get_state_and_etag`](Self::get_state_and_etag).
    pub async fn get_state<V>(
        &self,
        store_name: &str,
        key: &str,
        consistency: Option<Consistency>,
    ) -> Result<V, ClientError>
    where
        V: DeserializeOwned + Default,
    {
        let (value, _etag) = self.get_state_and_etag(store_name, key, consistency).await?;
        Ok(value)
    }

    /// Reads a key from a state store, returning the value together with its etag.
    ///
    /// The etag is an opaque version token; supply it to
    /// [`try_save_state`](Self::try_save_state) or
    /// [`try_delete_state`](Self::try_delete_state) to detect lost updates.
    pub async fn get_state_and_etag<V>(
        &self,
        store_name: &str,
        key: &str,
        consistency: Option<Consistency>,
    ) -> Result<(V, String), ClientError>
    where
        V: DeserializeOwned + Default,
    {
        require("store_name", store_name)?;
        require("key", key)?;

        // Requesting no consistency sends no options block at all, which is
        // distinct from an options block with an empty consistency field.
        let state_options = consistency.map(|consistency| StateOptions {
            consistency: Some(consistency),
            ..StateOptions::default()
        });

        let request = pb::GetStateRequest {
            store_name: store_name.to_string(),
            key: key.to_string(),
            options: options::read_options(state_options.as_ref()),
            metadata: HashMap::new(),
        };

        let response = self.rpc.get_state(request).await.map_err(ClientError::Rpc)?;
        let value = self.codec.decode(response.data)?;

        Ok((value, response.etag))
    }

    /// Writes a value to a state store unconditionally (no etag sent).
    ///
    /// Always overwrites whatever version the store holds; fails only on transport
    /// or store errors, which propagate unchanged.
    pub async fn save_state<V>(
        &self,
        store_name: &str,
        key: &str,
        value: &V,
        state_options: Option<&StateOptions>,
        metadata: Option<HashMap<String, String>>,
    ) -> Result<(), ClientError>
    where
        V: Serialize + ?Sized,
    {
        self.write_state(store_name, key, value, None, state_options, metadata)
            .await
    }

    /// Writes a value conditionally: the store accepts it only if its current
    /// version matches `etag`.
    ///
    /// Returns `false` if the sidecar call fails (including an etag mismatch).
    /// Local validation and payload encoding failures still propagate as errors;
    /// only the RPC failure category is converted to a boolean here.
    pub async fn try_save_state<V>(
        &self,
        store_name: &str,
        key: &str,
        value: &V,
        etag: &str,
        state_options: Option<&StateOptions>,
        metadata: Option<HashMap<String, String>>,
    ) -> Result<bool, ClientError>
    where
        V: Serialize + ?Sized,
    {
        let result = self
            .write_state(
                store_name,
                key,
                value,
                Some(etag.to_string()),
                state_options,
                metadata,
            )
            .await;

        match result {
            Ok(()) => Ok(true),
            Err(ClientError::Rpc(_)) => Ok(false),
            Err(other) => Err(other),
        }
    }

    /// Deletes a key from a state store unconditionally.
    pub async fn delete_state(
        &self,
        store_name: &str,
        key: &str,
        state_options: Option<&StateOptions>,
    ) -> Result<(), ClientError> {
        self.remove_state(store_name, key, None, state_options)
            .await
    }

    /// Deletes a key conditionally, with the same swallow-to-boolean policy as
    /// [`try_save_state`](Self::try_save_state): only RPC failures become `false`.
    pub async fn try_delete_state(
        &self,
        store_name: &str,
        key: &str,
        etag: Option<&str>,
        state_options: Option<&StateOptions>,
    ) -> Result<bool, ClientError> {
        let result = self
            .remove_state(
                store_name,
                key,
                etag.map(str::to_string),
                state_options,
            )
            .await;

        match result {
            Ok(()) => Ok(true),
            Err(ClientError::Rpc(_)) => Ok(false),
            Err(other) => Err(other),
        }
    }

    /// Retrieves a secret from a secret store.
    ///
    /// The response is a flat string mapping returned as-is.
    pub async fn get_secret(
        &self,
        store_name: &str,
        key: &str,
        metadata: Option<HashMap<String, String>>,
    ) -> Result<HashMap<String, String>, ClientError> {
        require("store_name", store_name)?;
        require("key", key)?;

        let request = pb::GetSecretRequest {
            store_name: store_name.to_string(),
            key: key.to_string(),
            metadata: metadata.unwrap_or_default(),
        };

        let response = self
            .rpc
            .get_secret(request)
            .await
            .map_err(ClientError::Rpc)?;
        Ok(response.data)
    }

    async fn write_state<V>(
        &self,
        store_name: &str,
        key: &str,
        value: &V,
        etag: Option<String>,
        state_options: Option<&StateOptions>,
        metadata: Option<HashMap<String, String>>,
    ) -> Result<(), ClientError>
    where
        V: Serialize + ?Sized,
    {
        require("store_name", store_name)?;
        require("key", key)?;

        let item = pb::StateItem {
            key: key.to_string(),
            value: self.codec.encode(Some(value))?,
            etag,
            metadata: metadata.unwrap_or_default(),
            options: options::write_options(state_options),
        };

        let request = pb::SaveStateRequest {
            store_name: store_name.to_string(),
            states: vec![item],
        };

        self.rpc
            .save_state(request)
            .await
            .map_err(ClientError::Rpc)?;
        Ok(())
    }

    async fn remove_state(
        &self,
        store_name: &str,
        key: &str,
        etag: Option<String>,
        state_options: Option<&StateOptions>,
    ) -> Result<(), ClientError> {
        require("store_name", store_name)?;
        require("key", key)?;

        let request = pb::DeleteStateRequest {
            store_name: store_name.to_string(),
            key: key.to_string(),
            etag,
            options: options::write_options(state_options),
        };

        self.rpc
            .delete_state(request)
            .await
            .map_err(ClientError::Rpc)?;
        Ok(())
    }
}

fn require(name: &'static str, value: &str) -> Result<(), ClientError> {
    if value.is_empty() {
        return Err(ClientError::InvalidArgument {
            name,
            reason: "must be a non-empty string",
        });
    }
    Ok(())
}
