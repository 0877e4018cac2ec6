//! # gRPC Sidecar Transport
//!
//! The production [`SidecarRpc`] implementation over a `tonic` channel.
//!
//! Every outbound call funnels through a single `unary` helper that readies the
//! channel, builds the request, and dispatches on the method path with a prost
//! codec. That helper is the one seam where cross-cutting concerns (deadlines,
//! interceptors, uniform error translation) would attach; today it performs no
//! translation beyond surfacing channel-readiness failures as `UNAVAILABLE`.
//!
//! ## Cancellation & deadlines
//!
//! Dropping the future returned by any call abandons the in-flight RPC. The client
//! sets no default deadline; callers bound calls themselves (e.g. with
//! `tokio::time::timeout`). Cancellation does not roll back a write the store has
//! already committed.
use http::uri::PathAndQuery;
use tonic::client::Grpc;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};
use tonic_prost::ProstCodec;

use super::SidecarRpc;
use crate::proto::runtime_v1 as pb;

/// Errors that can occur when connecting to the sidecar.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Invalid sidecar address '{0}': {1}")]
    InvalidAddress(String, #[source] tonic::transport::Error),
    #[error("Failed to connect to sidecar at '{0}': {1}")]
    ConnectionFailed(String, #[source] tonic::transport::Error),
}

/// A sidecar transport over a shared, reusable gRPC channel.
///
/// The channel is cheaply clonable and multiplexes concurrent calls; one
/// `GrpcSidecar` may be shared across tasks without locking.
#[derive(Debug, Clone)]
pub struct GrpcSidecar {
    channel: Channel,
}

impl GrpcSidecar {
    /// Connects to the sidecar at the given address (e.g. `http://localhost:50001`).
    pub async fn connect(addr: &str) -> Result<Self, ConnectError> {
        let endpoint = Endpoint::new(addr.to_string())
            .map_err(|e| ConnectError::InvalidAddress(addr.to_string(), e))?;

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ConnectError::ConnectionFailed(addr.to_string(), e))?;

        Ok(Self::from_channel(channel))
    }

    /// Wraps an existing caller-owned channel.
    pub fn from_channel(channel: Channel) -> Self {
        Self { channel }
    }

    async fn unary<Req, Resp>(&self, path: PathAndQuery, request: Req) -> Result<Resp, Status>
    where
        Req: prost::Message + 'static,
        Resp: prost::Message + Default + 'static,
    {
        let mut grpc = Grpc::new(self.channel.clone());

        grpc.ready()
            .await
            .map_err(|e| Status::unavailable(format!("Sidecar channel not ready: '{e}'")))?;

        tracing::debug!(method = %path, "dispatching sidecar call");

        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        let response = grpc.unary(Request::new(request), path, codec).await?;

        Ok(response.into_inner())
    }
}

#[async_trait::async_trait]
impl SidecarRpc for GrpcSidecar {
    async fn publish_event(
        &self,
        request: pb::PublishEventRequest,
    ) -> Result<pb::PublishEventResponse, Status> {
        self.unary(
            PathAndQuery::from_static("/runtime.v1.Sidecar/PublishEvent"),
            request,
        )
        .await
    }

    async fn invoke_binding(
        &self,
        request: pb::InvokeBindingRequest,
    ) -> Result<pb::InvokeBindingResponse, Status> {
        self.unary(
            PathAndQuery::from_static("/runtime.v1.Sidecar/InvokeBinding"),
            request,
        )
        .await
    }

    async fn invoke_service(
        &self,
        request: pb::InvokeServiceRequest,
    ) -> Result<pb::InvokeServiceResponse, Status> {
        self.unary(
            PathAndQuery::from_static("/runtime.v1.Sidecar/InvokeService"),
            request,
        )
        .await
    }

    async fn get_state(
        &self,
        request: pb::GetStateRequest,
    ) -> Result<pb::GetStateResponse, Status> {
        self.unary(
            PathAndQuery::from_static("/runtime.v1.Sidecar/GetState"),
            request,
        )
        .await
    }

    async fn save_state(
        &self,
        request: pb::SaveStateRequest,
    ) -> Result<pb::SaveStateResponse, Status> {
        self.unary(
            PathAndQuery::from_static("/runtime.v1.Sidecar/SaveState"),
            request,
        )
        .await
    }

    async fn delete_state(
        &self,
        request: pb::DeleteStateRequest,
    ) -> Result<pb::DeleteStateResponse, Status> {
        self.unary(
            PathAndQuery::from_static("/runtime.v1.Sidecar/DeleteState"),
            request,
        )
        .await
    }

    async fn get_secret(
        &self,
        request: pb::GetSecretRequest,
    ) -> Result<pb::GetSecretResponse, Status> {
        self.unary(
            PathAndQuery::from_static("/runtime.v1.Sidecar/GetSecret"),
            request,
        )
        .await
    }
}
