//! # Sidecar RPC Contract
//!
//! The narrow request/response contract the client requires from its transport:
//! one fire-once unary call per sidecar operation, taking a wire request and
//! returning a wire response or a `tonic::Status`.
//!
//! The production implementation is [`grpc::GrpcSidecar`]; because the facade is
//! generic over this trait, tests can substitute an in-memory sidecar and exercise
//! every operation without a network.
//!
//! Implementations hold no per-call state and must be safe for concurrent use;
//! callers may issue arbitrarily many overlapping calls against one handle.
pub mod grpc;

use async_trait::async_trait;
use tonic::Status;

use crate::proto::runtime_v1 as pb;

/// One method per sidecar wire call.
#[async_trait]
pub trait SidecarRpc: Send + Sync {
    async fn publish_event(
        &self,
        request: pb::PublishEventRequest,
    ) -> Result<pb::PublishEventResponse, Status>;

    async fn invoke_binding(
        &self,
        request: pb::InvokeBindingRequest,
    ) -> Result<pb::InvokeBindingResponse, Status>;

    async fn invoke_service(
        &self,
        request: pb::InvokeServiceRequest,
    ) -> Result<pb::InvokeServiceResponse, Status>;

    async fn get_state(&self, request: pb::GetStateRequest)
    -> Result<pb::GetStateResponse, Status>;

    async fn save_state(
        &self,
        request: pb::SaveStateRequest,
    ) -> Result<pb::SaveStateResponse, Status>;

    async fn delete_state(
        &self,
        request: pb::DeleteStateRequest,
    ) -> Result<pb::DeleteStateResponse, Status>;

    async fn get_secret(
        &self,
        request: pb::GetSecretRequest,
    ) -> Result<pb::GetSecretResponse, Status>;
}
