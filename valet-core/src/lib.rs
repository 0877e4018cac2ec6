//! # Valet Core
//!
//! `valet-core` is a typed runtime client for a local sidecar process. It talks to the
//! sidecar over gRPC and exposes four capability groups:
//!
//! * **Event publication** — fire a payload at a pub/sub topic.
//! * **Binding invocation** — trigger an output binding with a payload and metadata.
//! * **Service invocation** — call a method on another application through the sidecar.
//! * **State & secrets** — keyed state storage with optimistic concurrency (etags),
//!   plus secret retrieval.
//!
//! ## Key Components
//!
//! * **[`RuntimeClient`](client::RuntimeClient):** The main entry point. It validates
//!   arguments, wraps application values into wire envelopes, and dispatches requests
//!   through the sidecar RPC contract.
//! * **[`SidecarRpc`](rpc::SidecarRpc):** The narrow request/response contract the client
//!   requires from its transport. The production implementation is
//!   [`GrpcSidecar`](rpc::grpc::GrpcSidecar); tests may substitute an in-memory sidecar.
//! * **[`PayloadCodec`](codec::PayloadCodec):** Converts typed application values to and
//!   from the self-describing `Any` payload container, distinguishing "no payload" from
//!   "empty payload".
//! * **[`StateOptions`](options::StateOptions):** Consistency, concurrency and retry
//!   hints forwarded to the state store, mapped onto the wire's string vocabulary.
//!
//! ## Error Handling
//!
//! Local validation failures (empty identifiers, unmapped option strings) are raised
//! before any network activity. Remote failures surface as `tonic::Status` wrapped in
//! [`ClientError::Rpc`](client::ClientError); only the `try_save_state` and
//! `try_delete_state` operations convert that category into a boolean outcome.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost` and `tonic` to ensure that consumers use compatible
//! versions of these underlying dependencies.
pub mod client;
pub mod codec;
pub mod options;
pub mod proto;
pub mod rpc;

// Re-exports
pub use prost;
pub use tonic;
