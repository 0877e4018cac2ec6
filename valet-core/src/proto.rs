//! # Sidecar Wire Schema
//!
//! Message definitions for the `runtime.v1.Sidecar` gRPC service.
//!
//! These structs are maintained by hand against the sidecar's published Protobuf
//! schema rather than generated at build time, so the crate builds without `protoc`.
//! Field numbers and the option string vocabulary are protocol-defined and must match
//! the sidecar bit-for-bit.
pub mod runtime_v1;
