//! # State Options
//!
//! Consistency, concurrency and retry hints forwarded to the state store, and their
//! mapping onto the wire's string vocabulary.
//!
//! The wire strings are store-protocol-defined and must match the collaborating
//! store's expectations bit-for-bit. Reads and writes share the same string mapping
//! but carry different option layouts: reads take a consistency hint only, while
//! writes additionally carry concurrency and a nested retry policy.
//!
//! Every field is independently optional. An absent field is never defaulted into
//! the wire structure; "absent" and "default value present" mean different things
//! to the store.
use std::str::FromStr;
use std::time::Duration;

use crate::proto::runtime_v1 as pb;

const CONSISTENCY_EVENTUAL: &str = "eventual";
const CONSISTENCY_STRONG: &str = "strong";
const CONCURRENCY_FIRST_WRITE: &str = "first-write";
const CONCURRENCY_LAST_WRITE: &str = "last-write";
const RETRY_LINEAR: &str = "linear";
const RETRY_EXPONENTIAL: &str = "exponential";

/// Raised when a wire string does not belong to a known option vocabulary.
#[derive(Debug, thiserror::Error)]
#[error("Unknown {kind} value '{value}'")]
pub struct UnknownOptionValue {
    kind: &'static str,
    value: String,
}

impl UnknownOptionValue {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Read-path guarantee requested from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    Eventual,
    Strong,
}

impl Consistency {
    /// The fixed wire string for this mode.
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::Eventual => CONSISTENCY_EVENTUAL,
            Self::Strong => CONSISTENCY_STRONG,
        }
    }
}

impl FromStr for Consistency {
    type Err = UnknownOptionValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CONSISTENCY_EVENTUAL => Ok(Self::Eventual),
            CONSISTENCY_STRONG => Ok(Self::Strong),
            other => Err(UnknownOptionValue::new("consistency", other)),
        }
    }
}

/// Write-path conflict policy requested from the store.
///
/// This is a store-side guarantee; the client only forwards the selected mode and
/// imposes no ordering of its own between concurrent calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concurrency {
    FirstWrite,
    LastWrite,
}

impl Concurrency {
    /// The fixed wire string for this mode.
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::FirstWrite => CONCURRENCY_FIRST_WRITE,
            Self::LastWrite => CONCURRENCY_LAST_WRITE,
        }
    }
}

impl FromStr for Concurrency {
    type Err = UnknownOptionValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CONCURRENCY_FIRST_WRITE => Ok(Self::FirstWrite),
            CONCURRENCY_LAST_WRITE => Ok(Self::LastWrite),
            other => Err(UnknownOptionValue::new("concurrency", other)),
        }
    }
}

/// Retry pattern the store should apply to its own internal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryMode {
    Linear,
    Exponential,
}

impl RetryMode {
    /// The fixed wire string for this mode.
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::Linear => RETRY_LINEAR,
            Self::Exponential => RETRY_EXPONENTIAL,
        }
    }
}

impl FromStr for RetryMode {
    type Err = UnknownOptionValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            RETRY_LINEAR => Ok(Self::Linear),
            RETRY_EXPONENTIAL => Ok(Self::Exponential),
            other => Err(UnknownOptionValue::new("retry mode", other)),
        }
    }
}

/// Retry hint forwarded to the store. Any subset of the fields may be set; this is
/// not a client-side retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryOptions {
    pub mode: Option<RetryMode>,
    pub interval: Option<Duration>,
    /// Maximum attempt count.
    pub threshold: Option<i32>,
}

/// Options attached to state operations. Absent fields mean "use the store default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateOptions {
    pub consistency: Option<Consistency>,
    pub concurrency: Option<Concurrency>,
    pub retry: Option<RetryOptions>,
}

/// Builds the wire options block for a state read. Reads carry consistency only.
///
/// `None` input produces no options block at all, which is distinct from an options
/// block with every field empty.
pub fn read_options(options: Option<&StateOptions>) -> Option<pb::StateReadOptions> {
    options.map(|options| pb::StateReadOptions {
        consistency: options.consistency.map(|c| c.as_wire_str().to_string()),
    })
}

/// Builds the wire options block for a state write or delete.
///
/// Each wire field is populated only when the corresponding source field is present;
/// `None` input produces no options block at all.
pub fn write_options(options: Option<&StateOptions>) -> Option<pb::StateWriteOptions> {
    options.map(|options| pb::StateWriteOptions {
        concurrency: options.concurrency.map(|c| c.as_wire_str().to_string()),
        consistency: options.consistency.map(|c| c.as_wire_str().to_string()),
        retry_policy: options.retry.as_ref().map(|retry| pb::RetryPolicy {
            pattern: retry.mode.map(|m| m.as_wire_str().to_string()),
            interval: retry.interval.map(wire_duration),
            threshold: retry.threshold,
        }),
    })
}

/// Converts a retry interval into the wire duration type, preserving sub-second
/// precision.
fn wire_duration(interval: Duration) -> prost_types::Duration {
    prost_types::Duration {
        seconds: i64::try_from(interval.as_secs()).unwrap_or(i64::MAX),
        nanos: interval.subsec_nanos().cast_signed(),
    }
}
