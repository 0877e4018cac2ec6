//! # Payload Codec
//!
//! Converts typed application values to and from the self-describing `Any` container
//! carried by every sidecar envelope.
//!
//! ## The "absent" / "empty" / "null" distinction
//!
//! * Encoding no value at all produces **no** `Any` on the wire (`None`), which the
//!   sidecar treats as "no payload set".
//! * Encoding a present-but-empty value (e.g. an empty string) produces an `Any`
//!   whose bytes happen to be short, but which is still present on the wire.
//! * Decoding an absent `Any`, or one holding zero bytes, yields the target type's
//!   default value without ever invoking the deserializer, so empty responses can
//!   never fail deserialization.
//!
//! The codec is fixed per client instance at construction time and is never
//! overridable per call, keeping a single client's wire representation consistent.
use prost_types::Any;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Failures raised while converting between application values and wire payloads.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to serialize payload: '{0}'")]
    Serialize(#[source] serde_json::Error),
    #[error("Failed to deserialize payload: '{0}'")]
    Deserialize(#[source] serde_json::Error),
}

/// A pluggable payload serializer.
///
/// The client is generic over this trait; [`JsonCodec`] is the default. A custom
/// implementation carries its own configuration (field-naming policy, null handling)
/// as struct state, which satisfies the "supplied once, forwarded unchanged on every
/// call" contract.
pub trait PayloadCodec: Send + Sync {
    /// Wraps a value into an `Any` container. `None` produces no container at all.
    fn encode<T>(&self, value: Option<&T>) -> Result<Option<Any>, CodecError>
    where
        T: Serialize + ?Sized;

    /// Unwraps an `Any` container back into a typed value.
    ///
    /// An absent container, or one holding zero bytes, yields `T::default()`.
    /// Malformed bytes that do not match `T` propagate a [`CodecError`]; they are
    /// never swallowed or retried.
    fn decode<T>(&self, payload: Option<Any>) -> Result<T, CodecError>
    where
        T: DeserializeOwned + Default;
}

/// The default payload codec, backed by `serde_json`.
///
/// Encoding is deterministic for a given value: struct fields serialize in
/// declaration order, so encoding the same value twice yields byte-identical
/// payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl PayloadCodec for JsonCodec {
    fn encode<T>(&self, value: Option<&T>) -> Result<Option<Any>, CodecError>
    where
        T: Serialize + ?Sized,
    {
        match value {
            None => Ok(None),
            Some(value) => {
                let bytes = serde_json::to_vec(value).map_err(CodecError::Serialize)?;
                Ok(Some(Any {
                    type_url: String::new(),
                    value: bytes,
                }))
            }
        }
    }

    fn decode<T>(&self, payload: Option<Any>) -> Result<T, CodecError>
    where
        T: DeserializeOwned + Default,
    {
        match payload {
            None => Ok(T::default()),
            Some(any) if any.value.is_empty() => Ok(T::default()),
            Some(any) => serde_json::from_slice(&any.value).map_err(CodecError::Deserialize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    struct Widget {
        name: String,
        count: u32,
    }

    #[test]
    fn round_trips_a_value() {
        let codec = JsonCodec;
        let widget = Widget {
            name: "bolt".to_string(),
            count: 7,
        };

        let payload = codec.encode(Some(&widget)).unwrap();
        let decoded: Widget = codec.decode(payload).unwrap();

        assert_eq!(decoded, widget);
    }

    #[test]
    fn encoding_none_produces_no_container() {
        let codec = JsonCodec;
        let payload = codec.encode::<Widget>(None).unwrap();
        assert!(payload.is_none());
    }

    #[test]
    fn encoding_an_empty_string_is_still_present() {
        let codec = JsonCodec;
        let payload = codec.encode(Some("")).unwrap();
        let any = payload.expect("empty string must produce a present payload");
        assert!(!any.value.is_empty());
    }

    #[test]
    fn decoding_absent_payload_yields_default() {
        let codec = JsonCodec;
        let decoded: Widget = codec.decode(None).unwrap();
        assert_eq!(decoded, Widget::default());
    }

    #[test]
    fn decoding_zero_length_bytes_yields_default_without_deserializing() {
        let codec = JsonCodec;
        // Zero bytes are not valid JSON; reaching the deserializer would error.
        let payload = Some(Any {
            type_url: String::new(),
            value: Vec::new(),
        });
        let decoded: Widget = codec.decode(payload).unwrap();
        assert_eq!(decoded, Widget::default());
    }

    #[test]
    fn decoding_malformed_bytes_propagates_the_error() {
        let codec = JsonCodec;
        let payload = Some(Any {
            type_url: String::new(),
            value: b"{not json".to_vec(),
        });
        let result: Result<Widget, _> = codec.decode(payload);
        assert!(matches!(result, Err(CodecError::Deserialize(_))));
    }

    #[test]
    fn encoding_is_byte_identical_across_calls() {
        let codec = JsonCodec;
        let widget = Widget {
            name: "bolt".to_string(),
            count: 7,
        };

        let first = codec.encode(Some(&widget)).unwrap().unwrap();
        let second = codec.encode(Some(&widget)).unwrap().unwrap();

        assert_eq!(first.value, second.value);
    }
}
