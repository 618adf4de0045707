//! Centralized serialization and deserialization functions.
//!
//! The persistence port carries whole JSON documents (one per namespace),
//! so encoding goes through serde_json with consistent error handling via
//! snafu.

use serde::{Serialize, de::DeserializeOwned};
use snafu::Snafu;

/// Error type for codec operations.
#[derive(Debug, Snafu)]
pub enum CodecError {
    /// Encoding failed.
    #[snafu(display("Encoding failed: {source}"))]
    Encode {
        /// The underlying serde_json error.
        source: serde_json::Error,
    },

    /// Decoding failed.
    #[snafu(display("Decoding failed: {source}"))]
    Decode {
        /// The underlying serde_json error.
        source: serde_json::Error,
    },
}

/// Encodes a value to a JSON document.
///
/// # Errors
///
/// Returns `CodecError::Encode` if serialization fails.
pub fn encode_json<T: Serialize>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(|source| CodecError::Encode { source })
}

/// Decodes a JSON document to a value.
///
/// # Errors
///
/// Returns `CodecError::Decode` if deserialization fails.
pub fn decode_json<T: DeserializeOwned>(doc: &str) -> Result<T, CodecError> {
    serde_json::from_str(doc).map_err(|source| CodecError::Decode { source })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_vec_of_strings() {
        let original = vec!["Alice".to_string(), "Bob".to_string()];
        let doc = encode_json(&original).expect("encode");
        let decoded: Vec<String> = decode_json(&doc).expect("decode");
        assert_eq!(original, decoded);
    }

    #[test]
    fn decode_malformed_document_fails() {
        let result: Result<Vec<String>, _> = decode_json("{not json");
        assert!(matches!(result, Err(CodecError::Decode { .. })));
    }

    #[test]
    fn decode_wrong_shape_fails() {
        let result: Result<Vec<String>, _> = decode_json(r#"{"a": 1}"#);
        assert!(result.is_err());
    }
}
