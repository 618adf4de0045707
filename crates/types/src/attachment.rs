//! Topic attachment intake and encoding.
//!
//! An attachment is a self-contained record: the original filename plus
//! the file body encoded as a base64 `data:` URL, so later retrieval or
//! download never re-reads the source file. The size cap is enforced on
//! the raw bytes BEFORE encoding; an oversized payload is rejected without
//! touching any state.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Maximum raw attachment size: 4 MiB.
pub const MAX_ATTACHMENT_BYTES: usize = 4 * 1024 * 1024;

/// Prefix of the encoded payload representation.
const DATA_URL_PREFIX: &str = "data:application/octet-stream;base64,";

/// A file attached to a topic at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Original filename, kept for display and download.
    pub file_name: String,
    /// File body as a base64 `data:` URL.
    pub data: String,
}

impl Attachment {
    /// Encodes raw file bytes under the default 4 MiB cap.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AttachmentTooLarge`] if `bytes` exceeds the cap.
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Result<Self, BoardError> {
        Self::from_bytes_with_limit(file_name, bytes, MAX_ATTACHMENT_BYTES)
    }

    /// Encodes raw file bytes under an explicit cap.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AttachmentTooLarge`] if `bytes` exceeds `limit`.
    pub fn from_bytes_with_limit(
        file_name: impl Into<String>,
        bytes: &[u8],
        limit: usize,
    ) -> Result<Self, BoardError> {
        if bytes.len() > limit {
            return Err(BoardError::AttachmentTooLarge { size: bytes.len(), limit });
        }
        Ok(Self {
            file_name: file_name.into(),
            data: format!("{DATA_URL_PREFIX}{}", STANDARD.encode(bytes)),
        })
    }

    /// Recovers the original file bytes from the stored data URL.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::MalformedAttachment`] if the stored data is not
    /// a base64 data URL (possible only through hand-edited storage).
    pub fn decode(&self) -> Result<Vec<u8>, BoardError> {
        let encoded = self
            .data
            .split_once("base64,")
            .map(|(_, rest)| rest)
            .ok_or_else(|| BoardError::MalformedAttachment {
                file_name: self.file_name.clone(),
            })?;
        STANDARD.decode(encoded).map_err(|_| BoardError::MalformedAttachment {
            file_name: self.file_name.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_preserves_bytes_and_name() {
        let body = b"minutes of the last meeting".to_vec();
        let att = Attachment::from_bytes("minutes.pdf", &body).expect("intake");
        assert_eq!(att.file_name, "minutes.pdf");
        assert!(att.data.starts_with("data:application/octet-stream;base64,"));
        assert_eq!(att.decode().expect("decode"), body);
    }

    #[test]
    fn payload_at_the_cap_is_accepted() {
        let body = vec![0u8; MAX_ATTACHMENT_BYTES];
        assert!(Attachment::from_bytes("big.bin", &body).is_ok());
    }

    #[test]
    fn payload_over_the_cap_is_rejected() {
        let body = vec![0u8; MAX_ATTACHMENT_BYTES + 1];
        let err = Attachment::from_bytes("too-big.bin", &body).unwrap_err();
        match err {
            BoardError::AttachmentTooLarge { size, limit } => {
                assert_eq!(size, MAX_ATTACHMENT_BYTES + 1);
                assert_eq!(limit, MAX_ATTACHMENT_BYTES);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn custom_limit_is_honored() {
        let body = vec![0u8; 64];
        assert!(Attachment::from_bytes_with_limit("a", &body, 63).is_err());
        assert!(Attachment::from_bytes_with_limit("a", &body, 64).is_ok());
    }

    #[test]
    fn malformed_stored_data_fails_decode() {
        let att = Attachment {
            file_name: "x.bin".to_string(),
            data: "not a data url".to_string(),
        };
        assert!(matches!(att.decode(), Err(BoardError::MalformedAttachment { .. })));

        let att = Attachment {
            file_name: "x.bin".to_string(),
            data: "data:application/octet-stream;base64,@@@".to_string(),
        };
        assert!(att.decode().is_err());
    }
}
