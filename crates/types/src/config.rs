//! Configuration for the board core.
//!
//! Defaults match the stored layout existing deployments already carry:
//! two key-value namespaces (`nsb3_members`, `nsb3_topics`) and a seed
//! roster of six placeholder names used when no roster has been persisted
//! yet.
//! Validation is available via [`validate`](BoardConfig::validate) after
//! deserialization.

use serde::{Deserialize, Serialize};
use snafu::Snafu;

use crate::attachment::MAX_ATTACHMENT_BYTES;

/// Configuration validation error.
#[derive(Debug, Snafu)]
pub enum ConfigError {
    /// A configuration value is invalid.
    #[snafu(display("invalid config: {message}"))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}

fn default_roster_key() -> String {
    "nsb3_members".to_string()
}

fn default_topics_key() -> String {
    "nsb3_topics".to_string()
}

/// The documented default roster used when the store has no roster entry.
fn default_members() -> Vec<String> {
    ["Haley", "Member 2", "Member 3", "Member 4", "Member 5", "Member 6"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_max_attachment_bytes() -> usize {
    MAX_ATTACHMENT_BYTES
}

/// Configuration for a board context.
#[derive(Debug, Clone, bon::Builder, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Persistence key for the roster namespace.
    #[serde(default = "default_roster_key")]
    #[builder(into, default = default_roster_key())]
    pub roster_key: String,
    /// Persistence key for the topic-ledger namespace.
    #[serde(default = "default_topics_key")]
    #[builder(into, default = default_topics_key())]
    pub topics_key: String,
    /// Roster to seed when no roster has been persisted.
    #[serde(default = "default_members")]
    #[builder(default = default_members())]
    pub initial_members: Vec<String>,
    /// Attachment intake cap in bytes.
    #[serde(default = "default_max_attachment_bytes")]
    #[builder(default = default_max_attachment_bytes())]
    pub max_attachment_bytes: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl BoardConfig {
    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if either namespace key is
    /// empty, the two keys collide, or the attachment cap is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster_key.is_empty() || self.topics_key.is_empty() {
            return Err(ConfigError::Validation {
                message: "persistence keys must not be empty".to_string(),
            });
        }
        if self.roster_key == self.topics_key {
            return Err(ConfigError::Validation {
                message: format!(
                    "roster and topics must use distinct keys, both are '{}'",
                    self.roster_key
                ),
            });
        }
        if self.max_attachment_bytes == 0 {
            return Err(ConfigError::Validation {
                message: "max_attachment_bytes must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stored_layout() {
        let config = BoardConfig::default();
        assert_eq!(config.roster_key, "nsb3_members");
        assert_eq!(config.topics_key, "nsb3_topics");
        assert_eq!(config.initial_members.len(), 6);
        assert_eq!(config.initial_members[0], "Haley");
        assert_eq!(config.max_attachment_bytes, 4 * 1024 * 1024);
        config.validate().expect("defaults validate");
    }

    #[test]
    fn builder_overrides_are_kept() {
        let config = BoardConfig::builder()
            .roster_key("test_members")
            .topics_key("test_topics")
            .initial_members(vec!["Alice".to_string(), "Bob".to_string()])
            .max_attachment_bytes(1024)
            .build();
        assert_eq!(config.initial_members, vec!["Alice", "Bob"]);
        assert_eq!(config.max_attachment_bytes, 1024);
        config.validate().expect("validates");
    }

    #[test]
    fn colliding_keys_fail_validation() {
        let config = BoardConfig::builder()
            .roster_key("same")
            .topics_key("same")
            .build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let config: BoardConfig = serde_json::from_str("{}").expect("decode");
        assert_eq!(config.roster_key, "nsb3_members");
        assert_eq!(config.initial_members.len(), 6);
    }

    #[test]
    fn zero_cap_fails_validation() {
        let config = BoardConfig::builder().max_attachment_bytes(0).build();
        assert!(config.validate().is_err());
    }
}
