//! Core types, errors, and time primitives for the Boardroom voting core.
//!
//! This crate provides the foundational types used throughout the workspace:
//! - The topic/vote data model and its pure derivations (status, tally)
//! - Attachment intake with the 4 MiB cap
//! - Topic identifier generation
//! - The injectable [`Clock`] abstraction
//! - Error types using snafu

pub mod attachment;
pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod id;
pub mod types;

// Re-export commonly used types at crate root
pub use attachment::{Attachment, MAX_ATTACHMENT_BYTES};
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{CodecError, decode_json, encode_json};
pub use config::{BoardConfig, ConfigError};
pub use error::{BoardError, Result};
pub use id::{TopicId, TopicIdGenerator};
pub use types::{Tally, Topic, TopicStatus, Vote, VoteChoice};
