//! Error types for the Boardroom core using snafu.
//!
//! Every variant here is locally recoverable: a failed operation returns
//! `Err` and leaves all state untouched, so the caller can surface a
//! transient notice and carry on. Nothing in this taxonomy is fatal to the
//! application.

use snafu::Snafu;

use crate::codec::CodecError;
use crate::id::TopicId;

/// Unified result type for board operations.
pub type Result<T, E = BoardError> = std::result::Result<T, E>;

/// Recoverable errors raised by roster and ledger operations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum BoardError {
    /// Topic submission with a blank (whitespace-only) title.
    #[snafu(display("topic title must not be empty"))]
    EmptyTitle,

    /// Roster addition with a blank (whitespace-only) name.
    #[snafu(display("member name must not be empty"))]
    EmptyMemberName,

    /// Attachment payload exceeds the intake cap.
    #[snafu(display("attachment of {size} bytes exceeds the {limit} byte limit"))]
    AttachmentTooLarge {
        /// Size of the rejected payload in bytes.
        size: usize,
        /// The configured cap in bytes.
        limit: usize,
    },

    /// Stored attachment data is not a well-formed base64 data URL.
    #[snafu(display("attachment data for '{file_name}' is malformed"))]
    MalformedAttachment {
        /// Filename recorded with the attachment.
        file_name: String,
    },

    /// Vote submission with a string that is not Yes, No, or Abstain.
    #[snafu(display("'{value}' is not a valid vote choice"))]
    InvalidVoteChoice {
        /// The rejected input.
        value: String,
    },

    /// Vote submission without a voter name.
    #[snafu(display("a vote requires a voter name"))]
    MissingVoter,

    /// Voter already has a recorded vote on this topic.
    ///
    /// The original vote is preserved verbatim; re-voting is forbidden.
    #[snafu(display("'{voter}' has already voted on this topic"))]
    DuplicateVote {
        /// The voter whose earlier vote stands.
        voter: String,
    },

    /// Vote submission against a topic whose derived status is closed.
    #[snafu(display("topic {id} is closed to further votes"))]
    TopicClosed {
        /// The closed topic.
        id: TopicId,
    },

    /// No topic with the given identifier exists in the ledger.
    #[snafu(display("no topic with id {id}"))]
    TopicNotFound {
        /// The unknown identifier.
        id: TopicId,
    },

    /// Roster removal with an out-of-range position.
    #[snafu(display("member index {index} out of range for roster of {len}"))]
    InvalidMemberIndex {
        /// The rejected index.
        index: usize,
        /// Roster length at the time of the call.
        len: usize,
    },

    /// Serialization or deserialization of a persisted document failed.
    #[snafu(display("codec error: {source}"))]
    Codec {
        /// The underlying codec error.
        source: CodecError,
    },
}

impl From<CodecError> for BoardError {
    fn from(source: CodecError) -> Self {
        BoardError::Codec { source }
    }
}
