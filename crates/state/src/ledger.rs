//! The topic ledger: creation, vote casting, and the open/closed
//! partition.
//!
//! Topics are ordered most-recent-first for display. Per topic, the only
//! mutations after creation are vote accumulation and the manual close
//! flag; OPEN to CLOSED is one-way, there is no reopen. Status is derived
//! on every read from the instant and the live roster size, never stored.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use boardroom_types::{
    Attachment, BoardError, Result, Topic, TopicId, TopicIdGenerator, Vote, VoteChoice,
};

/// Input to topic creation. Title is required; everything else optional.
///
/// The attachment, if any, must already have passed intake (the size cap
/// is enforced when the [`Attachment`] is constructed, before any draft
/// reaches the ledger).
#[derive(Debug, Clone, Default)]
pub struct TopicDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub attachment: Option<Attachment>,
}

impl TopicDraft {
    /// Draft with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }
}

/// The collection of voting topics, most-recent-first.
///
/// Persists as a plain JSON array of topics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    topics: Vec<Topic>,
}

impl Ledger {
    /// All topics in ledger order (most recently created first).
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Looks up a topic by id.
    pub fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    fn topic_mut(&mut self, id: TopicId) -> Result<&mut Topic> {
        self.topics
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(BoardError::TopicNotFound { id })
    }

    /// Creates a topic and inserts it at the front of the ledger.
    ///
    /// `total_members` is the roster size at this instant; it becomes the
    /// topic's display denominator and is never re-derived.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyTitle`] if the title trims to empty;
    /// the ledger is unchanged in that case.
    pub fn create_topic(
        &mut self,
        draft: TopicDraft,
        total_members: usize,
        now: DateTime<Utc>,
        ids: &TopicIdGenerator,
    ) -> Result<TopicId> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        let description = draft
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let id = ids.next(now);
        debug!(%id, title, total_members, "topic created");
        self.topics.insert(
            0,
            Topic {
                id,
                title: title.to_string(),
                description,
                due_date: draft.due_date,
                attachment: draft.attachment,
                votes: BTreeMap::new(),
                total_members,
                closed: false,
                created_at: now,
            },
        );
        Ok(id)
    }

    /// Records a vote on an open topic.
    ///
    /// This is the only code path that mutates a topic's vote map. The
    /// closure check runs against `current_roster_size` at `now`, so a
    /// topic that closed by due date or full participation rejects the
    /// vote even if no mutation has happened since.
    ///
    /// # Errors
    ///
    /// - [`BoardError::MissingVoter`]: `voter` trims to empty
    /// - [`BoardError::TopicNotFound`]: no such topic
    /// - [`BoardError::TopicClosed`]: derived status is closed at `now`
    /// - [`BoardError::DuplicateVote`]: `voter` already has a recorded
    ///   vote; the original is preserved verbatim
    ///
    /// The vote map is unchanged on every error path.
    pub fn cast_vote(
        &mut self,
        id: TopicId,
        voter: &str,
        choice: VoteChoice,
        note: Option<String>,
        current_roster_size: usize,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let voter = voter.trim();
        if voter.is_empty() {
            return Err(BoardError::MissingVoter);
        }

        let topic = self.topic_mut(id)?;
        if topic.is_closed(now, current_roster_size) {
            return Err(BoardError::TopicClosed { id });
        }
        if topic.has_voted(voter) {
            return Err(BoardError::DuplicateVote { voter: voter.to_string() });
        }

        let note = note.as_deref().map(str::trim).filter(|n| !n.is_empty()).map(str::to_string);
        debug!(%id, voter, %choice, "vote recorded");
        topic.votes.insert(voter.to_string(), Vote { choice, note, cast_at: now });
        Ok(())
    }

    /// Sets the manual close flag. Closing an already-closed topic is a
    /// harmless repeat; there is no operation that clears the flag.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TopicNotFound`] if no such topic exists.
    pub fn close_topic(&mut self, id: TopicId) -> Result<()> {
        let topic = self.topic_mut(id)?;
        topic.closed = true;
        debug!(%id, "topic manually closed");
        Ok(())
    }

    /// Splits the ledger into (open, closed) groups at `now`, preserving
    /// ledger order within each group.
    pub fn partition(
        &self,
        now: DateTime<Utc>,
        current_roster_size: usize,
    ) -> (Vec<&Topic>, Vec<&Topic>) {
        self.topics
            .iter()
            .partition(|t| !t.is_closed(now, current_roster_size))
    }
}
