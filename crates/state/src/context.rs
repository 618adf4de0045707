//! The board context: explicit wiring of roster, ledger, port, and clock.
//!
//! The two stores are process-wide state, but they are carried in an
//! explicit context object handed to the view layer rather than ambient
//! globals, so the core stays testable in isolation.
//!
//! # Lifecycle
//!
//! [`BoardContext::open`] loads both namespaces from the persistence
//! port. An absent key falls back to the documented default (the seed
//! roster, an empty ledger); a document that fails to parse does the
//! same, logged at `warn`; startup never fails on bad stored data.
//!
//! Every mutation persists its namespace fire-and-forget: a write failure
//! (quota exhaustion, disk error) is logged and swallowed, and the
//! in-memory state remains the source of truth for the session.

use std::sync::Arc;

use tracing::warn;

use boardroom_store::StateStore;
use boardroom_types::{
    Attachment, BoardConfig, Clock, Result, Topic, TopicId, TopicIdGenerator, Vote, VoteChoice,
    decode_json, encode_json,
};

use crate::ledger::{Ledger, TopicDraft};
use crate::roster::Roster;

/// Owns the roster and ledger plus the injected port and clock.
pub struct BoardContext {
    config: BoardConfig,
    store: Arc<dyn StateStore>,
    clock: Arc<dyn Clock>,
    ids: TopicIdGenerator,
    roster: Roster,
    ledger: Ledger,
}

impl BoardContext {
    /// Loads a context from the persistence port.
    ///
    /// Infallible: absent or malformed stored documents degrade to the
    /// defaults from `config` rather than failing startup, and a config
    /// that fails validation (empty or colliding namespace keys, zero
    /// attachment cap) is replaced wholesale by [`BoardConfig::default`].
    pub fn open(store: Arc<dyn StateStore>, clock: Arc<dyn Clock>, config: BoardConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(error = %e, "invalid board config, using defaults");
                BoardConfig::default()
            }
        };

        let roster = load_or_default(
            store.as_ref(),
            &config.roster_key,
            Roster::from_members(config.initial_members.clone()),
        );
        let ledger = load_or_default(store.as_ref(), &config.topics_key, Ledger::default());

        // Resume id generation past anything already persisted, so a
        // reopen within the same clock millisecond cannot reissue an id.
        let ids = TopicIdGenerator::new();
        if let Some(max_id) = ledger.topics().iter().map(|t| t.id).max() {
            ids.advance_past(max_id);
        }

        Self { config, store, clock, ids, roster, ledger }
    }

    /// The active configuration.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Roster operations
    // ------------------------------------------------------------------

    /// Member names in display order.
    pub fn members(&self) -> &[String] {
        self.roster.members()
    }

    /// Appends a member and persists the roster.
    ///
    /// Adding a member can immediately change every topic's derived
    /// "closed by full participation" status, since that rule reads the
    /// live roster size.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyMemberName`] for a blank name; state is
    /// unchanged in that case.
    ///
    /// [`BoardError::EmptyMemberName`]: boardroom_types::BoardError::EmptyMemberName
    pub fn add_member(&mut self, name: &str) -> Result<()> {
        self.roster.add(name)?;
        self.persist_roster();
        Ok(())
    }

    /// Removes the member at `index` and persists the roster.
    ///
    /// Historical votes cast by the removed member stay in the topics'
    /// vote maps (orphaned votes): they keep counting in tallies but drop
    /// out of the roster-driven [`individual_votes`](Self::individual_votes)
    /// listing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidMemberIndex`] if `index` is out of
    /// range.
    ///
    /// [`BoardError::InvalidMemberIndex`]: boardroom_types::BoardError::InvalidMemberIndex
    pub fn remove_member(&mut self, index: usize) -> Result<String> {
        let removed = self.roster.remove(index)?;
        self.persist_roster();
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Topic operations
    // ------------------------------------------------------------------

    /// Encodes a file for attachment under the configured size cap.
    ///
    /// Intake happens before any draft reaches the ledger: an oversized
    /// payload is rejected here and no state changes.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AttachmentTooLarge`] if `bytes` exceeds the
    /// configured cap.
    ///
    /// [`BoardError::AttachmentTooLarge`]: boardroom_types::BoardError::AttachmentTooLarge
    pub fn attach_file(&self, file_name: &str, bytes: &[u8]) -> Result<Attachment> {
        Attachment::from_bytes_with_limit(file_name, bytes, self.config.max_attachment_bytes)
    }

    /// Creates a topic from `draft` and persists the ledger.
    ///
    /// The new topic snapshots the current roster size as its display
    /// denominator.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyTitle`] for a blank title; the ledger
    /// is unchanged in that case.
    ///
    /// [`BoardError::EmptyTitle`]: boardroom_types::BoardError::EmptyTitle
    pub fn submit_topic(&mut self, draft: TopicDraft) -> Result<TopicId> {
        let now = self.clock.now();
        let id = self.ledger.create_topic(draft, self.roster.len(), now, &self.ids)?;
        self.persist_topics();
        Ok(id)
    }

    /// Records a vote and persists the ledger.
    ///
    /// # Errors
    ///
    /// See [`Ledger::cast_vote`]; every error leaves the ledger unchanged.
    pub fn cast_vote(
        &mut self,
        topic_id: TopicId,
        voter: &str,
        choice: VoteChoice,
        note: Option<String>,
    ) -> Result<()> {
        let now = self.clock.now();
        self.ledger.cast_vote(topic_id, voter, choice, note, self.roster.len(), now)?;
        self.persist_topics();
        Ok(())
    }

    /// Sets a topic's manual close flag and persists the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TopicNotFound`] if no such topic exists.
    ///
    /// [`BoardError::TopicNotFound`]: boardroom_types::BoardError::TopicNotFound
    pub fn close_topic(&mut self, topic_id: TopicId) -> Result<()> {
        self.ledger.close_topic(topic_id)?;
        self.persist_topics();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reads (derived at the clock's current instant)
    // ------------------------------------------------------------------

    /// Looks up a topic by id.
    pub fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.ledger.topic(id)
    }

    /// All topics, most-recent-first.
    pub fn topics(&self) -> &[Topic] {
        self.ledger.topics()
    }

    /// Topics whose derived status is open right now, in ledger order.
    pub fn open_topics(&self) -> Vec<&Topic> {
        self.ledger.partition(self.clock.now(), self.roster.len()).0
    }

    /// Topics whose derived status is closed right now, in ledger order.
    pub fn closed_topics(&self) -> Vec<&Topic> {
        self.ledger.partition(self.clock.now(), self.roster.len()).1
    }

    /// Whether the given topic reads closed right now.
    pub fn is_closed(&self, topic: &Topic) -> bool {
        topic.is_closed(self.clock.now(), self.roster.len())
    }

    /// The roster-driven individual-votes listing for a topic:
    /// one `(member, vote)` pair per current roster member.
    ///
    /// Orphaned votes (voter no longer on the roster) do not appear here
    /// even though they still count in [`Topic::tally`]. Returns `None`
    /// for an unknown topic.
    pub fn individual_votes(&self, id: TopicId) -> Option<Vec<(&str, Option<&Vote>)>> {
        let topic = self.ledger.topic(id)?;
        Some(
            self.roster
                .members()
                .iter()
                .map(|m| (m.as_str(), topic.votes.get(m)))
                .collect(),
        )
    }

    // ------------------------------------------------------------------
    // Test support
    // ------------------------------------------------------------------

    /// Drops all state back to the configured defaults and clears both
    /// persistence keys. For test teardown.
    pub fn reset(&mut self) {
        self.roster = Roster::from_members(self.config.initial_members.clone());
        self.ledger = Ledger::default();
        for key in [&self.config.roster_key, &self.config.topics_key] {
            if let Err(e) = self.store.remove(key) {
                warn!(key = %key, error = %e, "failed to clear persisted state");
            }
        }
    }

    // ------------------------------------------------------------------
    // Persistence (fire-and-forget)
    // ------------------------------------------------------------------

    fn persist_roster(&self) {
        persist(self.store.as_ref(), &self.config.roster_key, &self.roster);
    }

    fn persist_topics(&self) {
        persist(self.store.as_ref(), &self.config.topics_key, &self.ledger);
    }
}

/// Loads one namespace, degrading to `default` on absence, read failure,
/// or a malformed document.
fn load_or_default<T: serde::de::DeserializeOwned>(
    store: &dyn StateStore,
    key: &str,
    default: T,
) -> T {
    match store.load(key) {
        Ok(Some(doc)) => match decode_json(&doc) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored document is malformed, using defaults");
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            warn!(key, error = %e, "failed to read persisted state, using defaults");
            default
        }
    }
}

/// Writes one namespace; failures are logged and swallowed.
fn persist<T: serde::Serialize>(store: &dyn StateStore, key: &str, value: &T) {
    let doc = match encode_json(value) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(key, error = %e, "failed to encode state, skipping persistence");
            return;
        }
    };
    if let Err(e) = store.save(key, &doc) {
        warn!(key, error = %e, "failed to persist state, in-memory state remains authoritative");
    }
}
