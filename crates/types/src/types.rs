//! Core data model for board voting.
//!
//! Defines topics, votes, and tallies, plus the pure derivations over
//! them. Status, tally, and participation are computed on every read and
//! never cached: due-date passage and roster-size changes must be picked
//! up without any mutation event.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::error::BoardError;
use crate::id::TopicId;

// ============================================================================
// Votes
// ============================================================================

/// The three admissible vote choices.
///
/// Serializes as the literal strings `"Yes"`, `"No"`, `"Abstain"`, the
/// form recorded in persisted ledger documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    Yes,
    No,
    Abstain,
}

impl VoteChoice {
    /// All choices, in display order.
    pub const ALL: [VoteChoice; 3] = [VoteChoice::Yes, VoteChoice::No, VoteChoice::Abstain];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Abstain => "Abstain",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VoteChoice {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Self::Yes),
            "No" => Ok(Self::No),
            "Abstain" => Ok(Self::Abstain),
            other => Err(BoardError::InvalidVoteChoice { value: other.to_string() }),
        }
    }
}

/// A single member's recorded vote on a topic.
///
/// Immutable once cast: no public operation removes or overwrites a vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// The choice made.
    pub choice: VoteChoice,
    /// Optional free-text context for the vote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Instant the vote was recorded.
    #[serde(rename = "time")]
    pub cast_at: DateTime<Utc>,
}

/// Per-choice vote counts for a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub yes: usize,
    pub no: usize,
    pub abstain: usize,
}

impl Tally {
    /// Total number of recorded votes; always equals the size of the
    /// topic's vote map (every vote falls into exactly one bucket).
    pub fn total(&self) -> usize {
        self.yes + self.no + self.abstain
    }

    /// Count for a single choice.
    pub fn count(&self, choice: VoteChoice) -> usize {
        match choice {
            VoteChoice::Yes => self.yes,
            VoteChoice::No => self.no,
            VoteChoice::Abstain => self.abstain,
        }
    }
}

// ============================================================================
// Topics
// ============================================================================

/// Derived open/closed status of a topic. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStatus {
    Open,
    Closed,
}

impl TopicStatus {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// A proposal open for member voting.
///
/// Created only through the ledger's submit operation; afterwards the only
/// mutations are accumulating votes and setting the manual close flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Unique identifier, assigned at creation, never reused.
    pub id: TopicId,
    /// Non-empty title.
    pub title: String,
    /// Optional descriptive text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional due date; absence means no automatic closing by date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Optional file attached at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    /// Recorded votes, keyed by member name. One vote per member.
    #[serde(default)]
    pub votes: BTreeMap<String, Vote>,
    /// Roster size snapshot at creation time.
    ///
    /// This is the denominator shown in "N of M voted" displays. It is
    /// deliberately NOT the live roster size: closure by participation
    /// uses the live size, so the two can diverge if the roster changes
    /// after creation. That divergence is part of the observable contract.
    pub total_members: usize,
    /// Explicit manual-close marker, independent of derived status.
    pub closed: bool,
    /// Instant the topic was created.
    pub created_at: DateTime<Utc>,
}

impl Topic {
    /// Number of distinct voters so far.
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// Whether `member` has a recorded vote on this topic.
    pub fn has_voted(&self, member: &str) -> bool {
        self.votes.contains_key(member)
    }

    /// Derived status at `now`, against the live roster size.
    ///
    /// A topic is closed iff any of:
    /// - the manual close flag is set, or
    /// - a due date is set and `now` is past it, or
    /// - the number of distinct voters has reached `current_roster_size`.
    ///
    /// The due date elapses at midnight UTC at the start of the due day,
    /// so a topic due "today" already reads closed.
    pub fn status(&self, now: DateTime<Utc>, current_roster_size: usize) -> TopicStatus {
        if self.closed {
            return TopicStatus::Closed;
        }
        if let Some(due) = self.due_date {
            if now > due.and_time(NaiveTime::MIN).and_utc() {
                return TopicStatus::Closed;
            }
        }
        if self.votes.len() >= current_roster_size {
            return TopicStatus::Closed;
        }
        TopicStatus::Open
    }

    /// Convenience wrapper over [`status`](Self::status).
    pub fn is_closed(&self, now: DateTime<Utc>, current_roster_size: usize) -> bool {
        self.status(now, current_roster_size).is_closed()
    }

    /// Per-choice counts, scanned directly from the vote map.
    ///
    /// Members who never voted contribute to no bucket. Orphaned votes
    /// (voter removed from the roster after voting) still count here.
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for vote in self.votes.values() {
            match vote.choice {
                VoteChoice::Yes => tally.yes += 1,
                VoteChoice::No => tally.no += 1,
                VoteChoice::Abstain => tally.abstain += 1,
            }
        }
        tally
    }

    /// Display ratio `(voted, total_members)`.
    ///
    /// Uses the creation-time snapshot denominator, not the live roster
    /// size. See [`total_members`](Self::total_members).
    pub fn participation(&self) -> (usize, usize) {
        (self.votes.len(), self.total_members)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn topic(total_members: usize) -> Topic {
        Topic {
            id: TopicId::new(1),
            title: "Approve Q3 Budget".to_string(),
            description: None,
            due_date: None,
            attachment: None,
            votes: BTreeMap::new(),
            total_members,
            closed: false,
            created_at: noon(2025, 6, 1),
        }
    }

    fn vote(choice: VoteChoice) -> Vote {
        Vote { choice, note: None, cast_at: noon(2025, 6, 2) }
    }

    #[test]
    fn fresh_topic_is_open() {
        let t = topic(3);
        assert_eq!(t.status(noon(2025, 6, 2), 3), TopicStatus::Open);
    }

    #[test]
    fn manual_flag_closes_regardless_of_votes() {
        let mut t = topic(3);
        t.closed = true;
        assert!(t.is_closed(noon(2025, 6, 2), 3));
    }

    #[test]
    fn past_due_date_closes_regardless_of_vote_count() {
        let mut t = topic(3);
        t.due_date = Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert!(t.is_closed(noon(2025, 6, 2), 3), "due yesterday");
        // Midday on the due day itself is already past midnight UTC.
        assert!(t.is_closed(noon(2025, 6, 1), 3), "due today");
    }

    #[test]
    fn future_due_date_stays_open() {
        let mut t = topic(3);
        t.due_date = Some(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(t.status(noon(2025, 6, 2), 3), TopicStatus::Open);
    }

    #[test]
    fn closes_when_voters_reach_live_roster_size() {
        let mut t = topic(3);
        t.votes.insert("Alice".to_string(), vote(VoteChoice::Yes));
        t.votes.insert("Bob".to_string(), vote(VoteChoice::No));
        assert_eq!(t.status(noon(2025, 6, 2), 3), TopicStatus::Open);

        t.votes.insert("Cara".to_string(), vote(VoteChoice::Abstain));
        assert!(t.is_closed(noon(2025, 6, 2), 3));
    }

    #[test]
    fn closure_uses_live_roster_size_not_snapshot() {
        // Created with 5 members, roster later shrank to 2.
        let mut t = topic(5);
        t.votes.insert("Alice".to_string(), vote(VoteChoice::Yes));
        t.votes.insert("Bob".to_string(), vote(VoteChoice::No));
        assert!(t.is_closed(noon(2025, 6, 2), 2));
        // The displayed denominator still reads the snapshot.
        assert_eq!(t.participation(), (2, 5));
    }

    #[test]
    fn empty_roster_closes_everything() {
        let t = topic(0);
        assert!(t.is_closed(noon(2025, 6, 2), 0));
    }

    #[test]
    fn tally_buckets_partition_the_vote_map() {
        let mut t = topic(4);
        t.votes.insert("Alice".to_string(), vote(VoteChoice::Yes));
        t.votes.insert("Bob".to_string(), vote(VoteChoice::No));
        t.votes.insert("Cara".to_string(), vote(VoteChoice::Yes));
        let tally = t.tally();
        assert_eq!(tally, Tally { yes: 2, no: 1, abstain: 0 });
        assert_eq!(tally.total(), t.vote_count());
    }

    #[test]
    fn vote_choice_parses_exact_strings_only() {
        assert_eq!("Yes".parse::<VoteChoice>().unwrap(), VoteChoice::Yes);
        assert_eq!("No".parse::<VoteChoice>().unwrap(), VoteChoice::No);
        assert_eq!("Abstain".parse::<VoteChoice>().unwrap(), VoteChoice::Abstain);
        assert!(matches!(
            "yes".parse::<VoteChoice>(),
            Err(BoardError::InvalidVoteChoice { .. })
        ));
        assert!("".parse::<VoteChoice>().is_err());
    }

    #[test]
    fn topic_serde_uses_camel_case_wire_names() {
        let mut t = topic(2);
        t.votes.insert("Alice".to_string(), vote(VoteChoice::Yes));
        let json = serde_json::to_value(&t).expect("encode");
        assert!(json.get("totalMembers").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["votes"]["Alice"]["choice"], "Yes");
        assert!(json["votes"]["Alice"].get("time").is_some());

        let back: Topic = serde_json::from_value(json).expect("decode");
        assert_eq!(back, t);
    }
}
