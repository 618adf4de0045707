//! The roster: an ordered list of eligible member names.
//!
//! Names are identities: votes are keyed by the literal name string,
//! uniqueness is not enforced, and renaming is modeled as
//! remove-then-add. Removing a
//! member never touches that member's already-cast votes; those stay in
//! the topics' vote maps as orphaned votes.

use serde::{Deserialize, Serialize};

use boardroom_types::{BoardError, Result};

/// Ordered sequence of member names, insertion order = display order.
///
/// Persists as a plain JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<String>,
}

impl Roster {
    /// Creates a roster from an existing member list.
    pub fn from_members(members: Vec<String>) -> Self {
        Self { members }
    }

    /// The member names, in display order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Current roster size, the live denominator for closure by full
    /// participation.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `name` is currently on the roster.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Appends a member to the end of the roster.
    ///
    /// The name is trimmed first. Duplicates are allowed: the roster is a
    /// set of positional entries, not of identities.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyMemberName`] if `name` trims to empty.
    pub fn add(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoardError::EmptyMemberName);
        }
        self.members.push(name.to_string());
        Ok(())
    }

    /// Removes and returns the member at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidMemberIndex`] if `index` is out of
    /// range.
    pub fn remove(&mut self, index: usize) -> Result<String> {
        if index >= self.members.len() {
            return Err(BoardError::InvalidMemberIndex { index, len: self.members.len() });
        }
        Ok(self.members.remove(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_appends_in_order() {
        let mut roster = Roster::default();
        roster.add("  Alice  ").expect("add");
        roster.add("Bob").expect("add");
        assert_eq!(roster.members(), ["Alice", "Bob"]);
    }

    #[test]
    fn whitespace_only_name_is_rejected() {
        let mut roster = Roster::default();
        assert!(matches!(roster.add("   "), Err(BoardError::EmptyMemberName)));
        assert!(roster.is_empty());
    }

    #[test]
    fn duplicate_names_are_positional_entries() {
        let mut roster = Roster::default();
        roster.add("Alice").expect("add");
        roster.add("Alice").expect("add duplicate");
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn remove_by_index() {
        let mut roster =
            Roster::from_members(vec!["Alice".into(), "Bob".into(), "Cara".into()]);
        let removed = roster.remove(1).expect("remove");
        assert_eq!(removed, "Bob");
        assert_eq!(roster.members(), ["Alice", "Cara"]);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut roster = Roster::from_members(vec!["Alice".into()]);
        let err = roster.remove(1).unwrap_err();
        assert!(matches!(err, BoardError::InvalidMemberIndex { index: 1, len: 1 }));
    }

    #[test]
    fn persists_as_a_plain_string_array() {
        let roster = Roster::from_members(vec!["Alice".into(), "Bob".into()]);
        let json = serde_json::to_string(&roster).expect("encode");
        assert_eq!(json, r#"["Alice","Bob"]"#);
        let back: Roster = serde_json::from_str(&json).expect("decode");
        assert_eq!(back, roster);
    }
}
