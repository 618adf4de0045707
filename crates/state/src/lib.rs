//! State layer for the Boardroom voting core.
//!
//! Provides:
//! - [`Roster`]: the ordered list of eligible member names
//! - [`Ledger`]: the topic collection with create-topic and cast-vote
//!   operations and the derived open/closed partition
//! - [`BoardContext`]: the wiring layer that loads both stores from the
//!   persistence port at startup and persists them on every mutation
//!
//! The roster and ledger are pure data with no I/O of their own; all
//! persistence and time reads go through the context's injected port and
//! clock.

pub mod context;
pub mod ledger;
pub mod roster;

pub use context::BoardContext;
pub use ledger::{Ledger, TopicDraft};
pub use roster::Roster;
