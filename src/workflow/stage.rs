//! Processing stages of an audit record
//!
//! A record moves through an ordered prefix of four working stages and ends
//! in one of two mutually exclusive terminal outcomes:
//!
//! ```text
//! Bookkeep -> DraftAccount -> Finalize -> Handover -> Return   (terminal)
//!                                                 \-> Submit   (terminal)
//! ```
//!
//! The prefix is traversed forward only, one step at a time. The branch at
//! `Handover` is guarded by preconditions evaluated in
//! [`engine`](crate::workflow::engine), not here; this module only knows the
//! shape of the graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One discrete position in a record's processing lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Books are being brought up to date
    Bookkeep,
    /// Draft accounts are being prepared from the books
    DraftAccount,
    /// Accounts are checked and finalized
    Finalize,
    /// Record is handed over for the closing decision
    Handover,
    /// Terminal outcome: record was returned to the client with a reason
    Return,
    /// Terminal outcome: record was submitted
    Submit,
}

/// The canonical ordering of the working stages.
///
/// This is the source of truth for step-order enforcement: a transition
/// within the prefix is legal only to the element immediately after the
/// current one.
pub const ORDERED_STAGES: [Stage; 4] = [
    Stage::Bookkeep,
    Stage::DraftAccount,
    Stage::Finalize,
    Stage::Handover,
];

/// Every stage: the ordered prefix followed by the two terminal outcomes.
pub const ALL_STAGES: [Stage; 6] = [
    Stage::Bookkeep,
    Stage::DraftAccount,
    Stage::Finalize,
    Stage::Handover,
    Stage::Return,
    Stage::Submit,
];

impl Stage {
    /// Get the name of this stage, matching its serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Bookkeep => "Bookkeep",
            Stage::DraftAccount => "DraftAccount",
            Stage::Finalize => "Finalize",
            Stage::Handover => "Handover",
            Stage::Return => "Return",
            Stage::Submit => "Submit",
        }
    }

    /// Whether this is a terminal stage (no outgoing transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Return | Stage::Submit)
    }

    /// Position of this stage in [`ORDERED_STAGES`], `None` for terminals
    pub fn ordinal(&self) -> Option<usize> {
        ORDERED_STAGES.iter().position(|stage| stage == self)
    }

    /// The immediate successor within the ordered prefix.
    ///
    /// `None` for `Handover`, whose successors are the terminal branch, and
    /// for the terminal stages themselves.
    pub fn next(&self) -> Option<Stage> {
        let index = self.ordinal()?;
        ORDERED_STAGES.get(index + 1).copied()
    }

    /// All stages a record at this stage may legally move to next.
    ///
    /// Ordering preconditions only; the document and reason requirements at
    /// the branch still apply when the transition is requested.
    pub fn successors(&self) -> Vec<Stage> {
        match self {
            Stage::Bookkeep => vec![Stage::DraftAccount],
            Stage::DraftAccount => vec![Stage::Finalize],
            Stage::Finalize => vec![Stage::Handover],
            Stage::Handover => vec![Stage::Return, Stage::Submit],
            Stage::Return | Stage::Submit => vec![],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
