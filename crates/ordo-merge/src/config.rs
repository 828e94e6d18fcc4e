use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Configuration for a [`Merger`](crate::Merger).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MergeConfig {
    /// How to order an arriving item against a departing one when no anchor
    /// in `next` orders them.
    pub tie_break: TieBreak,
    /// What to do when a key repeats within one snapshot.
    pub duplicate_keys: DuplicateKeys,
}

impl MergeConfig {
    /// Set the tie-break convention.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Set the duplicate-key policy.
    pub fn with_duplicate_keys(mut self, duplicate_keys: DuplicateKeys) -> Self {
        self.duplicate_keys = duplicate_keys;
        self
    }
}

/// Ordering convention for a next-only item against a previous-only item that
/// no anchor places relative to each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// The departing (previous-only) item comes first; the arriving item is
    /// pushed later.
    #[default]
    DepartingFirst,
    /// The arriving (next-only) item comes first.
    ArrivingFirst,
}

impl TieBreak {
    /// Where the arriving item lands relative to the departing one.
    pub(crate) fn arriving_order(self) -> Ordering {
        match self {
            Self::DepartingFirst => Ordering::Greater,
            Self::ArrivingFirst => Ordering::Less,
        }
    }
}

/// Policy for a key that appears more than once within one snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateKeys {
    /// The last occurrence is indexed and carried; earlier ones are skipped.
    #[default]
    LastWins,
    /// Fail the merge with [`MergeError::DuplicateKey`](crate::MergeError::DuplicateKey).
    Reject,
}
