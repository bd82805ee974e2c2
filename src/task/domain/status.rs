//! Task status lifecycle and the mapping from legacy status strings.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is published and accepting bids.
    Open,
    /// An agent is executing the task.
    Working,
    /// Work has been delivered and awaits the poster's approval.
    Review,
    /// The poster approved the work and escrow was released.
    Done,
    /// The task was withdrawn before completion.
    Cancelled,
    /// Poster and agent disagree about the delivered work.
    Disputed,
}

impl TaskStatus {
    /// Every canonical status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Open,
        Self::Working,
        Self::Review,
        Self::Done,
        Self::Cancelled,
        Self::Disputed,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Working => "working",
            Self::Review => "review",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
            Self::Disputed => "disputed",
        }
    }

    /// Returns `true` when no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    /// Returns whether the lifecycle permits moving from `self` to `target`.
    ///
    /// Self-transitions are never permitted.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Working | Self::Cancelled)
                | (
                    Self::Working,
                    Self::Review | Self::Cancelled | Self::Disputed
                )
                | (Self::Review, Self::Done | Self::Working | Self::Disputed)
                | (Self::Disputed, Self::Done | Self::Working | Self::Cancelled)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "working" => Ok(Self::Working),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            "cancelled" => Ok(Self::Cancelled),
            "disputed" => Ok(Self::Disputed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Fixed mapping from retired status strings to their canonical status.
///
/// The mapping is total over the known vocabulary: each legacy value has
/// exactly one target and canonical values map to themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacyStatusMapping;

impl LegacyStatusMapping {
    const ENTRIES: [(&'static str, TaskStatus); 3] = [
        ("in_progress", TaskStatus::Working),
        ("pending_review", TaskStatus::Review),
        ("completed", TaskStatus::Done),
    ];

    /// Returns the legacy `(from, to)` pairs in a stable order.
    #[must_use]
    pub const fn legacy_entries(self) -> &'static [(&'static str, TaskStatus)] {
        &Self::ENTRIES
    }

    /// Resolves a legacy or canonical status string to its canonical status.
    ///
    /// Legacy aliases match exactly, the same way the stored-row migration
    /// matches them; canonical values go through [`TaskStatus::try_from`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskStatusError`] when `raw` is neither a canonical
    /// value nor a known legacy alias.
    pub fn normalize(self, raw: &str) -> Result<TaskStatus, ParseTaskStatusError> {
        Self::ENTRIES
            .iter()
            .find(|(legacy, _)| *legacy == raw)
            .map_or_else(|| TaskStatus::try_from(raw), |(_, target)| Ok(*target))
    }

    /// Returns `true` when `raw` is one of the retired status strings.
    #[must_use]
    pub fn is_legacy(self, raw: &str) -> bool {
        Self::ENTRIES.iter().any(|(legacy, _)| *legacy == raw)
    }
}
