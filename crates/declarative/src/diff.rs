//! Diff computation for resources

use crate::command::Command;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Members to remove and to add to turn `prior` into `desired`.
///
/// Members present in both sets appear in neither list. Both lists come
/// out sorted.
pub fn set_diff<'a>(
    desired: &'a BTreeSet<String>,
    prior: &'a BTreeSet<String>,
) -> (Vec<&'a str>, Vec<&'a str>) {
    let removed = prior.difference(desired).map(String::as_str).collect();
    let added = desired.difference(prior).map(String::as_str).collect();
    (removed, added)
}

/// `Some(desired)` when a requested value differs from what is recorded.
///
/// `None` in `desired` means "leave it alone" and never produces a change.
pub fn changed<'a, T: PartialEq + ?Sized>(desired: Option<&'a T>, prior: &T) -> Option<&'a T> {
    desired.filter(|value| *value != prior)
}

/// What converging one resource would do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Change {
    /// The resource does not exist yet
    Create { commands: Vec<Command> },
    /// The resource exists but some fields differ
    Update { commands: Vec<Command> },
    /// Nothing to do
    NoChange,
}

impl Change {
    /// Commands this change would run.
    pub fn commands(&self) -> &[Command] {
        match self {
            Self::Create { commands } | Self::Update { commands } => commands,
            Self::NoChange => &[],
        }
    }
}

/// A diff between actual and desired state of one resource
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDiff {
    /// Kind of the resource
    pub kind: &'static str,
    /// Identity of the resource
    pub id: String,
    /// What would change
    pub change: Change,
}

impl ResourceDiff {
    /// Check if this diff represents an addition
    pub fn is_addition(&self) -> bool {
        matches!(self.change, Change::Create { .. })
    }

    /// Check if this diff represents a modification
    pub fn is_modification(&self) -> bool {
        matches!(self.change, Change::Update { .. })
    }

    /// Check if anything would run
    pub fn has_changes(&self) -> bool {
        !matches!(self.change, Change::NoChange)
    }
}

/// Diff summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    /// Number of resources to create
    pub additions: usize,
    /// Number of resources to modify
    pub modifications: usize,
    /// Number of commands that would run
    pub commands: usize,
}

impl DiffSummary {
    /// Create a summary from a list of diffs
    pub fn from_diffs(diffs: &[ResourceDiff]) -> Self {
        let mut summary = Self::default();
        for diff in diffs {
            if diff.is_addition() {
                summary.additions += 1;
            } else if diff.is_modification() {
                summary.modifications += 1;
            }
            summary.commands += diff.change.commands().len();
        }
        summary
    }

    /// Total number of changes
    pub fn total(&self) -> usize {
        self.additions + self.modifications
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.total() > 0
    }
}

/// Group diffs by resource kind
pub fn group_by_kind(diffs: &[ResourceDiff]) -> BTreeMap<&'static str, Vec<&ResourceDiff>> {
    let mut groups: BTreeMap<&'static str, Vec<&ResourceDiff>> = BTreeMap::new();
    for diff in diffs {
        groups.entry(diff.kind).or_default().push(diff);
    }
    groups
}
