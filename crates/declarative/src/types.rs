//! Core types for declarative resource management

use crate::command::Command;
use serde::{Deserialize, Serialize};

/// How a resource is removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// Run this command on the remote
    Command(Command),
    /// Nothing to run; the caller just stops tracking the object
    Forget,
}

/// What a delete did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deletion {
    /// The remote object was deleted
    Removed,
    /// No remote command was issued
    Forgotten,
}

/// Result of converging one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyResult {
    /// Already matched the desired state
    NoChange,
    /// Resource was created
    Created,
    /// Resource was modified
    Updated,
    /// Resource was removed
    Removed,
    /// Resource was dropped without a remote command
    Forgotten,
    /// Apply failed
    Failed { error: String },
    /// Apply was skipped
    Skipped { reason: String },
}

impl ApplyResult {
    /// Check if the result represents success (no failure)
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// Check if the result represents a change
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            Self::Created | Self::Updated | Self::Removed | Self::Forgotten
        )
    }
}

impl From<Deletion> for ApplyResult {
    fn from(deletion: Deletion) -> Self {
        match deletion {
            Deletion::Removed => Self::Removed,
            Deletion::Forgotten => Self::Forgotten,
        }
    }
}

/// Summary of execution results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteSummary {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub no_change: usize,
}

impl ExecuteSummary {
    /// Total number of actual changes made
    pub fn total_changes(&self) -> usize {
        self.created + self.updated + self.removed
    }

    /// Check if execution was fully successful (no failures)
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Total number of resources processed
    pub fn total(&self) -> usize {
        self.total_changes() + self.skipped + self.failed + self.no_change
    }

    /// Add a result to the summary
    pub fn add_result(&mut self, result: &ApplyResult) {
        match result {
            ApplyResult::NoChange => self.no_change += 1,
            ApplyResult::Created => self.created += 1,
            ApplyResult::Updated => self.updated += 1,
            ApplyResult::Removed | ApplyResult::Forgotten => self.removed += 1,
            ApplyResult::Failed { .. } => self.failed += 1,
            ApplyResult::Skipped { .. } => self.skipped += 1,
        }
    }
}

/// Options for execution
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Don't make changes, just show what would happen
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut summary = ExecuteSummary::default();
        for result in [
            ApplyResult::Created,
            ApplyResult::Updated,
            ApplyResult::NoChange,
            ApplyResult::Forgotten,
            ApplyResult::Failed {
                error: "boom".into(),
            },
        ] {
            summary.add_result(&result);
        }

        assert_eq!(summary.total_changes(), 3);
        assert_eq!(summary.total(), 5);
        assert!(!summary.is_success());
    }

    #[test]
    fn test_deletion_maps_to_result() {
        assert_eq!(ApplyResult::from(Deletion::Removed), ApplyResult::Removed);
        assert!(ApplyResult::from(Deletion::Forgotten).is_change());
        assert!(ApplyResult::Skipped { reason: "dry run".into() }.is_success());
    }
}
