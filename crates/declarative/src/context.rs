//! Provider traits for plan execution
//!
//! These traits allow the declarative crate to be driven from a terminal,
//! a test, or anything else without depending on a UI framework.

use crate::diff::ResourceDiff;
use crate::types::ApplyResult;
use anyhow::Result;

/// Progress callback for execution operations
///
/// Implement this trait to receive progress updates during execution.
pub trait ProgressCallback {
    /// Called once every resource has been read and diffed
    fn on_plan(&mut self, diffs: &[ResourceDiff]);

    /// Called when starting to work on a single resource
    fn on_resource_start(&mut self, kind: &str, id: &str);

    /// Called when a resource is finished, converged or not
    fn on_resource_complete(&mut self, kind: &str, id: &str, result: &ApplyResult);
}

/// Confirmation callback for user interaction
pub trait ConfirmCallback {
    /// Ask the user to confirm an action
    ///
    /// Returns `true` if the user confirmed.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_plan(&mut self, _diffs: &[ResourceDiff]) {}
    fn on_resource_start(&mut self, _kind: &str, _id: &str) {}
    fn on_resource_complete(&mut self, _kind: &str, _id: &str, _result: &ApplyResult) {}
}

/// Auto-confirm callback (always returns true)
pub struct AutoConfirm;

impl ConfirmCallback for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Auto-decline callback (always returns false)
pub struct AutoDecline;

impl ConfirmCallback for AutoDecline {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(false)
    }
}
