//! # Declarative
//!
//! Converge remote resources to a desired state through one-shot
//! administrative commands.
//!
//! ## Core Concepts
//!
//! - **Resource**: a kind of remote object (a repository, a user, ...)
//!   described by pure command builders plus a read
//! - **Reconciler**: create / read / update / delete / import for one kind
//! - **ExecutionPlan**: desired resources of mixed kinds, diffed and applied
//!   in order by [`execute`]
//!
//! ## Example
//!
//! ```ignore
//! use declarative::{ExecuteOptions, ExecutionPlan, Reconciler, AutoConfirm, NoProgress, execute};
//!
//! // One resource at a time
//! let state = Reconciler::<Repository>::new(&client).create(&desired)?;
//!
//! // A whole manifest
//! let mut plan = ExecutionPlan::new();
//! plan.push::<Repository>(desired);
//! let options = ExecuteOptions::default();
//! let summary = execute(plan, &client, &options, &mut NoProgress, &mut AutoConfirm)?;
//! ```
//!
//! ## Provider Traits
//!
//! - [`ProgressCallback`]: receives the plan and per-resource results
//! - [`ConfirmCallback`]: handles user confirmation before applying

pub mod command;
pub mod context;
pub mod diff;
pub mod executor;
pub mod planner;
pub mod resource;
pub mod types;

// Re-export main types at crate root
pub use command::{Command, quote};
pub use context::{AutoConfirm, AutoDecline, ConfirmCallback, NoProgress, ProgressCallback};
pub use diff::{Change, DiffSummary, ResourceDiff, changed, group_by_kind, set_diff};
pub use executor::{Reconciler, execute};
pub use planner::{ExecutionPlan, Pending, Step};
pub use resource::{Resource, ResourceError};
pub use types::{ApplyResult, Deletion, ExecuteOptions, ExecuteSummary, Removal};
