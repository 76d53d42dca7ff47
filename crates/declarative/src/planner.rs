//! Execution planner - collects desired resources of mixed kinds

use crate::diff::ResourceDiff;
use crate::executor::Reconciler;
use crate::resource::Resource;
use crate::types::ApplyResult;
use anyhow::{Context, Result};
use sshexec::Execute;

/// One desired resource, type-erased so kinds can share a plan.
pub trait Step {
    /// Kind of the resource
    fn kind(&self) -> &'static str;

    /// Identity of the resource
    fn id(&self) -> String;

    /// Read actual state and work out what converging would run.
    fn diff(&mut self, remote: &dyn Execute) -> Result<ResourceDiff>;

    /// Converge, creating when the last read found nothing and updating
    /// against the read state otherwise.
    fn apply(&mut self, remote: &dyn Execute) -> Result<ApplyResult>;
}

/// Desired snapshot plus whatever the last read returned.
pub struct Pending<R: Resource> {
    desired: R::Desired,
    // None until read; Some(None) when the remote object is absent
    actual: Option<Option<R::State>>,
}

impl<R: Resource> Pending<R> {
    /// Wrap a desired snapshot.
    pub fn new(desired: R::Desired) -> Self {
        Self {
            desired,
            actual: None,
        }
    }
}

impl<R: Resource> Step for Pending<R> {
    fn kind(&self) -> &'static str {
        R::KIND
    }

    fn id(&self) -> String {
        R::identity(&self.desired).to_string()
    }

    fn diff(&mut self, remote: &dyn Execute) -> Result<ResourceDiff> {
        let reconciler = Reconciler::<R>::new(remote);
        let (actual, change) = reconciler
            .diff(&self.desired)
            .with_context(|| format!("Failed to read {} {}", R::KIND, self.id()))?;
        self.actual = Some(actual);

        Ok(ResourceDiff {
            kind: R::KIND,
            id: self.id(),
            change,
        })
    }

    fn apply(&mut self, remote: &dyn Execute) -> Result<ApplyResult> {
        if self.actual.is_none() {
            self.diff(remote)?;
        }

        let reconciler = Reconciler::<R>::new(remote);
        let result = match self.actual.clone().flatten() {
            Some(prior) => {
                if reconciler.plan_update(&self.desired, &prior).is_empty() {
                    return Ok(ApplyResult::NoChange);
                }
                let state = reconciler
                    .update(&self.desired, &prior)
                    .with_context(|| format!("Failed to update {} {}", R::KIND, self.id()))?;
                self.actual = Some(Some(state));
                ApplyResult::Updated
            }
            None => {
                let state = reconciler
                    .create(&self.desired)
                    .with_context(|| format!("Failed to create {} {}", R::KIND, self.id()))?;
                self.actual = Some(Some(state));
                ApplyResult::Created
            }
        };
        Ok(result)
    }
}

/// Desired resources in the order they should converge
#[derive(Default)]
pub struct ExecutionPlan {
    /// Steps, applied first to last
    pub steps: Vec<Box<dyn Step>>,
}

impl ExecutionPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a desired snapshot of kind `R`.
    pub fn push<R>(&mut self, desired: R::Desired)
    where
        R: Resource + 'static,
    {
        self.steps.push(Box::new(Pending::<R>::new(desired)));
    }

    /// Check if the plan is empty
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of queued resources
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

