//! Execution engine - converges resources one command at a time

use crate::command::Command;
use crate::context::{ConfirmCallback, ProgressCallback};
use crate::diff::{Change, DiffSummary, ResourceDiff};
use crate::planner::ExecutionPlan;
use crate::resource::{Resource, ResourceError};
use crate::types::{ApplyResult, Deletion, ExecuteOptions, ExecuteSummary, Removal};
use anyhow::Result;
use log::{debug, info};
use sshexec::Execute;
use std::marker::PhantomData;

/// Create, read, update, delete and import for one resource kind.
///
/// Commands run strictly in order and the first failure aborts the
/// operation. Commands that already ran are not rolled back, so the
/// remote may be left partially converged; the next read shows where.
pub struct Reconciler<'a, R> {
    remote: &'a dyn Execute,
    kind: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> Reconciler<'a, R> {
    /// Reconcile through `remote`.
    pub fn new(remote: &'a dyn Execute) -> Self {
        Self {
            remote,
            kind: PhantomData,
        }
    }

    /// Create the object, then read it back.
    pub fn create(&self, desired: &R::Desired) -> Result<R::State, R::Error> {
        let id = R::identity(desired);
        self.run(&id, &R::create_commands(desired))?;
        let state = self.read(&id)?;
        info!("Created {} {id}", R::KIND);
        Ok(state)
    }

    /// Current state of the object.
    pub fn read(&self, id: &R::Id) -> Result<R::State, R::Error> {
        R::read(self.remote, id)
    }

    /// Send one command per field that differs from `prior`, then read back.
    ///
    /// `prior` is the last recorded state, not a fresh read; drift the
    /// recorded state does not know about is not corrected.
    pub fn update(&self, desired: &R::Desired, prior: &R::State) -> Result<R::State, R::Error> {
        let id = R::identity(desired);
        let commands = R::update_commands(desired, prior);
        if commands.is_empty() {
            debug!("{} {id} already converged", R::KIND);
        } else {
            self.run(&id, &commands)?;
            info!("Updated {} {id} ({} commands)", R::KIND, commands.len());
        }
        self.read(&id)
    }

    /// Remove the object, or just forget it when the kind has no remote
    /// removal.
    pub fn delete(&self, id: &R::Id) -> Result<Deletion, R::Error> {
        match R::removal(id) {
            Removal::Command(command) => {
                self.run(id, std::slice::from_ref(&command))?;
                info!("Deleted {} {id}", R::KIND);
                Ok(Deletion::Removed)
            }
            Removal::Forget => {
                debug!("{} {id} has no remote removal, forgetting it", R::KIND);
                Ok(Deletion::Forgotten)
            }
        }
    }

    /// Adopt an existing object from an operator-supplied identifier.
    pub fn import(&self, raw_id: &str) -> Result<(R::Id, R::State), R::Error> {
        let id = R::parse_id(raw_id)?;
        let state = self.read(&id)?;
        Ok((id, state))
    }

    /// Commands [`create`](Self::create) would run.
    pub fn plan_create(&self, desired: &R::Desired) -> Vec<Command> {
        R::create_commands(desired)
    }

    /// Commands [`update`](Self::update) would run.
    pub fn plan_update(&self, desired: &R::Desired, prior: &R::State) -> Vec<Command> {
        R::update_commands(desired, prior)
    }

    /// Read the object and work out what converging it would run.
    ///
    /// Returns the state that was read (`None` when absent) along with the
    /// change.
    pub fn diff(&self, desired: &R::Desired) -> Result<(Option<R::State>, Change), R::Error> {
        let id = R::identity(desired);
        match self.read(&id) {
            Ok(actual) => {
                let commands = self.plan_update(desired, &actual);
                let change = if commands.is_empty() {
                    Change::NoChange
                } else {
                    Change::Update { commands }
                };
                Ok((Some(actual), change))
            }
            Err(e) if e.is_not_found() => {
                let commands = self.plan_create(desired);
                Ok((None, Change::Create { commands }))
            }
            Err(e) => Err(e),
        }
    }

    fn run(&self, id: &R::Id, commands: &[Command]) -> Result<(), R::Error> {
        for command in commands {
            debug!("{} {id}: {command}", R::KIND);
            self.remote.execute(command.as_str())?;
        }
        Ok(())
    }
}

/// Converge every resource in a plan
///
/// Every step is read and diffed first. Steps that fail to read are
/// counted as failed; the rest are applied in order after confirmation.
/// A failing step does not stop the ones after it.
pub fn execute<P, C>(
    plan: ExecutionPlan,
    remote: &dyn Execute,
    opts: &ExecuteOptions,
    progress: &mut P,
    confirm: &mut C,
) -> Result<ExecuteSummary>
where
    P: ProgressCallback,
    C: ConfirmCallback,
{
    let mut summary = ExecuteSummary::default();
    let mut pending = Vec::new();
    let mut diffs: Vec<ResourceDiff> = Vec::new();

    for mut step in plan.steps {
        let (kind, id) = (step.kind(), step.id());
        match step.diff(remote) {
            Ok(diff) if diff.has_changes() => {
                diffs.push(diff);
                pending.push(step);
            }
            Ok(diff) => {
                summary.add_result(&ApplyResult::NoChange);
                progress.on_resource_complete(kind, &id, &ApplyResult::NoChange);
                diffs.push(diff);
            }
            Err(e) => {
                let result = ApplyResult::Failed {
                    error: format!("{e:#}"),
                };
                summary.add_result(&result);
                progress.on_resource_complete(kind, &id, &result);
            }
        }
    }

    progress.on_plan(&diffs);

    let changes = DiffSummary::from_diffs(&diffs);
    if !changes.has_changes() {
        return Ok(summary);
    }

    let skip = |summary: &mut ExecuteSummary, progress: &mut P, reason: &str| {
        for step in &pending {
            let result = ApplyResult::Skipped {
                reason: reason.to_string(),
            };
            summary.add_result(&result);
            progress.on_resource_complete(step.kind(), &step.id(), &result);
        }
    };

    if opts.dry_run {
        skip(&mut summary, progress, "dry run");
        return Ok(summary);
    }

    let prompt = format!(
        "Apply {} changes ({} commands)?",
        changes.total(),
        changes.commands
    );
    if !confirm.confirm(&prompt)? {
        skip(&mut summary, progress, "declined");
        return Ok(summary);
    }

    for mut step in pending {
        let (kind, id) = (step.kind(), step.id());
        progress.on_resource_start(kind, &id);
        let result = step.apply(remote).unwrap_or_else(|e| ApplyResult::Failed {
            error: format!("{e:#}"),
        });
        summary.add_result(&result);
        progress.on_resource_complete(kind, &id, &result);
    }

    Ok(summary)
}
