//! Terminal rendering of plans, per-resource results and summaries.

use anyhow::{Context as _, Result};
use colored::Colorize;
use declarative::{
    ApplyResult, Change, ConfirmCallback, DiffSummary, ExecuteSummary, ProgressCallback,
    ResourceDiff, group_by_kind,
};
use dialoguer::Confirm;

use crate::ui;

/// Prints the plan before applying and one line per converged resource.
pub struct TerminalProgress {
    quiet: bool,
    show_commands: bool,
}

impl TerminalProgress {
    pub fn new(quiet: bool, show_commands: bool) -> Self {
        Self {
            quiet,
            show_commands,
        }
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_plan(&mut self, diffs: &[ResourceDiff]) {
        if self.quiet {
            return;
        }
        display_plan(diffs, self.show_commands);
    }

    fn on_resource_start(&mut self, kind: &str, id: &str) {
        log::info!("Applying {kind} {id}");
    }

    fn on_resource_complete(&mut self, kind: &str, id: &str, result: &ApplyResult) {
        // Failures are always shown; everything else only when not quiet
        let line = match result {
            ApplyResult::Failed { error } => {
                eprintln!("    {} {kind} {id}: {error}", "✗".red());
                return;
            }
            _ if self.quiet => return,
            ApplyResult::NoChange => return,
            ApplyResult::Created => format!("{} {kind} {id} created", "✓".green()),
            ApplyResult::Updated => format!("{} {kind} {id} updated", "✓".green()),
            ApplyResult::Removed => format!("{} {kind} {id} removed", "✓".green()),
            ApplyResult::Forgotten => format!("{} {kind} {id} forgotten", "✓".green()),
            ApplyResult::Skipped { reason } => {
                format!("{} {kind} {id} skipped ({reason})", "⊘".dimmed())
            }
        };
        println!("    {line}");
    }
}

/// Render what converging would do, grouped by kind.
pub fn display_plan(diffs: &[ResourceDiff], show_commands: bool) {
    let summary = DiffSummary::from_diffs(diffs);
    if !summary.has_changes() {
        println!();
        println!("  {} Server already matches the manifest", "✓".green());
        return;
    }

    ui::header("Planned changes");
    for (kind, kind_diffs) in group_by_kind(diffs) {
        let changed: Vec<_> = kind_diffs.into_iter().filter(|d| d.has_changes()).collect();
        if changed.is_empty() {
            continue;
        }

        println!("  {}", ui::kind_title(kind).bold());
        for diff in changed {
            let symbol = match diff.change {
                Change::Create { .. } => "+".green(),
                Change::Update { .. } => "~".yellow(),
                Change::NoChange => continue,
            };
            println!("    {symbol} {}", diff.id);
            if show_commands {
                for command in diff.change.commands() {
                    println!("        {}", command.as_str().dimmed());
                }
            }
        }
    }

    println!();
    println!(
        "  {} to create, {} to update, {} commands",
        summary.additions, summary.modifications, summary.commands
    );
}

/// Asks on the terminal before anything is applied.
pub struct TerminalConfirm;

impl ConfirmCallback for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        println!();
        Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
            .context("Failed to read confirmation")
    }
}

/// Print final summary
pub fn print_summary(summary: &ExecuteSummary, dry_run: bool) {
    println!();
    if dry_run {
        println!("  {} Dry run - no changes made", "ℹ".blue());
    } else if !summary.is_success() {
        println!("  {} Configuration applied with errors", "⚠".yellow().bold());
    } else if summary.total_changes() > 0 {
        println!("  {} Configuration applied successfully!", "✓".green().bold());
    } else if summary.skipped > 0 {
        println!("  {} Aborted", "✗".red());
    } else {
        println!("  {} Nothing to do", "✓".green().bold());
    }

    for line in summary_lines(summary) {
        println!("    • {line}");
    }
}

fn summary_lines(summary: &ExecuteSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for (count, what) in [
        (summary.created, "created"),
        (summary.updated, "updated"),
        (summary.removed, "removed"),
        (summary.no_change, "unchanged"),
        (summary.skipped, "skipped"),
    ] {
        if count > 0 {
            lines.push(format!("{count} {} {what}", plural(count)));
        }
    }
    if summary.failed > 0 {
        lines.push(format!("{} {} failed", summary.failed, plural(summary.failed).red()));
    }
    lines
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "resource" } else { "resources" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lines() {
        colored::control::set_override(false);
        let summary = ExecuteSummary {
            created: 1,
            updated: 2,
            failed: 1,
            ..ExecuteSummary::default()
        };
        assert_eq!(
            summary_lines(&summary),
            vec![
                "1 resource created",
                "2 resources updated",
                "1 resource failed",
            ]
        );
    }

    #[test]
    fn test_summary_lines_empty() {
        assert!(summary_lines(&ExecuteSummary::default()).is_empty());
    }
}
