use anyhow::{Result, bail};
use declarative::{AutoConfirm, ExecuteOptions, execute};

use crate::Context;
use crate::cli::ApplyArgs;
use crate::manifest::Manifest;
use crate::progress::{self, TerminalConfirm, TerminalProgress};
use crate::ui;

pub fn run(ctx: &Context, args: &ApplyArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    if manifest.is_empty() {
        ui::warn(&format!("{} declares no resources", args.manifest.display()));
        return Ok(());
    }

    if !ctx.quiet {
        ui::header("softsync apply");
        ui::kv("manifest", &args.manifest.display().to_string());
        ui::kv("resources", &manifest.len().to_string());
    }

    let client = super::connect(ctx)?;
    if !ctx.quiet {
        ui::kv("server", &client.address());
    }

    let opts = ExecuteOptions {
        dry_run: args.dry_run,
    };
    let mut progress = TerminalProgress::new(ctx.quiet, args.dry_run || ctx.verbose > 0);
    let plan = manifest.into_plan();

    let summary = if args.yes {
        execute(plan, &client, &opts, &mut progress, &mut AutoConfirm)?
    } else {
        execute(plan, &client, &opts, &mut progress, &mut TerminalConfirm)?
    };

    if !ctx.quiet {
        progress::print_summary(&summary, args.dry_run);
    }

    if !summary.is_success() {
        bail!("{} of {} resources failed", summary.failed, summary.total());
    }
    Ok(())
}
