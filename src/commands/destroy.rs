use anyhow::{Context as _, Result};
use declarative::{Deletion, Reconciler, Resource};
use dialoguer::Confirm;
use softserve::{Collaborator, Repository, ServerSettings, User};
use sshexec::Execute;

use crate::Context;
use crate::cli::Kind;
use crate::ui;

use super::show::kind_name;

pub fn run(ctx: &Context, kind: Kind, id: &str, yes: bool) -> Result<()> {
    let kind_name = kind_name(kind);

    if kind != Kind::Settings && !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {kind_name} {id}?"))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            ui::info("Aborted");
            return Ok(());
        }
    }

    let client = super::connect(ctx)?;
    let deletion = match kind {
        Kind::Repo => delete::<Repository>(&client, id)?,
        Kind::User => delete::<User>(&client, id)?,
        Kind::Collab => delete::<Collaborator>(&client, id)?,
        Kind::Settings => delete::<ServerSettings>(&client, id)?,
    };

    if !ctx.quiet {
        match deletion {
            Deletion::Removed => ui::success(&format!("Deleted {kind_name} {id}")),
            Deletion::Forgotten => {
                ui::info(&format!("{kind_name} cannot be deleted; nothing was sent"));
            }
        }
    }
    Ok(())
}

fn delete<R: Resource>(remote: &dyn Execute, raw_id: &str) -> Result<Deletion> {
    let id = R::parse_id(raw_id)?;
    Ok(Reconciler::<R>::new(remote).delete(&id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sshexec::mock::ScriptedExecutor;

    #[test]
    fn test_delete_repository() {
        let remote = ScriptedExecutor::new();
        let deletion = delete::<Repository>(&remote, "proj").unwrap();
        assert_eq!(deletion, Deletion::Removed);
        assert_eq!(remote.executed(), vec!["repo delete proj"]);
    }

    #[test]
    fn test_delete_settings_sends_nothing() {
        let remote = ScriptedExecutor::new();
        let deletion = delete::<ServerSettings>(&remote, "settings").unwrap();
        assert_eq!(deletion, Deletion::Forgotten);
        assert!(remote.executed().is_empty());
    }

    #[test]
    fn test_delete_bad_collaborator_id() {
        let remote = ScriptedExecutor::new();
        assert!(delete::<Collaborator>(&remote, "proj").is_err());
        assert!(remote.executed().is_empty());
    }
}
