use super::{lookup, parse_name};
use crate::error::{Error, Result};
use crate::parser::parse_repo_info;
use crate::types::{RepositorySpec, RepositoryState};
use crate::wire;
use declarative::{Command, Removal, Resource, changed};
use sshexec::Execute;

/// A git repository.
///
/// Description and project name are only sent on create when non-empty,
/// while an update sends `Some("")` as a real clearing command.
pub struct Repository;

impl Resource for Repository {
    const KIND: &'static str = "repository";
    type Id = String;
    type Desired = RepositorySpec;
    type State = RepositoryState;
    type Error = Error;

    fn identity(desired: &RepositorySpec) -> String {
        desired.name.clone()
    }

    fn parse_id(raw: &str) -> Result<String> {
        parse_name(Self::KIND, raw)
    }

    fn create_commands(desired: &RepositorySpec) -> Vec<Command> {
        let mut commands = vec![wire::repo_create(
            &desired.name,
            desired.description.as_deref(),
            desired.project_name.as_deref(),
            desired.private,
        )];
        // `repo create` has no hidden flag
        if desired.hidden {
            commands.push(wire::repo_hidden(&desired.name, true));
        }
        commands
    }

    fn update_commands(desired: &RepositorySpec, prior: &RepositoryState) -> Vec<Command> {
        let name = &desired.name;
        let mut commands = Vec::new();

        if let Some(description) =
            changed(desired.description.as_deref(), prior.description.as_str())
        {
            commands.push(wire::repo_description(name, description));
        }
        if let Some(project_name) =
            changed(desired.project_name.as_deref(), prior.project_name.as_str())
        {
            commands.push(wire::repo_project_name(name, project_name));
        }
        if desired.private != prior.private {
            commands.push(wire::repo_private(name, desired.private));
        }
        if desired.hidden != prior.hidden {
            commands.push(wire::repo_hidden(name, desired.hidden));
        }
        commands
    }

    fn removal(id: &String) -> Removal {
        Removal::Command(wire::repo_delete(id))
    }

    fn read(remote: &dyn Execute, id: &String) -> Result<RepositoryState> {
        let output = lookup(remote, &wire::repo_info(id), Self::KIND, id)?;
        let info = parse_repo_info(&output)?;
        Ok(RepositoryState {
            name: info.repository,
            description: info.description,
            project_name: info.project_name,
            private: info.private,
            hidden: info.hidden,
            mirror: info.mirror,
            owner: info.owner,
        })
    }
}
