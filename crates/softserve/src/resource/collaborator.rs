use super::{is_bare_name, lookup};
use crate::error::{Error, Result};
use crate::parser::parse_collab_list;
use crate::types::{AccessLevel, CollaboratorId, CollaboratorSpec, CollaboratorState};
use crate::wire;
use declarative::{Command, Removal, Resource};
use log::debug;
use sshexec::Execute;

/// A user's access to one repository.
///
/// There is no per-collaborator query, so reads scan the repository's
/// collaborator list.
pub struct Collaborator;

impl Resource for Collaborator {
    const KIND: &'static str = "collaborator";
    type Id = CollaboratorId;
    type Desired = CollaboratorSpec;
    type State = CollaboratorState;
    type Error = Error;

    fn identity(desired: &CollaboratorSpec) -> CollaboratorId {
        desired.id()
    }

    /// `repository/username`, split at the first `/`.
    fn parse_id(raw: &str) -> Result<CollaboratorId> {
        match raw.split_once('/') {
            Some((repository, username))
                if is_bare_name(repository) && is_bare_name(username) =>
            {
                Ok(CollaboratorId::new(repository, username))
            }
            _ => Err(Error::InvalidImportId {
                kind: Self::KIND,
                id: raw.to_string(),
                expected: "repository/username",
            }),
        }
    }

    fn create_commands(desired: &CollaboratorSpec) -> Vec<Command> {
        vec![wire::collab_add(
            &desired.repository,
            &desired.username,
            Some(desired.access_level),
        )]
    }

    fn update_commands(desired: &CollaboratorSpec, prior: &CollaboratorState) -> Vec<Command> {
        if desired.access_level == prior.access_level {
            return Vec::new();
        }
        // Adding an existing collaborator replaces their level
        Self::create_commands(desired)
    }

    fn removal(id: &CollaboratorId) -> Removal {
        Removal::Command(wire::collab_remove(&id.repository, &id.username))
    }

    fn read(remote: &dyn Execute, id: &CollaboratorId) -> Result<CollaboratorState> {
        let output = lookup(remote, &wire::collab_list(&id.repository), Self::KIND, id)?;

        let entry = parse_collab_list(&output)
            .into_iter()
            .find(|entry| entry.username == id.username)
            .ok_or_else(|| Error::NotFound {
                kind: Self::KIND,
                id: id.to_string(),
            })?;

        let access_level = if entry.access_level.is_empty() {
            debug!("{id} listed without a level, assuming {}", AccessLevel::default());
            AccessLevel::default()
        } else {
            entry.access_level.parse()?
        };

        Ok(CollaboratorState {
            repository: id.repository.clone(),
            username: entry.username,
            access_level,
        })
    }
}
