use super::{lookup, parse_name};
use crate::error::{Error, Result};
use crate::parser::parse_user_info;
use crate::types::{UserSpec, UserState};
use crate::wire;
use declarative::{Command, Removal, Resource, set_diff};
use sshexec::Execute;

/// A user account and its authorized keys.
///
/// Keys are compared as exact strings. Two spellings of the same key (for
/// instance with a different comment) count as two keys.
pub struct User;

impl Resource for User {
    const KIND: &'static str = "user";
    type Id = String;
    type Desired = UserSpec;
    type State = UserState;
    type Error = Error;

    fn identity(desired: &UserSpec) -> String {
        desired.username.clone()
    }

    fn parse_id(raw: &str) -> Result<String> {
        parse_name(Self::KIND, raw)
    }

    fn create_commands(desired: &UserSpec) -> Vec<Command> {
        vec![wire::user_create(
            &desired.username,
            desired.admin,
            desired.public_keys.iter().map(String::as_str),
        )]
    }

    fn update_commands(desired: &UserSpec, prior: &UserState) -> Vec<Command> {
        let username = &desired.username;
        let mut commands = Vec::new();

        if desired.admin != prior.admin {
            commands.push(wire::user_set_admin(username, desired.admin));
        }

        let (removed, added) = set_diff(&desired.public_keys, &prior.public_keys);
        commands.extend(removed.into_iter().map(|key| wire::user_remove_pubkey(username, key)));
        commands.extend(added.into_iter().map(|key| wire::user_add_pubkey(username, key)));
        commands
    }

    fn removal(id: &String) -> Removal {
        Removal::Command(wire::user_delete(id))
    }

    fn read(remote: &dyn Execute, id: &String) -> Result<UserState> {
        let output = lookup(remote, &wire::user_info(id), Self::KIND, id)?;
        let info = parse_user_info(&output)?;
        Ok(UserState {
            username: info.username,
            admin: info.admin,
            public_keys: info.public_keys.into_iter().collect(),
        })
    }
}
