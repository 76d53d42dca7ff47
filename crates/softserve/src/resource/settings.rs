use crate::error::{Error, Result};
use crate::parser::{parse_access_setting, parse_bool_setting};
use crate::types::{AccessLevel, SETTINGS_ID, SettingsSpec, SettingsState};
use crate::wire;
use declarative::{Command, Removal, Resource};
use sshexec::Execute;

/// The server-wide settings. Exactly one exists, and it cannot be deleted.
pub struct ServerSettings;

impl ServerSettings {
    fn commands(allow_keyless: Option<bool>, anon_access: Option<AccessLevel>) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(allow) = allow_keyless {
            commands.push(wire::settings_allow_keyless(Some(allow)));
        }
        if let Some(level) = anon_access {
            commands.push(wire::settings_anon_access(Some(level)));
        }
        commands
    }
}

impl Resource for ServerSettings {
    const KIND: &'static str = "settings";
    type Id = &'static str;
    type Desired = SettingsSpec;
    type State = SettingsState;
    type Error = Error;

    fn identity(_desired: &SettingsSpec) -> &'static str {
        SETTINGS_ID
    }

    /// Any identifier names the one settings object.
    fn parse_id(_raw: &str) -> Result<&'static str> {
        Ok(SETTINGS_ID)
    }

    fn create_commands(desired: &SettingsSpec) -> Vec<Command> {
        Self::commands(desired.allow_keyless, desired.anon_access)
    }

    fn update_commands(desired: &SettingsSpec, prior: &SettingsState) -> Vec<Command> {
        Self::commands(
            desired.allow_keyless.filter(|v| *v != prior.allow_keyless),
            desired.anon_access.filter(|v| *v != prior.anon_access),
        )
    }

    fn removal(_id: &&'static str) -> Removal {
        Removal::Forget
    }

    fn read(remote: &dyn Execute, _id: &&'static str) -> Result<SettingsState> {
        let allow_keyless = remote.execute(wire::settings_allow_keyless(None).as_str())?;
        let anon_access = remote.execute(wire::settings_anon_access(None).as_str())?;
        Ok(SettingsState {
            allow_keyless: parse_bool_setting(&allow_keyless),
            anon_access: parse_access_setting(&anon_access)?,
        })
    }
}
