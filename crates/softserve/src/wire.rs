//! Soft Serve admin command catalog.
//!
//! Names are passed as bare words; free text and keys are quoted.

use crate::types::AccessLevel;
use declarative::Command;

/// Non-empty value of an optional field.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ============================================================================
// Repositories
// ============================================================================

/// `repo create <name> [-d "<desc>"] [-n "<project>"] [-p]`
///
/// Empty description or project name are omitted.
pub fn repo_create(
    name: &str,
    description: Option<&str>,
    project_name: Option<&str>,
    private: bool,
) -> Command {
    let mut cmd = Command::new("repo create").arg(name);
    if let Some(description) = present(description) {
        cmd = cmd.arg("-d").quoted(description);
    }
    if let Some(project_name) = present(project_name) {
        cmd = cmd.arg("-n").quoted(project_name);
    }
    if private {
        cmd = cmd.arg("-p");
    }
    cmd
}

pub fn repo_info(name: &str) -> Command {
    Command::new("repo info").arg(name)
}

pub fn repo_delete(name: &str) -> Command {
    Command::new("repo delete").arg(name)
}

pub fn repo_description(name: &str, description: &str) -> Command {
    Command::new("repo description").arg(name).quoted(description)
}

pub fn repo_project_name(name: &str, project_name: &str) -> Command {
    Command::new("repo project-name").arg(name).quoted(project_name)
}

pub fn repo_private(name: &str, private: bool) -> Command {
    Command::new("repo private").arg(name).flag_value(private)
}

pub fn repo_hidden(name: &str, hidden: bool) -> Command {
    Command::new("repo hidden").arg(name).flag_value(hidden)
}

// ============================================================================
// Users
// ============================================================================

/// `user create <username> [-a] [-k "<pubkey>"]...`
pub fn user_create<'a>(
    username: &str,
    admin: bool,
    public_keys: impl IntoIterator<Item = &'a str>,
) -> Command {
    let mut cmd = Command::new("user create").arg(username);
    if admin {
        cmd = cmd.arg("-a");
    }
    for key in public_keys {
        cmd = cmd.arg("-k").quoted(key);
    }
    cmd
}

pub fn user_info(username: &str) -> Command {
    Command::new("user info").arg(username)
}

pub fn user_delete(username: &str) -> Command {
    Command::new("user delete").arg(username)
}

pub fn user_set_admin(username: &str, admin: bool) -> Command {
    Command::new("user set-admin").arg(username).flag_value(admin)
}

pub fn user_add_pubkey(username: &str, key: &str) -> Command {
    Command::new("user add-pubkey").arg(username).quoted(key)
}

pub fn user_remove_pubkey(username: &str, key: &str) -> Command {
    Command::new("user remove-pubkey").arg(username).quoted(key)
}

// ============================================================================
// Collaborators
// ============================================================================

/// `repo collab add <repo> <username> [<access-level>]`
pub fn collab_add(repo: &str, username: &str, level: Option<AccessLevel>) -> Command {
    let cmd = Command::new("repo collab add").arg(repo).arg(username);
    match level {
        Some(level) => cmd.arg(level.as_str()),
        None => cmd,
    }
}

pub fn collab_list(repo: &str) -> Command {
    Command::new("repo collab list").arg(repo)
}

pub fn collab_remove(repo: &str, username: &str) -> Command {
    Command::new("repo collab remove").arg(repo).arg(username)
}

// ============================================================================
// Settings
// ============================================================================

/// `settings allow-keyless [<true|false>]`; `None` queries.
pub fn settings_allow_keyless(value: Option<bool>) -> Command {
    let cmd = Command::new("settings allow-keyless");
    match value {
        Some(value) => cmd.flag_value(value),
        None => cmd,
    }
}

/// `settings anon-access [<level>]`; `None` queries.
pub fn settings_anon_access(level: Option<AccessLevel>) -> Command {
    let cmd = Command::new("settings anon-access");
    match level {
        Some(level) => cmd.arg(level.as_str()),
        None => cmd,
    }
}
