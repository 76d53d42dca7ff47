//! Desired and actual state of the four resource kinds.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Permission a user (or anonymous visitor) has on repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessLevel {
    /// No access at all
    NoAccess,
    /// Clone and fetch
    ReadOnly,
    /// Clone, fetch and push
    #[default]
    ReadWrite,
    /// Full control
    AdminAccess,
}

impl AccessLevel {
    /// Every level, lowest first.
    pub const ALL: [Self; 4] = [
        Self::NoAccess,
        Self::ReadOnly,
        Self::ReadWrite,
        Self::AdminAccess,
    ];

    /// Wire form, e.g. `read-write`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoAccess => "no-access",
            Self::ReadOnly => "read-only",
            Self::ReadWrite => "read-write",
            Self::AdminAccess => "admin-access",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| Error::InvalidAccessLevel(s.to_string()))
    }
}

// ============================================================================
// Repository
// ============================================================================

/// Desired repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySpec {
    /// Repository name (identity)
    pub name: String,
    /// `None` leaves the description alone; `Some("")` clears it on update
    #[serde(default)]
    pub description: Option<String>,
    /// `None` leaves the project name alone; `Some("")` clears it on update
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub hidden: bool,
}

impl RepositorySpec {
    /// Public, visible repository with no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Repository as reported by `repo info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    pub name: String,
    pub description: String,
    pub project_name: String,
    pub private: bool,
    pub hidden: bool,
    /// Read-only
    pub mirror: bool,
    /// Read-only
    pub owner: String,
}

// ============================================================================
// User
// ============================================================================

/// Desired user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSpec {
    /// Login name (identity)
    pub username: String,
    #[serde(default)]
    pub admin: bool,
    /// Authorized public keys, compared verbatim
    #[serde(default)]
    pub public_keys: BTreeSet<String>,
}

/// User as reported by `user info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub username: String,
    pub admin: bool,
    pub public_keys: BTreeSet<String>,
}

// ============================================================================
// Collaborator
// ============================================================================

/// A user's membership on one repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollaboratorId {
    pub repository: String,
    pub username: String,
}

impl CollaboratorId {
    pub fn new(repository: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            username: username.into(),
        }
    }
}

impl fmt::Display for CollaboratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.repository, self.username)
    }
}

/// Desired collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorSpec {
    pub repository: String,
    pub username: String,
    #[serde(default)]
    pub access_level: AccessLevel,
}

impl CollaboratorSpec {
    /// Identity of this collaborator.
    pub fn id(&self) -> CollaboratorId {
        CollaboratorId::new(&self.repository, &self.username)
    }
}

/// Collaborator as listed by `repo collab list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorState {
    pub repository: String,
    pub username: String,
    pub access_level: AccessLevel,
}

// ============================================================================
// Server settings
// ============================================================================

/// Identity of the one settings object a server has.
pub const SETTINGS_ID: &str = "settings";

/// Desired server settings. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSpec {
    #[serde(default)]
    pub allow_keyless: Option<bool>,
    #[serde(default)]
    pub anon_access: Option<AccessLevel>,
}

/// Server settings as reported by the settings queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsState {
    pub allow_keyless: bool,
    pub anon_access: AccessLevel,
}
