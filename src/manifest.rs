//! Desired server state, read from a TOML manifest
//!
//! ```toml
//! [[user]]
//! username = "alice"
//! public_keys = ["ssh-ed25519 AAAA... alice@laptop"]
//!
//! [[repository]]
//! name = "proj"
//! private = true
//!
//! [[collaborator]]
//! repository = "proj"
//! username = "alice"
//! access_level = "read-only"
//!
//! [settings]
//! anon_access = "no-access"
//! ```

use anyhow::{Context, Result, bail};
use declarative::{ExecutionPlan, Resource};
use serde::{Deserialize, Serialize};
use softserve::{
    Collaborator, CollaboratorSpec, Repository, RepositorySpec, ServerSettings, SettingsSpec,
    User, UserSpec,
};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, rename = "user")]
    pub users: Vec<UserSpec>,
    #[serde(default, rename = "repository")]
    pub repositories: Vec<RepositorySpec>,
    #[serde(default, rename = "collaborator")]
    pub collaborators: Vec<CollaboratorSpec>,
    #[serde(default)]
    pub settings: Option<SettingsSpec>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid manifest {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reject names that cannot be sent as one word, and resources
    /// declared twice.
    pub fn validate(&self) -> Result<()> {
        check_ids::<User>(&self.users)?;
        check_ids::<Repository>(&self.repositories)?;
        check_ids::<Collaborator>(&self.collaborators)?;

        // Each half is sent as its own word
        for collab in &self.collaborators {
            Repository::parse_id(&collab.repository)
                .and_then(|_| User::parse_id(&collab.username))
                .with_context(|| format!("collaborator {}", collab.id()))?;
        }
        Ok(())
    }

    /// Number of declared resources.
    pub fn len(&self) -> usize {
        self.users.len()
            + self.repositories.len()
            + self.collaborators.len()
            + usize::from(self.settings.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plan in dependency order: users and repositories before the
    /// collaborators that reference them, settings last.
    pub fn into_plan(self) -> ExecutionPlan {
        let mut plan = ExecutionPlan::new();
        for user in self.users {
            plan.push::<User>(user);
        }
        for repo in self.repositories {
            plan.push::<Repository>(repo);
        }
        for collab in self.collaborators {
            plan.push::<Collaborator>(collab);
        }
        if let Some(settings) = self.settings {
            plan.push::<ServerSettings>(settings);
        }
        plan
    }
}

/// Every identity must parse back as an import id and appear only once.
fn check_ids<R: Resource>(items: &[R::Desired]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        let id = R::identity(item).to_string();
        R::parse_id(&id)?;
        if id.ends_with('/') {
            bail!("{} {id:?} ends with '/'", R::KIND);
        }
        if !seen.insert(id.clone()) {
            bail!("{} {id} is declared more than once", R::KIND);
        }
    }
    Ok(())
}
