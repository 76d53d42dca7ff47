//! # softserve
//!
//! Converge the configuration of a Soft Serve git server through its SSH
//! admin interface.
//!
//! This crate provides:
//! - Parsers for `repo info`, `user info`, `repo collab list` and the
//!   settings queries
//! - The admin command catalog
//! - Four resource kinds ([`Repository`], [`User`], [`Collaborator`],
//!   [`ServerSettings`]) for [`declarative::Reconciler`]
//!
//! ## Example
//!
//! ```no_run
//! use declarative::Reconciler;
//! use softserve::{Repository, RepositorySpec};
//! use sshexec::{ClientConfig, SshClient};
//!
//! let client = SshClient::new(&ClientConfig::new("localhost", 23231, "admin")).unwrap();
//! let repos = Reconciler::<Repository>::new(&client);
//!
//! let desired = RepositorySpec { private: true, ..RepositorySpec::new("proj") };
//! let state = repos.create(&desired).unwrap();
//! assert!(state.private);
//! ```
//!
//! Nothing is cached: every read goes to the server, and update diffs
//! against the prior state the caller passes in.

#![warn(clippy::all)]

pub mod error;
pub mod parser;
pub mod resource;
pub mod types;
pub mod wire;

pub use error::{Error, Result};
pub use resource::{Collaborator, Repository, ServerSettings, User};
pub use types::{
    AccessLevel, CollaboratorId, CollaboratorSpec, CollaboratorState, RepositorySpec,
    RepositoryState, SETTINGS_ID, SettingsSpec, SettingsState, UserSpec, UserState,
};
