//! # sshexec
//!
//! Run administrative commands on a Soft Serve server over SSH.
//!
//! This crate provides:
//! - [`SshClient`]: dial, authenticate, run one command, disconnect
//! - [`AuthMethod`]: key content, key file or agent (optionally narrowed to
//!   one identity), resolved once when the client is built
//! - [`Execute`]: the seam reconcilers are written against, so tests can
//!   swap in [`mock::ScriptedExecutor`]
//!
//! ## Example
//!
//! ```no_run
//! use sshexec::{ClientConfig, Execute, SshClient};
//!
//! let config = ClientConfig::new("localhost", 23231, "admin");
//! let client = SshClient::new(&config).expect("no usable credentials");
//! let level = client.execute("settings anon-access").expect("command failed");
//! println!("anonymous access: {level}");
//! ```
//!
//! Failed commands are never retried; the error carries the command line
//! and the remote stderr.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod mock;

pub use auth::{AgentIdentity, AuthMethod};
pub use client::SshClient;
pub use config::{ClientConfig, SessionMode};
pub use error::{Error, Result};

/// Runs one remote command and returns its stdout.
///
/// Implementations trim trailing newlines from stdout and report a
/// non-zero exit as [`Error::CommandFailed`].
pub trait Execute: Send + Sync {
    /// Run `command` and return its trimmed stdout.
    fn execute(&self, command: &str) -> Result<String>;
}

impl<E: Execute + ?Sized> Execute for &E {
    fn execute(&self, command: &str) -> Result<String> {
        (**self).execute(command)
    }
}

impl<E: Execute + ?Sized> Execute for Box<E> {
    fn execute(&self, command: &str) -> Result<String> {
        (**self).execute(command)
    }
}
