//! Error types for remote command execution.
//!
//! Every variant that happens after a command was attempted, session setup
//! included, carries the command line, so a failure can be diagnosed from
//! the message alone.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while resolving credentials or running a command.
#[derive(Debug, Error)]
pub enum Error {
    /// No key material was given and the SSH agent is disabled or unreachable
    #[error(
        "no authentication method available: provide a private key or enable the SSH agent"
    )]
    AuthUnavailable,

    /// Private key content could not be decoded
    #[error("parsing private key from {origin}: {source}")]
    PrivateKey {
        /// Where the key came from (inline content or a file path)
        origin: String,
        /// Decoder error
        #[source]
        source: russh_keys::Error,
    },

    /// Private key file could not be read
    #[error("reading private key file {}: {source}", .path.display())]
    KeyFile {
        /// Path that was read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Identity file (public key used to pick an agent key) is unusable
    #[error("identity file {}: {message}", .path.display())]
    IdentityFile {
        /// Path of the identity file
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// Talking to the SSH agent failed
    #[error("running command `{command}`: SSH agent: {message}")]
    Agent {
        /// Attempted command
        command: String,
        /// Agent error message
        message: String,
    },

    /// The agent does not hold the key named by the identity file
    #[error(
        "running command `{command}`: identity file {}: matching key not found in SSH agent",
        .path.display()
    )]
    IdentityNotInAgent {
        /// Attempted command
        command: String,
        /// Path of the identity file
        path: PathBuf,
    },

    /// TCP connect, handshake or authentication exchange failed
    #[error("running command `{command}`: connecting to {addr}: {source}")]
    Connect {
        /// Attempted command
        command: String,
        /// `host:port` that was dialed
        addr: String,
        /// Transport error
        #[source]
        source: russh::Error,
    },

    /// The server refused every offered key
    #[error("running command `{command}`: authentication rejected for user {username}")]
    Rejected {
        /// Attempted command
        command: String,
        /// Username that was refused
        username: String,
    },

    /// Opening the session channel or sending the exec request failed
    #[error("running command `{command}`: {source}")]
    Channel {
        /// Attempted command
        command: String,
        /// Transport error
        #[source]
        source: russh::Error,
    },

    /// The remote command exited unsuccessfully
    #[error(
        "running command `{command}` failed ({}): {stderr}",
        .status.map_or_else(|| "no exit status".to_string(), |code| format!("exit status {code}"))
    )]
    CommandFailed {
        /// Attempted command
        command: String,
        /// Exit status, if the server reported one
        status: Option<u32>,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// The command did not finish within the configured bound
    #[error("running command `{command}` timed out after {}s", .after.as_secs())]
    Timeout {
        /// Attempted command
        command: String,
        /// Configured timeout
        after: Duration,
    },

    /// The async runtime backing the client could not be built
    #[error("starting SSH runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl Error {
    /// Standard error text of a failed remote command, if this is one.
    pub fn remote_stderr(&self) -> Option<&str> {
        match self {
            Error::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    /// The command line this error is about, when one was attempted.
    pub fn command(&self) -> Option<&str> {
        match self {
            Error::Agent { command, .. }
            | Error::IdentityNotInAgent { command, .. }
            | Error::Connect { command, .. }
            | Error::Rejected { command, .. }
            | Error::Channel { command, .. }
            | Error::CommandFailed { command, .. }
            | Error::Timeout { command, .. } => Some(command),
            _ => None,
        }
    }
}

/// Result type for remote execution.
pub type Result<T> = std::result::Result<T, Error>;
