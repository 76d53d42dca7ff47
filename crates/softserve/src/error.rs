//! Error types for Soft Serve reconciliation.
//!
//! Remote failures are classified so callers can tell an absent object
//! (create it) from a broken connection or a rejected command (report it).

use declarative::ResourceError;
use thiserror::Error;

/// Errors that can occur while reading or converging a resource.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport, authentication or remote command failure
    #[error(transparent)]
    Transport(#[from] sshexec::Error),

    /// A command response lacked a field every valid response carries
    #[error("failed to parse {record}: missing {field} field")]
    MissingField {
        /// Record being parsed, e.g. `"repo info"`
        record: &'static str,
        /// Label that was expected
        field: &'static str,
    },

    /// The remote object does not exist
    #[error("{kind} {id} not found")]
    NotFound {
        /// Resource kind
        kind: &'static str,
        /// Identity that was looked up
        id: String,
    },

    /// An import identifier did not have the expected shape
    #[error("invalid {kind} import id {id:?}: expected {expected}")]
    InvalidImportId {
        /// Resource kind
        kind: &'static str,
        /// Identifier as given
        id: String,
        /// Description of the accepted format
        expected: &'static str,
    },

    /// A token is not one of the four access levels
    #[error(
        "invalid access level {0:?}: expected one of no-access, read-only, read-write, admin-access"
    )]
    InvalidAccessLevel(String),
}

impl Error {
    /// Classify a failed lookup of `kind` `id`.
    ///
    /// A remote command that failed with "not found" on stderr means the
    /// object is absent; anything else stays a transport error.
    pub fn from_lookup(kind: &'static str, id: impl ToString, error: sshexec::Error) -> Self {
        let absent = error
            .remote_stderr()
            .is_some_and(|stderr| stderr.to_lowercase().contains("not found"));

        if absent {
            Self::NotFound {
                kind,
                id: id.to_string(),
            }
        } else {
            Self::Transport(error)
        }
    }
}

impl ResourceError for Error {
    fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for Soft Serve operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(stderr: &str) -> sshexec::Error {
        sshexec::Error::CommandFailed {
            command: "repo info ghost".into(),
            status: Some(1),
            stderr: stderr.into(),
        }
    }

    #[test]
    fn test_not_found_classification() {
        let err = Error::from_lookup("repository", "ghost", failed("Error: repository not found"));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "repository ghost not found");

        let err = Error::from_lookup("user", "bob", failed("User Not Found"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_other_failures_stay_transport() {
        let err = Error::from_lookup("repository", "proj", failed("unauthorized"));
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("unauthorized"));

        let err = Error::from_lookup("repository", "proj", sshexec::Error::AuthUnavailable);
        assert!(matches!(err, Error::Transport(sshexec::Error::AuthUnavailable)));
    }

    #[test]
    fn test_messages() {
        let err = Error::InvalidImportId {
            kind: "collaborator",
            id: "proj".into(),
            expected: "repository/username",
        };
        assert_eq!(
            err.to_string(),
            r#"invalid collaborator import id "proj": expected repository/username"#
        );

        let err = Error::MissingField {
            record: "repo info",
            field: "Repository",
        };
        assert_eq!(
            err.to_string(),
            "failed to parse repo info: missing Repository field"
        );
    }
}
