//! The four Soft Serve resource kinds.
//!
//! Each kind is a marker type implementing [`declarative::Resource`]; drive
//! it with [`declarative::Reconciler`].

mod collaborator;
mod repository;
mod settings;
mod user;

pub use collaborator::Collaborator;
pub use repository::Repository;
pub use settings::ServerSettings;
pub use user::User;

use crate::error::{Error, Result};
use declarative::Command;
use sshexec::Execute;
use std::fmt::Display;

/// Run a query for `kind` `id`, mapping a remote "not found" to
/// [`Error::NotFound`].
fn lookup(
    remote: &dyn Execute,
    command: &Command,
    kind: &'static str,
    id: impl Display,
) -> Result<String> {
    remote
        .execute(command.as_str())
        .map_err(|e| Error::from_lookup(kind, id, e))
}

/// Whether `raw` can be sent as one bare word: non-empty, no whitespace or
/// quotes, and not mistakable for a flag.
fn is_bare_name(raw: &str) -> bool {
    !raw.is_empty()
        && !raw.starts_with('-')
        && !raw.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'')
}

/// Accept a bare name as an import id.
fn parse_name(kind: &'static str, raw: &str) -> Result<String> {
    if !is_bare_name(raw) {
        return Err(Error::InvalidImportId {
            kind,
            id: raw.to_string(),
            expected: "a name without whitespace, quotes or a leading '-'",
        });
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_names() {
        for name in ["proj", "my-repo", "group/proj", "v1.2_rc"] {
            assert!(parse_name("repository", name).is_ok(), "{name:?}");
        }
        for name in ["", "proj -p", "-p", "--hidden", "a\tb", "say\"hi\"", "it's"] {
            assert!(
                matches!(
                    parse_name("repository", name),
                    Err(Error::InvalidImportId { .. })
                ),
                "{name:?} should be rejected"
            );
        }
    }
}
