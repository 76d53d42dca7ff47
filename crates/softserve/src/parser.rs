//! Parsers for the text Soft Serve prints in response to admin commands.
//!
//! Every function here is pure and total: any input yields a value or an
//! error, never a panic. Unknown labels are skipped so newer servers that
//! print extra fields still parse.

use crate::error::{Error, Result};
use crate::types::AccessLevel;

/// Value attached to a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// `Label: value`
    Text(String),
    /// `Label:` followed by item lines
    Section(Vec<String>),
}

/// One labelled entry of a key-value response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: FieldValue,
}

impl Field {
    /// Scalar value; a section reads as empty.
    pub fn text(&self) -> &str {
        match &self.value {
            FieldValue::Text(value) => value,
            FieldValue::Section(_) => "",
        }
    }

    /// Section items; a scalar has none.
    pub fn items(&self) -> &[String] {
        match &self.value {
            FieldValue::Text(_) => &[],
            FieldValue::Section(items) => items,
        }
    }
}

/// Split a response into labelled fields, in order.
///
/// `Label: value` splits at the first `": "` with both sides trimmed. A
/// line that ends in `:` opens a section. Every following non-blank line is
/// collected into it (trimmed) until a line that is not indented by two
/// spaces and contains `": "` starts the next field. Other lines are
/// ignored.
pub fn scan_key_values(output: &str) -> Vec<Field> {
    let mut fields: Vec<Field> = Vec::new();
    let mut in_section = false;

    for line in output.lines() {
        if in_section {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if line.starts_with("  ") || !line.contains(": ") {
                if let Some(FieldValue::Section(items)) = fields.last_mut().map(|f| &mut f.value) {
                    items.push(trimmed.to_string());
                }
                continue;
            }
            in_section = false;
        }

        if let Some((label, value)) = line.split_once(": ") {
            fields.push(Field {
                label: label.trim().to_string(),
                value: FieldValue::Text(value.trim().to_string()),
            });
        } else if let Some(label) = line.trim().strip_suffix(':') {
            fields.push(Field {
                label: label.trim_end().to_string(),
                value: FieldValue::Section(Vec::new()),
            });
            in_section = true;
        }
    }

    fields
}

/// Parsed `repo info <name>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoInfo {
    pub project_name: String,
    pub repository: String,
    pub description: String,
    pub private: bool,
    pub hidden: bool,
    pub mirror: bool,
    pub owner: String,
}

/// Parse the output of `repo info <name>`.
///
/// ```text
/// Project Name: myproject
/// Repository: myrepo
/// Description: A test repo
/// Private: false
/// Hidden: false
/// Mirror: false
/// Owner: admin
/// Default Branch: main
/// Branches:
///   - main
/// ```
pub fn parse_repo_info(output: &str) -> Result<RepoInfo> {
    let mut info = RepoInfo::default();

    for field in scan_key_values(output) {
        let value = field.text();
        match field.label.as_str() {
            "Project Name" => info.project_name = value.to_string(),
            "Repository" => info.repository = value.to_string(),
            "Description" => info.description = value.to_string(),
            "Private" => info.private = value == "true",
            "Hidden" => info.hidden = value == "true",
            "Mirror" => info.mirror = value == "true",
            "Owner" => info.owner = value.to_string(),
            _ => {}
        }
    }

    if info.repository.is_empty() {
        return Err(Error::MissingField {
            record: "repo info",
            field: "Repository",
        });
    }
    Ok(info)
}

/// Parsed `user info <username>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
    pub admin: bool,
    /// Keys in the order the server printed them
    pub public_keys: Vec<String>,
}

/// Parse the output of `user info <username>`.
///
/// ```text
/// Username: alice
/// Admin: false
/// Public keys:
///   ssh-ed25519 AAAA... alice@host
/// ```
pub fn parse_user_info(output: &str) -> Result<UserInfo> {
    let mut info = UserInfo::default();

    for field in scan_key_values(output) {
        match field.label.as_str() {
            "Username" => info.username = field.text().to_string(),
            "Admin" => info.admin = field.text() == "true",
            "Public keys" => info.public_keys.extend_from_slice(field.items()),
            _ => {}
        }
    }

    if info.username.is_empty() {
        return Err(Error::MissingField {
            record: "user info",
            field: "Username",
        });
    }
    Ok(info)
}

/// One line of `repo collab list <repo>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollabEntry {
    pub username: String,
    /// Raw level token; empty when the server printed none
    pub access_level: String,
}

/// Parse the output of `repo collab list <repo>`, one `username level`
/// pair per line.
pub fn parse_collab_list(output: &str) -> Vec<CollabEntry> {
    output
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let username = tokens.next()?;
            Some(CollabEntry {
                username: username.to_string(),
                access_level: tokens.next().unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Parse a bare boolean settings query such as `settings allow-keyless`.
pub fn parse_bool_setting(output: &str) -> bool {
    output.trim() == "true"
}

/// Parse a bare access level settings query such as `settings anon-access`.
pub fn parse_access_setting(output: &str) -> Result<AccessLevel> {
    output.trim().parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FULL_REPO: &str = "Project Name: myproject
Repository: myrepo
Description: A test repository
Private: true
Hidden: false
Mirror: false
Owner: admin
Default Branch: main
Branches:
  - main
Tags:";

    #[test]
    fn test_repo_info_full() {
        let info = parse_repo_info(FULL_REPO).unwrap();
        assert_eq!(
            info,
            RepoInfo {
                project_name: "myproject".into(),
                repository: "myrepo".into(),
                description: "A test repository".into(),
                private: true,
                hidden: false,
                mirror: false,
                owner: "admin".into(),
            }
        );
    }

    #[test]
    fn test_repo_info_empty_labels() {
        let output = "Project Name:\nRepository: test\nDescription:\n\
                      Private: false\nHidden: true\nMirror: false";
        let info = parse_repo_info(output).unwrap();
        assert_eq!(info.repository, "test");
        assert_eq!(info.project_name, "");
        assert_eq!(info.description, "");
        assert!(info.hidden);
        assert!(!info.private);
    }

    #[test]
    fn test_repo_info_value_keeps_later_separators() {
        let info = parse_repo_info("Repository: r\nDescription: ratio: 3: 1").unwrap();
        assert_eq!(info.description, "ratio: 3: 1");
    }

    #[test]
    fn test_repo_info_only_literal_true() {
        let info = parse_repo_info("Repository: r\nPrivate: TRUE\nHidden: yes").unwrap();
        assert!(!info.private);
        assert!(!info.hidden);
    }

    #[test]
    fn test_repo_info_missing_repository() {
        for output in ["", "this is not valid output", "Repository: \nOwner: admin"] {
            assert!(matches!(
                parse_repo_info(output),
                Err(Error::MissingField {
                    field: "Repository",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_user_info_with_keys() {
        let output = "Username: alice
Admin: false
Public keys:
  ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAA alice@laptop
  ssh-rsa AAAAB3NzaC1yc2EAAAA alice@desktop";
        let info = parse_user_info(output).unwrap();
        assert_eq!(info.username, "alice");
        assert!(!info.admin);
        assert_eq!(
            info.public_keys,
            vec![
                "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAA alice@laptop",
                "ssh-rsa AAAAB3NzaC1yc2EAAAA alice@desktop",
            ]
        );
    }

    #[test]
    fn test_user_info_no_keys() {
        let info = parse_user_info("Username: admin\nAdmin: true\nPublic keys:").unwrap();
        assert!(info.admin);
        assert!(info.public_keys.is_empty());
    }

    #[test]
    fn test_user_info_keys_section_ends_at_next_field() {
        let output = "Public keys:
  ssh-ed25519 AAAA one

  ssh-ed25519 BBBB two
Username: carol
Admin: true";
        let info = parse_user_info(output).unwrap();
        assert_eq!(info.username, "carol");
        assert!(info.admin);
        assert_eq!(info.public_keys, vec!["ssh-ed25519 AAAA one", "ssh-ed25519 BBBB two"]);
    }

    #[test]
    fn test_user_info_missing_username() {
        assert!(matches!(
            parse_user_info(""),
            Err(Error::MissingField {
                field: "Username",
                ..
            })
        ));
    }

    #[test]
    fn test_collab_list() {
        let entries = parse_collab_list("alice read-write\n\n  bob   read-only  \ncharlie");
        assert_eq!(
            entries,
            vec![
                CollabEntry {
                    username: "alice".into(),
                    access_level: "read-write".into()
                },
                CollabEntry {
                    username: "bob".into(),
                    access_level: "read-only".into()
                },
                CollabEntry {
                    username: "charlie".into(),
                    access_level: String::new()
                },
            ]
        );
        assert!(parse_collab_list("").is_empty());
        assert!(parse_collab_list("  \n \n").is_empty());
    }

    #[test]
    fn test_settings() {
        assert!(parse_bool_setting("true\n"));
        assert!(!parse_bool_setting("false"));
        assert!(!parse_bool_setting(""));
        assert_eq!(
            parse_access_setting(" read-only\n").unwrap(),
            AccessLevel::ReadOnly
        );
        assert!(parse_access_setting("everyone").is_err());
    }

    #[test]
    fn test_scan_sections() {
        let fields = scan_key_values(FULL_REPO);
        let branches = fields.iter().find(|f| f.label == "Branches").unwrap();
        // Tags: is neither indented nor a `: ` line, so it stays in the section
        assert_eq!(branches.items(), ["- main", "Tags:"]);
        assert_eq!(branches.text(), "");
    }

    proptest! {
        #[test]
        fn prop_parsers_are_total(output in "(?s).{0,300}") {
            let _ = scan_key_values(&output);
            let _ = parse_collab_list(&output);
            parse_bool_setting(&output);

            match parse_repo_info(&output) {
                Ok(info) => prop_assert!(!info.repository.is_empty()),
                Err(e) => prop_assert!(
                    matches!(e, Error::MissingField { field: "Repository", .. }),
                    "unexpected error: {e:?}"
                ),
            }
            match parse_user_info(&output) {
                Ok(info) => prop_assert!(!info.username.is_empty()),
                Err(e) => prop_assert!(
                    matches!(e, Error::MissingField { field: "Username", .. }),
                    "unexpected error: {e:?}"
                ),
            }
            match parse_access_setting(&output) {
                Ok(level) => prop_assert_eq!(level.as_str(), output.trim()),
                Err(e) => prop_assert!(
                    matches!(e, Error::InvalidAccessLevel(_)),
                    "unexpected error: {e:?}"
                ),
            }
        }

        #[test]
        fn prop_scanned_fields_are_trimmed(
            lines in proptest::collection::vec("[ a-zA-Z:]{0,12}", 0..12)
        ) {
            let output = lines.join("\n");
            for field in scan_key_values(&output) {
                prop_assert_eq!(field.label.trim(), field.label.as_str());
                prop_assert_eq!(field.text().trim(), field.text());
                for item in field.items() {
                    prop_assert!(!item.is_empty());
                    prop_assert_eq!(item.trim(), item.as_str());
                }
            }
        }

        #[test]
        fn prop_collab_usernames_have_no_whitespace(output in "(?s).{0,200}") {
            for entry in parse_collab_list(&output) {
                prop_assert!(!entry.username.is_empty());
                prop_assert!(!entry.username.contains(char::is_whitespace));
            }
        }
    }
}
