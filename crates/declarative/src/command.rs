//! Command lines sent to the remote administrative interface

use serde::Serialize;
use std::fmt;

/// One remote command line, built word by word.
///
/// Bare words are appended verbatim. Free-form values go through
/// [`quoted`](Self::quoted) so spaces and quotes survive the remote
/// argument splitter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Command {
    line: String,
}

impl Command {
    /// Start a command with its verb, e.g. `"repo create"`.
    pub fn new(verb: &str) -> Self {
        Self {
            line: verb.to_string(),
        }
    }

    /// Append a bare word.
    #[must_use]
    pub fn arg(mut self, word: impl AsRef<str>) -> Self {
        self.line.push(' ');
        self.line.push_str(word.as_ref());
        self
    }

    /// Append a double-quoted value.
    #[must_use]
    pub fn quoted(self, value: &str) -> Self {
        self.arg(quote(value))
    }

    /// Append `true` or `false`.
    #[must_use]
    pub fn flag_value(self, value: bool) -> Self {
        self.arg(if value { "true" } else { "false" })
    }

    /// The command line as sent.
    pub fn as_str(&self) -> &str {
        &self.line
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

impl AsRef<str> for Command {
    fn as_ref(&self) -> &str {
        &self.line
    }
}

/// Wrap `value` in double quotes, escaping backslashes, quotes and
/// line breaks.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
