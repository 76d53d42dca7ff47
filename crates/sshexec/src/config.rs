//! Connection settings for [`SshClient`](crate::SshClient).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default Soft Serve SSH port.
pub const DEFAULT_PORT: u16 = 23231;

/// Default bound on a single command, connection setup included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How connections are managed across commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionMode {
    /// Dial, authenticate and tear down for every command
    #[default]
    PerCommand,
    /// Keep one authenticated connection and open a channel per command
    Pooled,
}

/// Settings used to build a client.
///
/// Authentication material is resolved once, when the client is built:
/// inline key content wins over a key file, which wins over the agent.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server host name or address
    pub host: String,
    /// Server SSH port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Login user
    pub username: String,
    /// PEM/OpenSSH private key content
    #[serde(default, skip_serializing)]
    pub private_key: Option<String>,
    /// Path to a private key file
    #[serde(default)]
    pub private_key_path: Option<PathBuf>,
    /// Offer identities from the SSH agent
    #[serde(default = "default_use_agent")]
    pub use_agent: bool,
    /// Public key file restricting which agent identity is offered
    #[serde(default)]
    pub identity_file: Option<PathBuf>,
    /// Bound on each command
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connection reuse policy
    #[serde(default)]
    pub session_mode: SessionMode,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_use_agent() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl ClientConfig {
    /// Create a config for `username@host:port` using the agent.
    pub fn new(host: impl Into<String>, port: u16, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            ..Self::default()
        }
    }

    /// Authenticate with this private key content.
    pub fn with_private_key(mut self, content: impl Into<String>) -> Self {
        self.private_key = Some(content.into());
        self
    }

    /// Authenticate with the private key stored at `path`.
    pub fn with_private_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.private_key_path = Some(path.into());
        self
    }

    /// Enable or disable the SSH agent.
    pub fn with_agent(mut self, use_agent: bool) -> Self {
        self.use_agent = use_agent;
        self
    }

    /// Only offer the agent key matching the public key at `path`.
    pub fn with_identity_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_file = Some(path.into());
        self
    }

    /// Bound each command by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Choose the connection reuse policy.
    pub fn with_session_mode(mut self, mode: SessionMode) -> Self {
        self.session_mode = mode;
        self
    }

    /// Per-command timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// `host:port` as dialed.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            username: String::new(),
            private_key: None,
            private_key_path: None,
            use_agent: true,
            identity_file: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            session_mode: SessionMode::PerCommand,
        }
    }
}

// Key content must never end up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("private_key_path", &self.private_key_path)
            .field("use_agent", &self.use_agent)
            .field("identity_file", &self.identity_file)
            .field("timeout_secs", &self.timeout_secs)
            .field("session_mode", &self.session_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 23231);
        assert!(config.use_agent);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.session_mode, SessionMode::PerCommand);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("git.example.com", 2222, "admin")
            .with_agent(false)
            .with_private_key_path("/keys/id_ed25519")
            .with_timeout(Duration::from_secs(5))
            .with_session_mode(SessionMode::Pooled);
        assert_eq!(config.address(), "git.example.com:2222");
        assert!(!config.use_agent);
        assert_eq!(
            config.private_key_path,
            Some(PathBuf::from("/keys/id_ed25519"))
        );
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.session_mode, SessionMode::Pooled);
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = ClientConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_debug_redacts_key_content() {
        let config = ClientConfig::default().with_private_key("-----BEGIN SECRET-----");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("BEGIN SECRET"));
        assert!(rendered.contains("<redacted>"));
    }
}
