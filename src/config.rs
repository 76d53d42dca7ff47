//! Connection settings, layered: config file, then environment, then flags.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use sshexec::{ClientConfig, SessionMode};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_HOST: &str = "SOFT_SERVE_HOST";
pub const ENV_PORT: &str = "SOFT_SERVE_PORT";
pub const ENV_USER: &str = "SOFT_SERVE_USER";
pub const ENV_PRIVATE_KEY: &str = "SOFT_SERVE_PRIVATE_KEY";
pub const ENV_IDENTITY_FILE: &str = "SOFT_SERVE_IDENTITY_FILE";
pub const ENV_USE_AGENT: &str = "SOFT_SERVE_USE_AGENT";

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("softsync"))
}

/// Expand a leading `~/`.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// How to reach and log in to the server.
///
/// Every field is optional so layers can be merged; [`Self::resolve`]
/// fills in defaults.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub username: Option<String>,
    /// Private key content
    #[serde(default, skip_serializing)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub private_key_path: Option<String>,
    /// Public key selecting which agent identity to offer
    #[serde(default)]
    pub identity_file: Option<String>,
    #[serde(default)]
    pub use_agent: Option<bool>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Reuse one connection for all commands
    #[serde(default)]
    pub pooled: bool,
}

impl ConnectionConfig {
    /// Load the config file.
    ///
    /// An explicit path must exist; a missing default file yields an empty
    /// config.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = config_dir()?.join("config.toml");
                if !path.exists() {
                    log::debug!("No config file at {}, using defaults", path.display());
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse TOML config content.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override with `SOFT_SERVE_*` variables as returned by `var`.
    ///
    /// Empty variables are ignored.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |name: &str| var(name).filter(|v| !v.is_empty());

        if let Some(host) = var(ENV_HOST) {
            self.host = Some(host);
        }
        if let Some(port) = var(ENV_PORT) {
            let port = port
                .parse()
                .with_context(|| format!("{ENV_PORT} must be a port number, got {port:?}"))?;
            self.port = Some(port);
        }
        if let Some(user) = var(ENV_USER) {
            self.username = Some(user);
        }
        if let Some(key) = var(ENV_PRIVATE_KEY) {
            self.private_key = Some(key);
        }
        if let Some(identity) = var(ENV_IDENTITY_FILE) {
            self.identity_file = Some(identity);
        }
        if let Some(agent) = var(ENV_USE_AGENT) {
            self.use_agent = Some(agent == "true" || agent == "1");
        }
        Ok(())
    }

    /// Override with command line flags.
    pub fn apply_flags(&mut self, host: Option<&str>, port: Option<u16>, user: Option<&str>) {
        if let Some(host) = host {
            self.host = Some(host.to_string());
        }
        if let Some(port) = port {
            self.port = Some(port);
        }
        if let Some(user) = user {
            self.username = Some(user.to_string());
        }
    }

    /// Fill in defaults and build the client settings.
    ///
    /// `os_user` supplies the login name when none was configured.
    pub fn resolve(&self, os_user: impl FnOnce() -> Option<String>) -> Result<ClientConfig> {
        let username = match self.username.clone().or_else(os_user) {
            Some(name) if !name.is_empty() => name,
            _ => bail!("Could not determine username; set {ENV_USER} or pass --user"),
        };

        let mut config = ClientConfig::new(
            self.host.clone().unwrap_or_else(|| "localhost".to_string()),
            self.port.unwrap_or(sshexec::config::DEFAULT_PORT),
            username,
        )
        .with_agent(self.use_agent.unwrap_or(true));

        if let Some(key) = &self.private_key {
            config = config.with_private_key(key.clone());
        }
        if let Some(path) = &self.private_key_path {
            config = config.with_private_key_path(expand_path(path));
        }
        if let Some(path) = &self.identity_file {
            config = config.with_identity_file(expand_path(path));
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if self.pooled {
            config = config.with_session_mode(SessionMode::Pooled);
        }
        Ok(config)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("private_key_path", &self.private_key_path)
            .field("identity_file", &self.identity_file)
            .field("use_agent", &self.use_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field("pooled", &self.pooled)
            .finish()
    }
}

/// Current OS login name.
pub fn os_user() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
}
