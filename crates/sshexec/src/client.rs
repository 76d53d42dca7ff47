//! SSH client that runs one command per call.
//!
//! By default every [`execute`](crate::Execute::execute) dials, authenticates,
//! opens a session channel, runs the command and disconnects. Nothing is
//! shared between calls. [`SessionMode::Pooled`] keeps the authenticated
//! connection open instead and only opens a new channel per command.
//!
//! Host keys are accepted without verification. The fingerprint of every
//! accepted key is logged at debug level so operators can audit it.

use crate::Execute;
use crate::auth::{AgentIdentity, AuthMethod};
use crate::config::{ClientConfig, SessionMode};
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{debug, warn};
use russh::client::{self, Handle};
use russh::{ChannelMsg, Disconnect};
use russh_keys::key::PublicKey;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::Mutex;

/// Host key policy: trust whatever the server presents.
struct AcceptAnyHostKey;

#[async_trait]
impl client::Handler for AcceptAnyHostKey {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        debug!(
            "accepting unverified host key {}",
            server_public_key.fingerprint()
        );
        Ok(true)
    }
}

type Connection = Handle<AcceptAnyHostKey>;

/// What came back from one remote command.
#[derive(Debug, Default)]
struct RemoteOutput {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    status: Option<u32>,
}

impl RemoteOutput {
    /// Stdout without trailing newlines, or the failure.
    fn into_result(self, command: &str) -> Result<String> {
        if self.status == Some(0) {
            let stdout = String::from_utf8_lossy(&self.stdout);
            return Ok(stdout.trim_end_matches('\n').to_string());
        }

        Err(Error::CommandFailed {
            command: command.to_string(),
            status: self.status,
            stderr: String::from_utf8_lossy(&self.stderr).trim().to_string(),
        })
    }
}

/// Client for the administrative SSH interface of a Soft Serve server.
pub struct SshClient {
    host: String,
    port: u16,
    username: String,
    auth: AuthMethod,
    timeout: Duration,
    runtime: Runtime,
    pool: Option<Mutex<Option<Connection>>>,
}

impl SshClient {
    /// Build a client, resolving the authentication method up front.
    ///
    /// Fails with [`Error::AuthUnavailable`] when no key material is given
    /// and the agent is disabled or not reachable.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let auth = AuthMethod::resolve(config)?;
        Self::with_auth(config, auth)
    }

    /// Build a client around an already resolved method.
    pub fn with_auth(config: &ClientConfig, auth: AuthMethod) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Error::Runtime)?;

        let pool = match config.session_mode {
            SessionMode::PerCommand => None,
            SessionMode::Pooled => Some(Mutex::new(None)),
        };

        debug!(
            "SSH client for {}@{} using {}",
            config.username,
            config.address(),
            auth.label()
        );

        Ok(Self {
            host: config.host.clone(),
            port: config.port,
            username: config.username.clone(),
            auth,
            timeout: config.timeout(),
            runtime,
            pool,
        })
    }

    /// Resolved authentication method.
    pub fn auth_method(&self) -> &AuthMethod {
        &self.auth
    }

    /// `host:port` of the server.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether connections are reused across commands.
    pub fn is_pooled(&self) -> bool {
        self.pool.is_some()
    }

    /// Dial and authenticate. `command` is what the session is for and
    /// only labels errors.
    async fn connect(&self, command: &str) -> Result<Connection> {
        let config = Arc::new(client::Config::default());
        let mut connection = client::connect(
            config,
            (self.host.as_str(), self.port),
            AcceptAnyHostKey,
        )
        .await
        .map_err(|source| Error::Connect {
            command: command.to_string(),
            addr: self.address(),
            source,
        })?;

        let accepted = match &self.auth {
            AuthMethod::Key(pair) => connection
                .authenticate_publickey(self.username.as_str(), Arc::clone(pair))
                .await
                .map_err(|source| Error::Connect {
                    command: command.to_string(),
                    addr: self.address(),
                    source,
                })?,
            AuthMethod::Agent { identity } => {
                self.authenticate_with_agent(&mut connection, identity.as_ref(), command)
                    .await?
            }
        };

        if !accepted {
            return Err(Error::Rejected {
                command: command.to_string(),
                username: self.username.clone(),
            });
        }
        Ok(connection)
    }

    #[cfg(unix)]
    async fn authenticate_with_agent(
        &self,
        connection: &mut Connection,
        identity: Option<&AgentIdentity>,
        command: &str,
    ) -> Result<bool> {
        use russh_keys::agent::client::AgentClient;

        let agent_error = |e: &dyn std::fmt::Display| Error::Agent {
            command: command.to_string(),
            message: e.to_string(),
        };

        let mut agent = AgentClient::connect_env()
            .await
            .map_err(|e| agent_error(&e))?;
        let mut keys = agent
            .request_identities()
            .await
            .map_err(|e| agent_error(&e))?;

        if let Some(identity) = identity {
            keys.retain(|key| identity.matches(key));
            if keys.is_empty() {
                return Err(Error::IdentityNotInAgent {
                    command: command.to_string(),
                    path: identity.path().to_path_buf(),
                });
            }
        }

        for key in keys {
            let (returned, outcome) = connection
                .authenticate_future(self.username.as_str(), key, agent)
                .await;
            agent = returned;
            if outcome.map_err(|e| agent_error(&e))? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    #[cfg(not(unix))]
    async fn authenticate_with_agent(
        &self,
        _connection: &mut Connection,
        _identity: Option<&AgentIdentity>,
        command: &str,
    ) -> Result<bool> {
        Err(Error::Agent {
            command: command.to_string(),
            message: "agent sockets are only supported on unix".to_string(),
        })
    }

    async fn dispatch(&self, command: &str) -> Result<RemoteOutput> {
        let Some(pool) = &self.pool else {
            let connection = self.connect(command).await?;
            let output = run_on(&connection, command).await;
            // Teardown failures do not change the outcome of the command.
            let _ = connection
                .disconnect(Disconnect::ByApplication, "", "en")
                .await;
            return output;
        };

        let mut slot = pool.lock().await;
        let connection = match slot.take() {
            Some(open) if !open.is_closed() => open,
            stale => {
                if stale.is_some() {
                    warn!("pooled connection to {} closed, reconnecting", self.address());
                }
                self.connect(command).await?
            }
        };

        let output = run_on(&connection, command).await;
        // A channel failure leaves the connection in an unknown state.
        if output.is_ok() {
            *slot = Some(connection);
        }
        output
    }
}

async fn run_on(connection: &Connection, command: &str) -> Result<RemoteOutput> {
    let channel_error = |source| Error::Channel {
        command: command.to_string(),
        source,
    };

    let mut channel = connection
        .channel_open_session()
        .await
        .map_err(channel_error)?;
    channel.exec(true, command).await.map_err(channel_error)?;

    let mut output = RemoteOutput::default();
    while let Some(msg) = channel.wait().await {
        match msg {
            ChannelMsg::Data { ref data } => output.stdout.extend_from_slice(data),
            ChannelMsg::ExtendedData { ref data, ext: 1 } => {
                output.stderr.extend_from_slice(data);
            }
            ChannelMsg::ExitStatus { exit_status } => output.status = Some(exit_status),
            _ => {}
        }
    }
    Ok(output)
}

impl Execute for SshClient {
    fn execute(&self, command: &str) -> Result<String> {
        debug!("{} $ {}", self.address(), command);

        let output = self.runtime.block_on(async {
            tokio::time::timeout(self.timeout, self.dispatch(command))
                .await
                .map_err(|_| Error::Timeout {
                    command: command.to_string(),
                    after: self.timeout,
                })?
        })?;

        output.into_result(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(stdout: &str, stderr: &str, status: Option<u32>) -> RemoteOutput {
        RemoteOutput {
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
            status,
        }
    }

    #[test]
    fn test_success_trims_trailing_newlines_only() {
        let out = output("  Repository: proj\n\n", "", Some(0));
        assert_eq!(out.into_result("repo info proj").unwrap(), "  Repository: proj");
    }

    #[test]
    fn test_nonzero_exit_carries_stderr_and_command() {
        let out = output("", "repository not found\n", Some(1));
        match out.into_result("repo info ghost").unwrap_err() {
            Error::CommandFailed {
                command,
                status,
                stderr,
            } => {
                assert_eq!(command, "repo info ghost");
                assert_eq!(status, Some(1));
                assert_eq!(stderr, "repository not found");
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_exit_status_is_a_failure() {
        let out = output("partial", "", None);
        assert!(matches!(
            out.into_result("user info bob"),
            Err(Error::CommandFailed { status: None, .. })
        ));
    }

    #[test]
    fn test_client_modes() {
        let config = ClientConfig::new("localhost", 23231, "admin");
        let auth = AuthMethod::Agent { identity: None };

        let client = SshClient::with_auth(&config, auth.clone()).unwrap();
        assert!(!client.is_pooled());
        assert_eq!(client.address(), "localhost:23231");

        let pooled = config.with_session_mode(SessionMode::Pooled);
        let client = SshClient::with_auth(&pooled, auth).unwrap();
        assert!(client.is_pooled());
        assert_eq!(client.auth_method().label(), "agent");
    }

    #[test]
    fn test_refused_connection_names_the_command() {
        // Port 1 on loopback is closed on any sane test machine.
        let config =
            ClientConfig::new("127.0.0.1", 1, "admin").with_timeout(Duration::from_secs(5));
        let client = SshClient::with_auth(&config, AuthMethod::Agent { identity: None }).unwrap();
        let err = client.execute("repo info proj").unwrap_err();
        assert!(
            matches!(err, Error::Connect { .. } | Error::Timeout { .. }),
            "unexpected error: {err:?}"
        );
        assert_eq!(err.command(), Some("repo info proj"));
        assert!(err.to_string().contains("repo info proj"));
    }

    #[test]
    fn test_silent_server_times_out() {
        // The kernel completes the handshake; nothing ever answers the
        // SSH banner exchange.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let config =
            ClientConfig::new("127.0.0.1", port, "admin").with_timeout(Duration::from_secs(1));
        let client = SshClient::with_auth(&config, AuthMethod::Agent { identity: None }).unwrap();
        let err = client.execute("settings anon-access").unwrap_err();

        match err {
            Error::Timeout { command, after } => {
                assert_eq!(command, "settings anon-access");
                assert_eq!(after, Duration::from_secs(1));
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
        drop(listener);
    }
}
