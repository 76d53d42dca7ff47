pub mod apply;
pub mod destroy;
pub mod exec;
pub mod show;

use anyhow::{Context as _, Result};
use sshexec::SshClient;

use crate::Context;
use crate::config::{self, ConnectionConfig};

/// Build a client from the config file, `SOFT_SERVE_*` variables and flags.
pub fn connect(ctx: &Context) -> Result<SshClient> {
    let mut connection = ConnectionConfig::load(ctx.config.as_deref())?;
    connection.apply_env(|name| std::env::var(name).ok())?;
    connection.apply_flags(ctx.host.as_deref(), ctx.port, ctx.user.as_deref());
    log::debug!("Connection settings: {connection:?}");

    let client_config = connection.resolve(config::os_user)?;
    let client = SshClient::new(&client_config)
        .with_context(|| format!("Could not set up a session for {}", client_config.address()))?;
    log::info!(
        "Using {} as {} ({})",
        client.address(),
        client_config.username,
        client.auth_method().label()
    );
    Ok(client)
}
