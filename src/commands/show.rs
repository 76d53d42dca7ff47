use anyhow::{Result, bail};
use declarative::{Reconciler, Resource};
use serde::Serialize;
use softserve::{Collaborator, Repository, SETTINGS_ID, ServerSettings, User};
use sshexec::Execute;

use crate::Context;
use crate::cli::Kind;

pub fn run(ctx: &Context, kind: Kind, id: Option<&str>) -> Result<()> {
    let id = match (kind, id) {
        (Kind::Settings, id) => id.unwrap_or(SETTINGS_ID),
        (_, Some(id)) => id,
        (_, None) => bail!("An id is required to show a {}", kind_name(kind)),
    };

    let client = super::connect(ctx)?;
    let json = match kind {
        Kind::Repo => import::<Repository>(&client, id)?,
        Kind::User => import::<User>(&client, id)?,
        Kind::Collab => import::<Collaborator>(&client, id)?,
        Kind::Settings => import::<ServerSettings>(&client, id)?,
    };
    println!("{json}");
    Ok(())
}

/// Read one resource by its import id and render its state as JSON.
pub fn import<R>(remote: &dyn Execute, raw_id: &str) -> Result<String>
where
    R: Resource,
    R::State: Serialize,
{
    let (id, state) = Reconciler::<R>::new(remote).import(raw_id)?;
    log::debug!("Imported {} {id}", R::KIND);
    Ok(serde_json::to_string_pretty(&state)?)
}

pub fn kind_name(kind: Kind) -> &'static str {
    match kind {
        Kind::Repo => Repository::KIND,
        Kind::User => User::KIND,
        Kind::Collab => Collaborator::KIND,
        Kind::Settings => ServerSettings::KIND,
    }
}
