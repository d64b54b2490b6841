use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};

use spacectl::app::App;
use spacectl::controllers::{ListView, Route};
use spacectl::error::{ClientError, ClientResult};
use spacectl::indexer::Indexer;
use spacectl::model::SpaceFilter;

mod session;
mod spaces;
mod update;

pub(crate) use self::session::{
    handle_login_command, handle_logout_command, handle_register_command, handle_status_command,
};
pub(crate) use self::spaces::{handle_create_command, handle_delete_command, handle_list_command};
pub(crate) use self::update::handle_update_command;

/// Upper bound for one network round trip as seen from the UI loop.
const NETWORK_WAIT: Duration = Duration::from_secs(30);

/// Indexing has no fixed bound; this only keeps a wedged indexer from hanging forever.
const INDEX_WAIT: Duration = Duration::from_secs(60 * 60);

/// Used when no indexer program is configured.
pub(crate) struct MissingIndexer;

impl Indexer for MissingIndexer {
    fn process_files(
        &self,
        _paths: &[PathBuf],
        _tags: &[i32],
    ) -> ClientResult<String> {
        Err(ClientError::Indexer(
            "no indexer configured (pass --indexer or set indexer_program in config.json)"
                .to_string(),
        ))
    }
}

fn resolve_host(app: &App, host: Option<String>) -> Result<String> {
    match host {
        Some(h) => Ok(h),
        None => {
            let last = app.services().store.get().server_host;
            if last.is_empty() {
                return Err(anyhow!("no server host (pass --host)"));
            }
            Ok(last)
        }
    }
}

fn resolve_password(password: Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => std::env::var("SPACECTL_PASSWORD")
            .context("no password (pass --password or set SPACECTL_PASSWORD)"),
    }
}

/// Turns a surfaced controller error into the CLI's failure.
fn surface(err: &ClientError) -> anyhow::Error {
    if let ClientError::Server { status: 401, .. } = err {
        return anyhow!("{} (session expired? run `spacectl login`)", err);
    }
    anyhow!("{}", err)
}
