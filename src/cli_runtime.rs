use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use siteadmin::auth::{Navigation, Route, Session, SessionFile, SessionState, guard};
use siteadmin::config::StoreConfig;
use siteadmin::remote::RemoteClient;
use siteadmin::rows::RowStore;

use crate::Commands;

#[derive(Parser)]
#[command(name = "siteadmin")]
#[command(about = "Admin console for site content, products and settings", long_about = None)]
pub(crate) struct Cli {
    /// Base URL of the remote store
    #[arg(long, env = "SITEADMIN_URL", global = true)]
    url: Option<String>,

    /// Public key sent with every request
    #[arg(long, env = "SITEADMIN_ANON_KEY", global = true, hide_env_values = true)]
    anon_key: Option<String>,

    /// Where the signed-in session is remembered
    #[arg(long, env = "SITEADMIN_STATE_DIR", default_value = ".siteadmin", global = true)]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    let _ = dotenvy::dotenv();
    siteadmin::logging::init("warn");

    let cli = Cli::parse();
    let ctx = Ctx {
        config: StoreConfig::new(cli.url.as_deref(), cli.anon_key.as_deref())?,
        sessions: SessionFile::in_dir(&cli.state_dir),
    };
    crate::cli_exec::handle_command(&ctx, cli.command)
}

pub(crate) struct Ctx {
    pub(crate) config: StoreConfig,
    pub(crate) sessions: SessionFile,
}

/// A resolved session allowed onto a protected screen.
pub(crate) struct Authed {
    pub(crate) session: Session<RemoteClient>,
    pub(crate) store: Arc<dyn RowStore>,
}

impl Ctx {
    /// Restores the remembered session, dropping it if the store rejects it.
    /// A store that cannot be reached leaves the remembered session alone.
    pub(crate) fn session(&self) -> Result<Session<RemoteClient>> {
        let client = RemoteClient::new(self.config.clone(), None)?;
        let token = self.sessions.token_for(&self.config.base_url)?;
        let session = Session::init(client, token.as_deref());
        if token.is_some() && session.state() == SessionState::SignedOut {
            self.sessions.clear()?;
        }
        Ok(session)
    }

    /// Like [`Ctx::session`], but fails when the stored session could not be
    /// checked against the store.
    pub(crate) fn resolved_session(&self) -> Result<Session<RemoteClient>> {
        let session = self.session()?;
        if let Some(err) = session.restore_error() {
            anyhow::bail!("could not restore session from {}: {}", self.config.base_url, err);
        }
        Ok(session)
    }

    /// Runs the route guard for `route` and hands back a store client
    /// carrying the user's token.
    pub(crate) fn require(&self, route: Route) -> Result<Authed> {
        let session = self.resolved_session()?;
        match guard(route.path(), &session) {
            Navigation::Render(_) => {}
            Navigation::Redirect(Route::Login) => anyhow::bail!(
                "not signed in (run `siteadmin login --email ... --password ...`)"
            ),
            other => anyhow::bail!("cannot open {}: {:?}", route, other),
        }
        let mut client = session.backend().clone();
        client.set_token(session.access_token().map(str::to_string));
        Ok(Authed {
            session,
            store: Arc::new(client),
        })
    }
}

pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}
