use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::*;

#[derive(Parser)]
#[command(name = "siteadmin-store")]
#[command(about = "Row store and auth endpoints for local development", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:54321")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Tables, users and tokens are kept here as JSON
    #[arg(long, default_value = "./siteadmin-data")]
    data_dir: PathBuf,

    /// Public key clients must send in the `apikey` header
    #[arg(long, env = "SITEADMIN_ANON_KEY", default_value = "dev-anon-key")]
    anon_key: String,

    /// Start tables with no rows instead of the starter dataset
    #[arg(long)]
    no_seed: bool,
}

pub(super) async fn run() -> Result<()> {
    let _ = dotenvy::dotenv();
    siteadmin::logging::init("info");

    let args = Args::parse();
    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;

    let store = MemoryStore::open(&args.data_dir, !args.no_seed)
        .with_context(|| format!("open store in {}", args.data_dir.display()))?;
    let state = Arc::new(AppState {
        store,
        anon_key: args.anon_key,
    });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(addr = %local_addr, data_dir = %args.data_dir.display(), "siteadmin-store listening");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
