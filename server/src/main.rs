use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fleettrack_server::credentials::CredentialStore;
use fleettrack_server::{leak, router, AppState};

#[derive(Parser)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    addr: SocketAddr,

    /// Path of the sled database holding driver credentials
    #[arg(long, default_value = "fleettrack.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let db = sled::open(&args.db)?;
    let credentials = CredentialStore::open(&db)?;
    tracing::info!(
        path = %args.db.display(),
        records = credentials.len(),
        "credential table ready"
    );

    let state = leak(AppState::new());
    let app = router(state);

    tracing::info!(addr = %args.addr, "listening");
    hyper::Server::bind(&args.addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    Ok(())
}
