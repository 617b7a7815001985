use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use todo_server::{build_router, store, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    todo_server::logging::init(config.verbose);

    let store = store::connect(&config.store()).await;
    let app = build_router(AppState::new(store), &config.assets_dir);

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    todo_server::run(listener, app)
        .await
        .context("server failed")?;
    info!("server stopped, document store released");
    Ok(())
}
