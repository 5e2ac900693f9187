use anyhow::Context;
use clap::Parser;
use fakedata_api::build_router;
use fakedata_api::lifecycle::{setup_tracing, ApiSystem, Config};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    setup_tracing(config.verbose);

    let system = ApiSystem::new(config.buffer_size(), config.controller_settings())
        .context("failed to register resources")?;
    let router = build_router(&system);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, resources = system.endpoints().len(), "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Ctrl-C received");
        })
        .await
        .context("server error")?;

    system.shutdown().await.context("shutdown failed")?;
    Ok(())
}
