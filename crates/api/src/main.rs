use std::sync::Arc;

use anyhow::Context;

use agencysite_api::app::{self, services};
use agencysite_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agencysite_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let addr = config.listen_addr();

    let services = Arc::new(
        services::build_services(config)
            .await
            .context("failed to initialise document store")?,
    );
    let app = app::router_with(services.clone());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    services.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install ctrl-c handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
