use anyhow::Context;
use dotenvy::dotenv;
use tokengate::router::init_router;
use tokengate::state::init_app_state;
use tokengate_config::AppConfig;
use tokengate_observability::{init_basic_console_logging, init_metrics};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_basic_console_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let state = init_app_state(&config)
        .await?
        .with_metrics(init_metrics());
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.addr))?;

    tracing::info!(addr = %config.server.addr, "server listening");
    tracing::info!("Scalar UI available at http://{}/scalar", config.server.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
