use std::net::SocketAddr;

use dotenvy::dotenv;
use tokio::net::TcpListener;

use userhub::logging::init_tracing;
use userhub::metrics::{init_metrics, metrics_app};
use userhub::router::init_router;
use userhub::state::init_app_state;
use userhub_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guard = init_tracing()?;
    let server_config = ServerConfig::from_env();

    if let Some(handle) = init_metrics()? {
        let metrics_listener = TcpListener::bind(server_config.metrics_addr()).await?;
        tracing::info!(addr = %server_config.metrics_addr(), "Metrics server listening");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(metrics_listener, metrics_app(handle)).await {
                tracing::error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let state = init_app_state().await?;
    if state.jwt_config.uses_dev_secret() {
        tracing::warn!("Using the development JWT secret; set JWT_SECRET in production");
    }
    let app = init_router(state);

    let listener = TcpListener::bind(server_config.addr()).await?;
    tracing::info!(addr = %server_config.addr(), "Server running");
    tracing::info!("Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
