use dotenvy::dotenv;
use warden::logging::init_tracing;
use warden::metrics::{init_metrics, metrics_app};
use warden::router::init_router;
use warden::state::init_app_state;
use warden_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();

    if server_config.metrics_enabled {
        match (init_metrics(), server_config.metrics_address()) {
            (Ok(handle), Some(addr)) => {
                let listener = tokio::net::TcpListener::bind(addr).await?;
                tracing::info!("Metrics available at http://{}/metrics", addr);
                tokio::spawn(async move {
                    if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                        tracing::error!(error = %e, "Metrics server stopped");
                    }
                });
            }
            (Err(e), _) => tracing::warn!(error = %e, "Failed to install metrics recorder"),
            (Ok(_), None) => tracing::warn!("Invalid metrics address, metrics are not served"),
        }
    }

    let state = init_app_state().await?;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(server_config.bind_address()).await?;
    tracing::info!("Server running on http://{}", server_config.bind_address());
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui",
        server_config.bind_address()
    );

    axum::serve(listener, app)
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
