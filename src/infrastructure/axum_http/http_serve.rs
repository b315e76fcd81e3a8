use crate::{
    application::usecases::zoom_webhook::ZoomWebhookUseCase,
    config::config_model::DotEnvyConfig, infrastructure::axum_http::routers,
};
use anyhow::Result;
use axum::{Router, extract::DefaultBodyLimit};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info};

pub async fn start(config: Arc<DotEnvyConfig>, usecase: Arc<ZoomWebhookUseCase>) -> Result<()> {
    let app = app(usecase, config.server.body_limit);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Zoom webhook relay running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Full relay router; `body_limit` is in bytes.
pub fn app(usecase: Arc<ZoomWebhookUseCase>, body_limit: usize) -> Router {
    // axum's 2 MB extractor default would otherwise shadow the configured limit.
    routers::zoom_webhook::routes(usecase)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM signal handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
