use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use zoom_dispatch_relay::{
    application::usecases::zoom_webhook::ZoomWebhookUseCase,
    config::config_loader,
    domain::repositories::repository_dispatch::RepositoryDispatchClient,
    infrastructure::{axum_http::http_serve, github::repository_dispatch::GitHubDispatchClient},
    observability,
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Relay exited with error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("relay")?;

    let dotenvy_env = Arc::new(config_loader::load()?);
    info!("ENV has been loaded");

    let dispatch_client: Arc<dyn RepositoryDispatchClient + Send + Sync> =
        Arc::new(GitHubDispatchClient::new(&dotenvy_env.github)?);
    info!(
        owner = %dotenvy_env.github.owner,
        repo = %dotenvy_env.github.repo,
        signing = dotenvy_env.zoom.webhook_secret_token.is_some(),
        "GitHub dispatch client ready"
    );

    let usecase = Arc::new(ZoomWebhookUseCase::new(
        dispatch_client,
        dotenvy_env.zoom.webhook_secret_token.clone(),
    ));

    http_serve::start(dotenvy_env, usecase).await
}
