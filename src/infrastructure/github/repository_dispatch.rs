use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use url::Url;

use crate::{
    config::config_model::GitHub,
    domain::{
        repositories::repository_dispatch::RepositoryDispatchClient,
        value_objects::repository_dispatch::{DispatchRequest, DispatchResponse},
    },
};

pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
pub const USER_AGENT: &str = "zoom-dispatch-relay";

/// `repository_dispatch` client built on reqwest.
///
/// No timeout is configured: a hung upstream holds the inbound request open.
pub struct GitHubDispatchClient {
    http: Client,
    dispatch_url: Url,
    token: String,
}

impl GitHubDispatchClient {
    pub fn new(config: &GitHub) -> Result<Self> {
        let dispatch_url = config
            .api_base_url
            .join(&format!("repos/{}/{}/dispatches", config.owner, config.repo))
            .context("failed to build GitHub dispatch URL")?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build GitHub HTTP client")?;

        Ok(Self {
            http,
            dispatch_url,
            token: config.token.clone(),
        })
    }

    pub fn dispatch_url(&self) -> &Url {
        &self.dispatch_url
    }
}

#[async_trait]
impl RepositoryDispatchClient for GitHubDispatchClient {
    async fn send_dispatch(&self, request: DispatchRequest) -> Result<DispatchResponse> {
        let response = self
            .http
            .post(self.dispatch_url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => text,
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        Ok(DispatchResponse { status, body })
    }
}
