use anyhow::{Context, Result};
use url::Url;

use super::config_model::{DotEnvyConfig, GitHub, Server, Zoom};

pub const DEFAULT_SERVER_PORT: u16 = 8787;
pub const DEFAULT_BODY_LIMIT_MB: u64 = 2;
pub const DEFAULT_GITHUB_API_BASE_URL: &str = "https://api.github.com";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();
    from_lookup(|key| std::env::var(key).ok())
}

/// Builds the config from an arbitrary key lookup so it can be exercised
/// without touching the process environment.
pub fn from_lookup<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let server = Server {
        port: lookup("SERVER_PORT")
            .unwrap_or_else(|| DEFAULT_SERVER_PORT.to_string())
            .trim()
            .parse()
            .context("SERVER_PORT is invalid")?,
        body_limit: body_limit_bytes(
            lookup("SERVER_BODY_LIMIT")
                .unwrap_or_else(|| DEFAULT_BODY_LIMIT_MB.to_string())
                .trim()
                .parse()
                .context("SERVER_BODY_LIMIT is invalid")?,
        )?,
    };

    let api_base_url = non_empty(&lookup, "GITHUB_API_BASE_URL")
        .unwrap_or_else(|| DEFAULT_GITHUB_API_BASE_URL.to_string());
    // `Url::join` drops the last path segment unless the base ends with '/'.
    let api_base_url = if api_base_url.ends_with('/') {
        api_base_url
    } else {
        format!("{}/", api_base_url)
    };

    let github = GitHub {
        api_base_url: Url::parse(&api_base_url).context("GITHUB_API_BASE_URL is invalid")?,
        owner: required(&lookup, "GITHUB_OWNER")?,
        repo: required(&lookup, "GITHUB_REPO")?,
        token: required(&lookup, "GITHUB_TOKEN")?,
    };

    let zoom = Zoom {
        webhook_secret_token: non_empty(&lookup, "ZOOM_WEBHOOK_SECRET_TOKEN"),
    };

    Ok(DotEnvyConfig {
        server,
        github,
        zoom,
    })
}

fn body_limit_bytes(megabytes: u64) -> Result<usize> {
    megabytes
        .checked_mul(1024 * 1024)
        .and_then(|bytes| usize::try_from(bytes).ok())
        .context("SERVER_BODY_LIMIT is invalid")
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| {
        let trimmed = v.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).with_context(|| format!("{key} is invalid"))
}
