use std::fmt;

use url::Url;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub github: GitHub,
    pub zoom: Zoom,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    /// Request body limit in bytes.
    pub body_limit: usize,
}

#[derive(Clone)]
pub struct GitHub {
    pub api_base_url: Url,
    pub owner: String,
    pub repo: String,
    pub token: String,
}

impl fmt::Debug for GitHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHub")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct Zoom {
    pub webhook_secret_token: Option<String>,
}

impl fmt::Debug for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zoom")
            .field(
                "webhook_secret_token",
                &self.webhook_secret_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
