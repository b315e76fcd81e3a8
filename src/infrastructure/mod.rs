pub mod axum_http;
pub mod github;
