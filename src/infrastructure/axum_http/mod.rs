pub mod error_responses;
pub mod http_serve;
pub mod routers;
