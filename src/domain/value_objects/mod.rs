pub mod repository_dispatch;
pub mod zoom_webhook;
