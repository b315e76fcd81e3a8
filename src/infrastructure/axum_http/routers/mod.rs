pub mod zoom_webhook;
