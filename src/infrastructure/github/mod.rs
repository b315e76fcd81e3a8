pub mod repository_dispatch;
