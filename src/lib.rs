pub mod config;
pub mod error;
pub mod history;
pub mod i18n;
pub mod server;
pub mod speech;
pub mod translation;
