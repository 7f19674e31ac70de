use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub frontend_dir: String,

    // History
    pub history_file: String,

    // Translation providers
    pub google_translate_url: String,
    pub mymemory_url: String,
    pub mymemory_email: Option<String>,
    pub libre_translate_url: String,
    pub libre_translate_api_key: Option<String>,

    // Speech
    pub tts_url_template: String,

    // Capability sources (None = built-in tables)
    pub translation_languages_url: Option<String>,
    pub speech_languages_url: Option<String>,

    // Outbound HTTP
    pub http_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: match std::env::var("PORT") {
                Ok(v) => v.parse().context(format!("PORT must be a valid port number, got '{}'", v))?,
                Err(_) => 8000,
            },
            frontend_dir: std::env::var("FRONTEND_DIR").unwrap_or_else(|_| "frontend".to_string()),

            // History
            history_file: std::env::var("HISTORY_FILE")
                .unwrap_or_else(|_| "history.json".to_string()),

            // Translation providers
            google_translate_url: std::env::var("GOOGLE_TRANSLATE_URL")
                .unwrap_or_else(|_| "https://translate.googleapis.com".to_string()),
            mymemory_url: std::env::var("MYMEMORY_URL")
                .unwrap_or_else(|_| "https://api.mymemory.translated.net".to_string()),
            mymemory_email: non_empty_var("MYMEMORY_EMAIL"),
            libre_translate_url: std::env::var("LIBRE_TRANSLATE_URL")
                .unwrap_or_else(|_| "https://libretranslate.com".to_string()),
            libre_translate_api_key: non_empty_var("LIBRE_TRANSLATE_API_KEY"),

            // Speech
            tts_url_template: std::env::var("TTS_URL_TEMPLATE")
                .unwrap_or_else(|_| "https://translate.google.{tld}".to_string()),

            // Capability sources
            translation_languages_url: non_empty_var("TRANSLATION_LANGUAGES_URL"),
            speech_languages_url: non_empty_var("SPEECH_LANGUAGES_URL"),

            // Outbound HTTP
            http_timeout: match non_empty_var("HTTP_TIMEOUT_SECS") {
                Some(v) => Some(Duration::from_secs(v.parse().context(format!(
                    "HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    v
                ))?)),
                None => None,
            },
        })
    }

    /// Build the shared outbound HTTP client.
    ///
    /// No timeout is applied unless `HTTP_TIMEOUT_SECS` is set.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.http_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().context("Failed to create HTTP client")
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
