//! Translation through an ordered cascade of providers.
//!
//! Providers are tried one at a time in priority order. The first one that
//! returns non-blank text wins and no further providers are called.

mod google;
mod libre;
mod mymemory;

pub use google::GoogleTranslator;
pub use libre::LibreTranslator;
pub use mymemory::MyMemoryTranslator;

use crate::config::Config;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A single external translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Provider name reported to callers (e.g. "Google")
    fn name(&self) -> &str;

    /// Translate `text` from an auto-detected language into `target`.
    async fn translate(&self, text: &str, target: &str) -> anyhow::Result<String>;
}

/// Translated text plus the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedTranslation {
    pub translation: String,
    pub provider: String,
}

#[derive(Debug, Error)]
pub enum TranslateError {
    /// Every provider errored or returned blank text
    #[error("All translators failed; last error: {last_error}")]
    AllProvidersFailed { last_error: String },
}

/// Ordered provider fallback chain.
pub struct TranslationRouter {
    providers: Vec<Box<dyn Translator>>,
}

impl TranslationRouter {
    pub fn new(providers: Vec<Box<dyn Translator>>) -> Self {
        Self { providers }
    }

    /// The production chain: Google, then MyMemory, then LibreTranslate.
    pub fn from_config(client: &reqwest::Client, config: &Config) -> Self {
        Self::new(vec![
            Box::new(GoogleTranslator::new(client.clone(), &config.google_translate_url)),
            Box::new(MyMemoryTranslator::new(
                client.clone(),
                &config.mymemory_url,
                config.mymemory_email.clone(),
            )),
            Box::new(LibreTranslator::new(
                client.clone(),
                &config.libre_translate_url,
                config.libre_translate_api_key.clone(),
            )),
        ])
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Translate `text` into `target` using the first provider that succeeds.
    ///
    /// A provider succeeds only if it returns text that is non-empty after
    /// trimming. Each provider is called at most once.
    pub async fn translate(&self, text: &str, target: &str) -> Result<RoutedTranslation, TranslateError> {
        let mut last_error = "no translation providers configured".to_string();

        for provider in &self.providers {
            debug!("Trying {} for target '{}'", provider.name(), target);

            match provider.translate(text, target).await {
                Ok(out) if !out.trim().is_empty() => {
                    info!("Translated to '{}' via {}", target, provider.name());
                    return Ok(RoutedTranslation {
                        translation: out,
                        provider: provider.name().to_string(),
                    });
                }
                Ok(_) => {
                    warn!("{} returned an empty translation", provider.name());
                    last_error = format!("{} returned an empty translation", provider.name());
                }
                Err(e) => {
                    warn!("{} failed: {:#}", provider.name(), e);
                    last_error = format!("{}: {:#}", provider.name(), e);
                }
            }
        }

        Err(TranslateError::AllProvidersFailed { last_error })
    }
}
