//! Capability sources: where language metadata comes from at startup.

use crate::i18n::tables::{GOOGLE_TRANSLATE_LANGUAGES, GOOGLE_TTS_LANGUAGES};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// A provider of `(code, name)` pairs for one side of the pipeline.
#[async_trait]
pub trait LanguageSource: Send + Sync {
    /// Fetch every `(code, name)` pair, in the order the source reports them.
    async fn fetch(&self) -> Result<Vec<(String, String)>>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// Languages the Google translation provider accepts.
pub struct BuiltinTranslationLanguages;

#[async_trait]
impl LanguageSource for BuiltinTranslationLanguages {
    async fn fetch(&self) -> Result<Vec<(String, String)>> {
        Ok(GOOGLE_TRANSLATE_LANGUAGES
            .iter()
            .map(|(name, code)| (code.to_string(), name.to_string()))
            .collect())
    }

    fn describe(&self) -> String {
        "built-in translation table".to_string()
    }
}

/// Languages the Google TTS engine can speak.
pub struct BuiltinSpeechLanguages;

#[async_trait]
impl LanguageSource for BuiltinSpeechLanguages {
    async fn fetch(&self) -> Result<Vec<(String, String)>> {
        Ok(GOOGLE_TTS_LANGUAGES
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect())
    }

    fn describe(&self) -> String {
        "built-in speech table".to_string()
    }
}

/// A JSON document of the form `{"<code>": "<name>", ...}` served over HTTP.
pub struct RemoteLanguageSource {
    client: reqwest::Client,
    url: String,
}

impl RemoteLanguageSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl LanguageSource for RemoteLanguageSource {
    async fn fetch(&self) -> Result<Vec<(String, String)>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context(format!("Failed to fetch language list from {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Language list request to {} failed ({}): {}", self.url, status, body);
        }

        let languages: BTreeMap<String, String> = response
            .json()
            .await
            .context(format!("Failed to parse language list from {}", self.url))?;

        if languages.is_empty() {
            anyhow::bail!("Language list from {} is empty", self.url);
        }

        Ok(languages.into_iter().collect())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
