use crate::translation::Translator;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibreResponse {
    translated_text: String,
}

/// LibreTranslate (hosted or self-hosted).
pub struct LibreTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslator {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    fn name(&self) -> &str {
        "Libre"
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let request = LibreRequest {
            q: text,
            source: "auto",
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&request)
            .send()
            .await
            .context("Failed to send request to LibreTranslate")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("LibreTranslate error ({}): {}", status, body);
        }

        let parsed: LibreResponse = response
            .json()
            .await
            .context("Failed to parse LibreTranslate response")?;

        Ok(parsed.translated_text)
    }
}
