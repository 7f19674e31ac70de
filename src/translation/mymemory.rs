use crate::translation::Translator;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: Option<ResponseData>,
    // Sent as a number on success and sometimes as a string on errors
    response_status: Option<serde_json::Value>,
    response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

/// MyMemory translation memory API.
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    base_url: String,
    email: Option<String>,
}

impl MyMemoryTranslator {
    pub fn new(client: reqwest::Client, base_url: &str, email: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            email,
        }
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    fn name(&self) -> &str {
        "MyMemory"
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let langpair = format!("autodetect|{}", target);
        let mut query = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = &self.email {
            query.push(("de", email.as_str()));
        }

        let response = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&query)
            .send()
            .await
            .context("Failed to send request to MyMemory")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("MyMemory error ({}): {}", status, body);
        }

        let parsed: MyMemoryResponse = response
            .json()
            .await
            .context("Failed to parse MyMemory response")?;

        let status = parsed
            .response_status
            .as_ref()
            .and_then(|s| s.as_u64().or_else(|| s.as_str().and_then(|s| s.parse().ok())))
            .unwrap_or(200);
        if status != 200 {
            anyhow::bail!(
                "MyMemory error ({}): {}",
                status,
                parsed.response_details.unwrap_or_default()
            );
        }

        parsed
            .response_data
            .and_then(|d| d.translated_text)
            .context("MyMemory response contained no translation")
    }
}
