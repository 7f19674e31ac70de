use crate::translation::Translator;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Google Translate via the public `gtx` client endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "Google"
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .context("Failed to send request to Google Translate")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Google Translate error ({}): {}", status, body);
        }

        let json: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse Google Translate response")?;

        extract_translation(&json)
    }
}

/// Concatenate the `[0][i][0]` segments Google splits a translation into.
fn extract_translation(json: &serde_json::Value) -> Result<String> {
    let segments = json
        .get(0)
        .and_then(|v| v.as_array())
        .context("Google Translate response is missing the segment array")?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn test_extract_translation_joins_segments() {
        let json = serde_json::json!([
            [["Bonjour. ", "Hello. ", null, null, 10], ["Au revoir.", "Goodbye.", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(extract_translation(&json).unwrap(), "Bonjour. Au revoir.");
    }

    #[test]
    fn test_extract_translation_missing_segments() {
        let json = serde_json::json!({"error": "nope"});
        assert!(extract_translation(&json).is_err());
    }

    #[tokio::test]
    async fn test_translate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "auto"))
            .and(query_param("tl", "fr"))
            .and(query_param("q", "Hello world"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([[["Bonjour le monde", "Hello world"]], null, "en"])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = GoogleTranslator::new(reqwest::Client::new(), &mock_server.uri());
        let result = translator.translate("Hello world", "fr").await.expect("Should succeed");

        assert_eq!(result, "Bonjour le monde");
    }

    #[tokio::test]
    async fn test_translate_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&mock_server)
            .await;

        let translator = GoogleTranslator::new(reqwest::Client::new(), &mock_server.uri());
        let err = translator.translate("Hello", "fr").await.unwrap_err();

        assert!(err.to_string().contains("429"));
    }
}
