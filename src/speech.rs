//! Text-to-speech through the Google Translate TTS endpoint.

use anyhow::Context;
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// MIME type of everything the engine produces
pub const AUDIO_MIME: &str = "audio/mpeg";

/// Playback rate the TTS endpoint uses for the "slow" voice
const SLOW_SPEED: &str = "0.24";
const NORMAL_SPEED: &str = "1";

/// Longest `q` the TTS endpoint reliably accepts, in characters
const MAX_CHUNK_CHARS: usize = 100;

/// Characters after which a chunk may end
const BREAK_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '\u{2026}', '\u{3002}', '\u{3001}', '\u{FF0C}', '\u{FF01}', '\u{FF1F}', '\u{0964}',
    '\u{0965}', ')', ']', '}',
];

/// What to say and how to say it.
#[derive(Debug, Clone, Copy)]
pub struct SpeechRequest<'a> {
    pub text: &'a str,
    pub lang: &'a str,
    pub slow: bool,
    /// Top-level domain of the Google host, which selects the accent (e.g. "co.uk")
    pub tld: &'a str,
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech synthesis failed: {0}")]
    Engine(String),

    #[error("Speech engine returned no audio")]
    EmptyAudio,
}

/// Anything that can turn text into MP3 bytes.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    async fn synthesize(&self, request: SpeechRequest<'_>) -> Result<Vec<u8>, SpeechError>;
}

/// Google Translate's `translate_tts` endpoint.
pub struct GoogleSpeech {
    client: reqwest::Client,
    /// Base URL with a `{tld}` placeholder, e.g. `https://translate.google.{tld}`
    url_template: String,
}

impl GoogleSpeech {
    pub fn new(client: reqwest::Client, url_template: &str) -> Self {
        Self {
            client,
            url_template: url_template.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, tld: &str) -> String {
        let tld = match tld.trim() {
            "" => "com",
            tld => tld,
        };
        format!("{}/translate_tts", self.url_template.replace("{tld}", tld))
    }

    /// Fetch every chunk in order and join the MP3 parts into one stream.
    async fn fetch_audio(&self, request: SpeechRequest<'_>) -> anyhow::Result<Vec<u8>> {
        let url = self.endpoint(request.tld);
        let chunks = split_text(request.text, MAX_CHUNK_CHARS);
        debug!(
            "Synthesizing {} chars of '{}' in {} chunk(s) via {}",
            request.text.chars().count(),
            request.lang,
            chunks.len(),
            url
        );

        let total = chunks.len().to_string();
        let mut audio = Vec::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();

            let response = self
                .client
                .get(&url)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", request.lang),
                    ("q", chunk.as_str()),
                    ("ttsspeed", if request.slow { SLOW_SPEED } else { NORMAL_SPEED }),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await
                .context("Failed to send request to Google TTS")?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!("Google TTS error on chunk {}/{} ({}): {}", idx, total, status, body);
            }

            let part = response
                .bytes()
                .await
                .context("Failed to read Google TTS audio")?;
            audio.extend_from_slice(&part);
        }

        Ok(audio)
    }
}

/// Split `text` into trimmed chunks of at most `max_chars` characters.
///
/// Chunks end after whitespace or punctuation when one falls inside the
/// window; a run with no break is cut at `max_chars`.
fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        if rest.chars().count() <= max_chars {
            chunks.push(rest.to_string());
            break;
        }

        let window_end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let cut = rest[..window_end]
            .char_indices()
            .filter(|(_, c)| c.is_whitespace() || BREAK_PUNCTUATION.contains(c))
            .map(|(i, c)| i + c.len_utf8())
            .last()
            .unwrap_or(window_end);

        let (chunk, tail) = rest.split_at(cut);
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        rest = tail.trim_start();
    }

    chunks
}

#[async_trait]
impl SpeechEngine for GoogleSpeech {
    async fn synthesize(&self, request: SpeechRequest<'_>) -> Result<Vec<u8>, SpeechError> {
        let audio = self
            .fetch_audio(request)
            .await
            .map_err(|e| SpeechError::Engine(format!("{:#}", e)))?;

        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        Ok(audio)
    }
}
