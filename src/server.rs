//! HTTP surface: language listing and translate-and-speak.

use crate::config::Config;
use crate::error::AppError;
use crate::history::{HistoryEntry, HistoryLog};
use crate::i18n::{
    BuiltinSpeechLanguages, BuiltinTranslationLanguages, LanguageOption, LanguageRegistry, LanguageSource,
    RemoteLanguageSource,
};
use crate::speech::{GoogleSpeech, SpeechEngine, SpeechRequest, AUDIO_MIME};
use crate::translation::TranslationRouter;
use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Everything a request handler needs. Built once at startup.
pub struct AppState {
    pub registry: Arc<LanguageRegistry>,
    pub translator: TranslationRouter,
    pub speech: Arc<dyn SpeechEngine>,
    pub history: HistoryLog,
}

impl AppState {
    /// Wire up the production collaborators.
    ///
    /// Fails if either language source cannot be loaded.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let client = config.http_client()?;

        let translation_source: Box<dyn LanguageSource> = match &config.translation_languages_url {
            Some(url) => Box::new(RemoteLanguageSource::new(client.clone(), url)),
            None => Box::new(BuiltinTranslationLanguages),
        };
        let speech_source: Box<dyn LanguageSource> = match &config.speech_languages_url {
            Some(url) => Box::new(RemoteLanguageSource::new(client.clone(), url)),
            None => Box::new(BuiltinSpeechLanguages),
        };

        let registry = LanguageRegistry::load(translation_source.as_ref(), speech_source.as_ref()).await?;
        let translator = TranslationRouter::from_config(&client, config);
        info!("Translation providers: {}", translator.provider_names().join(" -> "));

        Ok(Self {
            registry: Arc::new(registry),
            translator,
            speech: Arc::new(GoogleSpeech::new(client, &config.tts_url_template)),
            history: HistoryLog::new(&config.history_file),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageOption>,
}

const DEFAULT_TARGET: &str = "en";
const DEFAULT_TLD: &str = "com";

/// Body of `POST /api/translate`.
///
/// Fields are coerced loosely. `null` counts as absent, numbers and booleans
/// given for a string field become their JSON text, and `slow` is truthy.
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default, deserialize_with = "loose_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub target: Option<String>,
    #[serde(default, deserialize_with = "loose_bool")]
    pub slow: bool,
    #[serde(default, deserialize_with = "loose_string")]
    pub tld: Option<String>,
}

impl TranslateRequest {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default().trim()
    }

    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(DEFAULT_TARGET).trim()
    }

    pub fn tld(&self) -> &str {
        self.tld.as_deref().unwrap_or(DEFAULT_TLD).trim()
    }
}

fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "" | "false" | "0" | "no" | "off"
        ),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

#[derive(Debug, Serialize)]
pub struct TranslateSuccess {
    pub ok: bool,
    pub translation: String,
    pub provider: String,
    pub target: String,
    pub target_name: String,
    pub elapsed: f64,
    pub audio_base64: String,
    pub audio_mime: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Rejection {
    pub ok: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TranslateResponse {
    Success(TranslateSuccess),
    Rejected(Rejection),
}

impl TranslateResponse {
    fn rejected(error: impl Into<String>) -> Self {
        TranslateResponse::Rejected(Rejection {
            ok: false,
            error: error.into(),
        })
    }
}

/// Build the application router.
///
/// When `frontend_dir` exists it is served for every path the API does not
/// claim.
pub fn build_router(state: Arc<AppState>, frontend_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/api/languages", get(list_languages))
        .route("/api/translate", post(translate))
        .with_state(state);

    if let Some(dir) = frontend_dir.filter(|dir| dir.is_dir()) {
        info!("Serving frontend from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
    }

    router.layer(CorsLayer::very_permissive()).layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}

async fn list_languages(State(state): State<Arc<AppState>>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: state.registry.list_supported(),
    })
}

async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TranslateResponse>), AppError> {
    // Bodies that are not a JSON object still get the `{ok, error}` shape
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!("Rejecting request body: {}", rejection.body_text());
            return Ok((rejection.status(), Json(TranslateResponse::rejected(rejection.body_text()))));
        }
    };

    let text = payload.text();
    let target = payload.target();
    let tld = payload.tld();

    if text.is_empty() {
        return Ok((StatusCode::OK, Json(TranslateResponse::rejected("No input text"))));
    }
    if !state.registry.is_supported(target) {
        debug!("Rejecting unsupported target '{}'", target);
        return Ok((
            StatusCode::OK,
            Json(TranslateResponse::rejected(format!("Unsupported target: {}", target))),
        ));
    }

    let started = Instant::now();
    let routed = state.translator.translate(text, target).await?;
    let elapsed = round_to_hundredths(started.elapsed().as_secs_f64());

    let audio = state
        .speech
        .synthesize(SpeechRequest {
            text: &routed.translation,
            lang: target,
            slow: payload.slow,
            tld,
        })
        .await?;

    let target_name = state
        .registry
        .translation_name(target)
        .unwrap_or(target)
        .to_string();

    state
        .history
        .append(&HistoryEntry::now(text, &routed.translation, target, &routed.provider, elapsed))
        .await
        .map_err(|e| AppError::History(format!("{:#}", e)))?;

    info!(
        "Translated {} chars to '{}' via {} in {:.2}s ({} audio bytes)",
        text.chars().count(),
        target,
        routed.provider,
        elapsed,
        audio.len()
    );

    Ok((
        StatusCode::OK,
        Json(TranslateResponse::Success(TranslateSuccess {
            ok: true,
            translation: routed.translation,
            provider: routed.provider,
            target: target.to_string(),
            target_name,
            elapsed,
            audio_base64: base64::engine::general_purpose::STANDARD.encode(&audio),
            audio_mime: AUDIO_MIME,
        })),
    ))
}

fn round_to_hundredths(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}
