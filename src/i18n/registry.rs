//! Language registry: the set of languages usable end to end.
//!
//! The registry is built once at startup from a translation source and a
//! speech source, then shared read-only by every request handler.

use crate::i18n::label::resolve_label;
use crate::i18n::source::LanguageSource;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

/// Regional languages that work in practice even when one side of the
/// provider metadata omits them.
pub const EXTRA_LANGUAGE_CODES: &[&str] = &["hi", "bn", "ta", "te", "kn", "ml", "mr", "gu", "pa", "or", "sa"];

/// One entry of the public language list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub code: String,
    pub label: String,
}

/// Immutable capability metadata for the whole process.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    /// `(code, name)` pairs from the translation provider, in source order
    translation: Vec<(String, String)>,

    /// `(code, name)` pairs from the speech engine, in source order
    speech: Vec<(String, String)>,

    /// Lowercased codes usable end to end
    supported: BTreeSet<String>,
}

impl LanguageRegistry {
    /// Fetch both sources and compute the supported set.
    ///
    /// Any source failure is returned as an error; there is no partial
    /// registry.
    pub async fn load(translation: &dyn LanguageSource, speech: &dyn LanguageSource) -> Result<Self> {
        let translation_languages = translation
            .fetch()
            .await
            .context(format!("Failed to load translation languages from {}", translation.describe()))?;
        let speech_languages = speech
            .fetch()
            .await
            .context(format!("Failed to load speech languages from {}", speech.describe()))?;

        let registry = Self::new(translation_languages, speech_languages);

        info!(
            "Loaded {} translation and {} speech languages, {} supported",
            registry.translation.len(),
            registry.speech.len(),
            registry.supported.len()
        );

        Ok(registry)
    }

    /// Build a registry from already-fetched `(code, name)` pairs.
    pub fn new(translation: Vec<(String, String)>, speech: Vec<(String, String)>) -> Self {
        let translation_codes: BTreeSet<String> =
            translation.iter().map(|(code, _)| code.to_lowercase()).collect();
        let speech_codes: BTreeSet<String> = speech.iter().map(|(code, _)| code.to_lowercase()).collect();

        let mut supported: BTreeSet<String> =
            translation_codes.intersection(&speech_codes).cloned().collect();

        for code in EXTRA_LANGUAGE_CODES {
            if translation_codes.contains(*code) || speech_codes.contains(*code) {
                supported.insert(code.to_string());
            }
        }

        Self {
            translation,
            speech,
            supported,
        }
    }

    /// Every supported language with its label, sorted by code.
    pub fn list_supported(&self) -> Vec<LanguageOption> {
        self.supported
            .iter()
            .map(|code| LanguageOption {
                code: code.clone(),
                label: self.label_for(code),
            })
            .collect()
    }

    /// Check whether a code is usable end to end (case-insensitive).
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.contains(&code.to_lowercase())
    }

    /// Display label for a code.
    pub fn label_for(&self, code: &str) -> String {
        resolve_label(code, self.translation_name(code), self.speech_name(code))
    }

    /// Name the translation provider reports for a code.
    pub fn translation_name(&self, code: &str) -> Option<&str> {
        find_name(&self.translation, code)
    }

    /// Name the speech engine reports for a code.
    ///
    /// Speech codes are keyed exactly: the lowercased code must equal the
    /// engine's code, so mixed-case entries such as `zh-TW` never match.
    pub fn speech_name(&self, code: &str) -> Option<&str> {
        let code = code.to_lowercase();
        self.speech
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| name.as_str())
    }

    pub fn supported_count(&self) -> usize {
        self.supported.len()
    }
}

fn find_name<'a>(languages: &'a [(String, String)], code: &str) -> Option<&'a str> {
    languages
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| name.as_str())
}
