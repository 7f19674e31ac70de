//! Language capability metadata.
//!
//! # Architecture
//!
//! - `source`: where `(code, name)` pairs come from (built-in tables or a remote document)
//! - `tables`: the built-in catalogues for translation and speech
//! - `registry`: the supported set, computed once at startup
//! - `label`: display labels for codes
//!
//! # Example
//!
//! ```rust,ignore
//! use voice_translator::i18n::{BuiltinSpeechLanguages, BuiltinTranslationLanguages, LanguageRegistry};
//!
//! let registry = LanguageRegistry::load(&BuiltinTranslationLanguages, &BuiltinSpeechLanguages).await?;
//! assert_eq!(registry.label_for("hi"), "Hindi (hi)");
//! ```

mod label;
mod registry;
mod source;
mod tables;

pub use registry::{LanguageOption, LanguageRegistry};
pub use source::{BuiltinSpeechLanguages, BuiltinTranslationLanguages, LanguageSource, RemoteLanguageSource};
