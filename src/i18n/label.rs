//! Display labels for language codes.

/// Codes whose label is fixed regardless of what the providers report.
const LABEL_OVERRIDES: &[(&str, &str)] = &[
    ("hi", "Hindi"),
    ("bn", "Bengali"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("kn", "Kannada"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("gu", "Gujarati"),
    ("pa", "Punjabi"),
    ("or", "Odia"),
    ("sa", "Sanskrit"),
];

/// Look up the fixed label name for a code, if it has one.
pub fn override_name(code: &str) -> Option<&'static str> {
    let code = code.to_lowercase();
    LABEL_OVERRIDES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Build the label for `code` from the names each provider reports.
///
/// Resolution order:
/// 1. override table
/// 2. both names known and different: `"<Translation> / <Speech> (code)"`
/// 3. translation name only: `"<Translation> (code)"`
/// 4. speech name only: `"<Speech> (code)"`
/// 5. the bare code
pub fn resolve_label(code: &str, translation_name: Option<&str>, speech_name: Option<&str>) -> String {
    if let Some(name) = override_name(code) {
        return format!("{} ({})", name, code);
    }

    match (translation_name, speech_name) {
        (Some(tr), Some(tts)) if tr.to_lowercase() != tts.to_lowercase() => {
            format!("{} / {} ({})", title_case(tr), tts, code)
        }
        (Some(tr), _) => format!("{} ({})", title_case(tr), code),
        (None, Some(tts)) => format!("{} ({})", tts, code),
        (None, None) => code.to_string(),
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_over_provider_names() {
        assert_eq!(resolve_label("hi", Some("hindi"), Some("Hindi")), "Hindi (hi)");
        assert_eq!(resolve_label("or", Some("odia (oriya)"), None), "Odia (or)");
    }

    #[test]
    fn test_override_keeps_code_as_given() {
        assert_eq!(resolve_label("HI", None, None), "Hindi (HI)");
    }

    #[test]
    fn test_differing_names_are_combined() {
        assert_eq!(
            resolve_label("pt", Some("portuguese"), Some("Portuguese (Brazil)")),
            "Portuguese / Portuguese (Brazil) (pt)"
        );
    }

    #[test]
    fn test_equal_names_use_translation_name() {
        assert_eq!(resolve_label("fr", Some("french"), Some("French")), "French (fr)");
    }

    #[test]
    fn test_translation_name_only() {
        assert_eq!(
            resolve_label("zh-cn", Some("chinese (simplified)"), None),
            "Chinese (Simplified) (zh-cn)"
        );
    }

    #[test]
    fn test_speech_name_only_is_not_title_cased() {
        assert_eq!(resolve_label("yue", None, Some("Cantonese")), "Cantonese (yue)");
        assert_eq!(resolve_label("fr-ca", None, Some("French (Canada)")), "French (Canada) (fr-ca)");
    }

    #[test]
    fn test_unknown_code_is_bare() {
        assert_eq!(resolve_label("xx", None, None), "xx");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("haitian creole"), "Haitian Creole");
        assert_eq!(title_case("kurdish (kurmanji)"), "Kurdish (Kurmanji)");
        assert_eq!(title_case("MYANMAR"), "Myanmar");
        assert_eq!(title_case(""), "");
    }
}
