//! Localized text as stored by the host platform.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::LanguageCode;

/// Language used when neither the requested language nor its base matches.
pub const FALLBACK_LANGUAGE: &str = "en";

/// A string that is either untranslated or carries one value per language.
///
/// The host stores these either as plain text or as a JSON object mapping
/// language codes to text; both shapes deserialize into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedString {
    Plain(String),
    Translated(BTreeMap<String, String>),
}

impl LocalizedString {
    /// Parses a value from a host text column.
    ///
    /// Text that is a JSON object of strings becomes [`LocalizedString::Translated`],
    /// anything else is kept verbatim.
    pub fn from_db(raw: &str) -> Self {
        match serde_json::from_str::<BTreeMap<String, String>>(raw) {
            Ok(map) => Self::Translated(map),
            Err(_) => Self::Plain(raw.to_string()),
        }
    }

    /// Serializes into the host's text column format.
    pub fn to_db(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Translated(map) => serde_json::to_string(map).unwrap_or_default(),
        }
    }

    /// Creates a value with a single translation.
    pub fn with(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Translated(BTreeMap::from([(language.into(), text.into())]))
    }

    /// Adds or replaces a translation, converting a plain value if needed.
    pub fn and(self, language: impl Into<String>, text: impl Into<String>) -> Self {
        let mut map = match self {
            Self::Translated(map) => map,
            Self::Plain(text) if text.is_empty() => BTreeMap::new(),
            Self::Plain(text) => BTreeMap::from([(FALLBACK_LANGUAGE.to_string(), text)]),
        };
        map.insert(language.into(), text.into());
        Self::Translated(map)
    }

    /// Resolves the text for a language.
    ///
    /// Lookup order: exact code, base language, [`FALLBACK_LANGUAGE`], then the
    /// first non-empty translation. Never fails; yields `""` when nothing is set.
    pub fn localize(&self, language: &LanguageCode) -> &str {
        let map = match self {
            Self::Plain(text) => return text,
            Self::Translated(map) => map,
        };

        [language.as_str(), language.base(), FALLBACK_LANGUAGE]
            .into_iter()
            .find_map(|code| map.get(code).filter(|text| !text.is_empty()))
            .or_else(|| map.values().find(|text| !text.is_empty()))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Returns true if no language carries any text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Plain(text) => text.is_empty(),
            Self::Translated(map) => map.values().all(String::is_empty),
        }
    }
}

impl Default for LocalizedString {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl From<&str> for LocalizedString {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_string())
    }
}

impl From<String> for LocalizedString {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &str) -> LanguageCode {
        LanguageCode::new(code)
    }

    #[test]
    fn plain_text_ignores_language() {
        let text = LocalizedString::from("Ticket");
        assert_eq!(text.localize(&lang("de")), "Ticket");
    }

    #[test]
    fn exact_language_wins() {
        let text = LocalizedString::with("en", "Diet").and("de", "Ernährung");
        assert_eq!(text.localize(&lang("de")), "Ernährung");
        assert_eq!(text.localize(&lang("en")), "Diet");
    }

    #[test]
    fn base_language_is_used_for_variants() {
        let text = LocalizedString::with("de", "Ernährung");
        assert_eq!(text.localize(&lang("de-formal")), "Ernährung");
    }

    #[test]
    fn falls_back_to_english_then_any() {
        let text = LocalizedString::with("en", "Diet").and("fr", "Régime");
        assert_eq!(text.localize(&lang("nl")), "Diet");

        let text = LocalizedString::with("fr", "Régime");
        assert_eq!(text.localize(&lang("nl")), "Régime");
    }

    #[test]
    fn empty_translations_are_skipped() {
        let text = LocalizedString::with("de", "").and("en", "Diet");
        assert_eq!(text.localize(&lang("de")), "Diet");
        assert_eq!(LocalizedString::default().localize(&lang("de")), "");
    }

    #[test]
    fn from_db_accepts_both_shapes() {
        assert_eq!(
            LocalizedString::from_db(r#"{"en": "Diet", "de": "Ernährung"}"#),
            LocalizedString::with("de", "Ernährung").and("en", "Diet")
        );
        assert_eq!(
            LocalizedString::from_db("Diet"),
            LocalizedString::Plain("Diet".to_string())
        );
    }

    #[test]
    fn deserializes_untagged() {
        let plain: LocalizedString = serde_json::from_str(r#""Hello""#).unwrap();
        assert_eq!(plain, LocalizedString::from("Hello"));
        let map: LocalizedString = serde_json::from_str(r#"{"de": "Hallo"}"#).unwrap();
        assert_eq!(map.localize(&lang("de")), "Hallo");
    }

    #[test]
    fn is_empty_checks_all_translations() {
        assert!(LocalizedString::default().is_empty());
        assert!(LocalizedString::with("en", "").is_empty());
        assert!(!LocalizedString::with("en", "x").is_empty());
    }
}
