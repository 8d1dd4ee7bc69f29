//! Localized UI labels bundled with the plugin.

use common::LanguageCode;

/// A fixed piece of UI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Name,
    Product,
    PublicRegistration,
    PublicRegistrations,
}

impl Label {
    fn key(&self) -> &'static str {
        match self {
            Self::Name => "labels.name",
            Self::Product => "labels.product",
            Self::PublicRegistration => "labels.public_registration",
            Self::PublicRegistrations => "labels.public_registrations",
        }
    }

    /// Returns the label in the given language.
    ///
    /// Regional variants fall back to their base language, unknown languages
    /// to English.
    pub fn localize(&self, language: &LanguageCode) -> String {
        let locale = catalog_locale(language);
        rust_i18n::t!(self.key(), locale = locale).to_string()
    }
}

fn catalog_locale(language: &LanguageCode) -> &'static str {
    catalog_match(language).unwrap_or(common::FALLBACK_LANGUAGE)
}

fn catalog_match(language: &LanguageCode) -> Option<&'static str> {
    let available = rust_i18n::available_locales!();
    [language.as_str(), language.base()]
        .into_iter()
        .find_map(|code| available.iter().copied().find(|l| *l == code))
}

/// Maps a requested language onto one the plugin ships labels for.
///
/// Exact codes win over their base language; `None` if neither is bundled.
pub fn supported_language(language: &LanguageCode) -> Option<LanguageCode> {
    catalog_match(language).map(LanguageCode::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_labels() {
        let en = LanguageCode::new("en");
        assert_eq!(Label::Name.localize(&en), "Name");
        assert_eq!(Label::Product.localize(&en), "Product");
        assert_eq!(Label::PublicRegistration.localize(&en), "Public registration");
    }

    #[test]
    fn german_labels() {
        let de = LanguageCode::new("de");
        assert_eq!(Label::Product.localize(&de), "Produkt");
        assert_eq!(
            Label::PublicRegistrations.localize(&de),
            "Öffentliche Anmeldungen"
        );
    }

    #[test]
    fn regional_variant_uses_base_language() {
        assert_eq!(
            Label::Product.localize(&LanguageCode::new("de-formal")),
            "Produkt"
        );
    }

    #[test]
    fn supported_language_clamps_to_catalog() {
        let supported = |code: &str| supported_language(&LanguageCode::new(code));
        assert_eq!(supported("de"), Some(LanguageCode::new("de")));
        assert_eq!(supported("de-AT"), Some(LanguageCode::new("de")));
        assert_eq!(supported("NL_be"), Some(LanguageCode::new("nl")));
        assert_eq!(supported("zz-999"), None);
        assert_eq!(supported(""), None);
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(Label::Product.localize(&LanguageCode::new("xx")), "Product");
    }
}
