//! Request language negotiation.

use axum::http::HeaderMap;
use axum::http::header::ACCEPT_LANGUAGE;
use common::LanguageCode;
use domain::supported_language;

/// Picks the language of a request.
///
/// An explicit `?lang=` wins, then the `Accept-Language` entries by
/// descending quality, then `default`. Only languages the plugin ships labels
/// for are chosen, regional variants are reduced to their base language, so
/// the result is one of a small fixed set.
pub fn negotiate(query: Option<&str>, headers: &HeaderMap, default: &LanguageCode) -> LanguageCode {
    let accepted = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(by_preference)
        .unwrap_or_default();

    query
        .into_iter()
        .chain(accepted)
        .find_map(|tag| supported_language(&LanguageCode::new(tag)))
        .unwrap_or_else(|| default.clone())
}

/// Language tags of an `Accept-Language` header, most preferred first.
fn by_preference(header: &str) -> Vec<&str> {
    let mut entries: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';').map(str::trim);
            let tag = parts.next().filter(|t| !t.is_empty() && *t != "*")?;
            let quality = parts
                .find_map(|p| p.strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            (quality > 0.0).then_some((tag, quality))
        })
        .collect();

    // Stable, so equal qualities keep header order
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries.into_iter().map(|(tag, _)| tag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(accept: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(accept));
        headers
    }

    #[test]
    fn query_parameter_wins() {
        let lang = negotiate(Some("de"), &headers("fr"), &LanguageCode::default());
        assert_eq!(lang.as_str(), "de");
    }

    #[test]
    fn highest_quality_is_chosen() {
        let lang = negotiate(
            None,
            &headers("fr;q=0.5, de-AT;q=0.9, en;q=0.8"),
            &LanguageCode::default(),
        );
        assert_eq!(lang.as_str(), "de");
    }

    #[test]
    fn first_entry_wins_on_equal_quality() {
        assert_eq!(by_preference("nl, de"), vec!["nl", "de"]);
    }

    #[test]
    fn unsupported_languages_are_skipped() {
        let default = LanguageCode::new("en");
        assert_eq!(negotiate(Some("zz-999"), &headers("xx, nl;q=0.2"), &default).as_str(), "nl");
        assert_eq!(negotiate(Some("xx-nonsense"), &HeaderMap::new(), &default), default);
    }

    #[test]
    fn falls_back_to_default() {
        let default = LanguageCode::new("de");
        assert_eq!(negotiate(None, &HeaderMap::new(), &default), default);
        assert_eq!(negotiate(Some(" "), &headers("*, fr;q=0"), &default), default);
    }
}
