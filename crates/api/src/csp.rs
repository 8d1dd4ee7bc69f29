//! Content-Security-Policy adjustment for pages showing avatars.

use axum::http::header::CONTENT_SECURITY_POLICY;
use axum::http::{HeaderMap, HeaderValue};
use domain::GravatarResolver;

const IMG_SRC: &str = "img-src";

/// Allows avatar images in the response's Content-Security-Policy.
///
/// Without an existing policy the header becomes `img-src <gravatar>`. An
/// existing policy keeps its other directives; the gravatar host is added to
/// its `img-src` directive, or an `img-src` directive is appended. A policy
/// that is not visible ASCII cannot be merged and is left as it is. No other
/// header is touched.
pub fn allow_avatar_images(headers: &mut HeaderMap) {
    let merged = match headers.get(CONTENT_SECURITY_POLICY).map(HeaderValue::to_str) {
        Some(Ok(existing)) => merge_img_src(existing, GravatarResolver::HOST),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "unreadable Content-Security-Policy header left unchanged");
            return;
        }
        None => format!("{IMG_SRC} {}", GravatarResolver::HOST),
    };

    match HeaderValue::from_str(&merged) {
        Ok(value) => {
            headers.insert(CONTENT_SECURITY_POLICY, value);
        }
        Err(e) => tracing::warn!(error = %e, "could not build Content-Security-Policy header"),
    }
}

fn merge_img_src(policy: &str, source: &str) -> String {
    let mut found = false;
    let mut directives: Vec<String> = policy
        .split(';')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|directive| {
            let mut parts = directive.split_whitespace();
            if parts.next() != Some(IMG_SRC) {
                return directive.to_string();
            }
            found = true;
            if parts.any(|s| s == source) {
                directive.to_string()
            } else {
                format!("{directive} {source}")
            }
        })
        .collect();

    if !found {
        directives.push(format!("{IMG_SRC} {source}"));
    }
    directives.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csp(headers: &HeaderMap) -> &str {
        headers.get(CONTENT_SECURITY_POLICY).unwrap().to_str().unwrap()
    }

    #[test]
    fn sets_policy_when_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("x-frame-options", HeaderValue::from_static("DENY"));

        allow_avatar_images(&mut headers);

        assert_eq!(csp(&headers), "img-src https://secure.gravatar.com");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn appends_to_existing_img_src() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self'; img-src 'self' data:"),
        );

        allow_avatar_images(&mut headers);

        assert_eq!(
            csp(&headers),
            "default-src 'self'; img-src 'self' data: https://secure.gravatar.com"
        );
    }

    #[test]
    fn appends_directive_when_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self';"),
        );

        allow_avatar_images(&mut headers);

        assert_eq!(
            csp(&headers),
            "default-src 'self'; img-src https://secure.gravatar.com"
        );
    }

    #[test]
    fn unreadable_policy_is_left_alone() {
        let original =
            HeaderValue::from_bytes(b"default-src 'self'; img-src caf\xc3\xa9.example").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_SECURITY_POLICY, original.clone());

        allow_avatar_images(&mut headers);

        assert_eq!(headers.get(CONTENT_SECURITY_POLICY), Some(&original));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn is_idempotent() {
        let mut headers = HeaderMap::new();
        allow_avatar_images(&mut headers);
        allow_avatar_images(&mut headers);
        assert_eq!(csp(&headers), "img-src https://secure.gravatar.com");
    }
}
