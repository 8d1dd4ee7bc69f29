use serde::{Deserialize, Serialize};

/// Declares a typed wrapper around a host database primary key.
///
/// Wrapping the raw `i64` keeps event, item, question and position keys
/// from being mixed up at call sites.
macro_rules! host_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from a raw database key.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw database key.
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

host_id!(
    /// Identifier of an event on the host platform.
    EventId
);

host_id!(
    /// Identifier of an item (product) sold for an event.
    ItemId
);

host_id!(
    /// Identifier of an organizer-defined question.
    QuestionId
);

host_id!(
    /// Identifier of a single order position (one ticket / attendee slot).
    PositionId
);

/// A normalized language code such as `en`, `de` or `de-formal`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Creates a language code, lowercasing it and mapping `_` to `-`.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_lowercase().replace('_', "-"))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the primary subtag: `de` for `de-formal`, `en` for `en-us`.
    pub fn base(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_preserve_raw_value() {
        let id = EventId::new(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&ItemId::new(7)).unwrap();
        assert_eq!(json, "7");
        let ids: Vec<QuestionId> = serde_json::from_str("[3, 1]").unwrap();
        assert_eq!(ids, vec![QuestionId::new(3), QuestionId::new(1)]);
    }

    #[test]
    fn language_code_is_normalized() {
        let lang = LanguageCode::new(" DE_Formal ");
        assert_eq!(lang.as_str(), "de-formal");
        assert_eq!(lang.base(), "de");
    }

    #[test]
    fn language_code_base_without_region() {
        assert_eq!(LanguageCode::from("en").base(), "en");
    }
}
