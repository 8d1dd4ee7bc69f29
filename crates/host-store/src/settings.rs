//! Per-event plugin settings and the repository they are loaded from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{EventId, ItemId, LocalizedString, QuestionId, Result};

/// Setting keys as stored in the host's key/value settings table.
pub mod keys {
    pub const ITEMS: &str = "public_registrations_items";
    pub const QUESTIONS: &str = "public_registrations_questions";
    pub const SHOW_ATTENDEE_NAME: &str = "public_registrations_show_attendee_name";
    pub const SHOW_ITEM_NAME: &str = "public_registrations_show_item_name";
    pub const FIELD_HELP_TEXT: &str = "public_registrations_field_help_text";
    pub const ELIGIBILITY_SCOPE: &str = "public_registrations_eligibility_scope";

    /// All keys owned by this plugin.
    pub const ALL: [&str; 6] = [
        ITEMS,
        QUESTIONS,
        SHOW_ATTENDEE_NAME,
        SHOW_ITEM_NAME,
        FIELD_HELP_TEXT,
        ELIGIBILITY_SCOPE,
    ];
}

/// Which positions of an event may be listed at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityScope {
    /// Only positions for items selected in [`EventSettings::public_item_ids`].
    #[default]
    ItemScoped,

    /// Every position of the event, regardless of item.
    EventWide,
}

impl EligibilityScope {
    fn as_str(&self) -> &'static str {
        match self {
            Self::ItemScoped => "item_scoped",
            Self::EventWide => "event_wide",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "item_scoped" => Some(Self::ItemScoped),
            "event_wide" => Some(Self::EventWide),
            _ => None,
        }
    }
}

/// Organizer configuration for the public registrations table.
///
/// Every field has a declared default, so an event that was never configured
/// yields an empty table instead of an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Items whose attendees may opt in.
    #[serde(rename = "public_registrations_items")]
    pub public_item_ids: Vec<ItemId>,

    /// Questions shown as columns, in selection order.
    #[serde(rename = "public_registrations_questions")]
    pub public_question_ids: Vec<QuestionId>,

    #[serde(rename = "public_registrations_show_attendee_name")]
    pub show_attendee_name: bool,

    #[serde(rename = "public_registrations_show_item_name")]
    pub show_item_name: bool,

    /// Help text displayed below the opt-in checkbox.
    #[serde(rename = "public_registrations_field_help_text")]
    pub field_help_text: LocalizedString,

    #[serde(rename = "public_registrations_eligibility_scope")]
    pub eligibility_scope: EligibilityScope,
}

impl EventSettings {
    /// Builds settings from raw key/value rows of the host settings table.
    ///
    /// Unknown keys are ignored. Values that cannot be parsed keep their
    /// default and are logged, so a corrupt row never breaks the page.
    pub fn from_key_values<I, K, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Self::default();

        for (key, value) in rows {
            let (key, value) = (key.as_ref(), value.as_ref());
            let parsed = match key {
                keys::ITEMS => parse_id_list(value)
                    .map(|ids| settings.public_item_ids = ids.into_iter().map(ItemId::new).collect()),
                keys::QUESTIONS => parse_id_list(value).map(|ids| {
                    settings.public_question_ids = ids.into_iter().map(QuestionId::new).collect()
                }),
                keys::SHOW_ATTENDEE_NAME => {
                    parse_bool(value).map(|flag| settings.show_attendee_name = flag)
                }
                keys::SHOW_ITEM_NAME => parse_bool(value).map(|flag| settings.show_item_name = flag),
                keys::FIELD_HELP_TEXT => {
                    settings.field_help_text = LocalizedString::from_db(value);
                    Some(())
                }
                keys::ELIGIBILITY_SCOPE => {
                    EligibilityScope::parse(value).map(|scope| settings.eligibility_scope = scope)
                }
                _ => Some(()),
            };

            if parsed.is_none() {
                tracing::warn!(key, value, "ignoring unparseable setting");
            }
        }

        settings
    }

    /// Serializes into key/value rows in the host settings table format.
    pub fn to_key_values(&self) -> Result<Vec<(&'static str, String)>> {
        let items: Vec<i64> = self.public_item_ids.iter().map(ItemId::as_i64).collect();
        let questions: Vec<i64> = self
            .public_question_ids
            .iter()
            .map(QuestionId::as_i64)
            .collect();

        Ok(vec![
            (keys::ITEMS, serde_json::to_string(&items)?),
            (keys::QUESTIONS, serde_json::to_string(&questions)?),
            (keys::SHOW_ATTENDEE_NAME, format_bool(self.show_attendee_name)),
            (keys::SHOW_ITEM_NAME, format_bool(self.show_item_name)),
            (keys::FIELD_HELP_TEXT, self.field_help_text.to_db()),
            (
                keys::ELIGIBILITY_SCOPE,
                self.eligibility_scope.as_str().to_string(),
            ),
        ])
    }
}

/// Lists are stored as JSON arrays; older rows hold the ids as strings.
fn parse_id_list(raw: &str) -> Option<Vec<i64>> {
    if raw.trim().is_empty() {
        return Some(Vec::new());
    }
    let values: Vec<serde_json::Value> = serde_json::from_str(raw).ok()?;
    values
        .iter()
        .map(|v| match v {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

fn format_bool(flag: bool) -> String {
    if flag { "True" } else { "False" }.to_string()
}

/// Source of per-event plugin settings.
///
/// The host owns the storage; implementations only translate between the
/// typed [`EventSettings`] schema and the host's representation.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the settings of an event, applying defaults for unset keys.
    async fn load(&self, event_id: EventId) -> Result<EventSettings>;

    /// Persists the settings of an event.
    async fn save(&self, event_id: EventId, settings: &EventSettings) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty_and_hidden() {
        let settings = EventSettings::default();
        assert!(settings.public_item_ids.is_empty());
        assert!(settings.public_question_ids.is_empty());
        assert!(!settings.show_attendee_name);
        assert!(!settings.show_item_name);
        assert!(settings.field_help_text.is_empty());
        assert_eq!(settings.eligibility_scope, EligibilityScope::ItemScoped);
    }

    #[test]
    fn deserializes_from_host_keys_with_defaults() {
        let settings: EventSettings = serde_json::from_value(serde_json::json!({
            "public_registrations_items": [1, 2],
            "public_registrations_show_attendee_name": true,
        }))
        .unwrap();

        assert_eq!(settings.public_item_ids, vec![ItemId::new(1), ItemId::new(2)]);
        assert!(settings.show_attendee_name);
        assert!(!settings.show_item_name);
        assert!(settings.public_question_ids.is_empty());
    }

    #[test]
    fn from_key_values_parses_host_formats() {
        let settings = EventSettings::from_key_values([
            (keys::ITEMS, "[3, \"4\"]"),
            (keys::QUESTIONS, "[9, 7]"),
            (keys::SHOW_ATTENDEE_NAME, "True"),
            (keys::SHOW_ITEM_NAME, "False"),
            (keys::FIELD_HELP_TEXT, r#"{"en": "Be listed", "de": "Anzeigen"}"#),
            (keys::ELIGIBILITY_SCOPE, "event_wide"),
            ("unrelated_key", "whatever"),
        ]);

        assert_eq!(settings.public_item_ids, vec![ItemId::new(3), ItemId::new(4)]);
        assert_eq!(
            settings.public_question_ids,
            vec![QuestionId::new(9), QuestionId::new(7)]
        );
        assert!(settings.show_attendee_name);
        assert!(!settings.show_item_name);
        assert_eq!(
            settings.field_help_text.localize(&"de".into()),
            "Anzeigen"
        );
        assert_eq!(settings.eligibility_scope, EligibilityScope::EventWide);
    }

    #[test]
    fn unparseable_values_keep_defaults() {
        let settings = EventSettings::from_key_values([
            (keys::ITEMS, "not json"),
            (keys::SHOW_ITEM_NAME, "maybe"),
            (keys::ELIGIBILITY_SCOPE, "everything"),
        ]);

        assert_eq!(settings, EventSettings::default());
    }

    #[test]
    fn empty_list_value_is_empty() {
        let settings = EventSettings::from_key_values([(keys::ITEMS, "")]);
        assert!(settings.public_item_ids.is_empty());
    }

    #[test]
    fn key_values_survive_a_reload() {
        let settings = EventSettings {
            public_item_ids: vec![ItemId::new(1)],
            public_question_ids: vec![QuestionId::new(5), QuestionId::new(2)],
            show_attendee_name: true,
            show_item_name: false,
            field_help_text: LocalizedString::with("en", "Show me"),
            eligibility_scope: EligibilityScope::EventWide,
        };

        let rows = settings.to_key_values().unwrap();
        assert_eq!(rows.len(), keys::ALL.len());
        assert!(rows.contains(&(keys::SHOW_ATTENDEE_NAME, "True".to_string())));

        assert_eq!(EventSettings::from_key_values(rows), settings);
    }
}
