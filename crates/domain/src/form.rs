//! The opt-in field contributed to the attendee registration form.

use common::LanguageCode;
use host_store::{EligibilityScope, EventSettings, ItemId};
use serde::Serialize;

use crate::eligibility::OPT_IN_FIELD;
use crate::labels::Label;

/// How the host should render a contributed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    Checkbox,
}

/// A form field description handed to the host's form machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub help_text: String,
    pub required: bool,
    pub widget: Widget,
}

/// Returns the fields to add to the registration form for an item.
///
/// Yields the optional opt-in checkbox, unless eligibility is item-scoped and
/// the item is not selected; asking for it there would be misleading. Without
/// an item context the field is always offered.
pub fn question_form_fields(
    item_id: Option<ItemId>,
    settings: &EventSettings,
    language: &LanguageCode,
) -> Vec<FormField> {
    let offered = match (settings.eligibility_scope, item_id) {
        (EligibilityScope::ItemScoped, Some(item)) => settings.public_item_ids.contains(&item),
        _ => true,
    };
    if !offered {
        return Vec::new();
    }

    vec![FormField {
        name: OPT_IN_FIELD.to_string(),
        label: Label::PublicRegistration.localize(language),
        help_text: settings.field_help_text.localize(language).to_string(),
        required: false,
        widget: Widget::Checkbox,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::LocalizedString;

    fn settings() -> EventSettings {
        EventSettings {
            public_item_ids: vec![ItemId::new(1)],
            field_help_text: LocalizedString::with("en", "List me publicly")
                .and("de", "Öffentlich anzeigen"),
            ..Default::default()
        }
    }

    #[test]
    fn field_is_an_optional_checkbox() {
        let fields = question_form_fields(Some(ItemId::new(1)), &settings(), &"en".into());
        assert_eq!(
            fields,
            vec![FormField {
                name: "public_registration".to_string(),
                label: "Public registration".to_string(),
                help_text: "List me publicly".to_string(),
                required: false,
                widget: Widget::Checkbox,
            }]
        );
    }

    #[test]
    fn help_text_and_label_follow_language() {
        let fields = question_form_fields(None, &settings(), &"de".into());
        assert_eq!(fields[0].label, "Öffentliche Anmeldung");
        assert_eq!(fields[0].help_text, "Öffentlich anzeigen");
    }

    #[test]
    fn unselected_item_gets_no_field() {
        assert!(question_form_fields(Some(ItemId::new(2)), &settings(), &"en".into()).is_empty());
    }

    #[test]
    fn event_wide_scope_offers_field_for_every_item() {
        let settings = EventSettings {
            eligibility_scope: EligibilityScope::EventWide,
            ..Default::default()
        };
        assert_eq!(
            question_form_fields(Some(ItemId::new(2)), &settings, &"en".into()).len(),
            1
        );
    }

    #[test]
    fn serializes_widget_in_snake_case() {
        let fields = question_form_fields(None, &settings(), &"en".into());
        let json = serde_json::to_value(&fields[0]).unwrap();
        assert_eq!(json["widget"], "checkbox");
        assert_eq!(json["required"], false);
    }
}
