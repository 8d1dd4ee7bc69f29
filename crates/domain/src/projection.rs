//! Projection of eligible positions into the public table.

use common::LanguageCode;
use host_store::{EventSettings, OrderPosition, Question};
use serde::{Deserialize, Serialize};

use crate::avatar::AvatarResolver;
use crate::labels::Label;

/// One listed attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicRegistrationRow {
    pub avatar_url: String,

    /// Cell values, aligned with [`PublicRegistrationTable::headers`].
    pub fields: Vec<String>,
}

/// Header row plus one row per listed attendee.
///
/// Every row carries exactly as many fields as there are headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicRegistrationTable {
    pub headers: Vec<String>,
    pub rows: Vec<PublicRegistrationRow>,
}

impl PublicRegistrationTable {
    /// Returns true if nobody is listed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

enum Column<'a> {
    Product,
    Name,
    Question(&'a Question),
}

/// Resolves the visible columns: product, name, then questions in the order
/// the organizer selected them. Selected questions that no longer exist are
/// skipped.
fn columns<'a>(settings: &EventSettings, questions: &'a [Question]) -> Vec<Column<'a>> {
    let mut columns = Vec::with_capacity(2 + settings.public_question_ids.len());
    if settings.show_item_name {
        columns.push(Column::Product);
    }
    if settings.show_attendee_name {
        columns.push(Column::Name);
    }
    columns.extend(
        settings
            .public_question_ids
            .iter()
            .filter_map(|id| questions.iter().find(|q| q.id == *id))
            .map(Column::Question),
    );
    columns
}

/// Builds the public table for already-eligible positions.
///
/// Missing data never fails: an unanswered question is an empty cell.
pub fn build_table(
    positions: &[OrderPosition],
    questions: &[Question],
    settings: &EventSettings,
    avatars: &dyn AvatarResolver,
    language: &LanguageCode,
) -> PublicRegistrationTable {
    let columns = columns(settings, questions);

    let headers = columns
        .iter()
        .map(|column| match column {
            Column::Product => Label::Product.localize(language),
            Column::Name => Label::Name.localize(language),
            Column::Question(q) => q.label.localize(language).to_string(),
        })
        .collect();

    let rows = positions
        .iter()
        .map(|position| PublicRegistrationRow {
            avatar_url: avatars.avatar_url(position.attendee_email.as_deref().unwrap_or_default()),
            fields: columns
                .iter()
                .map(|column| match column {
                    Column::Product => position.item_name.localize(language).to_string(),
                    Column::Name => position.attendee_name.clone().unwrap_or_default(),
                    Column::Question(q) => position.answer_for(q.id).unwrap_or_default().to_string(),
                })
                .collect(),
        })
        .collect();

    PublicRegistrationTable { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use host_store::{EventId, ItemId, LocalizedString, PositionId, QuestionId};

    const EVENT: EventId = EventId::new(1);
    const DIET: QuestionId = QuestionId::new(1);
    const SHIRT: QuestionId = QuestionId::new(2);

    struct FixedAvatar;

    impl AvatarResolver for FixedAvatar {
        fn avatar_url(&self, email: &str) -> String {
            format!("avatar:{email}")
        }
    }

    fn questions() -> Vec<Question> {
        vec![
            Question {
                id: DIET,
                event_id: EVENT,
                label: LocalizedString::with("en", "Diet").and("de", "Ernährung"),
            },
            Question {
                id: SHIRT,
                event_id: EVENT,
                label: LocalizedString::from("Shirt size"),
            },
        ]
    }

    fn jane() -> OrderPosition {
        OrderPosition::builder(PositionId::new(1), EVENT, ItemId::new(10))
            .item_name(LocalizedString::with("en", "Ticket").and("de", "Eintrittskarte"))
            .attendee_name("Jane Doe")
            .attendee_email("jane@example.org")
            .answer(DIET, "Vegetarian")
            .build()
    }

    fn en() -> LanguageCode {
        LanguageCode::new("en")
    }

    #[test]
    fn name_and_question_columns() {
        let settings = EventSettings {
            show_attendee_name: true,
            show_item_name: false,
            public_question_ids: vec![DIET],
            ..Default::default()
        };

        let table = build_table(&[jane()], &questions(), &settings, &FixedAvatar, &en());

        assert_eq!(table.headers, vec!["Name", "Diet"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].fields, vec!["Jane Doe", "Vegetarian"]);
        assert_eq!(table.rows[0].avatar_url, "avatar:jane@example.org");
    }

    #[test]
    fn unanswered_question_is_blank() {
        let settings = EventSettings {
            show_attendee_name: true,
            public_question_ids: vec![SHIRT],
            ..Default::default()
        };

        let table = build_table(&[jane()], &questions(), &settings, &FixedAvatar, &en());
        assert_eq!(table.headers, vec!["Name", "Shirt size"]);
        assert_eq!(table.rows[0].fields, vec!["Jane Doe", ""]);
    }

    #[test]
    fn product_comes_before_name_and_questions_follow_selection_order() {
        let settings = EventSettings {
            show_attendee_name: true,
            show_item_name: true,
            public_question_ids: vec![SHIRT, DIET],
            ..Default::default()
        };

        let table = build_table(&[jane()], &questions(), &settings, &FixedAvatar, &en());
        assert_eq!(table.headers, vec!["Product", "Name", "Shirt size", "Diet"]);
        assert_eq!(
            table.rows[0].fields,
            vec!["Ticket", "Jane Doe", "", "Vegetarian"]
        );
    }

    #[test]
    fn headers_and_cells_are_localized() {
        let settings = EventSettings {
            show_item_name: true,
            public_question_ids: vec![DIET],
            ..Default::default()
        };

        let table = build_table(
            &[jane()],
            &questions(),
            &settings,
            &FixedAvatar,
            &LanguageCode::new("de"),
        );
        assert_eq!(table.headers, vec!["Produkt", "Ernährung"]);
        assert_eq!(table.rows[0].fields, vec!["Eintrittskarte", "Vegetarian"]);
    }

    #[test]
    fn deleted_questions_are_skipped() {
        let settings = EventSettings {
            show_attendee_name: true,
            public_question_ids: vec![QuestionId::new(99), DIET],
            ..Default::default()
        };

        let table = build_table(&[jane()], &questions(), &settings, &FixedAvatar, &en());
        assert_eq!(table.headers, vec!["Name", "Diet"]);
    }

    #[test]
    fn rows_always_match_header_length() {
        let settings = EventSettings {
            show_attendee_name: true,
            show_item_name: true,
            public_question_ids: vec![DIET, SHIRT],
            ..Default::default()
        };
        let sparse = OrderPosition::builder(PositionId::new(2), EVENT, ItemId::new(10)).build();

        let table = build_table(
            &[jane(), sparse],
            &questions(),
            &settings,
            &FixedAvatar,
            &en(),
        );
        assert!(table.rows.iter().all(|r| r.fields.len() == table.headers.len()));
        assert_eq!(table.rows[1].fields, vec!["", "", "", ""]);
    }

    #[test]
    fn nothing_visible_yields_empty_headers() {
        let table = build_table(
            &[jane()],
            &questions(),
            &EventSettings::default(),
            &FixedAvatar,
            &en(),
        );
        assert!(table.headers.is_empty());
        assert!(table.rows[0].fields.is_empty());
        assert!(!table.is_empty());
        assert!(PublicRegistrationTable::default().is_empty());
    }
}
