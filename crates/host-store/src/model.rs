use serde::{Deserialize, Serialize};

use crate::{EventId, ItemId, LocalizedString, PositionId, QuestionId};

/// Key under which the host keeps answers to plugin-contributed form fields
/// inside [`OrderPosition::meta_info`].
pub const QUESTION_FORM_DATA: &str = "question_form_data";

/// An event as known to the host platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,

    /// Slug of the organizer owning the event.
    pub organizer: String,

    /// URL slug of the event, unique per organizer.
    pub slug: String,

    pub name: LocalizedString,
}

/// An organizer-defined question asked during registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub event_id: EventId,
    pub label: LocalizedString,
}

/// An attendee's answer to a [`Question`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub position_id: PositionId,
    pub question_id: QuestionId,
    pub answer: String,
}

/// One ticket / attendee slot of an order.
///
/// Created by the host when an order is placed; this crate only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPosition {
    pub id: PositionId,
    pub event_id: EventId,
    pub item_id: ItemId,

    /// Display name of the item (product) this position was bought for.
    pub item_name: LocalizedString,

    pub attendee_name: Option<String>,
    pub attendee_email: Option<String>,

    /// Free-form bag the host attaches to the position.
    ///
    /// Answers to plugin-contributed form fields live under
    /// [`QUESTION_FORM_DATA`].
    pub meta_info: serde_json::Value,

    pub answers: Vec<QuestionAnswer>,
}

impl OrderPosition {
    /// Creates a new order position builder.
    pub fn builder(id: PositionId, event_id: EventId, item_id: ItemId) -> OrderPositionBuilder {
        OrderPositionBuilder {
            position: OrderPosition {
                id,
                event_id,
                item_id,
                item_name: LocalizedString::default(),
                attendee_name: None,
                attendee_email: None,
                meta_info: serde_json::Value::Null,
                answers: Vec::new(),
            },
        }
    }

    /// Looks up a submitted form field value in the position's meta info.
    pub fn form_data(&self, field: &str) -> Option<&serde_json::Value> {
        self.meta_info.get(QUESTION_FORM_DATA)?.get(field)
    }

    /// Returns the answer text for a question, if one was given.
    pub fn answer_for(&self, question_id: QuestionId) -> Option<&str> {
        self.answers
            .iter()
            .find(|a| a.question_id == question_id)
            .map(|a| a.answer.as_str())
    }
}

/// Builder for constructing order positions, mostly used by fixtures.
#[derive(Debug)]
pub struct OrderPositionBuilder {
    position: OrderPosition,
}

impl OrderPositionBuilder {
    /// Sets the item display name.
    pub fn item_name(mut self, name: impl Into<LocalizedString>) -> Self {
        self.position.item_name = name.into();
        self
    }

    /// Sets the attendee name.
    pub fn attendee_name(mut self, name: impl Into<String>) -> Self {
        self.position.attendee_name = Some(name.into());
        self
    }

    /// Sets the attendee email.
    pub fn attendee_email(mut self, email: impl Into<String>) -> Self {
        self.position.attendee_email = Some(email.into());
        self
    }

    /// Sets a value under [`QUESTION_FORM_DATA`], creating the bag if needed.
    pub fn form_data(mut self, field: impl Into<String>, value: serde_json::Value) -> Self {
        if !self.position.meta_info.is_object() {
            self.position.meta_info = serde_json::json!({});
        }
        if let Some(meta) = self.position.meta_info.as_object_mut() {
            let bag = meta
                .entry(QUESTION_FORM_DATA)
                .or_insert_with(|| serde_json::json!({}));
            if let Some(bag) = bag.as_object_mut() {
                bag.insert(field.into(), value);
            }
        }
        self
    }

    /// Replaces the whole meta info bag.
    pub fn meta_info(mut self, meta_info: serde_json::Value) -> Self {
        self.position.meta_info = meta_info;
        self
    }

    /// Adds an answer to a question.
    pub fn answer(mut self, question_id: QuestionId, answer: impl Into<String>) -> Self {
        let position_id = self.position.id;
        self.position.answers.push(QuestionAnswer {
            position_id,
            question_id,
            answer: answer.into(),
        });
        self
    }

    /// Builds the order position.
    pub fn build(self) -> OrderPosition {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn position() -> OrderPositionBuilder {
        OrderPosition::builder(PositionId::new(1), EventId::new(10), ItemId::new(100))
    }

    #[test]
    fn builder_sets_attendee_fields() {
        let pos = position()
            .item_name("Ticket")
            .attendee_name("Jane Doe")
            .attendee_email("jane@example.org")
            .build();

        assert_eq!(pos.attendee_name.as_deref(), Some("Jane Doe"));
        assert_eq!(pos.attendee_email.as_deref(), Some("jane@example.org"));
        assert_eq!(pos.item_name, LocalizedString::from("Ticket"));
    }

    #[test]
    fn form_data_is_nested_under_question_form_data() {
        let pos = position().form_data("public_registration", json!("True")).build();

        assert_eq!(
            pos.meta_info,
            json!({"question_form_data": {"public_registration": "True"}})
        );
        assert_eq!(pos.form_data("public_registration"), Some(&json!("True")));
        assert_eq!(pos.form_data("other"), None);
    }

    #[test]
    fn form_data_missing_bag_is_none() {
        let pos = position().meta_info(json!({"unrelated": 1})).build();
        assert_eq!(pos.form_data("public_registration"), None);

        let pos = position().build();
        assert_eq!(pos.form_data("public_registration"), None);
    }

    #[test]
    fn answer_lookup_by_question() {
        let pos = position()
            .answer(QuestionId::new(1), "Vegetarian")
            .answer(QuestionId::new(2), "XL")
            .build();

        assert_eq!(pos.answer_for(QuestionId::new(2)), Some("XL"));
        assert_eq!(pos.answer_for(QuestionId::new(3)), None);
        assert!(pos.answers.iter().all(|a| a.position_id == pos.id));
    }
}
