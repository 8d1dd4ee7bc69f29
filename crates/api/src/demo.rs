//! Sample data served when no host database is configured.

use domain::{NAMESPACED_OPT_IN_FIELD, OPT_IN_FIELD};
use host_store::{
    Event, EventId, EventSettings, InMemoryOrderStore, InMemorySettingsRepository, ItemId,
    LocalizedString, OrderPosition, PositionId, Question, QuestionId, Result, SettingsRepository,
};
use serde_json::json;

pub const ORGANIZER: &str = "demo";
pub const EVENT_SLUG: &str = "conference";

const EVENT: EventId = EventId::new(1);
const CONFERENCE_TICKET: ItemId = ItemId::new(1);
const WORKSHOP_TICKET: ItemId = ItemId::new(2);
const DIET: QuestionId = QuestionId::new(1);
const COMPANY: QuestionId = QuestionId::new(2);

/// Fills the stores with one event, a handful of attendees and settings
/// that publish conference tickets.
pub async fn seed(orders: &InMemoryOrderStore, settings: &InMemorySettingsRepository) -> Result<()> {
    orders
        .add_event(Event {
            id: EVENT,
            organizer: ORGANIZER.to_string(),
            slug: EVENT_SLUG.to_string(),
            name: LocalizedString::with("en", "Demo Conference").and("de", "Demo-Konferenz"),
        })
        .await;

    orders
        .add_question(Question {
            id: DIET,
            event_id: EVENT,
            label: LocalizedString::with("en", "Dietary requirements")
                .and("de", "Ernährungswünsche"),
        })
        .await;
    orders
        .add_question(Question {
            id: COMPANY,
            event_id: EVENT,
            label: LocalizedString::with("en", "Company").and("de", "Firma"),
        })
        .await;

    let conference = || LocalizedString::with("en", "Conference ticket").and("de", "Konferenzticket");
    let attendees = [
        (1, CONFERENCE_TICKET, "Ada Lovelace", "ada@example.org", Some(json!("True")), Some("Vegetarian")),
        (2, CONFERENCE_TICKET, "Alan Turing", "alan@example.org", Some(json!(false)), Some("None")),
        (3, CONFERENCE_TICKET, "Grace Hopper", "grace@example.org", Some(json!(true)), None),
        (4, WORKSHOP_TICKET, "Linus Torvalds", "linus@example.org", Some(json!("True")), None),
        (5, CONFERENCE_TICKET, "Anonymous", "", Some(json!("True")), None),
        (6, CONFERENCE_TICKET, "Margaret Hamilton", "margaret@example.org", None, Some("Vegan")),
    ];

    for (id, item, name, email, opt_in, diet) in attendees {
        let mut position = OrderPosition::builder(PositionId::new(id), EVENT, item)
            .item_name(if item == CONFERENCE_TICKET {
                conference()
            } else {
                LocalizedString::from("Workshop")
            })
            .attendee_name(name)
            .attendee_email(email);
        if let Some(value) = opt_in {
            position = position.form_data(OPT_IN_FIELD, value);
        }
        if let Some(diet) = diet {
            position = position.answer(DIET, diet);
        }
        orders.add_position(position.build()).await;
    }

    orders
        .add_position(
            OrderPosition::builder(PositionId::new(7), EVENT, CONFERENCE_TICKET)
                .item_name(conference())
                .attendee_name("Barbara Liskov")
                .attendee_email("barbara@example.org")
                .form_data(NAMESPACED_OPT_IN_FIELD, json!("True"))
                .answer(COMPANY, "MIT")
                .build(),
        )
        .await;

    settings
        .save(
            EVENT,
            &EventSettings {
                public_item_ids: vec![CONFERENCE_TICKET],
                public_question_ids: vec![DIET, COMPANY],
                show_attendee_name: true,
                show_item_name: true,
                field_help_text: LocalizedString::with(
                    "en",
                    "Show my name and avatar on the event page.",
                )
                .and("de", "Meinen Namen und Avatar auf der Veranstaltungsseite zeigen."),
                ..Default::default()
            },
        )
        .await?;

    tracing::info!(
        positions = orders.position_count().await,
        "seeded demo event {ORGANIZER}/{EVENT_SLUG}"
    );
    Ok(())
}
