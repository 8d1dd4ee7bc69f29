//! Which order positions may appear in the public table.

use host_store::{EligibilityScope, EventId, EventSettings, OrderPosition};
use serde_json::Value;

/// Name of the opt-in checkbox contributed to the registration form.
pub const OPT_IN_FIELD: &str = "public_registration";

/// Opt-in field name as namespaced by hosts that prefix plugin fields.
pub const NAMESPACED_OPT_IN_FIELD: &str = "public_registrations_public_registration";

/// Returns true if the attendee ticked the public registration checkbox.
///
/// The namespaced field wins when both are present.
pub fn has_opted_in(position: &OrderPosition) -> bool {
    position
        .form_data(NAMESPACED_OPT_IN_FIELD)
        .or_else(|| position.form_data(OPT_IN_FIELD))
        .is_some_and(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "1" | "yes"
        ),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Selects the positions of one event that may be listed publicly.
///
/// A position is eligible if it belongs to the event, passes the item scope,
/// opted in, and has both an attendee name and an attendee email.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityFilter<'a> {
    event_id: EventId,
    settings: &'a EventSettings,
}

impl<'a> EligibilityFilter<'a> {
    pub fn new(event_id: EventId, settings: &'a EventSettings) -> Self {
        Self { event_id, settings }
    }

    /// Checks a single position against every eligibility rule.
    pub fn matches(&self, position: &OrderPosition) -> bool {
        if position.event_id != self.event_id {
            return false;
        }

        let in_scope = match self.settings.eligibility_scope {
            EligibilityScope::ItemScoped => self.settings.public_item_ids.contains(&position.item_id),
            EligibilityScope::EventWide => true,
        };

        in_scope
            && has_opted_in(position)
            && non_blank(position.attendee_name.as_deref())
            && non_blank(position.attendee_email.as_deref())
    }

    /// Keeps the eligible positions, preserving their input order.
    pub fn apply(&self, positions: impl IntoIterator<Item = OrderPosition>) -> Vec<OrderPosition> {
        let mut candidates = 0usize;
        let eligible: Vec<_> = positions
            .into_iter()
            .inspect(|_| candidates += 1)
            .filter(|p| self.matches(p))
            .collect();

        tracing::debug!(
            event_id = %self.event_id,
            candidates,
            eligible = eligible.len(),
            "filtered public registrations"
        );

        eligible
    }
}
