use async_trait::async_trait;

use crate::{Event, EventId, OrderPosition, Question, QuestionId, Result};

/// Read-only access to the host's order data.
///
/// The host platform owns orders, positions and questions. Implementations
/// never write; they only translate the host's storage into the model types.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderDataSource: Send + Sync {
    /// Resolves an event by organizer slug and event slug.
    async fn find_event(&self, organizer: &str, slug: &str) -> Result<Option<Event>>;

    /// Retrieves all active positions of an event with their question answers.
    ///
    /// Positions are returned in a stable order (insertion / primary key order).
    async fn positions_for_event(&self, event_id: EventId) -> Result<Vec<OrderPosition>>;

    /// Retrieves the questions of an event whose ids are in `ids`.
    ///
    /// Unknown ids are skipped. The returned order is unspecified; callers
    /// that care about column order sort by their own selection.
    async fn questions(&self, event_id: EventId, ids: &[QuestionId]) -> Result<Vec<Question>>;
}
