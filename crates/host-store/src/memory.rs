use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Event, EventId, EventSettings, OrderDataSource, OrderPosition, Question, QuestionId, Result,
    SettingsRepository,
};

/// In-memory order data source for tests and the demo server.
///
/// Provides the same interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    events: Arc<RwLock<Vec<Event>>>,
    positions: Arc<RwLock<Vec<OrderPosition>>>,
    questions: Arc<RwLock<Vec<Question>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an event.
    pub async fn add_event(&self, event: Event) {
        self.events.write().await.push(event);
    }

    /// Adds a position; it is returned after all previously added positions.
    pub async fn add_position(&self, position: OrderPosition) {
        self.positions.write().await.push(position);
    }

    /// Adds a question.
    pub async fn add_question(&self, question: Question) {
        self.questions.write().await.push(question);
    }

    /// Returns the total number of positions stored.
    pub async fn position_count(&self) -> usize {
        self.positions.read().await.len()
    }
}

#[async_trait]
impl OrderDataSource for InMemoryOrderStore {
    async fn find_event(&self, organizer: &str, slug: &str) -> Result<Option<Event>> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .find(|e| e.organizer == organizer && e.slug == slug)
            .cloned())
    }

    async fn positions_for_event(&self, event_id: EventId) -> Result<Vec<OrderPosition>> {
        Ok(self
            .positions
            .read()
            .await
            .iter()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn questions(&self, event_id: EventId, ids: &[QuestionId]) -> Result<Vec<Question>> {
        Ok(self
            .questions
            .read()
            .await
            .iter()
            .filter(|q| q.event_id == event_id && ids.contains(&q.id))
            .cloned()
            .collect())
    }
}

/// In-memory settings repository.
#[derive(Clone, Default)]
pub struct InMemorySettingsRepository {
    settings: Arc<RwLock<HashMap<EventId, EventSettings>>>,
}

impl InMemorySettingsRepository {
    /// Creates a new empty repository; every event starts with defaults.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn load(&self, event_id: EventId) -> Result<EventSettings> {
        Ok(self
            .settings
            .read()
            .await
            .get(&event_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, event_id: EventId, settings: &EventSettings) -> Result<()> {
        self.settings
            .write()
            .await
            .insert(event_id, settings.clone());
        Ok(())
    }
}
