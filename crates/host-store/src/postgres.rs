use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    Event, EventId, EventSettings, ItemId, LocalizedString, OrderDataSource, OrderPosition,
    PositionId, Question, QuestionAnswer, QuestionId, Result, SettingsRepository, settings::keys,
};

/// Reads order data straight from the host platform's PostgreSQL schema.
///
/// Only `SELECT` statements are issued; the host remains the sole writer.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new store on top of the host's connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: PgRow) -> Result<Event> {
        Ok(Event {
            id: EventId::new(row.try_get("id")?),
            organizer: row.try_get("organizer")?,
            slug: row.try_get("slug")?,
            name: LocalizedString::from_db(row.try_get::<&str, _>("name")?),
        })
    }

    fn row_to_position(row: PgRow) -> Result<OrderPosition> {
        let id = PositionId::new(row.try_get("id")?);
        let meta_info = match row.try_get::<Option<String>, _>("meta_info")? {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).unwrap_or_else(|e| {
                    tracing::warn!(position_id = %id, error = %e, "unparseable meta_info");
                    serde_json::Value::Null
                })
            }
            _ => serde_json::Value::Null,
        };

        Ok(OrderPosition {
            id,
            event_id: EventId::new(row.try_get("event_id")?),
            item_id: ItemId::new(row.try_get("item_id")?),
            item_name: LocalizedString::from_db(row.try_get::<&str, _>("item_name")?),
            attendee_name: row.try_get("attendee_name_cached")?,
            attendee_email: row.try_get("attendee_email")?,
            meta_info,
            answers: Vec::new(),
        })
    }

    fn row_to_answer(row: PgRow) -> Result<QuestionAnswer> {
        Ok(QuestionAnswer {
            position_id: PositionId::new(row.try_get("orderposition_id")?),
            question_id: QuestionId::new(row.try_get("question_id")?),
            answer: row.try_get("answer")?,
        })
    }
}

#[async_trait]
impl OrderDataSource for PostgresOrderStore {
    #[tracing::instrument(skip(self))]
    async fn find_event(&self, organizer: &str, slug: &str) -> Result<Option<Event>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT e.id::bigint AS id, o.slug AS organizer, e.slug, e.name
            FROM pretixbase_event e
            JOIN pretixbase_organizer o ON o.id = e.organizer_id
            WHERE o.slug = $1 AND e.slug = $2
            "#,
        )
        .bind(organizer)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_event).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn positions_for_event(&self, event_id: EventId) -> Result<Vec<OrderPosition>> {
        let rows = sqlx::query(
            r#"
            SELECT op.id::bigint AS id, o.event_id::bigint AS event_id,
                   op.item_id::bigint AS item_id, i.name AS item_name,
                   op.attendee_name_cached, op.attendee_email, op.meta_info
            FROM pretixbase_orderposition op
            JOIN pretixbase_order o ON o.id = op.order_id
            JOIN pretixbase_item i ON i.id = op.item_id
            WHERE o.event_id = $1 AND NOT op.canceled
            ORDER BY op.id ASC
            "#,
        )
        .bind(event_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        let mut positions = rows
            .into_iter()
            .map(Self::row_to_position)
            .collect::<Result<Vec<_>>>()?;

        let rows = sqlx::query(
            r#"
            SELECT qa.orderposition_id::bigint AS orderposition_id,
                   qa.question_id::bigint AS question_id, qa.answer
            FROM pretixbase_questionanswer qa
            JOIN pretixbase_orderposition op ON op.id = qa.orderposition_id
            JOIN pretixbase_order o ON o.id = op.order_id
            WHERE o.event_id = $1 AND NOT op.canceled
            ORDER BY qa.id ASC
            "#,
        )
        .bind(event_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        let mut answers: HashMap<PositionId, Vec<QuestionAnswer>> = HashMap::new();
        for row in rows {
            let answer = Self::row_to_answer(row)?;
            answers.entry(answer.position_id).or_default().push(answer);
        }
        for position in &mut positions {
            if let Some(found) = answers.remove(&position.id) {
                position.answers = found;
            }
        }

        tracing::debug!(count = positions.len(), "loaded order positions");

        Ok(positions)
    }

    #[tracing::instrument(skip(self))]
    async fn questions(&self, event_id: EventId, ids: &[QuestionId]) -> Result<Vec<Question>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().map(QuestionId::as_i64).collect();

        let rows = sqlx::query(
            r#"
            SELECT id::bigint AS id, event_id::bigint AS event_id, question
            FROM pretixbase_question
            WHERE event_id = $1 AND id = ANY($2)
            "#,
        )
        .bind(event_id.as_i64())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> Result<Question> {
                Ok(Question {
                    id: QuestionId::new(row.try_get("id")?),
                    event_id: EventId::new(row.try_get("event_id")?),
                    label: LocalizedString::from_db(row.try_get::<&str, _>("question")?),
                })
            })
            .collect()
    }
}

/// Settings repository backed by the host's key/value settings table.
#[derive(Clone)]
pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    /// Creates a new repository on top of the host's connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    #[tracing::instrument(skip(self))]
    async fn load(&self, event_id: EventId) -> Result<EventSettings> {
        let wanted: Vec<&str> = keys::ALL.to_vec();
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT key, value
            FROM pretixbase_event_settingsstore
            WHERE object_id = $1 AND key = ANY($2)
            "#,
        )
        .bind(event_id.as_i64())
        .bind(&wanted)
        .fetch_all(&self.pool)
        .await?;

        Ok(EventSettings::from_key_values(rows))
    }

    #[tracing::instrument(skip(self, settings))]
    async fn save(&self, event_id: EventId, settings: &EventSettings) -> Result<()> {
        let rows = settings.to_key_values()?;
        let mut tx = self.pool.begin().await?;

        for (key, value) in rows {
            sqlx::query(
                "DELETE FROM pretixbase_event_settingsstore WHERE object_id = $1 AND key = $2",
            )
            .bind(event_id.as_i64())
            .bind(key)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                "INSERT INTO pretixbase_event_settingsstore (object_id, key, value) VALUES ($1, $2, $3)",
            )
            .bind(event_id.as_i64())
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::info!(%event_id, "saved public registration settings");

        Ok(())
    }
}
