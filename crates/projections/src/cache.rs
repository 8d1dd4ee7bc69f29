//! Render cache keyed by event and language.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{EventId, LanguageCode};
use moka::future::Cache;

/// Identifies one cached piece of markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The public table of an event in one language.
    PublicTable {
        event_id: EventId,
        language: LanguageCode,
    },

    /// The static head snippet; shared by every event and language.
    HtmlHead,
}

impl CacheKey {
    pub fn public_table(event_id: EventId, language: LanguageCode) -> Self {
        Self::PublicTable { event_id, language }
    }

    /// Returns the event this entry depends on, if any.
    pub fn event_id(&self) -> Option<EventId> {
        match self {
            Self::PublicTable { event_id, .. } => Some(*event_id),
            Self::HtmlHead => None,
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PublicTable { event_id, language } => {
                write!(f, "public_registrations_table_{event_id}_{language}")
            }
            Self::HtmlHead => f.write_str("public_registrations_html_head"),
        }
    }
}

/// Rendered markup together with the time it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRender {
    pub html: Arc<str>,
    pub rendered_at: DateTime<Utc>,
}

impl CachedRender {
    pub fn new(html: impl Into<Arc<str>>) -> Self {
        Self {
            html: html.into(),
            rendered_at: Utc::now(),
        }
    }
}

/// Shared key/value store for rendered markup.
///
/// Entries are only ever replaced whole, so concurrent writers for the same
/// key at worst duplicate work. Staleness is bounded by the implementation's
/// expiry and by explicit invalidation.
#[async_trait]
pub trait RenderCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Option<CachedRender>;

    async fn insert(&self, key: CacheKey, value: CachedRender);

    /// Drops every entry that depends on the event, in all languages.
    async fn invalidate_event(&self, event_id: EventId);

    async fn invalidate_all(&self);
}

/// In-process render cache with time-based expiry.
#[derive(Clone)]
pub struct MokaRenderCache {
    inner: Cache<CacheKey, CachedRender>,
}

impl MokaRenderCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
    pub const DEFAULT_MAX_ENTRIES: u64 = 10_000;

    /// Creates a cache whose entries expire `ttl` after being written.
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
        }
    }
}

impl Default for MokaRenderCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL, Self::DEFAULT_MAX_ENTRIES)
    }
}

#[async_trait]
impl RenderCache for MokaRenderCache {
    async fn get(&self, key: &CacheKey) -> Option<CachedRender> {
        self.inner.get(key).await
    }

    async fn insert(&self, key: CacheKey, value: CachedRender) {
        self.inner.insert(key, value).await;
    }

    async fn invalidate_event(&self, event_id: EventId) {
        let stale: Vec<Arc<CacheKey>> = self
            .inner
            .iter()
            .filter(|(key, _)| key.event_id() == Some(event_id))
            .map(|(key, _)| key)
            .collect();

        for key in &stale {
            self.inner.invalidate(key.as_ref()).await;
        }

        tracing::debug!(%event_id, entries = stale.len(), "invalidated render cache");
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
