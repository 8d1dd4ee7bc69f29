//! The cached public registrations pipeline.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use common::{EventId, LanguageCode};
use domain::{
    AvatarResolver, EligibilityFilter, GravatarResolver, PublicRegistrationTable, build_table,
};
use host_store::{OrderDataSource, SettingsRepository};
use tokio::sync::RwLock;

use crate::Result;
use crate::cache::{CacheKey, CachedRender, RenderCache};
use crate::render::{HtmlTableRenderer, TableRenderer};

/// Produces the public registrations markup of an event.
///
/// On a cache miss the view loads settings, positions and questions, runs the
/// eligibility filter and the projection, renders and stores the result. A
/// hit returns the stored markup without touching the stores, so callers see
/// data as of the last render until the entry expires or is invalidated.
///
/// A render that overlaps an invalidation of its event is returned to its
/// caller but not stored.
#[derive(Clone)]
pub struct PublicRegistrationsView {
    orders: Arc<dyn OrderDataSource>,
    settings: Arc<dyn SettingsRepository>,
    cache: Arc<dyn RenderCache>,
    renderer: Arc<dyn TableRenderer>,
    avatars: Arc<dyn AvatarResolver>,
    generations: Arc<RwLock<Generations>>,
}

/// Invalidation counters, bumped under the write lock together with the
/// cache eviction.
#[derive(Debug, Default)]
struct Generations {
    all: u64,
    events: HashMap<EventId, u64>,
}

impl Generations {
    fn of(&self, event_id: EventId) -> (u64, u64) {
        (self.all, self.events.get(&event_id).copied().unwrap_or(0))
    }
}

impl PublicRegistrationsView {
    /// Creates a view with the HTML renderer and Gravatar avatars.
    pub fn new(
        orders: Arc<dyn OrderDataSource>,
        settings: Arc<dyn SettingsRepository>,
        cache: Arc<dyn RenderCache>,
    ) -> Self {
        Self {
            orders,
            settings,
            cache,
            renderer: Arc::new(HtmlTableRenderer::default()),
            avatars: Arc::new(GravatarResolver::default()),
            generations: Arc::default(),
        }
    }

    /// Replaces the presentation adapter.
    pub fn with_renderer(mut self, renderer: Arc<dyn TableRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replaces the avatar resolver.
    pub fn with_avatars(mut self, avatars: Arc<dyn AvatarResolver>) -> Self {
        self.avatars = avatars;
        self
    }

    /// Runs the uncached pipeline and returns the structured table.
    #[tracing::instrument(skip(self))]
    pub async fn table(
        &self,
        event_id: EventId,
        language: &LanguageCode,
    ) -> Result<PublicRegistrationTable> {
        let settings = self.settings.load(event_id).await?;
        let positions = self.orders.positions_for_event(event_id).await?;
        let questions = self
            .orders
            .questions(event_id, &settings.public_question_ids)
            .await?;

        let eligible = EligibilityFilter::new(event_id, &settings).apply(positions);

        Ok(build_table(
            &eligible,
            &questions,
            &settings,
            self.avatars.as_ref(),
            language,
        ))
    }

    /// Returns the rendered table of an event, from cache when possible.
    ///
    /// An event without eligible registrations renders as an empty string.
    #[tracing::instrument(skip(self))]
    pub async fn render_table(&self, event_id: EventId, language: &LanguageCode) -> Result<String> {
        let key = CacheKey::public_table(event_id, language.clone());

        if let Some(cached) = self.cache.get(&key).await {
            metrics::counter!("public_registrations_cache_hits").increment(1);
            tracing::debug!(
                age_secs = (Utc::now() - cached.rendered_at).num_seconds(),
                "render cache hit"
            );
            return Ok(cached.html.to_string());
        }

        metrics::counter!("public_registrations_cache_misses").increment(1);
        let started = Instant::now();
        let generation = self.generations.read().await.of(event_id);

        let table = self.table(event_id, language).await?;
        let html = self.renderer.render_table(&table, language);

        // Held across the insert so an invalidation cannot slip in between
        let generations = self.generations.read().await;
        if generations.of(event_id) == generation {
            self.cache.insert(key, CachedRender::new(html.as_str())).await;
        } else {
            tracing::debug!("event invalidated during render, not caching");
        }
        drop(generations);

        metrics::histogram!("public_registrations_render_seconds")
            .record(started.elapsed().as_secs_f64());
        tracing::debug!(rows = table.rows.len(), "rendered public registrations");

        Ok(html)
    }

    /// Returns the static head snippet, from cache when possible.
    pub async fn render_head(&self) -> String {
        if let Some(cached) = self.cache.get(&CacheKey::HtmlHead).await {
            return cached.html.to_string();
        }

        let html = self.renderer.render_head();
        self.cache
            .insert(CacheKey::HtmlHead, CachedRender::new(html.as_str()))
            .await;
        html
    }

    /// Forgets every rendered language of an event.
    ///
    /// Must be called whenever the event's settings or opted-in order data
    /// change; otherwise the page stays stale until the cache expires.
    #[tracing::instrument(skip(self))]
    pub async fn invalidate(&self, event_id: EventId) {
        metrics::counter!("public_registrations_invalidations").increment(1);
        let mut generations = self.generations.write().await;
        *generations.events.entry(event_id).or_default() += 1;
        self.cache.invalidate_event(event_id).await;
    }

    /// Forgets every rendered entry.
    #[tracing::instrument(skip(self))]
    pub async fn invalidate_all(&self) {
        metrics::counter!("public_registrations_invalidations").increment(1);
        let mut generations = self.generations.write().await;
        generations.all += 1;
        self.cache.invalidate_all().await;
    }
}
