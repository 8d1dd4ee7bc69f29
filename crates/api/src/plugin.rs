//! Hooks the host platform calls into.

use std::sync::Arc;

use axum::http::HeaderMap;
use common::{EventId, ItemId, LanguageCode};
use domain::{FormField, Label, question_form_fields};
use host_store::{Event, EventSettings, OrderDataSource, SettingsRepository};
use projections::{PublicRegistrationsView, Result};
use serde::Serialize;

use crate::csp;
use crate::route::{self, ResolvedRoute};

/// The request the host is building a navigation menu for.
#[derive(Debug, Clone)]
pub struct NavContext {
    pub organizer: String,
    pub event: String,
    pub route: Option<ResolvedRoute>,
}

/// An entry in the event settings navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: String,
    pub url: String,
    pub active: bool,
}

/// The public registrations plugin as seen by the host.
///
/// Each hook is a plain method the host calls at the matching point of its
/// request lifecycle.
#[derive(Clone)]
pub struct PublicRegistrationsPlugin {
    orders: Arc<dyn OrderDataSource>,
    settings: Arc<dyn SettingsRepository>,
    view: PublicRegistrationsView,
}

impl PublicRegistrationsPlugin {
    pub fn new(
        orders: Arc<dyn OrderDataSource>,
        settings: Arc<dyn SettingsRepository>,
        view: PublicRegistrationsView,
    ) -> Self {
        Self {
            orders,
            settings,
            view,
        }
    }

    /// Resolves an event from its URL slugs.
    pub async fn find_event(&self, organizer: &str, slug: &str) -> Result<Option<Event>> {
        Ok(self.orders.find_event(organizer, slug).await?)
    }

    /// Loads the plugin settings of an event.
    pub async fn settings(&self, event_id: EventId) -> Result<EventSettings> {
        Ok(self.settings.load(event_id).await?)
    }

    /// Fields to add to the attendee registration form.
    pub async fn on_question_form_fields(
        &self,
        event_id: EventId,
        item_id: Option<ItemId>,
        language: &LanguageCode,
    ) -> Result<Vec<FormField>> {
        let settings = self.settings.load(event_id).await?;
        Ok(question_form_fields(item_id, &settings, language))
    }

    /// Markup of the public table for the event's front page.
    pub async fn on_render_public_table(
        &self,
        event_id: EventId,
        language: &LanguageCode,
    ) -> Result<String> {
        self.view.render_table(event_id, language).await
    }

    /// Markup for the page `<head>`; only event index pages get any.
    pub async fn on_html_head(&self, route: Option<&ResolvedRoute>) -> String {
        match route {
            Some(route) if route.is_event_index() => self.view.render_head().await,
            _ => String::new(),
        }
    }

    /// Adjusts an outgoing response; event index pages may load avatars.
    pub fn on_mutate_response(&self, route: Option<&ResolvedRoute>, headers: &mut HeaderMap) {
        if route.is_some_and(ResolvedRoute::is_event_index) {
            csp::allow_avatar_images(headers);
        }
    }

    /// The plugin's entry in the event settings navigation.
    pub fn on_contribute_nav(&self, request: &NavContext, language: &LanguageCode) -> Vec<NavEntry> {
        vec![NavEntry {
            label: Label::PublicRegistrations.localize(language),
            url: route::settings_url(&request.organizer, &request.event),
            active: request
                .route
                .as_ref()
                .is_some_and(ResolvedRoute::is_plugin_settings),
        }]
    }

    /// Persists new settings and drops every cached table of the event.
    #[tracing::instrument(skip(self, settings))]
    pub async fn on_settings_saved(&self, event_id: EventId, settings: &EventSettings) -> Result<()> {
        self.settings.save(event_id, settings).await?;
        self.view.invalidate(event_id).await;
        tracing::info!("public registration settings updated");
        Ok(())
    }

    /// Called by the host when positions or answers of an event change.
    pub async fn on_orders_changed(&self, event_id: EventId) {
        self.view.invalidate(event_id).await;
    }

    /// Drops every rendered table and the head snippet, e.g. after a deploy
    /// changed the templates or translations.
    pub async fn purge_all(&self) {
        self.view.invalidate_all().await;
    }
}
