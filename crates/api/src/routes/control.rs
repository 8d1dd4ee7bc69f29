//! The plugin's settings pages in the organizer backend.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{MatchedPath, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use common::LanguageCode;
use host_store::{Event, EventSettings};
use serde::Serialize;

use super::{LanguageQuery, find_event, resolve};
use crate::error::ApiError;
use crate::plugin::{NavContext, NavEntry};
use crate::{AppState, language};

#[derive(Serialize)]
pub struct SettingsResponse {
    pub organizer: String,
    pub event: String,
    pub settings: EventSettings,
    pub nav: Vec<NavEntry>,
}

/// GET /control/event/{organizer}/{event}/public-registrations/
#[tracing::instrument(skip(state, matched, query, headers))]
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    Path((organizer, slug)): Path<(String, String)>,
    matched: MatchedPath,
    Query(query): Query<LanguageQuery>,
    headers: HeaderMap,
) -> Result<Json<SettingsResponse>, ApiError> {
    let event = find_event(&state, &organizer, &slug).await?;
    let language = language::negotiate(query.lang.as_deref(), &headers, &state.default_language);

    let settings = state.plugin.settings(event.id).await?;
    Ok(Json(settings_response(&state, event, settings, &matched, &language)))
}

/// PUT /control/event/{organizer}/{event}/public-registrations/
///
/// Replaces the event's settings; cached tables of the event are dropped.
#[tracing::instrument(skip(state, matched, query, headers, body))]
pub async fn put_settings(
    State(state): State<Arc<AppState>>,
    Path((organizer, slug)): Path<(String, String)>,
    matched: MatchedPath,
    Query(query): Query<LanguageQuery>,
    headers: HeaderMap,
    body: Result<Json<EventSettings>, JsonRejection>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let Json(settings) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let event = find_event(&state, &organizer, &slug).await?;
    let language = language::negotiate(query.lang.as_deref(), &headers, &state.default_language);

    state.plugin.on_settings_saved(event.id, &settings).await?;
    Ok(Json(settings_response(&state, event, settings, &matched, &language)))
}

/// POST /control/event/{organizer}/{event}/public-registrations/purge
///
/// Drops the event's cached tables, e.g. after orders were changed outside
/// the host's notification path.
#[tracing::instrument(skip(state))]
pub async fn purge(
    State(state): State<Arc<AppState>>,
    Path((organizer, slug)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let event = find_event(&state, &organizer, &slug).await?;
    state.plugin.on_orders_changed(event.id).await;
    tracing::info!(event_id = %event.id, "purged public registrations cache");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /control/public-registrations/purge
///
/// Drops the rendered tables of every event.
#[tracing::instrument(skip(state))]
pub async fn purge_all(State(state): State<Arc<AppState>>) -> StatusCode {
    state.plugin.purge_all().await;
    tracing::info!("purged public registrations cache for all events");
    StatusCode::NO_CONTENT
}

fn settings_response(
    state: &AppState,
    event: Event,
    settings: EventSettings,
    matched: &MatchedPath,
    language: &LanguageCode,
) -> SettingsResponse {
    let request = NavContext {
        organizer: event.organizer,
        event: event.slug,
        route: resolve(matched),
    };
    let nav = state.plugin.on_contribute_nav(&request, language);

    SettingsResponse {
        organizer: request.organizer,
        event: request.event,
        settings,
        nav,
    }
}
