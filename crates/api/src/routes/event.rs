//! Public event pages.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{MatchedPath, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use common::ItemId;
use domain::FormField;
use projections::escape;
use serde::Deserialize;

use super::{LanguageQuery, find_event, resolve};
use crate::error::ApiError;
use crate::{AppState, language};

#[derive(Debug, Deserialize)]
pub struct FieldsQuery {
    pub item: Option<i64>,
    pub lang: Option<String>,
}

/// GET /{organizer}/{event}/: the event front page with its public table.
#[tracing::instrument(skip(state, matched, query, headers))]
pub async fn index(
    State(state): State<Arc<AppState>>,
    Path((organizer, slug)): Path<(String, String)>,
    matched: MatchedPath,
    Query(query): Query<LanguageQuery>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let event = find_event(&state, &organizer, &slug).await?;
    let language = language::negotiate(query.lang.as_deref(), &headers, &state.default_language);

    let route = resolve(&matched);
    let head = state.plugin.on_html_head(route.as_ref()).await;
    let table = state
        .plugin
        .on_render_public_table(event.id, &language)
        .await?;

    let title = escape(event.name.localize(&language));
    Ok(Html(format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n{head}</head>\n<body>\n<h1>{title}</h1>\n{table}</body>\n</html>\n",
        lang = escape(language.as_str()),
    )))
}

/// GET /{organizer}/{event}/registration/fields: fields the plugin adds to
/// the attendee form, optionally for one item.
#[tracing::instrument(skip(state, query, headers))]
pub async fn registration_fields(
    State(state): State<Arc<AppState>>,
    Path((organizer, slug)): Path<(String, String)>,
    query: Result<Query<FieldsQuery>, QueryRejection>,
    headers: HeaderMap,
) -> Result<Json<Vec<FormField>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let event = find_event(&state, &organizer, &slug).await?;
    let language = language::negotiate(query.lang.as_deref(), &headers, &state.default_language);

    let fields = state
        .plugin
        .on_question_form_fields(event.id, query.item.map(ItemId::new), &language)
        .await?;
    Ok(Json(fields))
}
