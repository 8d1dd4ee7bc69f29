pub mod control;
pub mod event;
pub mod health;
pub mod metrics;

use axum::extract::MatchedPath;
use host_store::Event;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;
use crate::route::ResolvedRoute;

/// Query parameters shared by the language-aware pages.
#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    pub lang: Option<String>,
}

/// Resolves the event addressed by the URL slugs, or answers 404.
async fn find_event(state: &AppState, organizer: &str, slug: &str) -> Result<Event, ApiError> {
    state
        .plugin
        .find_event(organizer, slug)
        .await?
        .ok_or_else(|| ApiError::event_not_found(organizer, slug))
}

fn resolve(path: &MatchedPath) -> Option<ResolvedRoute> {
    ResolvedRoute::resolve(path.as_str())
}
