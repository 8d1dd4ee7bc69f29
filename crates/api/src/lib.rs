//! Host integration and HTTP server for the public registrations plugin.
//!
//! [`plugin::PublicRegistrationsPlugin`] exposes the hooks a host platform
//! calls; the axum router wires them to a stand-alone server with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod csp;
pub mod demo;
pub mod error;
pub mod language;
pub mod plugin;
pub mod route;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::{MatchedPath, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use common::LanguageCode;
use domain::GravatarResolver;
use host_store::{OrderDataSource, SettingsRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use projections::{HtmlTableRenderer, MokaRenderCache, PublicRegistrationsView};
use tower_http::trace::TraceLayer;

use config::Config;
use plugin::PublicRegistrationsPlugin;
use route::ResolvedRoute;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub plugin: PublicRegistrationsPlugin,
    pub default_language: LanguageCode,
    /// Name of the order data backend, reported by `/health`.
    pub store: &'static str,
}

/// Wires the plugin over the given stores as configured.
pub fn create_plugin(
    orders: Arc<dyn OrderDataSource>,
    settings: Arc<dyn SettingsRepository>,
    config: &Config,
) -> PublicRegistrationsPlugin {
    let cache = MokaRenderCache::new(config.cache_ttl, config.cache_max_entries);
    let view = PublicRegistrationsView::new(orders.clone(), settings.clone(), Arc::new(cache))
        .with_renderer(Arc::new(HtmlTableRenderer::new(config.avatar_size)))
        .with_avatars(Arc::new(GravatarResolver::new(
            config.avatar_size,
            config.avatar_default.clone(),
        )));

    PublicRegistrationsPlugin::new(orders, settings, view)
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route(route::METRICS_PATH, get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route(route::HEALTH_PATH, get(routes::health::check))
        .route(route::EVENT_INDEX_PATH, get(routes::event::index))
        .route(
            route::REGISTRATION_FIELDS_PATH,
            get(routes::event::registration_fields),
        )
        .route(
            route::SETTINGS_PATH,
            get(routes::control::get_settings).put(routes::control::put_settings),
        )
        .route(route::PURGE_PATH, post(routes::control::purge))
        .route(route::PURGE_ALL_PATH, post(routes::control::purge_all))
        .with_state(state.clone())
        .merge(metrics_router)
        .route_layer(middleware::from_fn_with_state(state, mutate_response))
        .layer(TraceLayer::new_for_http())
}

/// Lets the plugin adjust every routed response.
async fn mutate_response(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .and_then(|path| ResolvedRoute::resolve(path.as_str()));

    let mut response = next.run(request).await;
    state
        .plugin
        .on_mutate_response(route.as_ref(), response.headers_mut());
    response
}
