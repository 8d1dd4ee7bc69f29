//! Cached rendering for the public registrations table.
//!
//! This crate provides the read side of the plugin:
//! - [`RenderCache`] trait and the [`MokaRenderCache`] implementation
//! - [`TableRenderer`] presentation contract with an HTML renderer
//! - [`PublicRegistrationsView`] running load, filter, project and render
//!   behind the cache

pub mod cache;
pub mod error;
pub mod render;
pub mod view;

pub use cache::{CacheKey, CachedRender, MokaRenderCache, RenderCache};
pub use error::{ProjectionError, Result};
pub use render::{HtmlTableRenderer, TableRenderer, escape};
pub use view::PublicRegistrationsView;
