//! Domain layer for public registrations.
//!
//! This crate holds the pure rules of the plugin:
//! - Eligibility filter deciding which order positions may be listed
//! - Projection builder turning eligible positions into a table
//! - Avatar resolution for the table's picture column
//! - The opt-in form field contributed to the registration form

rust_i18n::i18n!("locales", fallback = "en");

pub mod avatar;
pub mod eligibility;
pub mod form;
pub mod labels;
pub mod projection;

pub use avatar::{AvatarResolver, GravatarResolver};
pub use eligibility::{EligibilityFilter, NAMESPACED_OPT_IN_FIELD, OPT_IN_FIELD, has_opted_in};
pub use form::{FormField, Widget, question_form_fields};
pub use labels::{Label, supported_language};
pub use projection::{PublicRegistrationRow, PublicRegistrationTable, build_table};
