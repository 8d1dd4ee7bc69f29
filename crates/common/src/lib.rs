pub mod localized;
pub mod types;

pub use localized::{FALLBACK_LANGUAGE, LocalizedString};
pub use types::{EventId, ItemId, LanguageCode, PositionId, QuestionId};
