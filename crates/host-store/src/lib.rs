pub mod error;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod settings;
pub mod source;

pub use common::{EventId, ItemId, LanguageCode, LocalizedString, PositionId, QuestionId};
pub use error::{HostStoreError, Result};
pub use memory::{InMemoryOrderStore, InMemorySettingsRepository};
pub use model::{Event, OrderPosition, OrderPositionBuilder, QUESTION_FORM_DATA, Question, QuestionAnswer};
pub use postgres::{PostgresOrderStore, PostgresSettingsRepository};
pub use settings::{EligibilityScope, EventSettings, SettingsRepository};
pub use source::OrderDataSource;
