pub mod compose;
pub mod config;
pub mod error;
pub mod registry;
pub mod sector;

pub use compose::{AnswerSet, AnswerValue, ComposedDocument, Composer};
pub use config::{ConditionalClause, RegistryConfig, SectorConfig};
pub use error::{ConfigError, NotFoundError};
pub use registry::SectorRegistry;
pub use sector::{EngagementPattern, FollowUpQuestion, Sector};
