//! The versioned configuration data file enumerating sectors, follow-up
//! questions, and clause text.
//!
//! One canonical schema: Sector → Questions → Clauses. The file is parsed
//! here and validated once by [`SectorRegistry`](crate::SectorRegistry)
//! construction; nothing downstream re-normalises shapes per call site.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sector::FollowUpQuestion;

/// Root of the sector configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Data-file schema version. Bumped when the layout changes.
    pub version: u32,
    pub sectors: Vec<SectorConfig>,
}

/// One sector's declaration: identity, base clauses, questions, and the
/// conditional clauses gated on question answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorConfig {
    pub key: String,
    pub label: String,
    /// Clauses every document in this sector starts from, in declared order.
    #[serde(default)]
    pub base_clauses: Vec<String>,
    #[serde(default)]
    pub questions: Vec<FollowUpQuestion>,
    #[serde(default)]
    pub conditional_clauses: Vec<ConditionalClause>,
}

/// Clause text attached to exactly one follow-up question in the same sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalClause {
    /// Id of the gating question. Must be declared in the same sector.
    pub question: String,
    /// Clause text appended when the gate fires.
    pub text: String,
    /// For choice questions: the answer value that fires the gate.
    /// `None` means the gate fires on an affirmative yes/no answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
}

impl RegistryConfig {
    /// Parse a configuration document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            version = config.version,
            sectors = config.sectors.len(),
            "sector configuration loaded"
        );
        Ok(config)
    }
}
