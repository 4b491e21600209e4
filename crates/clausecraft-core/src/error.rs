use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable registry configuration.
///
/// Raised only while constructing a [`SectorRegistry`](crate::SectorRegistry);
/// a registry is never built from data that fails these checks.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config parse: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no sectors configured")]
    NoSectors,

    #[error("duplicate sector key {key:?}")]
    DuplicateSector { key: String },

    #[error("sector {sector:?}: duplicate question id {question:?}")]
    DuplicateQuestion { sector: String, question: String },

    #[error("sector {sector:?}: clause references unknown question {question:?}")]
    UnknownQuestionRef { sector: String, question: String },

    #[error("sector {sector:?}: more than one clause attached to question {question:?}")]
    DuplicateClauseRef { sector: String, question: String },
}

/// Lookup of a sector key that is not configured.
///
/// Recoverable by the caller; never silently defaulted to another sector,
/// so the wrong jurisdiction's clauses cannot be applied by accident.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sector {key:?}")]
pub struct NotFoundError {
    pub key: String,
}

impl NotFoundError {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}
