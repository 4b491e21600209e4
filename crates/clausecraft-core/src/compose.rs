//! Deterministic clause composition: sector key + answers in, ordered
//! document skeleton out.
//!
//! `compose` is a pure function over the immutable registry and one
//! per-call [`AnswerSet`]. It performs no I/O, holds no state between
//! calls, and is safe to invoke concurrently without coordination.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::NotFoundError;
use crate::registry::SectorRegistry;

/// One answer to a follow-up question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Yes/no questions.
    Bool(bool),
    /// Choice questions; compared against the clause's trigger value.
    Choice(String),
}

impl AnswerValue {
    /// Whether this answer fires a clause gate with the given trigger.
    ///
    /// No trigger means the gate is a yes/no gate and fires on `true`; a
    /// trigger fires on the exact matching choice value. A boolean answer
    /// never fires a choice gate and vice versa.
    fn fires(&self, trigger: Option<&str>) -> bool {
        match (self, trigger) {
            (Self::Bool(answered), None) => *answered,
            (Self::Choice(value), Some(expected)) => value == expected,
            _ => false,
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Choice(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Choice(value)
    }
}

/// Caller-supplied answers keyed by question id.
///
/// Stored as an ordered map so that two answer sets with the same pairs are
/// equal regardless of the order the caller inserted them. Ids the target
/// sector does not declare are ignored during composition; missing ids are
/// the negative default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any previous value for the same id.
    pub fn set(&mut self, id: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(id.into(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.set(id, value);
        self
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The assembled document skeleton: base clauses first in configuration
/// order, then conditional clauses in question declaration order.
///
/// Immutable once returned. `answers` records the recognised subset of the
/// caller's answers that produced this document; ids the sector does not
/// declare are dropped, so equivalent inputs yield identical documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedDocument {
    /// Key of the sector the skeleton was composed for.
    pub sector: String,
    /// Included clause texts, in composition order.
    pub fragments: Vec<String>,
    /// Recognised answers, keyed by question id.
    pub answers: BTreeMap<String, AnswerValue>,
}

impl ComposedDocument {
    /// A sector with no clauses composes to an empty, still-valid skeleton.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Render one clause per bullet line, for inclusion in a larger text
    /// block such as a model prompt. Empty documents render to nothing.
    pub fn to_bullet_text(&self) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            out.push_str("- ");
            out.push_str(fragment);
            out.push('\n');
        }
        out
    }
}

/// Composition handle over a shared registry.
///
/// Explicitly constructed and passed to callers; the crate keeps no
/// process-wide instance.
#[derive(Debug, Clone)]
pub struct Composer {
    registry: Arc<SectorRegistry>,
}

impl Composer {
    pub fn new(registry: Arc<SectorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SectorRegistry {
        &self.registry
    }

    /// Assemble the document skeleton for `sector_key` under `answers`.
    ///
    /// Base clauses come first, in configuration order. Then, for each of
    /// the sector's questions in declared order, the question's clause is
    /// appended when the supplied answer fires its gate. Answer ids the
    /// sector does not declare are ignored; unanswered questions default to
    /// not-included; a fired question with no configured clause contributes
    /// nothing. Output depends only on configuration order and the answer
    /// pairs, never on the caller's map ordering.
    ///
    /// Fails with [`NotFoundError`] for an unknown sector key and returns no
    /// partial document.
    pub fn compose(
        &self,
        sector_key: &str,
        answers: &AnswerSet,
    ) -> Result<ComposedDocument, NotFoundError> {
        let entry = self.registry.entry(sector_key)?;

        let mut fragments = entry.base_clauses.clone();
        let mut recognised = BTreeMap::new();

        for question in &entry.questions {
            let Some(value) = answers.get(&question.id) else {
                continue;
            };
            recognised.insert(question.id.clone(), value.clone());

            if let Some(clause) = entry.clause_for(&question.id)
                && value.fires(clause.trigger.as_deref())
            {
                fragments.push(clause.text.clone());
            }
        }

        Ok(ComposedDocument {
            sector: entry.sector.key.clone(),
            fragments,
            answers: recognised,
        })
    }
}
