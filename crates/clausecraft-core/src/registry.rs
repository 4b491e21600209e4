//! Validated, read-only lookup over the sector configuration.
//!
//! Construction performs every cross-reference check once; after that the
//! registry is immutable and may be shared across threads without locking.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::{ConditionalClause, RegistryConfig};
use crate::error::{ConfigError, NotFoundError};
use crate::sector::{EngagementPattern, FollowUpQuestion, Sector};

/// One validated sector with its clauses indexed by gating question.
#[derive(Debug)]
pub(crate) struct SectorEntry {
    pub(crate) sector: Sector,
    pub(crate) base_clauses: Vec<String>,
    pub(crate) questions: Vec<FollowUpQuestion>,
    /// question id → its one conditional clause. Uniqueness checked at load.
    pub(crate) clauses: HashMap<String, ConditionalClause>,
}

impl SectorEntry {
    pub(crate) fn clause_for(&self, question_id: &str) -> Option<&ConditionalClause> {
        self.clauses.get(question_id)
    }
}

/// The fixed sector/question/clause tables, checked once at load time.
///
/// Lookups are exact and case-sensitive; keys are stable identifiers that
/// appear in links and stored answer sets.
#[derive(Debug)]
pub struct SectorRegistry {
    entries: Vec<SectorEntry>,
    by_key: HashMap<String, usize>,
}

impl SectorRegistry {
    /// Validate a parsed configuration and build the registry.
    ///
    /// Fails with [`ConfigError`] on an empty sector list, a duplicate sector
    /// key, a duplicate question id within a sector, a clause referencing a
    /// question its sector does not declare, or two clauses attached to the
    /// same question. A registry is never constructed from invalid data.
    pub fn from_config(config: RegistryConfig) -> Result<Self, ConfigError> {
        if config.sectors.is_empty() {
            return Err(ConfigError::NoSectors);
        }

        let mut entries = Vec::with_capacity(config.sectors.len());
        let mut by_key = HashMap::with_capacity(config.sectors.len());

        for declared in config.sectors {
            if by_key.contains_key(&declared.key) {
                return Err(ConfigError::DuplicateSector { key: declared.key });
            }

            let mut question_ids = HashSet::with_capacity(declared.questions.len());
            for question in &declared.questions {
                if !question_ids.insert(question.id.clone()) {
                    return Err(ConfigError::DuplicateQuestion {
                        sector: declared.key,
                        question: question.id.clone(),
                    });
                }
            }

            let mut clauses = HashMap::with_capacity(declared.conditional_clauses.len());
            for clause in declared.conditional_clauses {
                if !question_ids.contains(&clause.question) {
                    return Err(ConfigError::UnknownQuestionRef {
                        sector: declared.key,
                        question: clause.question,
                    });
                }
                let question = clause.question.clone();
                if clauses.insert(question.clone(), clause).is_some() {
                    return Err(ConfigError::DuplicateClauseRef {
                        sector: declared.key,
                        question,
                    });
                }
            }

            by_key.insert(declared.key.clone(), entries.len());
            entries.push(SectorEntry {
                sector: Sector {
                    key: declared.key,
                    label: declared.label,
                },
                base_clauses: declared.base_clauses,
                questions: declared.questions,
                clauses,
            });
        }

        tracing::info!(sectors = entries.len(), "sector registry built");
        Ok(Self { entries, by_key })
    }

    /// Parse JSON text and build the registry.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::from_config(RegistryConfig::from_json_str(json)?)
    }

    /// Read a configuration file and build the registry.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_config(RegistryConfig::load(path)?)
    }

    /// All sectors in declaration order. Never empty for a built registry.
    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.entries.iter().map(|e| &e.sector)
    }

    /// Exact-match lookup by key.
    pub fn sector(&self, key: &str) -> Result<&Sector, NotFoundError> {
        self.entry(key).map(|e| &e.sector)
    }

    /// Follow-up questions for a sector, in declared order.
    ///
    /// Empty for a valid sector with no configured questions.
    pub fn questions(&self, sector_key: &str) -> Result<&[FollowUpQuestion], NotFoundError> {
        self.entry(sector_key).map(|e| e.questions.as_slice())
    }

    /// The subset of a sector's questions relevant under one engagement
    /// pattern, in declared order. Questions with no filter always pass.
    pub fn questions_for(
        &self,
        sector_key: &str,
        pattern: EngagementPattern,
    ) -> Result<Vec<&FollowUpQuestion>, NotFoundError> {
        let entry = self.entry(sector_key)?;
        Ok(entry
            .questions
            .iter()
            .filter(|q| q.relevant_for(pattern))
            .collect())
    }

    pub(crate) fn entry(&self, key: &str) -> Result<&SectorEntry, NotFoundError> {
        self.by_key
            .get(key)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| NotFoundError::new(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(json: &str) -> Result<SectorRegistry, ConfigError> {
        SectorRegistry::from_json_str(json)
    }

    const TWO_SECTORS: &str = r#"{
        "version": 1,
        "sectors": [
            {
                "key": "hospitality",
                "label": "Hospitality",
                "base_clauses": ["Hours.", "Breaks."],
                "questions": [
                    {"id": "personal_licence", "label": "Licence holder?"},
                    {
                        "id": "late_finish",
                        "label": "Late finishes?",
                        "applies_to": ["night_work", "shift_rota"]
                    }
                ],
                "conditional_clauses": [
                    {"question": "personal_licence", "text": "Licence clause."}
                ]
            },
            {
                "key": "construction",
                "label": "Construction",
                "base_clauses": ["Site rules."]
            }
        ]
    }"#;

    #[test]
    fn sectors_in_declaration_order() {
        let reg = registry(TWO_SECTORS).unwrap();
        let keys: Vec<&str> = reg.sectors().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["hospitality", "construction"]);
    }

    #[test]
    fn sector_lookup_is_exact_and_case_sensitive() {
        let reg = registry(TWO_SECTORS).unwrap();
        assert_eq!(reg.sector("hospitality").unwrap().label, "Hospitality");
        assert_eq!(
            reg.sector("Hospitality").unwrap_err(),
            NotFoundError::new("Hospitality")
        );
        assert_eq!(
            reg.sector("aerospace").unwrap_err(),
            NotFoundError::new("aerospace")
        );
    }

    #[test]
    fn questions_in_declared_order() {
        let reg = registry(TWO_SECTORS).unwrap();
        let ids: Vec<&str> = reg
            .questions("hospitality")
            .unwrap()
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, vec!["personal_licence", "late_finish"]);
    }

    #[test]
    fn sector_without_questions_yields_empty_slice() {
        let reg = registry(TWO_SECTORS).unwrap();
        assert!(reg.questions("construction").unwrap().is_empty());
    }

    #[test]
    fn questions_for_unknown_sector_fails() {
        let reg = registry(TWO_SECTORS).unwrap();
        assert!(reg.questions("aerospace").is_err());
    }

    #[test]
    fn pattern_filter_applies_question_scope() {
        let reg = registry(TWO_SECTORS).unwrap();

        let remote = reg
            .questions_for("hospitality", EngagementPattern::Remote)
            .unwrap();
        assert_eq!(remote.len(), 1);
        assert_eq!(remote[0].id, "personal_licence");

        let nights = reg
            .questions_for("hospitality", EngagementPattern::NightWork)
            .unwrap();
        assert_eq!(nights.len(), 2);
    }

    #[test]
    fn empty_sector_list_fails_construction() {
        let err = registry(r#"{"version": 1, "sectors": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoSectors));
    }

    #[test]
    fn duplicate_sector_key_fails_construction() {
        let err = registry(
            r#"{
                "version": 1,
                "sectors": [
                    {"key": "retail", "label": "Retail"},
                    {"key": "retail", "label": "Retail again"}
                ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSector { key } if key == "retail"));
    }

    #[test]
    fn duplicate_question_id_fails_construction() {
        let err = registry(
            r#"{
                "version": 1,
                "sectors": [{
                    "key": "retail",
                    "label": "Retail",
                    "questions": [
                        {"id": "keyholder", "label": "Keyholder?"},
                        {"id": "keyholder", "label": "Still a keyholder?"}
                    ]
                }]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateQuestion { sector, question }
                if sector == "retail" && question == "keyholder"
        ));
    }

    #[test]
    fn dangling_clause_reference_fails_construction() {
        let err = registry(
            r#"{
                "version": 1,
                "sectors": [{
                    "key": "retail",
                    "label": "Retail",
                    "questions": [{"id": "keyholder", "label": "Keyholder?"}],
                    "conditional_clauses": [
                        {"question": "alarm_code", "text": "Alarm clause."}
                    ]
                }]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownQuestionRef { sector, question }
                if sector == "retail" && question == "alarm_code"
        ));
    }

    #[test]
    fn same_question_id_may_repeat_across_sectors() {
        let reg = registry(
            r#"{
                "version": 1,
                "sectors": [
                    {
                        "key": "retail",
                        "label": "Retail",
                        "questions": [{"id": "keyholder", "label": "Keyholder?"}],
                        "conditional_clauses": [
                            {"question": "keyholder", "text": "Retail keyholder clause."}
                        ]
                    },
                    {
                        "key": "logistics",
                        "label": "Logistics",
                        "questions": [{"id": "keyholder", "label": "Depot keyholder?"}],
                        "conditional_clauses": [
                            {"question": "keyholder", "text": "Depot keyholder clause."}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        let retail = reg.entry("retail").unwrap();
        let logistics = reg.entry("logistics").unwrap();
        assert_eq!(
            retail.clause_for("keyholder").unwrap().text,
            "Retail keyholder clause."
        );
        assert_eq!(
            logistics.clause_for("keyholder").unwrap().text,
            "Depot keyholder clause."
        );
    }

    #[test]
    fn two_clauses_on_one_question_fail_construction() {
        let err = registry(
            r#"{
                "version": 1,
                "sectors": [{
                    "key": "retail",
                    "label": "Retail",
                    "questions": [{"id": "keyholder", "label": "Keyholder?"}],
                    "conditional_clauses": [
                        {"question": "keyholder", "text": "First."},
                        {"question": "keyholder", "text": "Second."}
                    ]
                }]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateClauseRef { sector, question }
                if sector == "retail" && question == "keyholder"
        ));
    }
}
