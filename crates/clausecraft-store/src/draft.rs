//! Saved draft documents.

use chrono::{DateTime, Utc};
use clausecraft_core::AnswerSet;
use serde::{Deserialize, Serialize};

/// A saved draft: the generated (or hand-edited) document body plus the
/// sector and answers it was composed from, so the skeleton can be rebuilt
/// against a newer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    /// Caller-chosen identifier; doubles as the storage file name.
    pub id: String,
    /// Sector key the draft was composed under.
    pub sector: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub answers: AnswerSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    pub fn new(
        id: impl Into<String>,
        sector: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        answers: AnswerSet,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            sector: sector.into(),
            title: title.into(),
            body: body.into(),
            answers,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump `updated_at` after an edit.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let draft = Draft::new(
            "bar-staff-2026",
            "hospitality",
            "Bar staff contract",
            "EMPLOYMENT CONTRACT\n...",
            AnswerSet::new().with("personal_licence", true),
        );
        let json = serde_json::to_string(&draft).unwrap();
        let parsed: Draft = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, draft);
    }

    #[test]
    fn missing_answers_field_defaults_to_empty() {
        let parsed: Draft = serde_json::from_str(
            r#"{
                "id": "d1",
                "sector": "retail",
                "title": "T",
                "body": "B",
                "created_at": "2026-08-01T09:00:00Z",
                "updated_at": "2026-08-01T09:00:00Z"
            }"#,
        )
        .unwrap();
        assert!(parsed.answers.is_empty());
    }

    #[test]
    fn touch_advances_updated_at() {
        let mut draft = Draft::new("d1", "retail", "T", "B", AnswerSet::new());
        let created = draft.created_at;
        draft.touch();
        assert!(draft.updated_at >= created);
        assert_eq!(draft.created_at, created);
    }
}
