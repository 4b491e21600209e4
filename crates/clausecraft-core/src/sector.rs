//! Domain types for sector-conditioned clause composition.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Working arrangement a follow-up question can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementPattern {
    NightWork,
    ShiftRota,
    OnSite,
    Hybrid,
    Remote,
}

impl EngagementPattern {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NightWork => "night_work",
            Self::ShiftRota => "shift_rota",
            Self::OnSite => "on_site",
            Self::Hybrid => "hybrid",
            Self::Remote => "remote",
        }
    }
}

impl FromStr for EngagementPattern {
    type Err = String;

    /// Accepts snake_case and kebab-case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "night_work" => Ok(Self::NightWork),
            "shift_rota" => Ok(Self::ShiftRota),
            "on_site" => Ok(Self::OnSite),
            "hybrid" => Ok(Self::Hybrid),
            "remote" => Ok(Self::Remote),
            other => Err(format!("unknown engagement pattern: {other}")),
        }
    }
}

/// An industry vertical governing which legal boilerplate applies.
///
/// Sectors form a fixed, finite enumeration defined by configuration data,
/// loaded once and immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    /// Stable key, embedded in links and stored answer sets. Lookups are
    /// exact and case-sensitive.
    pub key: String,
    /// Display label, e.g. "Hospitality".
    pub label: String,
}

/// A yes/no or choice prompt whose answer conditionally pulls in clause text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpQuestion {
    /// Unique within its sector; the same id may appear in other sectors.
    pub id: String,
    /// Prompt shown to the user.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Engagement patterns this question is relevant to.
    /// `None` means always relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<Vec<EngagementPattern>>,
}

impl FollowUpQuestion {
    /// Whether this question is relevant under the given engagement pattern.
    pub fn relevant_for(&self, pattern: EngagementPattern) -> bool {
        match &self.applies_to {
            None => true,
            Some(patterns) => patterns.contains(&pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_parses_both_spellings() {
        assert_eq!(
            "night_work".parse::<EngagementPattern>().unwrap(),
            EngagementPattern::NightWork
        );
        assert_eq!(
            "night-work".parse::<EngagementPattern>().unwrap(),
            EngagementPattern::NightWork
        );
        assert!("overnight".parse::<EngagementPattern>().is_err());
    }

    #[test]
    fn pattern_serde_uses_snake_case() {
        let json = serde_json::to_string(&EngagementPattern::ShiftRota).unwrap();
        assert_eq!(json, "\"shift_rota\"");
        let back: EngagementPattern = serde_json::from_str("\"on_site\"").unwrap();
        assert_eq!(back, EngagementPattern::OnSite);
    }

    #[test]
    fn question_without_filter_is_always_relevant() {
        let q = FollowUpQuestion {
            id: "q".into(),
            label: "Q?".into(),
            help: None,
            applies_to: None,
        };
        assert!(q.relevant_for(EngagementPattern::Remote));
        assert!(q.relevant_for(EngagementPattern::NightWork));
    }

    #[test]
    fn question_with_filter_matches_listed_patterns_only() {
        let q = FollowUpQuestion {
            id: "q".into(),
            label: "Q?".into(),
            help: None,
            applies_to: Some(vec![EngagementPattern::NightWork, EngagementPattern::ShiftRota]),
        };
        assert!(q.relevant_for(EngagementPattern::NightWork));
        assert!(q.relevant_for(EngagementPattern::ShiftRota));
        assert!(!q.relevant_for(EngagementPattern::Remote));
    }
}
