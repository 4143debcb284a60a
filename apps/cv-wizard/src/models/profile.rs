//! Candidate profile: the single record a wizard session collects, renders and exports.
//!
//! Field names serialize in camelCase so the JSON shape matches what the browser
//! front-end and the sample fixtures use.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

/// The three fixed résumé templates. No other value is renderable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CvLayout {
    /// Centered header, single column.
    #[default]
    Classic,
    /// Dark header band with photo, sidebar + main column.
    Europass,
    /// Accent sidebar, oversized name.
    Modern,
}

impl CvLayout {
    pub const ALL: [CvLayout; 3] = [CvLayout::Classic, CvLayout::Europass, CvLayout::Modern];

    pub fn as_str(self) -> &'static str {
        match self {
            CvLayout::Classic => "classic",
            CvLayout::Europass => "europass",
            CvLayout::Modern => "modern",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s.trim())
    }
}

/// What an AI suggestion is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Keyword,
    Metric,
    Impact,
    Style,
}

impl SuggestionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionCategory::Keyword => "keyword",
            SuggestionCategory::Metric => "metric",
            SuggestionCategory::Impact => "impact",
            SuggestionCategory::Style => "style",
        }
    }

    /// Label shown in the suggestions panel.
    pub fn label(self) -> &'static str {
        match self {
            SuggestionCategory::Keyword => "Palavra-chave",
            SuggestionCategory::Metric => "Métrica",
            SuggestionCategory::Impact => "Impacto",
            SuggestionCategory::Style => "Estilo",
        }
    }
}

/// Proficiency levels offered by the language picker. Stored levels are free text.
pub const LANGUAGE_LEVELS: [&str; 7] = ["Nativo", "C2", "C1", "B2", "B1", "A2", "A1"];

/// Level given to a freshly added language row.
pub const DEFAULT_LANGUAGE_LEVEL: &str = "B2";

// ────────────────────────────────────────────────────────────────────────────
// List entries
// ────────────────────────────────────────────────────────────────────────────

/// Rows addressed by a caller-assigned id for targeted update and removal.
///
/// Uniqueness is NOT enforced: an id shared by two rows makes every id-keyed
/// edit hit both of them.
pub trait Keyed {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub role: String,
    /// Free text label, never parsed ("Jan 2018").
    pub start_date: String,
    /// Free text label, "Presente" is valid.
    pub end_date: String,
    pub description: String,
    pub achievements: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
}

/// A spoken language. The id is synthetic: incoming records without one get a
/// fresh id so removing a middle row never shifts later edits onto a neighbour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProficiency {
    #[serde(default = "fresh_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: String,
}

impl Default for LanguageProficiency {
    fn default() -> Self {
        Self {
            id: fresh_id(),
            name: String::new(),
            level: DEFAULT_LANGUAGE_LEVEL.to_string(),
        }
    }
}

impl Keyed for Experience {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Keyed for Education {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Keyed for LanguageProficiency {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Advisory improvement note. Never applied to the profile automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: SuggestionCategory,
    pub text: String,
    pub reason: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

/// The candidate record. One per session, empty at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub nationality: String,
    pub profession: String,
    pub city: String,
    /// Data URL or remote image URL.
    pub profile_photo: String,
    pub summary: String,
    /// Raw background used only as material for the cover letter.
    pub personal_history: String,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub qualities: Vec<String>,
    pub languages: Vec<LanguageProficiency>,
    pub target_job: String,
    /// Absent until generation has completed at least once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    /// Absent until generation has completed at least once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<Vec<Suggestion>>,
    pub layout: CvLayout,
}

impl CandidateProfile {
    /// Headline shown under the name; falls back to the target job.
    pub fn headline(&self) -> &str {
        if self.profession.is_empty() {
            &self.target_job
        } else {
            &self.profession
        }
    }

    pub fn experience(&self, id: &str) -> Option<&Experience> {
        self.experiences.iter().find(|e| e.id == id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Id-keyed list helpers
// ────────────────────────────────────────────────────────────────────────────

/// New opaque row id.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Applies `f` to every row whose id matches. Returns how many rows were touched.
pub fn update_by_id<T: Keyed>(rows: &mut [T], id: &str, mut f: impl FnMut(&mut T)) -> usize {
    let mut touched = 0;
    for row in rows.iter_mut().filter(|r| r.id() == id) {
        f(row);
        touched += 1;
    }
    touched
}

/// Removes every row whose id matches. Returns how many rows were removed.
pub fn remove_by_id<T: Keyed>(rows: &mut Vec<T>, id: &str) -> usize {
    let before = rows.len();
    rows.retain(|r| r.id() != id);
    before - rows.len()
}

/// Splits a comma-delimited blob into list entries.
///
/// Each segment is trimmed; empty segments are kept as empty strings and
/// nothing is deduplicated, so `"A, B,, C"` yields `["A", "B", "", "C"]`.
pub fn split_list(blob: &str) -> Vec<String> {
    blob.split(',').map(|s| s.trim().to_string()).collect()
}

/// Joins list entries into the blob edited by the skills/qualities controls.
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exp(id: &str, role: &str) -> Experience {
        Experience {
            id: id.to_string(),
            role: role.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_split_list_keeps_empty_segments() {
        assert_eq!(split_list("A, B,, C"), vec!["A", "B", "", "C"]);
    }

    #[test]
    fn test_split_join_is_idempotent_after_trimming() {
        let first = split_list("  Rust ,SQL,  , Kafka  ");
        let second = split_list(&join_list(&first));
        assert_eq!(first, second);
        assert_eq!(first, vec!["Rust", "SQL", "", "Kafka"]);
    }

    #[test]
    fn test_update_by_id_touches_only_matching_rows() {
        let mut rows = vec![exp("1", "Engineer"), exp("2", "Manager")];
        let touched = update_by_id(&mut rows, "2", |e| e.role = "Director".to_string());
        assert_eq!(touched, 1);
        assert_eq!(rows[0], exp("1", "Engineer"));
        assert_eq!(rows[1].role, "Director");
    }

    #[test]
    fn test_update_by_id_collision_updates_all_duplicates() {
        let mut rows = vec![exp("dup", "A"), exp("dup", "B")];
        assert_eq!(update_by_id(&mut rows, "dup", |e| e.company = "X".into()), 2);
        assert!(rows.iter().all(|e| e.company == "X"));
    }

    #[test]
    fn test_remove_by_id_preserves_order() {
        let mut rows = vec![exp("1", "a"), exp("2", "b"), exp("3", "c")];
        assert_eq!(remove_by_id(&mut rows, "2"), 1);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_language_without_id_gets_synthetic_id() {
        let lang: LanguageProficiency =
            serde_json::from_str(r#"{"name": "Inglês", "level": "C1"}"#).unwrap();
        assert!(!lang.id.is_empty());
        assert_eq!(lang.level, "C1");
    }

    #[test]
    fn test_profile_round_trips_camel_case_and_hides_absent_artifacts() {
        let profile = CandidateProfile {
            full_name: "Ana".into(),
            target_job: "CTO".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["fullName"], "Ana");
        assert_eq!(json["targetJob"], "CTO");
        assert_eq!(json["layout"], "classic");
        assert!(json.get("coverLetter").is_none());
        assert!(json.get("aiSuggestions").is_none());
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        let result: Result<CandidateProfile, _> =
            serde_json::from_str(r#"{"layout": "brutalist"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_headline_falls_back_to_target_job() {
        let mut profile = CandidateProfile {
            target_job: "Head of Supply Chain".into(),
            ..Default::default()
        };
        assert_eq!(profile.headline(), "Head of Supply Chain");
        profile.profession = "Gestor".into();
        assert_eq!(profile.headline(), "Gestor");
    }
}
