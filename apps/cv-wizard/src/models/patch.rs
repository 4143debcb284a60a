//! Profile edits: the only way a `CandidateProfile` changes.
//!
//! Form fields, inline preview edits, prefill merges and generated artifacts all
//! arrive as a `ProfileEdit` and go through `CandidateProfile::apply`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::profile::{
    fresh_id, remove_by_id, split_list, update_by_id, CandidateProfile, CvLayout, Education,
    Experience, LanguageProficiency, Suggestion,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("No {kind} row with id '{id}'")]
    UnknownRow { kind: &'static str, id: String },

    #[error("Unknown field path '{0}'")]
    InvalidPath(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Partial record
// ────────────────────────────────────────────────────────────────────────────

/// Partial profile: every present field overwrites the record's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub nationality: Option<String>,
    pub profession: Option<String>,
    pub city: Option<String>,
    pub profile_photo: Option<String>,
    pub summary: Option<String>,
    pub personal_history: Option<String>,
    pub experiences: Option<Vec<Experience>>,
    pub education: Option<Vec<Education>>,
    pub skills: Option<Vec<String>>,
    pub qualities: Option<Vec<String>>,
    pub languages: Option<Vec<LanguageProficiency>>,
    pub target_job: Option<String>,
    pub cover_letter: Option<String>,
    pub ai_suggestions: Option<Vec<Suggestion>>,
    pub layout: Option<CvLayout>,
}

// ────────────────────────────────────────────────────────────────────────────
// Row fields
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceField {
    Company,
    Role,
    StartDate,
    EndDate,
    Description,
    Achievements,
}

impl ExperienceField {
    pub const ALL: [ExperienceField; 6] = [
        ExperienceField::Company,
        ExperienceField::Role,
        ExperienceField::StartDate,
        ExperienceField::EndDate,
        ExperienceField::Description,
        ExperienceField::Achievements,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceField::Company => "company",
            ExperienceField::Role => "role",
            ExperienceField::StartDate => "start_date",
            ExperienceField::EndDate => "end_date",
            ExperienceField::Description => "description",
            ExperienceField::Achievements => "achievements",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    fn slot(self, row: &mut Experience) -> &mut String {
        match self {
            ExperienceField::Company => &mut row.company,
            ExperienceField::Role => &mut row.role,
            ExperienceField::StartDate => &mut row.start_date,
            ExperienceField::EndDate => &mut row.end_date,
            ExperienceField::Description => &mut row.description,
            ExperienceField::Achievements => &mut row.achievements,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationField {
    Institution,
    Degree,
    StartDate,
    EndDate,
}

impl EducationField {
    pub const ALL: [EducationField; 4] = [
        EducationField::Institution,
        EducationField::Degree,
        EducationField::StartDate,
        EducationField::EndDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EducationField::Institution => "institution",
            EducationField::Degree => "degree",
            EducationField::StartDate => "start_date",
            EducationField::EndDate => "end_date",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    fn slot(self, row: &mut Education) -> &mut String {
        match self {
            EducationField::Institution => &mut row.institution,
            EducationField::Degree => &mut row.degree,
            EducationField::StartDate => &mut row.start_date,
            EducationField::EndDate => &mut row.end_date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageField {
    Name,
    Level,
}

impl LanguageField {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageField::Name => "name",
            LanguageField::Level => "level",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(LanguageField::Name),
            "level" => Some(LanguageField::Level),
            _ => None,
        }
    }

    fn slot(self, row: &mut LanguageProficiency) -> &mut String {
        match self {
            LanguageField::Name => &mut row.name,
            LanguageField::Level => &mut row.level,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Edit operations
// ────────────────────────────────────────────────────────────────────────────

/// One mutation of the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProfileEdit {
    Patch(ProfilePatch),
    /// Comma blob from the skills control.
    SetSkillsText { text: String },
    SetQualitiesText { text: String },
    AddExperience,
    UpdateExperience {
        id: String,
        field: ExperienceField,
        value: String,
    },
    RemoveExperience { id: String },
    AddEducation,
    UpdateEducation {
        id: String,
        field: EducationField,
        value: String,
    },
    RemoveEducation { id: String },
    AddLanguage,
    UpdateLanguage {
        id: String,
        field: LanguageField,
        value: String,
    },
    RemoveLanguage { id: String },
}

impl CandidateProfile {
    /// Applies a single edit. Row edits fail with `UnknownRow` when no row has the id;
    /// on duplicate ids every matching row is updated.
    pub fn apply(&mut self, edit: ProfileEdit) -> Result<(), ProfileError> {
        match edit {
            ProfileEdit::Patch(patch) => {
                self.merge(patch);
                Ok(())
            }
            ProfileEdit::SetSkillsText { text } => {
                self.skills = split_list(&text);
                Ok(())
            }
            ProfileEdit::SetQualitiesText { text } => {
                self.qualities = split_list(&text);
                Ok(())
            }
            ProfileEdit::AddExperience => {
                self.experiences.push(Experience {
                    id: fresh_id(),
                    ..Default::default()
                });
                Ok(())
            }
            ProfileEdit::UpdateExperience { id, field, value } => {
                let touched = update_by_id(&mut self.experiences, &id, |row| {
                    *field.slot(row) = value.clone();
                });
                ensure_touched(touched, "experience", id)
            }
            ProfileEdit::RemoveExperience { id } => {
                let removed = remove_by_id(&mut self.experiences, &id);
                ensure_touched(removed, "experience", id)
            }
            ProfileEdit::AddEducation => {
                self.education.push(Education {
                    id: fresh_id(),
                    ..Default::default()
                });
                Ok(())
            }
            ProfileEdit::UpdateEducation { id, field, value } => {
                let touched = update_by_id(&mut self.education, &id, |row| {
                    *field.slot(row) = value.clone();
                });
                ensure_touched(touched, "education", id)
            }
            ProfileEdit::RemoveEducation { id } => {
                let removed = remove_by_id(&mut self.education, &id);
                ensure_touched(removed, "education", id)
            }
            ProfileEdit::AddLanguage => {
                self.languages.push(LanguageProficiency::default());
                Ok(())
            }
            ProfileEdit::UpdateLanguage { id, field, value } => {
                let touched = update_by_id(&mut self.languages, &id, |row| {
                    *field.slot(row) = value.clone();
                });
                ensure_touched(touched, "language", id)
            }
            ProfileEdit::RemoveLanguage { id } => {
                let removed = remove_by_id(&mut self.languages, &id);
                ensure_touched(removed, "language", id)
            }
        }
    }

    /// Overwrites every field present in `patch`. Never fails.
    pub fn merge(&mut self, patch: ProfilePatch) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        set(&mut self.full_name, patch.full_name);
        set(&mut self.email, patch.email);
        set(&mut self.phone, patch.phone);
        set(&mut self.address, patch.address);
        set(&mut self.nationality, patch.nationality);
        set(&mut self.profession, patch.profession);
        set(&mut self.city, patch.city);
        set(&mut self.profile_photo, patch.profile_photo);
        set(&mut self.summary, patch.summary);
        set(&mut self.personal_history, patch.personal_history);
        set(&mut self.experiences, patch.experiences);
        set(&mut self.education, patch.education);
        set(&mut self.skills, patch.skills);
        set(&mut self.qualities, patch.qualities);
        set(&mut self.languages, patch.languages);
        set(&mut self.target_job, patch.target_job);
        set(&mut self.layout, patch.layout);
        if patch.cover_letter.is_some() {
            self.cover_letter = patch.cover_letter;
        }
        if patch.ai_suggestions.is_some() {
            self.ai_suggestions = patch.ai_suggestions;
        }
    }
}

fn ensure_touched(count: usize, kind: &'static str, id: String) -> Result<(), ProfileError> {
    if count == 0 {
        Err(ProfileError::UnknownRow { kind, id })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_rows() -> CandidateProfile {
        CandidateProfile {
            experiences: vec![
                Experience {
                    id: "1".into(),
                    company: "Acme".into(),
                    role: "Engineer".into(),
                    description: "did stuff".into(),
                    ..Default::default()
                },
                Experience {
                    id: "2".into(),
                    company: "Globex".into(),
                    role: "Lead".into(),
                    ..Default::default()
                },
            ],
            education: vec![Education {
                id: "edu1".into(),
                institution: "Coimbra".into(),
                ..Default::default()
            }],
            languages: vec![
                LanguageProficiency {
                    id: "l1".into(),
                    name: "Português".into(),
                    level: "Nativo".into(),
                },
                LanguageProficiency {
                    id: "l2".into(),
                    name: "Inglês".into(),
                    level: "C1".into(),
                },
                LanguageProficiency {
                    id: "l3".into(),
                    name: "Espanhol".into(),
                    level: "B2".into(),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_patch_overwrites_only_present_fields() {
        let mut profile = profile_with_rows();
        profile.email = "old@example.com".into();
        profile
            .apply(ProfileEdit::Patch(ProfilePatch {
                full_name: Some("Ana Lima".into()),
                layout: Some(CvLayout::Modern),
                ..Default::default()
            }))
            .unwrap();
        assert_eq!(profile.full_name, "Ana Lima");
        assert_eq!(profile.layout, CvLayout::Modern);
        assert_eq!(profile.email, "old@example.com");
        assert_eq!(profile.experiences.len(), 2);
    }

    #[test]
    fn test_patch_without_artifacts_keeps_generated_content() {
        let mut profile = CandidateProfile {
            cover_letter: Some("Carta".into()),
            ai_suggestions: Some(vec![]),
            ..Default::default()
        };
        profile
            .apply(ProfileEdit::Patch(ProfilePatch {
                layout: Some(CvLayout::Europass),
                ..Default::default()
            }))
            .unwrap();
        assert_eq!(profile.cover_letter.as_deref(), Some("Carta"));
        assert_eq!(profile.ai_suggestions, Some(vec![]));
    }

    #[test]
    fn test_update_experience_leaves_siblings_identical() {
        let mut profile = profile_with_rows();
        let sibling = profile.experiences[1].clone();
        profile
            .apply(ProfileEdit::UpdateExperience {
                id: "1".into(),
                field: ExperienceField::Description,
                value: "Led delivery".into(),
            })
            .unwrap();
        assert_eq!(profile.experiences[0].description, "Led delivery");
        assert_eq!(profile.experiences[0].company, "Acme");
        assert_eq!(profile.experiences[1], sibling);
    }

    #[test]
    fn test_update_language_after_middle_removal_hits_the_right_row() {
        let mut profile = profile_with_rows();
        profile
            .apply(ProfileEdit::RemoveLanguage { id: "l2".into() })
            .unwrap();
        profile
            .apply(ProfileEdit::UpdateLanguage {
                id: "l3".into(),
                field: LanguageField::Level,
                value: "C1".into(),
            })
            .unwrap();
        assert_eq!(profile.languages.len(), 2);
        assert_eq!(profile.languages[0].level, "Nativo");
        assert_eq!(profile.languages[1].name, "Espanhol");
        assert_eq!(profile.languages[1].level, "C1");
    }

    #[test]
    fn test_update_unknown_row_is_reported() {
        let mut profile = profile_with_rows();
        let err = profile
            .apply(ProfileEdit::UpdateEducation {
                id: "missing".into(),
                field: EducationField::Degree,
                value: "MSc".into(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            ProfileError::UnknownRow {
                kind: "education",
                id: "missing".into()
            }
        );
    }

    #[test]
    fn test_skills_blob_keeps_empty_segment() {
        let mut profile = CandidateProfile::default();
        profile
            .apply(ProfileEdit::SetSkillsText {
                text: "A, B,, C".into(),
            })
            .unwrap();
        assert_eq!(profile.skills, vec!["A", "B", "", "C"]);
    }

    #[test]
    fn test_add_rows_get_fresh_ids_and_defaults() {
        let mut profile = CandidateProfile::default();
        profile.apply(ProfileEdit::AddExperience).unwrap();
        profile.apply(ProfileEdit::AddExperience).unwrap();
        profile.apply(ProfileEdit::AddLanguage).unwrap();
        assert_ne!(profile.experiences[0].id, profile.experiences[1].id);
        assert_eq!(profile.languages[0].level, "B2");
    }

    #[test]
    fn test_edit_deserializes_from_tagged_json() {
        let edit: ProfileEdit = serde_json::from_value(serde_json::json!({
            "op": "update_experience",
            "id": "1",
            "field": "start_date",
            "value": "Jan 2018"
        }))
        .unwrap();
        assert_eq!(
            edit,
            ProfileEdit::UpdateExperience {
                id: "1".into(),
                field: ExperienceField::StartDate,
                value: "Jan 2018".into()
            }
        );

        let patch: ProfileEdit =
            serde_json::from_value(serde_json::json!({"op": "patch", "fullName": "Rui"})).unwrap();
        assert_eq!(
            patch,
            ProfileEdit::Patch(ProfilePatch {
                full_name: Some("Rui".into()),
                ..Default::default()
            })
        );
    }
}
