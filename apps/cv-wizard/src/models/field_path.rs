//! Field paths: textual addresses of editable slots.
//!
//! Every inline-editable control the renderer emits carries a `FieldPath` in its
//! `data-path` attribute; the field-edit endpoint parses it back and turns the
//! submitted value into a `ProfileEdit`. Format:
//!
//! ```text
//! full_name | email | ... | skills | cover_letter | layout
//! experiences/<id>/<field>
//! education/<id>/<field>
//! languages/<id>/<field>
//! ```

use std::fmt;

use crate::models::patch::{
    EducationField, ExperienceField, LanguageField, ProfileEdit, ProfileError, ProfilePatch,
};
use crate::models::profile::CvLayout;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    FullName,
    Email,
    Phone,
    Address,
    Nationality,
    Profession,
    City,
    ProfilePhoto,
    Summary,
    PersonalHistory,
    TargetJob,
    Skills,
    Qualities,
    CoverLetter,
    Layout,
    Experience { id: String, field: ExperienceField },
    Education { id: String, field: EducationField },
    Language { id: String, field: LanguageField },
}

const SCALARS: [(FieldPath, &str); 15] = [
    (FieldPath::FullName, "full_name"),
    (FieldPath::Email, "email"),
    (FieldPath::Phone, "phone"),
    (FieldPath::Address, "address"),
    (FieldPath::Nationality, "nationality"),
    (FieldPath::Profession, "profession"),
    (FieldPath::City, "city"),
    (FieldPath::ProfilePhoto, "profile_photo"),
    (FieldPath::Summary, "summary"),
    (FieldPath::PersonalHistory, "personal_history"),
    (FieldPath::TargetJob, "target_job"),
    (FieldPath::Skills, "skills"),
    (FieldPath::Qualities, "qualities"),
    (FieldPath::CoverLetter, "cover_letter"),
    (FieldPath::Layout, "layout"),
];

impl FieldPath {
    pub fn experience(id: &str, field: ExperienceField) -> Self {
        FieldPath::Experience {
            id: id.to_string(),
            field,
        }
    }

    pub fn education(id: &str, field: EducationField) -> Self {
        FieldPath::Education {
            id: id.to_string(),
            field,
        }
    }

    pub fn language(id: &str, field: LanguageField) -> Self {
        FieldPath::Language {
            id: id.to_string(),
            field,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ProfileError> {
        let invalid = || ProfileError::InvalidPath(raw.to_string());

        if let Some((path, _)) = SCALARS.iter().find(|(_, name)| *name == raw) {
            return Ok(path.clone());
        }

        let (collection, rest) = raw.split_once('/').ok_or_else(invalid)?;
        let (id, field) = rest.rsplit_once('/').ok_or_else(invalid)?;
        if id.is_empty() {
            return Err(invalid());
        }

        match collection {
            "experiences" => ExperienceField::parse(field)
                .map(|f| FieldPath::experience(id, f))
                .ok_or_else(invalid),
            "education" => EducationField::parse(field)
                .map(|f| FieldPath::education(id, f))
                .ok_or_else(invalid),
            "languages" => LanguageField::parse(field)
                .map(|f| FieldPath::language(id, f))
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    /// Converts a submitted control value into the edit for this slot.
    pub fn into_edit(self, value: String) -> Result<ProfileEdit, ProfileError> {
        let mut patch = ProfilePatch::default();
        match self {
            FieldPath::FullName => patch.full_name = Some(value),
            FieldPath::Email => patch.email = Some(value),
            FieldPath::Phone => patch.phone = Some(value),
            FieldPath::Address => patch.address = Some(value),
            FieldPath::Nationality => patch.nationality = Some(value),
            FieldPath::Profession => patch.profession = Some(value),
            FieldPath::City => patch.city = Some(value),
            FieldPath::ProfilePhoto => patch.profile_photo = Some(value),
            FieldPath::Summary => patch.summary = Some(value),
            FieldPath::PersonalHistory => patch.personal_history = Some(value),
            FieldPath::TargetJob => patch.target_job = Some(value),
            FieldPath::CoverLetter => patch.cover_letter = Some(value),
            FieldPath::Layout => {
                let layout = CvLayout::parse(&value).ok_or_else(|| ProfileError::InvalidValue {
                    field: "layout",
                    message: format!("'{value}' is not one of classic, europass, modern"),
                })?;
                patch.layout = Some(layout);
            }
            FieldPath::Skills => return Ok(ProfileEdit::SetSkillsText { text: value }),
            FieldPath::Qualities => return Ok(ProfileEdit::SetQualitiesText { text: value }),
            FieldPath::Experience { id, field } => {
                return Ok(ProfileEdit::UpdateExperience { id, field, value })
            }
            FieldPath::Education { id, field } => {
                return Ok(ProfileEdit::UpdateEducation { id, field, value })
            }
            FieldPath::Language { id, field } => {
                return Ok(ProfileEdit::UpdateLanguage { id, field, value })
            }
        }
        Ok(ProfileEdit::Patch(patch))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Experience { id, field } => write!(f, "experiences/{id}/{}", field.as_str()),
            FieldPath::Education { id, field } => write!(f, "education/{id}/{}", field.as_str()),
            FieldPath::Language { id, field } => write!(f, "languages/{id}/{}", field.as_str()),
            scalar => {
                let name = SCALARS
                    .iter()
                    .find(|(path, _)| path == scalar)
                    .map(|(_, name)| *name)
                    .unwrap_or_default();
                f.write_str(name)
            }
        }
    }
}
