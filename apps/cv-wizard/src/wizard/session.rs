//! Wizard session: owns the current step and the in-progress profile.
//!
//! All methods here are synchronous and never call the gateway. The two
//! effectful operations are split into begin/complete halves so the async
//! flows in `wizard::flow` can release the session lock while a call is in
//! flight.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::llm_client::LlmError;
use crate::models::patch::{ProfileEdit, ProfileError, ProfilePatch};
use crate::models::profile::{split_list, CandidateProfile, Suggestion};
use crate::wizard::enhance::{EnhanceTarget, EnhancementTracker};
use crate::wizard::sample::sample_profile;
use crate::wizard::step::Step;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Cannot {action} from step '{from}'")]
    InvalidTransition { from: Step, action: &'static str },

    #[error("Enhancement already running for '{0}'")]
    Busy(EnhanceTarget),

    #[error("Document generation is already running")]
    Generating,

    #[error("Nothing to enhance for '{0}'")]
    EmptyInput(EnhanceTarget),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("Text enhancement failed: {0}")]
    Gateway(#[from] LlmError),
}

/// Which rendering the preview shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewTab {
    #[default]
    Cv,
    Letter,
}

/// Result of `advance`.
#[derive(Debug)]
pub enum Advance {
    /// Plain move, already applied.
    Moved(Step),
    /// step3 → preview: run both generation calls on this snapshot, then
    /// hand the results to `complete_generation`.
    Generate(Box<CandidateProfile>),
}

/// Independent results of the two generation calls.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub cover_letter: Result<String, LlmError>,
    pub suggestions: Result<Vec<Suggestion>, LlmError>,
}

/// Input captured for one enhancement call.
#[derive(Debug, Clone, PartialEq)]
pub enum EnhanceInput {
    Summary { draft: String, target_job: String },
    Experience { description: String, role: String },
    Skills { skills: Vec<String> },
}

#[derive(Debug, Clone)]
pub struct EnhancementTicket {
    pub target: EnhanceTarget,
    pub token: u64,
    pub input: EnhanceInput,
}

/// Serializable view returned by the JSON API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub step: Step,
    pub is_generating: bool,
    pub tab: PreviewTab,
    pub edit_mode: bool,
    pub busy: Vec<EnhanceTarget>,
    pub profile: CandidateProfile,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct WizardSession {
    id: Uuid,
    step: Step,
    profile: CandidateProfile,
    is_generating: bool,
    tab: PreviewTab,
    edit_mode: bool,
    enhancements: EnhancementTracker,
    created_at: DateTime<Utc>,
}

impl WizardSession {
    /// Starts at onboarding with an empty profile, merged with `initial_patch`
    /// when the host resolved one (prefill).
    pub fn new(initial_patch: Option<ProfilePatch>) -> Self {
        let mut profile = CandidateProfile::default();
        if let Some(patch) = initial_patch {
            profile.merge(patch);
        }
        Self {
            id: Uuid::new_v4(),
            step: Step::Onboarding,
            profile,
            is_generating: false,
            tab: PreviewTab::Cv,
            edit_mode: false,
            enhancements: EnhancementTracker::default(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> &CandidateProfile {
        &self.profile
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn tab(&self) -> PreviewTab {
        self.tab
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn busy_targets(&self) -> Vec<EnhanceTarget> {
        self.enhancements.busy_targets()
    }

    // ────────────────────────────────────────────────────────────────────────
    // Transitions
    // ────────────────────────────────────────────────────────────────────────

    /// Moves one step forward. From step3 the move is deferred: the caller gets
    /// a profile snapshot to generate from and `is_generating` is raised.
    pub fn advance(&mut self) -> Result<Advance, WizardError> {
        if self.is_generating {
            return Err(WizardError::Generating);
        }
        let next = self.step.next().ok_or(WizardError::InvalidTransition {
            from: self.step,
            action: "advance",
        })?;

        if next == Step::Preview {
            self.is_generating = true;
            return Ok(Advance::Generate(Box::new(self.profile.clone())));
        }

        self.step = next;
        Ok(Advance::Moved(next))
    }

    /// Merges whatever generation produced and enters the preview.
    ///
    /// Each artifact is merged on its own: a failed call leaves its artifact as
    /// it was and never discards the other one. If the user left step3 while
    /// generation ran, the artifacts are kept but the step is not changed.
    pub fn complete_generation(&mut self, outcome: GenerationOutcome) -> Step {
        match outcome.cover_letter {
            Ok(letter) => self.profile.cover_letter = Some(letter),
            Err(e) => error!("Cover letter generation failed for session {}: {e}", self.id),
        }
        match outcome.suggestions {
            Ok(suggestions) => self.profile.ai_suggestions = Some(suggestions),
            Err(e) => error!("CV analysis failed for session {}: {e}", self.id),
        }

        self.is_generating = false;
        if self.step == Step::Step3 {
            self.step = Step::Preview;
            self.tab = PreviewTab::Cv;
        }
        self.step
    }

    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        let previous = self.step.previous().ok_or(WizardError::InvalidTransition {
            from: self.step,
            action: "retreat",
        })?;
        self.step = previous;
        Ok(previous)
    }

    /// Onboarding shortcut: swaps in the sample profile and jumps to preview.
    pub fn quick_test(&mut self) -> Result<(), WizardError> {
        if self.step != Step::Onboarding {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                action: "quick-test",
            });
        }
        self.profile = sample_profile();
        self.enhancements.invalidate_all();
        self.step = Step::Preview;
        self.tab = PreviewTab::Cv;
        info!("Session {} loaded the sample profile", self.id);
        Ok(())
    }

    pub fn set_preview(&mut self, tab: Option<PreviewTab>, edit_mode: Option<bool>) {
        if let Some(tab) = tab {
            self.tab = tab;
        }
        if let Some(edit_mode) = edit_mode {
            self.edit_mode = edit_mode;
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Edits
    // ────────────────────────────────────────────────────────────────────────

    /// The single mutation entry point for user edits.
    pub fn apply(&mut self, edit: ProfileEdit) -> Result<(), WizardError> {
        self.enhancements.invalidate_touched(&edit);
        self.profile.apply(edit)?;
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Enhancements
    // ────────────────────────────────────────────────────────────────────────

    /// Claims `target` and captures the text to send to the gateway.
    pub fn begin_enhancement(
        &mut self,
        target: EnhanceTarget,
    ) -> Result<EnhancementTicket, WizardError> {
        let input = match &target {
            EnhanceTarget::Summary => {
                if self.profile.summary.trim().is_empty() {
                    return Err(WizardError::EmptyInput(target));
                }
                EnhanceInput::Summary {
                    draft: self.profile.summary.clone(),
                    target_job: self.profile.target_job.clone(),
                }
            }
            EnhanceTarget::Skills => EnhanceInput::Skills {
                skills: self.profile.skills.clone(),
            },
            EnhanceTarget::Experience { id } => {
                let row = self
                    .profile
                    .experience(id)
                    .ok_or_else(|| ProfileError::UnknownRow {
                        kind: "experience",
                        id: id.clone(),
                    })?;
                EnhanceInput::Experience {
                    description: row.description.clone(),
                    role: row.role.clone(),
                }
            }
        };

        let token = self
            .enhancements
            .begin(&target)
            .ok_or_else(|| WizardError::Busy(target.clone()))?;

        Ok(EnhancementTicket {
            target,
            token,
            input,
        })
    }

    /// Releases the ticket and merges `result` into the target if the ticket is
    /// still current. Returns whether anything was written.
    pub fn finish_enhancement(
        &mut self,
        ticket: &EnhancementTicket,
        result: Result<String, LlmError>,
    ) -> Result<bool, WizardError> {
        let current = self.enhancements.finish(&ticket.target, ticket.token);
        let text = result?;

        if !current {
            debug!(
                "Dropping stale enhancement for '{}' in session {}",
                ticket.target, self.id
            );
            return Ok(false);
        }

        let edit = match &ticket.target {
            EnhanceTarget::Summary => ProfileEdit::Patch(ProfilePatch {
                summary: Some(text),
                ..Default::default()
            }),
            EnhanceTarget::Skills => ProfileEdit::Patch(ProfilePatch {
                skills: Some(split_list(&text)),
                ..Default::default()
            }),
            EnhanceTarget::Experience { id } => ProfileEdit::UpdateExperience {
                id: id.clone(),
                field: crate::models::patch::ExperienceField::Description,
                value: text,
            },
        };

        self.profile.apply(edit)?;
        Ok(true)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            step: self.step,
            is_generating: self.is_generating,
            tab: self.tab,
            edit_mode: self.edit_mode,
            busy: self.busy_targets(),
            profile: self.profile.clone(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patch::ExperienceField;
    use crate::models::profile::{CvLayout, Experience};

    fn session_at(step: Step) -> WizardSession {
        let mut session = WizardSession::new(None);
        while session.step() != step {
            match session.advance().unwrap() {
                Advance::Moved(_) => {}
                Advance::Generate(_) => {
                    session.complete_generation(GenerationOutcome {
                        cover_letter: Ok(String::new()),
                        suggestions: Ok(vec![]),
                    });
                }
            }
        }
        session
    }

    fn with_experience(session: &mut WizardSession) {
        session
            .apply(ProfileEdit::Patch(ProfilePatch {
                experiences: Some(vec![Experience {
                    id: "1".into(),
                    role: "Engineer".into(),
                    company: "Acme".into(),
                    description: "did stuff".into(),
                    ..Default::default()
                }]),
                ..Default::default()
            }))
            .unwrap();
    }

    #[test]
    fn test_new_session_applies_initial_patch() {
        let session = WizardSession::new(Some(ProfilePatch {
            full_name: Some("Joana".into()),
            target_job: Some("PM".into()),
            layout: Some(CvLayout::Modern),
            ..Default::default()
        }));
        assert_eq!(session.step(), Step::Onboarding);
        assert_eq!(session.profile().full_name, "Joana");
        assert_eq!(session.profile().target_job, "PM");
        assert_eq!(session.profile().layout, CvLayout::Modern);
        assert_eq!(session.profile().email, "");
        assert!(session.profile().cover_letter.is_none());
    }

    #[test]
    fn test_advance_then_retreat_restores_step_and_record() {
        for step in [Step::Step1, Step::Step2, Step::Step3] {
            let mut session = session_at(step);
            with_experience(&mut session);
            let before = session.profile().clone();
            let previous = session.retreat().unwrap();
            assert_eq!(previous.next(), Some(step));
            match session.advance().unwrap() {
                Advance::Moved(s) => assert_eq!(s, step),
                Advance::Generate(_) => panic!("inner step must not generate"),
            }
            assert_eq!(session.profile(), &before);
        }
    }

    #[test]
    fn test_retreat_from_onboarding_is_rejected() {
        let mut session = WizardSession::new(None);
        assert!(matches!(
            session.retreat(),
            Err(WizardError::InvalidTransition { from: Step::Onboarding, .. })
        ));
    }

    #[test]
    fn test_advance_from_preview_is_rejected() {
        let mut session = session_at(Step::Preview);
        assert!(session.advance().is_err());
        assert_eq!(session.retreat().unwrap(), Step::Step3);
    }

    #[test]
    fn test_step3_advance_defers_until_generation_completes() {
        let mut session = session_at(Step::Step3);
        let Advance::Generate(snapshot) = session.advance().unwrap() else {
            panic!("expected generation");
        };
        assert_eq!(*snapshot, *session.profile());
        assert!(session.is_generating());
        assert_eq!(session.step(), Step::Step3);
        assert!(matches!(session.advance(), Err(WizardError::Generating)));
    }

    #[test]
    fn test_partial_generation_failure_keeps_successful_artifact() {
        let mut session = session_at(Step::Step3);
        session.advance().unwrap();
        let step = session.complete_generation(GenerationOutcome {
            cover_letter: Err(LlmError::EmptyContent),
            suggestions: Ok(vec![]),
        });
        assert_eq!(step, Step::Preview);
        assert!(!session.is_generating());
        assert!(session.profile().cover_letter.is_none());
        assert_eq!(session.profile().ai_suggestions, Some(vec![]));
    }

    #[test]
    fn test_failed_regeneration_keeps_previous_letter() {
        let mut session = session_at(Step::Preview);
        session
            .apply(ProfileEdit::Patch(ProfilePatch {
                cover_letter: Some("Primeira carta".into()),
                ..Default::default()
            }))
            .unwrap();
        session.retreat().unwrap();
        session.advance().unwrap();
        session.complete_generation(GenerationOutcome {
            cover_letter: Err(LlmError::EmptyContent),
            suggestions: Err(LlmError::EmptyContent),
        });
        assert_eq!(
            session.profile().cover_letter.as_deref(),
            Some("Primeira carta")
        );
    }

    #[test]
    fn test_generation_after_user_left_step3_does_not_jump() {
        let mut session = session_at(Step::Step3);
        session.advance().unwrap();
        session.retreat().unwrap();
        let step = session.complete_generation(GenerationOutcome {
            cover_letter: Ok("Carta".into()),
            suggestions: Ok(vec![]),
        });
        assert_eq!(step, Step::Step2);
        assert_eq!(session.profile().cover_letter.as_deref(), Some("Carta"));
    }

    #[test]
    fn test_quick_test_only_from_onboarding() {
        let mut session = WizardSession::new(None);
        session.quick_test().unwrap();
        assert_eq!(session.step(), Step::Preview);
        assert_eq!(session.tab(), PreviewTab::Cv);
        assert_eq!(session.profile().layout, CvLayout::Europass);
        assert_eq!(
            session.profile().ai_suggestions.as_ref().map(Vec::len),
            Some(4)
        );

        let mut later = session_at(Step::Step1);
        assert!(later.quick_test().is_err());
        assert_eq!(later.step(), Step::Step1);
    }

    #[test]
    fn test_enhancing_busy_target_is_rejected() {
        let mut session = session_at(Step::Preview);
        with_experience(&mut session);
        let target = EnhanceTarget::experience("1");
        session.begin_enhancement(target.clone()).unwrap();
        assert!(matches!(
            session.begin_enhancement(target),
            Err(WizardError::Busy(_))
        ));
        assert!(session.begin_enhancement(EnhanceTarget::Skills).is_ok());
    }

    #[test]
    fn test_enhancement_rewrites_only_description() {
        let mut session = session_at(Step::Preview);
        with_experience(&mut session);
        let ticket = session
            .begin_enhancement(EnhanceTarget::experience("1"))
            .unwrap();
        assert_eq!(
            ticket.input,
            EnhanceInput::Experience {
                description: "did stuff".into(),
                role: "Engineer".into()
            }
        );
        assert!(session
            .finish_enhancement(&ticket, Ok("Delivered results".into()))
            .unwrap());
        let row = &session.profile().experiences[0];
        assert_eq!(row.description, "Delivered results");
        assert_eq!(row.id, "1");
        assert_eq!(row.company, "Acme");
        assert_eq!(row.role, "Engineer");
    }

    #[test]
    fn test_failed_enhancement_clears_busy_and_leaves_text() {
        let mut session = session_at(Step::Preview);
        with_experience(&mut session);
        let ticket = session
            .begin_enhancement(EnhanceTarget::experience("1"))
            .unwrap();
        let result = session.finish_enhancement(&ticket, Err(LlmError::EmptyContent));
        assert!(matches!(result, Err(WizardError::Gateway(_))));
        assert!(session.busy_targets().is_empty());
        assert_eq!(session.profile().experiences[0].description, "did stuff");
    }

    #[test]
    fn test_manual_edit_during_enhancement_wins() {
        let mut session = session_at(Step::Preview);
        with_experience(&mut session);
        let ticket = session
            .begin_enhancement(EnhanceTarget::experience("1"))
            .unwrap();
        session
            .apply(ProfileEdit::UpdateExperience {
                id: "1".into(),
                field: ExperienceField::Description,
                value: "typed by hand".into(),
            })
            .unwrap();
        assert!(!session
            .finish_enhancement(&ticket, Ok("stale rewrite".into()))
            .unwrap());
        assert_eq!(session.profile().experiences[0].description, "typed by hand");
    }

    #[test]
    fn test_summary_enhancement_needs_a_draft() {
        let mut session = session_at(Step::Step3);
        assert!(matches!(
            session.begin_enhancement(EnhanceTarget::Summary),
            Err(WizardError::EmptyInput(EnhanceTarget::Summary))
        ));
    }

    #[test]
    fn test_skills_enhancement_resplits_result() {
        let mut session = session_at(Step::Preview);
        let ticket = session.begin_enhancement(EnhanceTarget::Skills).unwrap();
        session
            .finish_enhancement(&ticket, Ok("Gestão Lean, SAP S/4HANA ,Power BI".into()))
            .unwrap();
        assert_eq!(
            session.profile().skills,
            vec!["Gestão Lean", "SAP S/4HANA", "Power BI"]
        );
    }

    #[test]
    fn test_unknown_experience_cannot_be_enhanced() {
        let mut session = session_at(Step::Preview);
        assert!(matches!(
            session.begin_enhancement(EnhanceTarget::experience("nope")),
            Err(WizardError::Profile(ProfileError::UnknownRow { .. }))
        ));
        assert!(session.busy_targets().is_empty());
    }
}
