//! Async wizard operations that call the text-enhancement gateway.
//!
//! The session lock is held only to claim work and to merge results, never
//! across a gateway call, so other edits and enhancements keep flowing while a
//! request is in flight.

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::gateway::TextEnhancer;
use crate::wizard::enhance::EnhanceTarget;
use crate::wizard::session::{
    Advance, EnhanceInput, GenerationOutcome, WizardError, WizardSession,
};
use crate::wizard::step::Step;

/// Advances the wizard. From step3 this runs the cover letter and the analysis
/// concurrently and returns once both have settled.
pub async fn advance(
    session: &Mutex<WizardSession>,
    enhancer: &dyn TextEnhancer,
) -> Result<Step, WizardError> {
    let (id, snapshot) = {
        let mut guard = session.lock().await;
        match guard.advance()? {
            Advance::Moved(step) => return Ok(step),
            Advance::Generate(profile) => (guard.id(), profile),
        }
    };

    info!("Generating cover letter and analysis for session {id}");
    let (cover_letter, suggestions) = tokio::join!(
        enhancer.generate_cover_letter(&snapshot),
        enhancer.analyze(&snapshot)
    );

    let step = session
        .lock()
        .await
        .complete_generation(GenerationOutcome {
            cover_letter,
            suggestions,
        });
    Ok(step)
}

/// Runs one in-place enhancement. Returns whether the result was merged; a
/// stale result (the target was edited meanwhile) is dropped silently.
pub async fn enhance(
    session: &Mutex<WizardSession>,
    enhancer: &dyn TextEnhancer,
    target: EnhanceTarget,
) -> Result<bool, WizardError> {
    let ticket = session.lock().await.begin_enhancement(target)?;

    let result = match &ticket.input {
        EnhanceInput::Summary { draft, target_job } => {
            enhancer.summarize(draft, target_job).await
        }
        EnhanceInput::Experience { description, role } => {
            enhancer.improve_experience(description, role).await
        }
        EnhanceInput::Skills { skills } => enhancer.improve_skills(skills).await,
    };

    if let Err(e) = &result {
        warn!("Enhancement of '{}' failed: {e}", ticket.target);
    }

    session.lock().await.finish_enhancement(&ticket, result)
}
