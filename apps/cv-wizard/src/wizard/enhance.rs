//! In-place enhancement bookkeeping.
//!
//! Each enhanceable target (the summary, the skills block, one experience row)
//! has at most one call in flight. Every call gets a monotonic token; the result
//! is merged only while that token is still the current one for its target.
//! Direct edits and row removals invalidate the target, so a slow response can
//! never overwrite newer text.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::patch::{ExperienceField, ProfileEdit};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnhanceTarget {
    Summary,
    Skills,
    Experience { id: String },
}

impl EnhanceTarget {
    pub fn experience(id: &str) -> Self {
        EnhanceTarget::Experience { id: id.to_string() }
    }

    /// Whether applying `edit` rewrites the text this target enhances.
    pub fn is_touched_by(&self, edit: &ProfileEdit) -> bool {
        match (self, edit) {
            (EnhanceTarget::Summary, ProfileEdit::Patch(p)) => p.summary.is_some(),
            (EnhanceTarget::Skills, ProfileEdit::Patch(p)) => p.skills.is_some(),
            (EnhanceTarget::Skills, ProfileEdit::SetSkillsText { .. }) => true,
            (EnhanceTarget::Experience { .. }, ProfileEdit::Patch(p)) => p.experiences.is_some(),
            (
                EnhanceTarget::Experience { id },
                ProfileEdit::UpdateExperience {
                    id: edited,
                    field: ExperienceField::Description,
                    ..
                },
            ) => id == edited,
            (EnhanceTarget::Experience { id }, ProfileEdit::RemoveExperience { id: removed }) => {
                id == removed
            }
            _ => false,
        }
    }
}

/// Matches the enhancement endpoint suffix: `summary`, `skills`, `experiences/<id>`.
impl fmt::Display for EnhanceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnhanceTarget::Summary => f.write_str("summary"),
            EnhanceTarget::Skills => f.write_str("skills"),
            EnhanceTarget::Experience { id } => write!(f, "experiences/{id}"),
        }
    }
}

/// Per-target busy map plus the token counter.
#[derive(Debug, Default)]
pub struct EnhancementTracker {
    next_token: u64,
    in_flight: HashMap<EnhanceTarget, u64>,
}

impl EnhancementTracker {
    /// Marks `target` busy and returns its token, or `None` if it is already busy.
    pub fn begin(&mut self, target: &EnhanceTarget) -> Option<u64> {
        if self.in_flight.contains_key(target) {
            return None;
        }
        self.next_token += 1;
        self.in_flight.insert(target.clone(), self.next_token);
        Some(self.next_token)
    }

    /// Clears the busy entry if `token` still owns it. Returns whether the
    /// caller's result is current and may be merged.
    pub fn finish(&mut self, target: &EnhanceTarget, token: u64) -> bool {
        match self.in_flight.get(target) {
            Some(current) if *current == token => {
                self.in_flight.remove(target);
                true
            }
            _ => false,
        }
    }

    /// Drops the in-flight entry of every target the edit rewrites.
    pub fn invalidate_touched(&mut self, edit: &ProfileEdit) {
        self.in_flight.retain(|target, _| !target.is_touched_by(edit));
    }

    pub fn invalidate_all(&mut self) {
        self.in_flight.clear();
    }

    pub fn busy_targets(&self) -> Vec<EnhanceTarget> {
        self.in_flight.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patch::ProfilePatch;

    #[test]
    fn test_same_target_cannot_begin_twice() {
        let mut tracker = EnhancementTracker::default();
        let target = EnhanceTarget::experience("1");
        assert!(tracker.begin(&target).is_some());
        assert!(tracker.begin(&target).is_none());
    }

    #[test]
    fn test_different_targets_run_independently() {
        let mut tracker = EnhancementTracker::default();
        let a = tracker.begin(&EnhanceTarget::experience("1")).unwrap();
        let b = tracker.begin(&EnhanceTarget::experience("2")).unwrap();
        let c = tracker.begin(&EnhanceTarget::Skills).unwrap();
        assert!(a < b && b < c);
        assert_eq!(tracker.busy_targets().len(), 3);
    }

    #[test]
    fn test_finish_clears_busy_entry() {
        let mut tracker = EnhancementTracker::default();
        let token = tracker.begin(&EnhanceTarget::Summary).unwrap();
        assert!(tracker.finish(&EnhanceTarget::Summary, token));
        assert!(tracker.busy_targets().is_empty());
        assert!(tracker.begin(&EnhanceTarget::Summary).is_some());
    }

    #[test]
    fn test_stale_token_does_not_clear_newer_call() {
        let mut tracker = EnhancementTracker::default();
        let target = EnhanceTarget::experience("1");
        let old = tracker.begin(&target).unwrap();

        tracker.invalidate_touched(&ProfileEdit::UpdateExperience {
            id: "1".into(),
            field: ExperienceField::Description,
            value: "typed by hand".into(),
        });
        let new = tracker.begin(&target).unwrap();

        assert!(!tracker.finish(&target, old));
        assert_eq!(tracker.busy_targets(), vec![target.clone()]);
        assert!(tracker.finish(&target, new));
    }

    #[test]
    fn test_unrelated_edits_do_not_invalidate() {
        let mut tracker = EnhancementTracker::default();
        let token = tracker.begin(&EnhanceTarget::experience("1")).unwrap();
        tracker.invalidate_touched(&ProfileEdit::UpdateExperience {
            id: "1".into(),
            field: ExperienceField::Company,
            value: "Acme".into(),
        });
        tracker.invalidate_touched(&ProfileEdit::Patch(ProfilePatch {
            summary: Some("novo".into()),
            ..Default::default()
        }));
        assert!(tracker.finish(&EnhanceTarget::experience("1"), token));
    }

    #[test]
    fn test_target_display_matches_endpoint_suffix() {
        assert_eq!(EnhanceTarget::Summary.to_string(), "summary");
        assert_eq!(
            EnhanceTarget::experience("abc").to_string(),
            "experiences/abc"
        );
    }
}
