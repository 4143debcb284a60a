//! Wizard steps and the linear transition table.
//!
//! ```text
//! onboarding → step1 → step2 → step3 → preview
//!      ←          ←       ←        ←
//! ```
//! Retreat moves exactly one step back; preview re-enters at step3.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Onboarding,
    Step1,
    Step2,
    Step3,
    Preview,
}

/// Number of form steps shown in the progress indicator.
pub const FORM_STEPS: u8 = 3;

impl Step {
    /// Target of `advance`, `None` once the preview is reached.
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Onboarding => Some(Step::Step1),
            Step::Step1 => Some(Step::Step2),
            Step::Step2 => Some(Step::Step3),
            Step::Step3 => Some(Step::Preview),
            Step::Preview => None,
        }
    }

    /// Target of `retreat`, `None` at onboarding.
    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Onboarding => None,
            Step::Step1 => Some(Step::Onboarding),
            Step::Step2 => Some(Step::Step1),
            Step::Step3 => Some(Step::Step2),
            Step::Preview => Some(Step::Step3),
        }
    }

    /// 1-based number of a form step.
    pub fn form_number(self) -> Option<u8> {
        match self {
            Step::Step1 => Some(1),
            Step::Step2 => Some(2),
            Step::Step3 => Some(3),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Step::Onboarding => "onboarding",
            Step::Step1 => "step1",
            Step::Step2 => "step2",
            Step::Step3 => "step3",
            Step::Preview => "preview",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
