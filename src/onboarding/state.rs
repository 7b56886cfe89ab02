//! Wizard step state machine: tracks which step the user is on.

use serde::{Deserialize, Serialize};

use super::model::CandidateDraft;
use super::validation::{FieldIssue, can_leave, step_issues};

/// The steps of the candidate onboarding wizard.
///
/// Progresses linearly: Personal → Contact → Resume → Experience →
/// Projects → Review. Submitting from Review leaves the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Personal,
    Contact,
    Resume,
    Experience,
    Projects,
    Review,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Personal,
        WizardStep::Contact,
        WizardStep::Resume,
        WizardStep::Experience,
        WizardStep::Projects,
        WizardStep::Review,
    ];

    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Only adjacent moves are allowed, forward or back.
    pub fn can_transition_to(&self, target: WizardStep) -> bool {
        self.next() == Some(target) || self.previous() == Some(target)
    }

    /// Whether this step is terminal (submission happens here).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Review)
    }

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Personal => Some(Contact),
            Contact => Some(Resume),
            Resume => Some(Experience),
            Experience => Some(Projects),
            Projects => Some(Review),
            Review => None,
        }
    }

    /// Get the previous step, if any.
    pub fn previous(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Personal => None,
            Contact => Some(Personal),
            Resume => Some(Contact),
            Experience => Some(Resume),
            Projects => Some(Experience),
            Review => Some(Projects),
        }
    }

    /// Zero-based position in the wizard.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Label shown in the stepper.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Personal => "Basic Info",
            Self::Contact => "Contact",
            Self::Resume => "Summary & Skills",
            Self::Experience => "Experience",
            Self::Projects => "Projects",
            Self::Review => "Review",
        }
    }

    /// Fraction of the wizard reached when this step is active, in (0, 1].
    pub fn progress(&self) -> f32 {
        (self.index() + 1) as f32 / Self::ALL.len() as f32
    }

    /// Status of `self` in the stepper while `current` is active.
    pub fn status_relative_to(&self, current: WizardStep) -> StepStatus {
        match self.index().cmp(&current.index()) {
            std::cmp::Ordering::Less => StepStatus::Done,
            std::cmp::Ordering::Equal => StepStatus::Active,
            std::cmp::Ordering::Greater => StepStatus::Pending,
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Personal
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Personal => "personal",
            Self::Contact => "contact",
            Self::Resume => "resume",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

/// Where a step sits relative to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Done,
    Active,
    Pending,
}

/// One entry of the rendered stepper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepperEntry {
    pub step: WizardStep,
    pub label: &'static str,
    pub status: StepStatus,
}

/// Stepper entries for all steps while `current` is active.
pub fn stepper(current: WizardStep) -> Vec<StepperEntry> {
    WizardStep::ALL
        .iter()
        .map(|step| StepperEntry {
            step: *step,
            label: step.label(),
            status: step.status_relative_to(current),
        })
        .collect()
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepChange {
    Moved { from: WizardStep, to: WizardStep },
    /// The current step's predicate failed; these inputs need attention.
    Blocked { issues: Vec<FieldIssue> },
    /// Nowhere to go (back from the first step, forward from review).
    Unchanged,
}

/// Everything one wizard session holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub draft: CandidateDraft,
    /// Message from the last failed submission, shown until the next attempt.
    pub last_error: Option<String>,
}

impl WizardState {
    /// Whether the current step's predicate holds.
    pub fn can_advance(&self) -> bool {
        !self.step.is_terminal() && can_leave(self.step, &self.draft)
    }

    /// Move forward if the current step is valid.
    pub fn advance(&mut self) -> StepChange {
        let Some(next) = self.step.next() else {
            return StepChange::Unchanged;
        };
        if !can_leave(self.step, &self.draft) {
            return StepChange::Blocked {
                issues: step_issues(self.step, &self.draft),
            };
        }
        let from = self.step;
        self.step = next;
        StepChange::Moved { from, to: next }
    }

    /// Move back one step. Never validated.
    pub fn retreat(&mut self) -> StepChange {
        match self.step.previous() {
            Some(prev) => {
                let from = self.step;
                self.step = prev;
                StepChange::Moved { from, to: prev }
            }
            None => StepChange::Unchanged,
        }
    }

    /// Clear the draft and return to the first step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
