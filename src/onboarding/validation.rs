//! Step validity predicates and per-field hints.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::model::CandidateDraft;
use super::state::WizardStep;

pub const MIN_AGE: i64 = 12;
pub const MAX_AGE: i64 = 100;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Basic `local@domain.tld` shape check on the raw input.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

pub fn is_valid_age(age: Option<i64>) -> bool {
    matches!(age, Some(a) if (MIN_AGE..=MAX_AGE).contains(&a))
}

fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn personal_valid(draft: &CandidateDraft) -> bool {
    is_filled(&draft.first_name) && is_filled(&draft.last_name) && is_valid_age(draft.age)
}

pub fn contact_valid(draft: &CandidateDraft) -> bool {
    is_valid_email(&draft.email)
        && is_filled(&draft.phone_number)
        && is_filled(&draft.address)
        && is_filled(&draft.resume_link)
}

/// Whether the user may leave `step` by advancing.
pub fn can_leave(step: WizardStep, draft: &CandidateDraft) -> bool {
    match step {
        WizardStep::Personal => personal_valid(draft),
        WizardStep::Contact => contact_valid(draft),
        WizardStep::Resume | WizardStep::Experience | WizardStep::Projects | WizardStep::Review => {
            true
        }
    }
}

/// A hint attached to one input of the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldIssue {
    fn required(field: &'static str) -> Self {
        Self {
            field,
            message: "Required",
        }
    }
}

/// Hints for every input on `step` that currently blocks advancing.
pub fn step_issues(step: WizardStep, draft: &CandidateDraft) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    match step {
        WizardStep::Personal => {
            if !is_filled(&draft.first_name) {
                issues.push(FieldIssue::required("firstName"));
            }
            if !is_filled(&draft.last_name) {
                issues.push(FieldIssue::required("lastName"));
            }
            if !is_valid_age(draft.age) {
                issues.push(FieldIssue {
                    field: "age",
                    message: "Enter age between 12 and 100",
                });
            }
        }
        WizardStep::Contact => {
            if !is_valid_email(&draft.email) {
                issues.push(FieldIssue {
                    field: "email",
                    message: "Enter a valid email",
                });
            }
            if !is_filled(&draft.phone_number) {
                issues.push(FieldIssue::required("phoneNumber"));
            }
            if !is_filled(&draft.address) {
                issues.push(FieldIssue::required("address"));
            }
            if !is_filled(&draft.resume_link) {
                issues.push(FieldIssue::required("resumeLink"));
            }
        }
        _ => {}
    }
    issues
}
