//! Candidate onboarding wizard.
//!
//! A linear, six-step form that assembles a `CandidateDraft`, gates each
//! step on its required fields, and normalizes the draft into the payload
//! the candidate API accepts. `OnboardingManager` owns one session.

pub mod keys;
pub mod manager;
pub mod model;
pub mod payload;
pub mod review;
pub mod routes;
pub mod state;
pub mod validation;

pub use manager::{OnboardingManager, WizardStatus};
pub use model::{CandidateDraft, ExperienceDraft, FieldList, ProjectDraft, ResumeDraft, TextField};
pub use payload::{CandidatePayload, normalize};
pub use routes::{OnboardingRouteState, onboarding_routes};
pub use state::{StepChange, WizardState, WizardStep};
