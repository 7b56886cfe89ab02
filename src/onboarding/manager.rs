//! OnboardingManager owns one wizard session: draft, step, and the
//! single in-flight submission.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::api::{CandidateApi, CreatedCandidate};
use crate::error::{Error, WizardError};

use super::keys::{KeyChord, WizardCommand, command_for, focus_target};
use super::model::{CandidateDraft, TextField};
use super::payload::normalize;
use super::review::ReviewSummary;
use super::state::{StepChange, StepperEntry, WizardState, WizardStep, stepper};
use super::validation::{FieldIssue, step_issues};

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Snapshot of the session for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct WizardStatus {
    pub session_id: Uuid,
    pub step: WizardStep,
    pub label: &'static str,
    pub progress: f32,
    pub stepper: Vec<StepperEntry>,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub issues: Vec<FieldIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<&'static str>,
    pub draft: CandidateDraft,
    pub submitting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Coordinates one onboarding wizard session against the candidate API.
pub struct OnboardingManager {
    id: Uuid,
    api: Arc<dyn CandidateApi>,
    state: Arc<RwLock<WizardState>>,
    submitting: AtomicBool,
}

impl OnboardingManager {
    pub fn new(api: Arc<dyn CandidateApi>) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, "Onboarding session opened");
        Self {
            id,
            api,
            state: Arc::new(RwLock::new(WizardState::default())),
            submitting: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn current_step(&self) -> WizardStep {
        self.state.read().await.step
    }

    pub async fn draft(&self) -> CandidateDraft {
        self.state.read().await.draft.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Apply an edit to the draft. The step is left alone.
    pub async fn update<F>(&self, edit: F)
    where
        F: FnOnce(&mut CandidateDraft),
    {
        let mut state = self.state.write().await;
        edit(&mut state.draft);
    }

    pub async fn set_text(&self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        self.update(|draft| draft.set_text(field, value)).await;
    }

    pub async fn set_age_input(&self, input: &str) {
        self.update(|draft| draft.set_age_input(input)).await;
    }

    /// Replace the whole draft, e.g. from a UI that keeps its own copy.
    pub async fn replace_draft(&self, draft: CandidateDraft) {
        self.state.write().await.draft = draft;
    }

    pub async fn advance(&self) -> StepChange {
        let mut state = self.state.write().await;
        let change = state.advance();
        self.log_change(&change);
        change
    }

    pub async fn retreat(&self) -> StepChange {
        let mut state = self.state.write().await;
        let change = state.retreat();
        self.log_change(&change);
        change
    }

    /// "Clear all": empty draft, first step, no surfaced error.
    pub async fn reset(&self) {
        self.state.write().await.reset();
        tracing::debug!(session = %self.id, "Wizard reset");
    }

    /// Run the shortcut bound to `chord`, if any.
    pub async fn handle_key(&self, chord: KeyChord) -> Option<StepChange> {
        match command_for(chord)? {
            WizardCommand::Advance => Some(self.advance().await),
            WizardCommand::Retreat => Some(self.retreat().await),
        }
    }

    pub async fn status(&self) -> WizardStatus {
        let state = self.state.read().await;
        WizardStatus {
            session_id: self.id,
            step: state.step,
            label: state.step.label(),
            progress: state.step.progress(),
            stepper: stepper(state.step),
            can_advance: state.can_advance(),
            can_retreat: state.step.previous().is_some(),
            issues: step_issues(state.step, &state.draft),
            focus: focus_target(state.step),
            draft: state.draft.clone(),
            submitting: self.is_submitting(),
            last_error: state.last_error.clone(),
        }
    }

    pub async fn review(&self) -> ReviewSummary {
        ReviewSummary::from_draft(&self.state.read().await.draft)
    }

    /// Normalize the draft and send it to the candidate API.
    ///
    /// Only the review step submits; any other step fails with
    /// [`WizardError::NotAtReview`] without touching the API.
    /// At most one submission runs per session; a second call while one is
    /// in flight fails with [`WizardError::AlreadySubmitting`] without
    /// touching the API. On success the session is cleared back to the
    /// first step. On failure the draft and step are kept and the message
    /// is surfaced through [`WizardStatus::last_error`].
    pub async fn submit(&self) -> Result<CreatedCandidate, Error> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!(session = %self.id, "Submit ignored, already in flight");
            return Err(WizardError::AlreadySubmitting.into());
        }
        let _in_flight = InFlight(&self.submitting);

        let payload = {
            let mut state = self.state.write().await;
            if !state.step.is_terminal() {
                tracing::debug!(session = %self.id, step = %state.step, "Submit outside review step");
                return Err(WizardError::NotAtReview { step: state.step }.into());
            }
            state.last_error = None;
            match normalize(&state.draft) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::debug!(session = %self.id, "Submit blocked by local validation");
                    state.last_error = Some(e.to_string());
                    return Err(e.into());
                }
            }
        };

        tracing::info!(
            session = %self.id,
            experience = payload.resume.experience.len(),
            projects = payload.resume.projects.len(),
            "Submitting candidate"
        );

        match self.api.create_candidate(&payload).await {
            Ok(created) => {
                self.state.write().await.reset();
                tracing::info!(session = %self.id, message = %created.message, "Candidate added");
                Ok(created)
            }
            Err(e) => {
                tracing::warn!(session = %self.id, status = ?e.status, "Candidate submission failed: {}", e);
                self.state.write().await.last_error = Some(e.message.clone());
                Err(e.into())
            }
        }
    }

    fn log_change(&self, change: &StepChange) {
        match change {
            StepChange::Moved { from, to } => {
                tracing::debug!(session = %self.id, %from, %to, "Wizard step changed");
            }
            StepChange::Blocked { issues } => {
                tracing::debug!(session = %self.id, issues = issues.len(), "Advance blocked");
            }
            StepChange::Unchanged => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::api::Candidate;
    use crate::error::{ApiError, SubmissionError};
    use crate::onboarding::keys::Key;
    use crate::onboarding::payload::CandidatePayload;

    /// Records payloads; optionally fails or waits for a release signal.
    #[derive(Default)]
    struct StubApi {
        calls: AtomicUsize,
        payloads: std::sync::Mutex<Vec<CandidatePayload>>,
        fail_with: Option<SubmissionError>,
        gate: Option<(Arc<Notify>, Arc<Notify>)>,
    }

    #[async_trait]
    impl CandidateApi for StubApi {
        async fn create_candidate(
            &self,
            payload: &CandidatePayload,
        ) -> Result<CreatedCandidate, SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payloads.lock().unwrap().push(payload.clone());
            if let Some((entered, release)) = &self.gate {
                entered.notify_one();
                release.notified().await;
            }
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(CreatedCandidate {
                    message: "Candidate created".into(),
                    candidate: None,
                }),
            }
        }

        async fn list_candidates(&self) -> Result<Vec<Candidate>, ApiError> {
            Ok(Vec::new())
        }
    }

    async fn fill_jane(manager: &OnboardingManager) {
        manager.set_text(TextField::FirstName, "Jane").await;
        manager.set_text(TextField::LastName, "Doe").await;
        manager.set_age_input("28").await;
        manager.set_text(TextField::Email, "jane@x.com").await;
        manager.set_text(TextField::PhoneNumber, "555-1234").await;
        manager.set_text(TextField::Address, "1 Main St").await;
        manager
            .set_text(TextField::ResumeLink, "http://r.example/jane")
            .await;
    }

    #[tokio::test]
    async fn end_to_end_submission() {
        let api = Arc::new(StubApi::default());
        let manager = OnboardingManager::new(api.clone());
        fill_jane(&manager).await;
        manager
            .update(|d| {
                d.resume.skills.update_at(0, "SQL".into());
            })
            .await;

        for _ in 0..5 {
            assert!(matches!(manager.advance().await, StepChange::Moved { .. }));
        }
        assert_eq!(manager.current_step().await, WizardStep::Review);

        let created = manager.submit().await.unwrap();
        assert_eq!(created.message, "Candidate created");
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);

        let payloads = api.payloads.lock().unwrap();
        assert_eq!(payloads[0].resume.skills, vec!["SQL"]);
        assert!(payloads[0].resume.experience.is_empty());
        assert!(payloads[0].resume.projects.is_empty());
        drop(payloads);

        // Session cleared for the next candidate.
        assert_eq!(manager.current_step().await, WizardStep::Personal);
        assert_eq!(manager.draft().await, CandidateDraft::default());
        assert!(!manager.is_submitting());
    }

    async fn advance_to_review(manager: &OnboardingManager) {
        for _ in 0..5 {
            manager.advance().await;
        }
        assert_eq!(manager.current_step().await, WizardStep::Review);
    }

    #[tokio::test]
    async fn submit_outside_review_skips_api() {
        let api = Arc::new(StubApi::default());
        let manager = OnboardingManager::new(api.clone());
        fill_jane(&manager).await;

        let err = manager.submit().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Wizard(WizardError::NotAtReview {
                step: WizardStep::Personal
            })
        ));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(manager.current_step().await, WizardStep::Personal);
        assert_eq!(manager.draft().await.first_name, "Jane");
        assert!(!manager.is_submitting());

        manager.advance().await;
        manager.advance().await;
        assert!(matches!(
            manager.submit().await,
            Err(Error::Wizard(WizardError::NotAtReview {
                step: WizardStep::Resume
            }))
        ));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn local_validation_skips_api() {
        let api = Arc::new(StubApi::default());
        let manager = OnboardingManager::new(api.clone());
        fill_jane(&manager).await;
        advance_to_review(&manager).await;
        // Draft edited after the gates were passed.
        manager.set_text(TextField::LastName, "  ").await;

        let err = manager.submit().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Wizard(WizardError::LocalValidation { .. })
        ));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            manager.status().await.last_error.as_deref(),
            Some("Please complete required steps before submitting.")
        );
    }

    #[tokio::test]
    async fn api_failure_keeps_draft_and_step() {
        let api = Arc::new(StubApi {
            fail_with: Some(SubmissionError::new("Email already exists", Some(409))),
            ..Default::default()
        });
        let manager = OnboardingManager::new(api.clone());
        fill_jane(&manager).await;
        for _ in 0..5 {
            manager.advance().await;
        }
        let draft_before = manager.draft().await;

        let err = manager.submit().await.unwrap_err();
        assert_eq!(err.to_string(), "Submission error: Email already exists");
        assert_eq!(manager.current_step().await, WizardStep::Review);
        assert_eq!(manager.draft().await, draft_before);
        assert_eq!(
            manager.status().await.last_error.as_deref(),
            Some("Email already exists")
        );

        // Manual retry is allowed and hits the API again.
        let _ = manager.submit().await;
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_submit_calls_api_once() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let api = Arc::new(StubApi {
            gate: Some((entered.clone(), release.clone())),
            ..Default::default()
        });
        let manager = Arc::new(OnboardingManager::new(api.clone()));
        fill_jane(&manager).await;
        advance_to_review(&manager).await;

        let first = tokio::spawn({
            let manager = Arc::clone(&manager);
            async move { manager.submit().await }
        });
        entered.notified().await;
        assert!(manager.is_submitting());

        let second = manager.submit().await;
        assert!(matches!(
            second,
            Err(Error::Wizard(WizardError::AlreadySubmitting))
        ));

        release.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert!(!manager.is_submitting());
    }

    #[tokio::test]
    async fn keyboard_shortcuts_drive_navigation() {
        let manager = OnboardingManager::new(Arc::new(StubApi::default()));

        let blocked = manager.handle_key(KeyChord::ctrl(Key::Enter)).await;
        assert!(matches!(blocked, Some(StepChange::Blocked { .. })));

        fill_jane(&manager).await;
        manager.handle_key(KeyChord::ctrl(Key::Enter)).await;
        assert_eq!(manager.current_step().await, WizardStep::Contact);

        manager.handle_key(KeyChord::alt(Key::Backspace)).await;
        assert_eq!(manager.current_step().await, WizardStep::Personal);

        assert!(manager.handle_key(KeyChord::alt(Key::Enter)).await.is_none());
    }

    #[tokio::test]
    async fn status_reflects_step() {
        let manager = OnboardingManager::new(Arc::new(StubApi::default()));
        let status = manager.status().await;
        assert_eq!(status.step, WizardStep::Personal);
        assert_eq!(status.label, "Basic Info");
        assert!(!status.can_advance);
        assert!(!status.can_retreat);
        assert_eq!(status.focus, Some("firstName"));
        assert_eq!(status.issues.len(), 3);

        fill_jane(&manager).await;
        manager.advance().await;
        let status = manager.status().await;
        assert_eq!(status.step, WizardStep::Contact);
        assert!(status.can_advance);
        assert!(status.can_retreat);
        assert!(status.issues.is_empty());

        manager.reset().await;
        assert_eq!(manager.draft().await, CandidateDraft::default());
    }
}
