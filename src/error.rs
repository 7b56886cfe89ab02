//! Error types for candidate onboarding.

use crate::onboarding::state::WizardStep;

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Errors raised by the wizard engine before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// Required top-level fields failed the re-check at submission time.
    #[error("{message}")]
    LocalValidation { message: String },

    /// A submission is already in flight for this session.
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    /// Submit was requested before the wizard reached the review step.
    #[error("Submission is only available from the review step (currently at {step})")]
    NotAtReview { step: WizardStep },
}

impl WizardError {
    pub fn incomplete() -> Self {
        Self::LocalValidation {
            message: "Please complete required steps before submitting.".to_string(),
        }
    }
}

/// Candidate creation failed at the API.
///
/// `message` is always safe to show the user: either the server-provided
/// message or a generic fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SubmissionError {
    pub message: String,
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
}

impl SubmissionError {
    pub const FALLBACK_MESSAGE: &'static str = "Failed to add candidate";

    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Failure with no usable server message.
    pub fn fallback(status: Option<u16>) -> Self {
        Self::new(Self::FALLBACK_MESSAGE, status)
    }
}

/// Errors from non-submission API calls (listing, session lookups).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
