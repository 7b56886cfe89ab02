//! Candidate API: the backend the wizard submits to.
//!
//! `CandidateApi` is the seam the onboarding manager talks through;
//! `HttpCandidateApi` is the reqwest-backed implementation.

mod http;

pub use http::{HttpCandidateApi, LoginOutcome};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, SubmissionError};
use crate::onboarding::payload::{CandidatePayload, ResumePayload};

/// A persisted candidate as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub resume_link: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Successful `POST /candidate` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedCandidate {
    #[serde(default)]
    pub message: String,
    /// The stored record, kept opaque: only its presence confirms success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<serde_json::Value>,
}

/// Backend operations the onboarding flow depends on.
#[async_trait]
pub trait CandidateApi: Send + Sync {
    /// Create a candidate from a normalized payload.
    async fn create_candidate(
        &self,
        payload: &CandidatePayload,
    ) -> Result<CreatedCandidate, SubmissionError>;

    /// Fetch all persisted candidates.
    async fn list_candidates(&self) -> Result<Vec<Candidate>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_from_backend_json() {
        let json = r#"{
            "_id": "66a1",
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@x.com",
            "phoneNumber": "555-1234",
            "address": "1 Main St",
            "resumeLink": "http://r.example/jane",
            "age": 28,
            "resume": {
                "skills": ["SQL"],
                "experience": [{
                    "title": "Engineer",
                    "company": "Acme",
                    "startDate": "2020-01-01T00:00:00.000Z",
                    "current": false
                }]
            },
            "createdAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-01T10:00:00.000Z"
        }"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, "66a1");
        assert_eq!(candidate.age, Some(28));
        let resume = candidate.resume.unwrap();
        assert_eq!(resume.skills, vec!["SQL"]);
        assert_eq!(resume.experience[0].company, "Acme");
        assert!(resume.projects.is_empty());
        assert!(candidate.created_at.is_some());
    }

    #[test]
    fn created_candidate_tolerates_missing_record() {
        let created: CreatedCandidate =
            serde_json::from_str(r#"{"message":"Candidate created"}"#).unwrap();
        assert_eq!(created.message, "Candidate created");
        assert!(created.candidate.is_none());
    }
}
