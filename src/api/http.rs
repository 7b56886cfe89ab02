//! reqwest-backed candidate API client.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::{Candidate, CandidateApi, CreatedCandidate};
use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError, SubmissionError};
use crate::onboarding::payload::CandidatePayload;
use crate::session::SessionContext;

/// Header the backend uses to authenticate the front end itself.
const SERVER_HEADER: &str = "server";

/// Error body shape shared by all backend endpoints.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// `GET /candidate` answers either a bare array or `{ "candidates": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CandidateListBody {
    Wrapped { candidates: Vec<Candidate> },
    Bare(Vec<Candidate>),
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    message: String,
    token: String,
    #[serde(default)]
    role: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub message: String,
    pub role: Option<String>,
}

/// HTTP client for the candidate backend.
pub struct HttpCandidateApi {
    client: reqwest::Client,
    base_url: String,
    server_token: Option<SecretString>,
    session: SessionContext,
}

impl HttpCandidateApi {
    pub fn new(config: &ApiConfig, session: SessionContext) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            server_token: config.server_token.clone(),
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        if let Some(ref token) = self.server_token {
            req = req.header(SERVER_HEADER, token.expose_secret());
        }
        if let Some(auth) = self.session.authorization().await {
            req = req.header(AUTHORIZATION, auth);
        }
        req
    }

    /// Sign in against `POST /auth/login` and store the token in the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let resp = self
            .request(Method::POST, "auth/login")
            .await
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: "auth/login".into(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = server_message(resp)
                .await
                .unwrap_or_else(|| "Login failed".to_string());
            return Err(ApiError::Status { status, message });
        }

        let body: LoginBody = resp.json().await.map_err(|e| ApiError::InvalidResponse {
            endpoint: "auth/login".into(),
            reason: e.to_string(),
        })?;

        self.session
            .sign_in(SecretString::from(body.token), body.role.clone())
            .await;
        tracing::info!(role = ?body.role, "Signed in");

        Ok(LoginOutcome {
            message: body.message,
            role: body.role,
        })
    }

    /// Drop the session token. The backend keeps no server-side state for it.
    pub async fn logout(&self) {
        self.session.sign_out().await;
    }
}

/// Pull `message` out of an error response, if there is a non-blank one.
async fn server_message(resp: Response) -> Option<String> {
    resp.json::<ErrorBody>()
        .await
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

#[async_trait]
impl CandidateApi for HttpCandidateApi {
    async fn create_candidate(
        &self,
        payload: &CandidatePayload,
    ) -> Result<CreatedCandidate, SubmissionError> {
        let resp = self
            .request(Method::POST, "candidate")
            .await
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Candidate request failed to send");
                SubmissionError::fallback(None)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = server_message(resp).await;
            tracing::warn!(status = %status, message = ?message, "Candidate creation rejected");
            return Err(match message {
                Some(m) => SubmissionError::new(m, Some(status.as_u16())),
                None => SubmissionError::fallback(Some(status.as_u16())),
            });
        }

        resp.json::<CreatedCandidate>().await.map_err(|e| {
            tracing::warn!(error = %e, "Candidate creation returned an unreadable body");
            SubmissionError::fallback(Some(status.as_u16()))
        })
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, ApiError> {
        let resp = self
            .request(Method::GET, "candidate")
            .await
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: "candidate".into(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = server_message(resp)
                .await
                .unwrap_or_else(|| "Failed to fetch candidates".to_string());
            return Err(ApiError::Status { status, message });
        }

        let body: CandidateListBody =
            resp.json().await.map_err(|e| ApiError::InvalidResponse {
                endpoint: "candidate".into(),
                reason: e.to_string(),
            })?;

        Ok(match body {
            CandidateListBody::Wrapped { candidates } => candidates,
            CandidateListBody::Bare(candidates) => candidates,
        })
    }
}
