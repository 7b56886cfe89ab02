//! Candidate onboarding: wizard engine and candidate API client for the
//! lead/candidate admin front end.

pub mod api;
pub mod config;
pub mod error;
pub mod listing;
pub mod onboarding;
pub mod session;
