//! Submission normalizer: turns a draft into the candidate API payload.
//!
//! Strings are trimmed, blank list slots dropped, optional fields omitted
//! when blank, and incomplete experience/project entries filtered out.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{CandidateDraft, ExperienceDraft, FieldList, ProjectDraft, ResumeDraft};
use super::validation::{contact_valid, personal_valid};
use crate::error::WizardError;

/// Body of `POST /candidate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub resume_link: String,
    pub age: i64,
    pub resume: ResumePayload,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperiencePayload>,
    #[serde(default)]
    pub projects: Vec<ProjectPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePayload {
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Normalize a draft for submission.
///
/// Fails with a local validation error, before any network traffic, when
/// the personal or contact fields are incomplete.
pub fn normalize(draft: &CandidateDraft) -> Result<CandidatePayload, WizardError> {
    if !personal_valid(draft) || !contact_valid(draft) {
        return Err(WizardError::incomplete());
    }
    let Some(age) = draft.age else {
        return Err(WizardError::incomplete());
    };

    Ok(CandidatePayload {
        first_name: draft.first_name.trim().to_string(),
        last_name: draft.last_name.trim().to_string(),
        email: draft.email.trim().to_lowercase(),
        phone_number: draft.phone_number.trim().to_string(),
        address: draft.address.trim().to_string(),
        resume_link: draft.resume_link.trim().to_string(),
        age,
        resume: normalize_resume(&draft.resume),
    })
}

fn normalize_resume(resume: &ResumeDraft) -> ResumePayload {
    ResumePayload {
        summary: optional(&resume.summary),
        skills: clean_list(&resume.skills),
        experience: resume
            .experience
            .iter()
            .filter_map(normalize_experience)
            .collect(),
        projects: resume
            .projects
            .iter()
            .filter_map(normalize_project)
            .collect(),
    }
}

/// `None` drops the entry: title, company and a usable start date are required.
fn normalize_experience(entry: &ExperienceDraft) -> Option<ExperiencePayload> {
    let title = optional(&entry.title)?;
    let company = optional(&entry.company)?;
    let start_date = parse_date_input(&entry.start_date)?;

    Some(ExperiencePayload {
        title,
        company,
        location: optional(&entry.location),
        start_date,
        end_date: parse_date_input(&entry.end_date),
        current: entry.current,
        description: optional(&entry.description),
        highlights: clean_list(&entry.highlights),
    })
}

fn normalize_project(entry: &ProjectDraft) -> Option<ProjectPayload> {
    let name = optional(&entry.name)?;

    Some(ProjectPayload {
        name,
        role: optional(&entry.role),
        description: optional(&entry.description),
        tech_stack: clean_list(&entry.tech_stack),
        url: optional(&entry.url),
        start_date: parse_date_input(&entry.start_date),
        end_date: parse_date_input(&entry.end_date),
        highlights: clean_list(&entry.highlights),
    })
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn clean_list(list: &FieldList<String>) -> Vec<String> {
    list.iter().filter_map(|s| optional(s)).collect()
}

/// Parse a date input. Accepts `YYYY-MM-DD` (taken as midnight UTC) or an
/// RFC 3339 timestamp. Blank or unparseable input yields `None`.
pub fn parse_date_input(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Inverse of [`parse_date_input`] for values a date input can show.
fn format_date_input(value: &DateTime<Utc>) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.to_rfc3339()
    }
}

fn format_optional_date(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_date_input).unwrap_or_default()
}

impl From<&CandidatePayload> for CandidateDraft {
    /// Load a submitted payload back into an editable draft.
    fn from(payload: &CandidatePayload) -> Self {
        let resume = &payload.resume;
        Self {
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            email: payload.email.clone(),
            phone_number: payload.phone_number.clone(),
            address: payload.address.clone(),
            resume_link: payload.resume_link.clone(),
            age: Some(payload.age),
            resume: ResumeDraft {
                summary: resume.summary.clone().unwrap_or_default(),
                skills: resume.skills.clone().into(),
                experience: resume
                    .experience
                    .iter()
                    .map(|e| ExperienceDraft {
                        title: e.title.clone(),
                        company: e.company.clone(),
                        location: e.location.clone().unwrap_or_default(),
                        start_date: format_date_input(&e.start_date),
                        end_date: format_optional_date(e.end_date.as_ref()),
                        current: e.current,
                        description: e.description.clone().unwrap_or_default(),
                        highlights: e.highlights.clone().into(),
                    })
                    .collect::<Vec<_>>()
                    .into(),
                projects: resume
                    .projects
                    .iter()
                    .map(|p| ProjectDraft {
                        name: p.name.clone(),
                        role: p.role.clone().unwrap_or_default(),
                        description: p.description.clone().unwrap_or_default(),
                        tech_stack: p.tech_stack.clone().into(),
                        url: p.url.clone().unwrap_or_default(),
                        start_date: format_optional_date(p.start_date.as_ref()),
                        end_date: format_optional_date(p.end_date.as_ref()),
                        highlights: p.highlights.clone().into(),
                    })
                    .collect::<Vec<_>>()
                    .into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn jane() -> CandidateDraft {
        CandidateDraft {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@x.com".into(),
            phone_number: "555-1234".into(),
            address: "1 Main St".into(),
            resume_link: "http://r.example/jane".into(),
            age: Some(28),
            ..Default::default()
        }
    }

    fn experience(title: &str, company: &str, start: &str) -> ExperienceDraft {
        ExperienceDraft {
            title: title.into(),
            company: company.into(),
            start_date: start.into(),
            ..Default::default()
        }
    }

    #[test]
    fn jane_with_one_skill() {
        let mut draft = jane();
        draft.resume.skills.update_at(0, "SQL".into());

        let payload = normalize(&draft).unwrap();
        assert_eq!(payload.resume.skills, vec!["SQL"]);
        assert!(payload.resume.experience.is_empty());
        assert!(payload.resume.projects.is_empty());
        assert!(payload.resume.summary.is_none());
        assert_eq!(payload.age, 28);
    }

    #[test]
    fn trims_and_lowercases_top_level_fields() {
        let mut draft = jane();
        draft.first_name = "  Jane ".into();
        draft.email = "Jane.Doe@Example.COM".into();
        draft.address = " 1 Main St\n".into();

        let payload = normalize(&draft).unwrap();
        assert_eq!(payload.first_name, "Jane");
        assert_eq!(payload.email, "jane.doe@example.com");
        assert_eq!(payload.address, "1 Main St");
    }

    #[test]
    fn incomplete_draft_is_rejected_locally() {
        let mut draft = jane();
        draft.age = Some(10);
        assert_eq!(normalize(&draft), Err(WizardError::incomplete()));

        let mut draft = jane();
        draft.email = "not-an-email".into();
        assert!(normalize(&draft).is_err());
    }

    #[test]
    fn summary_omitted_when_blank() {
        let mut draft = jane();
        draft.resume.summary = "   ".into();
        let payload = normalize(&draft).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["resume"].get("summary").is_none());

        draft.resume.summary = "  Ships things. ".into();
        let payload = normalize(&draft).unwrap();
        assert_eq!(payload.resume.summary.as_deref(), Some("Ships things."));
    }

    #[test]
    fn skills_drop_blanks_and_keep_order() {
        let mut draft = jane();
        draft.resume.skills = vec![
            " Rust ".to_string(),
            "".to_string(),
            "SQL".to_string(),
            "  ".to_string(),
            "Go".to_string(),
        ]
        .into();
        let payload = normalize(&draft).unwrap();
        assert_eq!(payload.resume.skills, vec!["Rust", "SQL", "Go"]);
    }

    #[test]
    fn experience_filtering() {
        let mut draft = jane();
        let mut kept = experience("Engineer", "Acme", "2020-01-01");
        kept.highlights = vec!["Cut costs 20%".to_string(), " ".to_string()].into();
        kept.location = "  ".into();
        kept.current = true;
        draft.resume.experience = vec![
            kept,
            experience("", "Acme", "2020-01-01"),
            experience("Engineer", "  ", "2020-01-01"),
            experience("Engineer", "Acme", ""),
            experience("Engineer", "Acme", "someday"),
        ]
        .into();

        let payload = normalize(&draft).unwrap();
        assert_eq!(payload.resume.experience.len(), 1);
        let exp = &payload.resume.experience[0];
        assert_eq!(exp.title, "Engineer");
        assert_eq!(
            exp.start_date,
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
        );
        assert!(exp.end_date.is_none());
        assert!(exp.location.is_none());
        assert!(exp.current);
        assert_eq!(exp.highlights, vec!["Cut costs 20%"]);
    }

    #[test]
    fn project_without_name_is_dropped() {
        let mut draft = jane();
        let nameless = ProjectDraft {
            description: "A thing".into(),
            tech_stack: vec!["Rust".to_string()].into(),
            ..Default::default()
        };
        let named = ProjectDraft {
            name: " Tracker ".into(),
            url: "https://t.example".into(),
            tech_stack: vec!["Rust".to_string(), "".to_string()].into(),
            end_date: "2023-06-30".into(),
            ..Default::default()
        };
        draft.resume.projects = vec![nameless, named].into();

        let payload = normalize(&draft).unwrap();
        assert_eq!(payload.resume.projects.len(), 1);
        let proj = &payload.resume.projects[0];
        assert_eq!(proj.name, "Tracker");
        assert_eq!(proj.tech_stack, vec!["Rust"]);
        assert!(proj.role.is_none());
        assert!(proj.start_date.is_none());
        assert!(proj.end_date.is_some());
        assert!(proj.highlights.is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let mut draft = jane();
        draft.email = "JANE@X.COM".into();
        draft.resume.summary = " Builder ".into();
        draft.resume.skills = vec!["SQL ".to_string(), "".to_string()].into();
        let mut exp = experience(" Engineer", "Acme ", "2020-01-01");
        exp.end_date = "2021-03-15".into();
        exp.description = " Did work ".into();
        draft.resume.experience = vec![exp, experience("", "", "")].into();
        draft.resume.projects = vec![ProjectDraft {
            name: "Tracker".into(),
            start_date: "2019-05-01T12:30:00Z".into(),
            ..Default::default()
        }]
        .into();

        let first = normalize(&draft).unwrap();
        assert_eq!(first.email, "jane@x.com");
        assert_eq!(first.resume.experience.len(), 1);
        let second = normalize(&CandidateDraft::from(&first)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn padded_email_is_rejected_locally() {
        let mut draft = jane();
        draft.email = " jane@x.com ".into();
        assert_eq!(normalize(&draft), Err(WizardError::incomplete()));
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let mut draft = jane();
        draft.resume.experience = vec![experience("Engineer", "Acme", "2020-01-01")].into();
        let json = serde_json::to_value(normalize(&draft).unwrap()).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["phoneNumber"], "555-1234");
        assert_eq!(json["resumeLink"], "http://r.example/jane");
        assert_eq!(json["age"], 28);
        let exp = &json["resume"]["experience"][0];
        assert!(exp["startDate"].as_str().unwrap().starts_with("2020-01-01T00:00:00"));
        assert!(exp.get("endDate").is_none());
        assert_eq!(exp["current"], false);
    }

    #[test]
    fn date_inputs() {
        assert!(parse_date_input("").is_none());
        assert!(parse_date_input("01/02/2020").is_none());
        assert_eq!(
            parse_date_input("2020-02-29"),
            Some(Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_date_input("2020-02-29T10:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2020, 2, 29, 8, 0, 0).unwrap())
        );
    }
}
