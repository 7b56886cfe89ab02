//! Read-only summary shown on the review step.

use serde::Serialize;

use super::model::CandidateDraft;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub name: String,
    /// Empty when unset.
    pub age: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub resume_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_section: Option<SkillsSection>,
    /// `"{title} at {company}"` per entry.
    pub experience: Vec<String>,
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub skills: Vec<String>,
}

impl ReviewSummary {
    pub fn from_draft(draft: &CandidateDraft) -> Self {
        let skills: Vec<String> = draft
            .resume
            .skills
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect();
        let summary = Some(draft.resume.summary.clone()).filter(|s| !s.trim().is_empty());

        let skills_section = (summary.is_some() || !skills.is_empty())
            .then_some(SkillsSection { summary, skills });

        Self {
            name: format!("{} {}", draft.first_name, draft.last_name),
            age: draft.age.map(|a| a.to_string()).unwrap_or_default(),
            email: draft.email.clone(),
            phone_number: draft.phone_number.clone(),
            address: draft.address.clone(),
            resume_link: draft.resume_link.clone(),
            skills_section,
            experience: draft
                .resume
                .experience
                .iter()
                .map(|e| format!("{} at {}", e.title, e.company))
                .collect(),
            projects: draft.resume.projects.iter().map(|p| p.name.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::{ExperienceDraft, ProjectDraft};

    #[test]
    fn empty_resume_has_no_skills_section() {
        let draft = CandidateDraft {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            age: Some(28),
            ..Default::default()
        };
        let review = ReviewSummary::from_draft(&draft);
        assert_eq!(review.name, "Jane Doe");
        assert_eq!(review.age, "28");
        assert!(review.skills_section.is_none());
        assert!(review.experience.is_empty());
    }

    #[test]
    fn lists_entries_as_typed() {
        let mut draft = CandidateDraft::default();
        draft.resume.skills = vec!["SQL".to_string(), "".to_string()].into();
        draft.resume.experience = vec![ExperienceDraft {
            title: "Engineer".into(),
            company: "Acme".into(),
            ..Default::default()
        }]
        .into();
        draft.resume.projects = vec![ProjectDraft {
            name: "Tracker".into(),
            ..Default::default()
        }]
        .into();

        let review = ReviewSummary::from_draft(&draft);
        let section = review.skills_section.unwrap();
        assert!(section.summary.is_none());
        assert_eq!(section.skills, vec!["SQL"]);
        assert_eq!(review.experience, vec!["Engineer at Acme"]);
        assert_eq!(review.projects, vec!["Tracker"]);
    }
}
