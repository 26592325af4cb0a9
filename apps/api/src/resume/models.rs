use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resume::extractor::{
    FALLBACK_COMPANY, UNKNOWN_COMPANY, UNKNOWN_DEGREE, UNKNOWN_ROLE, UNKNOWN_SCHOOL,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeProfile {
    pub name: String,
    pub title: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub location: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// A single job on the resume. `end_date` holds "Present" for a current role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeExperience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeEducation {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSkill {
    pub category: String,
    pub items: Vec<String>,
}

/// The full resume document edited in the admin panel and rendered on the resume page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub profile: ResumeProfile,
    #[serde(default)]
    pub experience: Vec<ResumeExperience>,
    #[serde(default)]
    pub education: Vec<ResumeEducation>,
    #[serde(default)]
    pub skills: Vec<ResumeSkill>,
}

/// Best-effort structured guess recovered from raw resume text.
///
/// Every field is unverified. Absent values are empty strings or empty lists,
/// and entries the extractor could not make sense of carry placeholder literals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub name: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
    /// The text the result was extracted from, kept for audit and manual fallback.
    pub raw_text: String,
    pub experience: Vec<ResumeExperience>,
    /// At most one entry.
    pub education: Vec<ResumeEducation>,
}

impl ExtractionResult {
    /// True when a placeholder literal was substituted into any entry.
    pub fn needs_review(&self) -> bool {
        let placeholder_experience = self.experience.iter().any(|e| {
            e.company == UNKNOWN_COMPANY
                || e.company == FALLBACK_COMPANY
                || e.position == UNKNOWN_ROLE
        });
        let placeholder_education = self
            .education
            .iter()
            .any(|e| e.school == UNKNOWN_SCHOOL || e.degree == UNKNOWN_DEGREE);

        placeholder_experience || placeholder_education
    }
}

/// Persisted envelope around the resume document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    pub resume: ResumeData,
    pub saved_at: DateTime<Utc>,
}

impl StoredResume {
    pub fn new(resume: ResumeData) -> Self {
        Self {
            resume,
            saved_at: Utc::now(),
        }
    }
}
