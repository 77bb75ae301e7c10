use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Skills arrive either as a JSON array or as the legacy comma-separated
/// string; both normalize to a trimmed list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsField {
    List(Vec<String>),
    Csv(String),
}

impl SkillsField {
    pub fn into_vec(self) -> Vec<String> {
        let raw = match self {
            SkillsField::List(items) => items,
            SkillsField::Csv(joined) => joined.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Job type is required"))]
    pub employment_type: String,
    #[serde(default)]
    pub skills: Option<SkillsField>,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct JobSearchQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub employment_type: Option<String>,
    pub location: Option<String>,
    /// Salary floor in thousands, compared against the numeric prefix of the
    /// job's salary text (`"90k"` -> 90).
    pub salary: Option<i64>,
    /// Comma-separated skill list; every listed skill must be present.
    pub skills: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplyJobPayload {
    #[validate(
        required(message = "Name, email and cover letter are required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Name, email and cover letter are required"),
        email(message = "Valid email is required")
    )]
    pub email: Option<String>,
    #[serde(rename = "coverLetter")]
    #[validate(
        required(message = "Name, email and cover letter are required"),
        length(min = 1, message = "Cover letter is required")
    )]
    pub cover_letter: Option<String>,
    #[serde(rename = "cvId", default)]
    pub cv_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_csv_normalizes_whitespace_and_empty_segments() {
        let skills = SkillsField::Csv("React, Node.js, ,  Rust ".to_string());
        assert_eq!(skills.into_vec(), vec!["React", "Node.js", "Rust"]);
    }

    #[test]
    fn skills_list_passes_through() {
        let skills = SkillsField::List(vec!["React".into(), " Go ".into()]);
        assert_eq!(skills.into_vec(), vec!["React", "Go"]);
    }

    #[test]
    fn apply_payload_requires_cover_letter() {
        let payload = ApplyJobPayload {
            name: Some("Alice".into()),
            email: Some("alice@example.com".into()),
            cover_letter: None,
            cv_id: None,
        };
        assert!(payload.validate().is_err());
    }
}
