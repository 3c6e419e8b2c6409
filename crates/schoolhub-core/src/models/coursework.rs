use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    #[default]
    Pending,
    Submitted,
    Graded,
    Late,
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentStatus::Pending => write!(f, "Pending"),
            AssignmentStatus::Submitted => write!(f, "Submitted"),
            AssignmentStatus::Graded => write!(f, "Graded"),
            AssignmentStatus::Late => write!(f, "Late"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub status: AssignmentStatus,
}

impl Assignment {
    /// Still open for submission and past its due date at `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == AssignmentStatus::Pending && self.due_date.map(|d| d < now).unwrap_or(false)
    }
}

/// Submission request body
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl Validate for SubmissionForm {
    fn validate(&self) -> Result<(), ValidationError> {
        let has_content = self.content.as_deref().map(|c| !c.trim().is_empty()).unwrap_or(false);
        let has_attachment = self
            .attachment_url
            .as_deref()
            .map(|u| !u.trim().is_empty())
            .unwrap_or(false);

        if !has_content && !has_attachment {
            return Err(ValidationError::new(
                "content",
                "provide submission text or an attachment URL",
            ));
        }
        if let Some(url) = self.attachment_url.as_deref().filter(|u| !u.trim().is_empty()) {
            if reqwest::Url::parse(url.trim()).is_err() {
                return Err(ValidationError::new("attachmentUrl", "is not a valid URL"));
            }
        }
        Ok(())
    }
}

/// Backend acknowledgement of a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: AssignmentStatus,
}

/// A document published for a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMaterial {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default, alias = "url", alias = "fileUrl")]
    pub download_url: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_assignments() {
        let json = r#"[
            {"id": 10, "title": "Essay", "courseName": "English", "dueDate": "2024-10-01T23:59:00Z", "status": "SUBMITTED"},
            {"id": 11, "title": "Worksheet"}
        ]"#;
        let assignments: Vec<Assignment> = serde_json::from_str(json).unwrap();
        assert_eq!(assignments[0].status, AssignmentStatus::Submitted);
        assert_eq!(assignments[1].status, AssignmentStatus::Pending);
        assert!(assignments[1].due_date.is_none());
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc.with_ymd_and_hms(2024, 10, 2, 12, 0, 0).unwrap();
        let mut assignment = Assignment {
            id: 1,
            title: "Lab report".to_string(),
            description: None,
            course_name: None,
            due_date: Some(Utc.with_ymd_and_hms(2024, 10, 1, 23, 59, 0).unwrap()),
            max_score: Some(100.0),
            status: AssignmentStatus::Pending,
        };
        assert!(assignment.is_overdue(now));

        assignment.status = AssignmentStatus::Submitted;
        assert!(!assignment.is_overdue(now));

        assignment.status = AssignmentStatus::Pending;
        assignment.due_date = None;
        assert!(!assignment.is_overdue(now));
    }

    #[test]
    fn test_submission_form_validation() {
        assert!(SubmissionForm::default().validate().is_err());

        let text_only = SubmissionForm {
            content: Some("My answer".to_string()),
            attachment_url: None,
        };
        assert!(text_only.validate().is_ok());

        let link_only = SubmissionForm {
            content: Some("   ".to_string()),
            attachment_url: Some("https://drive.example.org/file/abc".to_string()),
        };
        assert!(link_only.validate().is_ok());

        let bad_link = SubmissionForm {
            content: None,
            attachment_url: Some("not a url".to_string()),
        };
        assert_eq!(bad_link.validate().unwrap_err().field, "attachmentUrl");
    }

    #[test]
    fn test_parse_course_material_aliases() {
        let json = r#"{"id": 4, "title": "Syllabus", "fileUrl": "https://cdn.example.org/syllabus.pdf", "fileType": "pdf"}"#;
        let material: CourseMaterial = serde_json::from_str(json).unwrap();
        assert_eq!(material.download_url.as_deref(), Some("https://cdn.example.org/syllabus.pdf"));
    }
}
