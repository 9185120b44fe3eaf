//! Raw inputs accepted by the dashboard services.
//!
//! Drafts mirror the JSON bodies pages send. Every field that a form may leave
//! empty is optional here so that a missing value is reported as a validation
//! error naming the field, not as a decoding failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::project::missing_field;
use crate::domain::{
    Answer, Error, ProjectId, ProjectStatus, Question, RequestStatus, SubmissionId,
    SubmissionStatus, UserId,
};

/// New project as entered by a coordinator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    /// Profile id of the mentor who will own the project.
    pub mentor_id: Option<String>,
    pub tech_stack: Vec<String>,
    pub deadline: Option<NaiveDate>,
    /// Defaults to `available`.
    pub status: Option<ProjectStatus>,
}

impl ProjectDraft {
    pub(crate) fn mentor(&self) -> Result<UserId, Error> {
        let raw = self
            .mentor_id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| missing_field("mentorId"))?;
        UserId::new(raw).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(serde_json::json!({ "field": "mentorId", "code": "invalid_id" }))
        })
    }
}

/// New test as entered in the test creator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TestDraft {
    pub project_id: Option<ProjectId>,
    pub title: String,
    pub questions: Vec<Question>,
}

/// Mentor feedback on a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackDraft {
    pub submission_id: Option<SubmissionId>,
    pub comment: String,
    pub rating: Option<u8>,
}

/// File attached to a hand-in, base64 encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct FileDraft {
    pub name: String,
    pub content_type: Option<String>,
    /// Standard base64 of the file bytes.
    pub data: String,
}

/// Project work handed in by a mentee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkDraft {
    pub project_id: Option<ProjectId>,
    pub github_link: Option<String>,
    pub file: Option<FileDraft>,
}

/// Answers to a test, by question position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TestAttempt {
    pub answers: Vec<Answer>,
}

/// Mentor decision on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestDecision {
    pub status: RequestStatus,
}

impl RequestDecision {
    pub(crate) fn validate(self) -> Result<RequestStatus, Error> {
        match self.status {
            RequestStatus::Pending => Err(invalid_status("a request can only be approved or rejected")),
            status => Ok(status),
        }
    }
}

/// Review verdict on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDecision {
    pub status: SubmissionStatus,
}

impl ReviewDecision {
    pub(crate) fn validate(self) -> Result<SubmissionStatus, Error> {
        match self.status {
            SubmissionStatus::Pending => Err(invalid_status("a review must settle the submission")),
            status => Ok(status),
        }
    }
}

fn invalid_status(message: &str) -> Error {
    Error::invalid_request(message)
        .with_details(serde_json::json!({ "field": "status", "code": "invalid_status" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "missing_field")]
    #[case(Some("  "), "missing_field")]
    #[case(Some("user2"), "invalid_id")]
    fn mentor_id_must_be_a_uuid(#[case] raw: Option<&str>, #[case] code: &str) {
        let draft = ProjectDraft {
            mentor_id: raw.map(str::to_owned),
            ..ProjectDraft::default()
        };
        let err = draft.mentor().expect_err("rejected");
        assert_eq!(err.details().and_then(|d| d.get("code")), Some(&code.into()));
    }

    #[rstest]
    fn pending_is_not_a_decision() {
        let err = RequestDecision {
            status: RequestStatus::Pending,
        }
        .validate()
        .expect_err("pending");
        assert_eq!(err.details().and_then(|d| d.get("field")), Some(&"status".into()));
        assert_eq!(
            ReviewDecision {
                status: SubmissionStatus::ChangesRequested
            }
            .validate()
            .expect("settled"),
            SubmissionStatus::ChangesRequested
        );
    }

    #[rstest]
    fn drafts_tolerate_missing_fields() {
        let draft: WorkDraft = serde_json::from_str("{}").expect("decodes");
        assert_eq!(draft, WorkDraft::default());
        let draft: FeedbackDraft =
            serde_json::from_str(r#"{"comment":"Nice","rating":5}"#).expect("decodes");
        assert_eq!(draft.rating, Some(5));
        assert!(draft.submission_id.is_none());
    }
}
