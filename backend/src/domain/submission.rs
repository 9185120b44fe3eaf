//! Project work handed in by mentees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::project::missing_field;
use super::{Error, ProjectId, SubmissionId, UserId};

/// Review state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
    ChangesRequested,
}

impl SubmissionStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::ChangesRequested,
    ];
}

/// Row of the `submissions` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    pub project_id: ProjectId,
    #[schema(value_type = String)]
    pub mentee_id: UserId,
    pub github_link: Option<String>,
    pub file_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
}

/// Validated hand-in: a project plus a GitHub link, an uploaded file, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    project_id: ProjectId,
    mentee_id: UserId,
    github_link: Option<String>,
    file_url: Option<String>,
}

impl NewSubmission {
    /// Validate the hand-in.
    ///
    /// Blank links and file references count as absent. At least one of them
    /// must remain.
    pub fn try_new(
        project_id: ProjectId,
        mentee_id: UserId,
        github_link: Option<&str>,
        file_url: Option<&str>,
    ) -> Result<Self, Error> {
        let github_link = non_blank(github_link);
        let file_url = non_blank(file_url);
        if github_link.is_none() && file_url.is_none() {
            return Err(missing_field("githubLink"));
        }
        Ok(Self {
            project_id,
            mentee_id,
            github_link,
            file_url,
        })
    }

    /// Project the work belongs to.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Materialise the row.
    pub fn into_submission(self, id: SubmissionId, submitted_at: DateTime<Utc>) -> Submission {
        Submission {
            id,
            project_id: self.project_id,
            mentee_id: self.mentee_id,
            github_link: self.github_link,
            file_url: self.file_url,
            submitted_at,
            status: SubmissionStatus::Pending,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
