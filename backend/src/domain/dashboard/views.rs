//! Read models returned by the dashboard services.
//!
//! Rows are decorated with the titles and names a page shows beside them.
//! The underlying row is flattened into the same JSON object.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    Feedback, Project, ProjectId, ProjectRequest, ProjectStatus, PublicQuestion, RequestStatus,
    Submission, SubmissionStatus, TestId, TestScore, UserId,
};

/// Project with its mentor's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub mentor_name: String,
}

/// Application with the project title and applicant name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    #[serde(flatten)]
    pub request: ProjectRequest,
    pub project_title: String,
    pub mentee_name: String,
}

/// Submission with the project title and author name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    #[serde(flatten)]
    pub submission: Submission,
    pub project_title: String,
    pub mentee_name: String,
}

/// Feedback with the project it concerns and both parties' names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    #[serde(flatten)]
    pub feedback: Feedback,
    pub project_id: Option<ProjectId>,
    pub project_title: String,
    pub mentor_name: String,
    pub mentee_name: String,
}

/// Test as a mentee sees it: no answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestView {
    pub id: TestId,
    pub project_id: ProjectId,
    pub project_title: String,
    pub title: String,
    pub questions: Vec<PublicQuestion>,
}

/// Scored attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_id: TestId,
    #[serde(flatten)]
    pub score: TestScore,
}

/// Entry of the mentor directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorCard {
    #[schema(value_type = String)]
    pub id: UserId,
    pub name: String,
    /// Technologies across the mentor's projects, first occurrence order.
    pub expertise: Vec<String>,
    pub project_count: usize,
}

/// Upcoming project deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineView {
    pub project_id: ProjectId,
    pub title: String,
    pub deadline: NaiveDate,
}

/// Mentee landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenteeOverview {
    /// Approved project, preferring one still in progress.
    pub current_project: Option<ProjectView>,
    pub pending_requests: usize,
    pub submissions: usize,
    pub upcoming_deadlines: Vec<DeadlineView>,
    pub recent_feedback: Vec<FeedbackView>,
}

/// The mentee's accepted projects and every application they made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyProjects {
    pub projects: Vec<ProjectView>,
    pub requests: Vec<RequestView>,
}

/// Mentor landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorOverview {
    pub pending_requests: usize,
    pub active_projects: usize,
    pub pending_submissions: usize,
    pub recent_requests: Vec<RequestView>,
}

/// Coordinator landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorOverview {
    pub projects: usize,
    pub mentees: usize,
    pub mentors: usize,
    pub submissions: usize,
    pub recent_projects: Vec<ProjectView>,
}

/// Projects per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatusCounts {
    pub available: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub review: usize,
}

impl<'a> FromIterator<&'a ProjectStatus> for ProjectStatusCounts {
    fn from_iter<I: IntoIterator<Item = &'a ProjectStatus>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |mut counts, status| {
                match status {
                    ProjectStatus::Available => counts.available += 1,
                    ProjectStatus::InProgress => counts.in_progress += 1,
                    ProjectStatus::Completed => counts.completed += 1,
                    ProjectStatus::Review => counts.review += 1,
                }
                counts
            })
    }
}

/// Submissions per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub changes_requested: usize,
}

impl<'a> FromIterator<&'a SubmissionStatus> for SubmissionStatusCounts {
    fn from_iter<I: IntoIterator<Item = &'a SubmissionStatus>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |mut counts, status| {
                match status {
                    SubmissionStatus::Pending => counts.pending += 1,
                    SubmissionStatus::Approved => counts.approved += 1,
                    SubmissionStatus::Rejected => counts.rejected += 1,
                    SubmissionStatus::ChangesRequested => counts.changes_requested += 1,
                }
                counts
            })
    }
}

/// Applications per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl<'a> FromIterator<&'a RequestStatus> for RequestStatusCounts {
    fn from_iter<I: IntoIterator<Item = &'a RequestStatus>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |mut counts, status| {
                match status {
                    RequestStatus::Pending => counts.pending += 1,
                    RequestStatus::Approved => counts.approved += 1,
                    RequestStatus::Rejected => counts.rejected += 1,
                }
                counts
            })
    }
}

/// Program-wide figures for the analytics page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub projects: ProjectStatusCounts,
    pub submissions: SubmissionStatusCounts,
    pub requests: RequestStatusCounts,
    pub feedback_count: usize,
    /// Mean rating rounded to two decimals; absent without feedback.
    pub average_rating: Option<f64>,
}
