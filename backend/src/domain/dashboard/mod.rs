//! Role-scoped dashboard data.
//!
//! Each role gets a service over the shared [`DashboardPorts`]. Reads follow
//! one rule: a failed fetch is logged and presented as an empty result, so a
//! page still renders when a collection is unavailable. Writes propagate
//! collaborator failures as domain errors, and inputs are validated before any
//! collaborator call.

mod coordinator;
mod drafts;
mod mentee;
mod mentor;
mod views;

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use mockable::Clock;
use tracing::warn;

use super::ports::{
    FeedbackRepository, FileStorage, ProfileRepository, ProjectRepository, ProjectTestRepository,
    RequestRepository, SubmissionRepository,
};
use super::{Feedback, Project, ProjectId, ProjectRequest, Submission, SubmissionId, UserId};

pub use coordinator::CoordinatorDashboard;
pub use drafts::{
    FeedbackDraft, FileDraft, ProjectDraft, RequestDecision, ReviewDecision, TestAttempt,
    TestDraft, WorkDraft,
};
pub use mentee::MenteeDashboard;
pub use mentor::MentorDashboard;
pub use views::{
    Analytics, CoordinatorOverview, DeadlineView, FeedbackView, MenteeOverview, MentorCard,
    MentorOverview, MyProjects, ProjectStatusCounts, ProjectView, RequestStatusCounts,
    RequestView, SubmissionStatusCounts, SubmissionView, TestResult, TestView,
};

/// Label used when a referenced project no longer exists.
pub const UNKNOWN_PROJECT: &str = "Unknown project";
/// Label used when a referenced person has no profile.
pub const UNKNOWN_USER: &str = "Unknown user";

/// Collaborators shared by the dashboard services.
#[derive(Clone)]
pub struct DashboardPorts {
    pub profiles: Arc<dyn ProfileRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub requests: Arc<dyn RequestRepository>,
    pub tests: Arc<dyn ProjectTestRepository>,
    pub files: Arc<dyn FileStorage>,
    pub clock: Arc<dyn Clock>,
}

/// Unwrap a read, logging and substituting the empty value on failure.
pub(crate) fn or_empty<T, E>(result: Result<T, E>, collection: &'static str) -> T
where
    T: Default,
    E: Display,
{
    result.unwrap_or_else(|error| {
        warn!(collection, %error, "read failed; presenting an empty result");
        T::default()
    })
}

/// Project and name lookups used to decorate rows.
#[derive(Debug, Default)]
pub(crate) struct Directory {
    projects: HashMap<ProjectId, Project>,
    names: HashMap<UserId, String>,
}

impl Directory {
    pub(crate) async fn load(ports: &DashboardPorts) -> Self {
        let projects = or_empty(ports.projects.list().await, "projects");
        let profiles = or_empty(ports.profiles.list(None).await, "profiles");
        Self {
            projects: projects
                .into_iter()
                .map(|project| (project.id, project))
                .collect(),
            names: profiles
                .into_iter()
                .map(|profile| (profile.id().clone(), profile.name().as_ref().to_owned()))
                .collect(),
        }
    }

    pub(crate) fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    pub(crate) fn project_title(&self, id: ProjectId) -> String {
        self.project(id)
            .map_or_else(|| UNKNOWN_PROJECT.to_owned(), |project| project.title.clone())
    }

    pub(crate) fn name(&self, id: &UserId) -> String {
        self.names
            .get(id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_USER.to_owned())
    }

    pub(crate) fn project_view(&self, project: Project) -> ProjectView {
        let mentor_name = self.name(&project.mentor_id);
        ProjectView {
            project,
            mentor_name,
        }
    }

    pub(crate) fn request_view(&self, request: ProjectRequest) -> RequestView {
        RequestView {
            project_title: self.project_title(request.project_id),
            mentee_name: self.name(&request.mentee_id),
            request,
        }
    }

    pub(crate) fn submission_view(&self, submission: Submission) -> SubmissionView {
        SubmissionView {
            project_title: self.project_title(submission.project_id),
            mentee_name: self.name(&submission.mentee_id),
            submission,
        }
    }

    /// Decorate feedback; `submissions` supplies the project and mentee.
    pub(crate) fn feedback_view(
        &self,
        feedback: Feedback,
        submissions: &HashMap<SubmissionId, Submission>,
    ) -> FeedbackView {
        let submission = submissions.get(&feedback.submission_id);
        FeedbackView {
            project_id: submission.map(|row| row.project_id),
            project_title: submission.map_or_else(
                || UNKNOWN_PROJECT.to_owned(),
                |row| self.project_title(row.project_id),
            ),
            mentee_name: submission
                .map_or_else(|| UNKNOWN_USER.to_owned(), |row| self.name(&row.mentee_id)),
            mentor_name: self.name(&feedback.mentor_id),
            feedback,
        }
    }
}

/// Index submissions by id.
pub(crate) fn by_id(submissions: Vec<Submission>) -> HashMap<SubmissionId, Submission> {
    submissions.into_iter().map(|row| (row.id, row)).collect()
}
