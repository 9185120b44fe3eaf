//! Mentor pages, scoped to the projects the mentor owns.

use tracing::info;

use super::drafts::{FeedbackDraft, RequestDecision, ReviewDecision, TestDraft};
use super::views::{FeedbackView, MentorOverview, RequestView, SubmissionView};
use super::{DashboardPorts, Directory, by_id, or_empty};
use crate::domain::project::missing_field;
use crate::domain::{
    Error, Feedback, FeedbackId, NewFeedback, NewProjectTest, Project, ProjectId, ProjectStatus,
    ProjectTest, RequestId, RequestSort, RequestStatus, SubmissionId, SubmissionStatus, TestId,
    UserId,
};

const RECENT_REQUESTS: usize = 2;

/// Data behind the mentor pages.
#[derive(Clone)]
pub struct MentorDashboard {
    ports: DashboardPorts,
}

impl MentorDashboard {
    /// Build the service over shared ports.
    pub fn new(ports: DashboardPorts) -> Self {
        Self { ports }
    }

    async fn own_projects(&self, me: &UserId) -> Vec<Project> {
        or_empty(self.ports.projects.list_by_mentor(me).await, "projects")
    }

    fn ids(projects: &[Project]) -> Vec<ProjectId> {
        projects.iter().map(|project| project.id).collect()
    }

    /// Fail unless `project_id` names a project owned by `me`.
    async fn owned_project(&self, me: &UserId, project_id: ProjectId) -> Result<Project, Error> {
        let project = self
            .ports
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))?;
        if &project.mentor_id != me {
            return Err(Error::forbidden("project belongs to another mentor"));
        }
        Ok(project)
    }

    /// Landing page figures for `me`'s projects.
    pub async fn overview(&self, me: &UserId) -> MentorOverview {
        let projects = self.own_projects(me).await;
        if projects.is_empty() {
            return MentorOverview::default();
        }
        let ids = Self::ids(&projects);
        let requests = or_empty(
            self.ports.requests.list_for_projects(&ids).await,
            "project_requests",
        );
        let submissions = or_empty(
            self.ports.submissions.list_for_projects(&ids).await,
            "submissions",
        );
        let directory = Directory::load(&self.ports).await;
        let pending: Vec<_> = requests
            .into_iter()
            .filter(|request| request.status == RequestStatus::Pending)
            .collect();
        MentorOverview {
            pending_requests: pending.len(),
            active_projects: projects
                .iter()
                .filter(|project| project.status == ProjectStatus::InProgress)
                .count(),
            pending_submissions: submissions
                .iter()
                .filter(|row| row.status == SubmissionStatus::Pending)
                .count(),
            recent_requests: pending
                .into_iter()
                .take(RECENT_REQUESTS)
                .map(|request| directory.request_view(request))
                .collect(),
        }
    }

    /// Applications to `me`'s projects in the requested order.
    pub async fn requests(&self, me: &UserId, sort: RequestSort) -> Vec<RequestView> {
        let projects = self.own_projects(me).await;
        if projects.is_empty() {
            return Vec::new();
        }
        let requests = or_empty(
            self.ports
                .requests
                .list_for_projects(&Self::ids(&projects))
                .await,
            "project_requests",
        );
        let directory = Directory::load(&self.ports).await;
        let mut views: Vec<RequestView> = requests
            .into_iter()
            .map(|request| directory.request_view(request))
            .collect();
        sort.sort(&mut views, |view| view.mentee_name.as_str(), |view| view.request.created_at);
        views
    }

    /// Approve or reject an application.
    ///
    /// # Errors
    /// `invalid_request` for a `pending` decision, `not_found` for an unknown
    /// request, `forbidden` when the project is not `me`'s.
    pub async fn decide_request(
        &self,
        me: &UserId,
        request_id: RequestId,
        decision: RequestDecision,
    ) -> Result<RequestView, Error> {
        let status = decision.validate()?;
        let request = self
            .ports
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("request {request_id} not found")))?;
        self.owned_project(me, request.project_id).await?;
        let updated = self
            .ports
            .requests
            .update_status(request_id, status)
            .await?
            .ok_or_else(|| Error::not_found(format!("request {request_id} not found")))?;
        info!(mentor_id = %me, %request_id, ?status, "request decided");
        Ok(Directory::load(&self.ports).await.request_view(updated))
    }

    /// Create a test for one of `me`'s projects.
    ///
    /// # Errors
    /// `invalid_request` for a missing project, title or questions, or an
    /// invalid question; `not_found`/`forbidden` for a project `me` does not
    /// own.
    pub async fn create_test(&self, me: &UserId, draft: TestDraft) -> Result<ProjectTest, Error> {
        let project_id = draft.project_id.ok_or_else(|| missing_field("projectId"))?;
        let new_test = NewProjectTest::try_new(project_id, me.clone(), &draft.title, draft.questions)?;
        self.owned_project(me, new_test.project_id()).await?;
        let test = new_test.into_test(TestId::random());
        self.ports.tests.insert(&test).await?;
        info!(mentor_id = %me, %project_id, test_id = %test.id, questions = test.questions.len(), "test created");
        Ok(test)
    }

    /// Tests `me` has written, answers included.
    pub async fn tests(&self, me: &UserId) -> Vec<ProjectTest> {
        or_empty(self.ports.tests.list_by_mentor(me).await, "project_tests")
    }

    /// Submissions on `me`'s projects, newest first.
    pub async fn submissions(&self, me: &UserId) -> Vec<SubmissionView> {
        let projects = self.own_projects(me).await;
        if projects.is_empty() {
            return Vec::new();
        }
        let rows = or_empty(
            self.ports
                .submissions
                .list_for_projects(&Self::ids(&projects))
                .await,
            "submissions",
        );
        let directory = Directory::load(&self.ports).await;
        rows.into_iter()
            .map(|row| directory.submission_view(row))
            .collect()
    }

    /// Settle a submission.
    ///
    /// # Errors
    /// `invalid_request` for a `pending` verdict, `not_found` for an unknown
    /// submission, `forbidden` when the project is not `me`'s.
    pub async fn review_submission(
        &self,
        me: &UserId,
        submission_id: SubmissionId,
        decision: ReviewDecision,
    ) -> Result<SubmissionView, Error> {
        let status = decision.validate()?;
        let submission = self
            .ports
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("submission {submission_id} not found")))?;
        self.owned_project(me, submission.project_id).await?;
        let updated = self
            .ports
            .submissions
            .update_status(submission_id, status)
            .await?
            .ok_or_else(|| Error::not_found(format!("submission {submission_id} not found")))?;
        info!(mentor_id = %me, %submission_id, ?status, "submission reviewed");
        Ok(Directory::load(&self.ports).await.submission_view(updated))
    }

    /// Leave feedback on a submission to one of `me`'s projects.
    ///
    /// # Errors
    /// `invalid_request` for a missing submission or comment, or a rating
    /// outside 1–5; `not_found`/`forbidden` as for reviews.
    pub async fn give_feedback(&self, me: &UserId, draft: FeedbackDraft) -> Result<FeedbackView, Error> {
        let submission_id = draft
            .submission_id
            .ok_or_else(|| missing_field("submissionId"))?;
        let new_feedback = NewFeedback::try_new(submission_id, me.clone(), &draft.comment, draft.rating)?;
        let submission = self
            .ports
            .submissions
            .find_by_id(new_feedback.submission_id())
            .await?
            .ok_or_else(|| Error::not_found(format!("submission {submission_id} not found")))?;
        self.owned_project(me, submission.project_id).await?;
        let feedback: Feedback = new_feedback.into_feedback(FeedbackId::random(), self.ports.clock.utc());
        self.ports.feedback.insert(&feedback).await?;
        info!(mentor_id = %me, %submission_id, rating = feedback.rating.get(), "feedback recorded");
        let directory = Directory::load(&self.ports).await;
        Ok(directory.feedback_view(feedback, &by_id(vec![submission])))
    }

    /// Feedback `me` has written, newest first.
    pub async fn feedback(&self, me: &UserId) -> Vec<FeedbackView> {
        let feedback = or_empty(self.ports.feedback.list_by_mentor(me).await, "feedback");
        if feedback.is_empty() {
            return Vec::new();
        }
        let submissions = by_id(or_empty(self.ports.submissions.list().await, "submissions"));
        let directory = Directory::load(&self.ports).await;
        feedback
            .into_iter()
            .map(|row| directory.feedback_view(row, &submissions))
            .collect()
    }
}
