//! Mentee pages: projects, applications, tests, hand-ins and feedback.

use std::collections::HashSet;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::info;

use super::drafts::{FileDraft, TestAttempt, WorkDraft};
use super::views::{
    DeadlineView, FeedbackView, MenteeOverview, MentorCard, MyProjects, ProjectView, RequestView,
    SubmissionView, TestResult, TestView,
};
use super::{DashboardPorts, Directory, by_id, or_empty};
use crate::domain::ports::FileUpload;
use crate::domain::project::missing_field;
use crate::domain::{
    Error, NewSubmission, ProjectId, ProjectRequest, ProjectStatus, ProjectTest, RequestId,
    RequestStatus, Role, SubmissionId, TestId, UserId,
};

const RECENT_FEEDBACK: usize = 2;
const UPCOMING_DEADLINES: usize = 3;

/// Data behind the mentee pages, scoped to one mentee.
#[derive(Clone)]
pub struct MenteeDashboard {
    ports: DashboardPorts,
}

impl MenteeDashboard {
    /// Build the service over shared ports.
    pub fn new(ports: DashboardPorts) -> Self {
        Self { ports }
    }

    async fn my_requests(&self, me: &UserId) -> Vec<ProjectRequest> {
        or_empty(self.ports.requests.list_by_mentee(me).await, "project_requests")
    }

    /// Projects with an open (pending or approved) application by `me`.
    async fn engaged_projects(&self, me: &UserId) -> HashSet<ProjectId> {
        self.my_requests(me)
            .await
            .into_iter()
            .filter(|request| request.status.is_open())
            .map(|request| request.project_id)
            .collect()
    }

    /// Landing page figures.
    pub async fn overview(&self, me: &UserId) -> MenteeOverview {
        let directory = Directory::load(&self.ports).await;
        let requests = self.my_requests(me).await;
        let mut approved: Vec<ProjectView> = requests
            .iter()
            .filter(|request| request.status == RequestStatus::Approved)
            .filter_map(|request| directory.project(request.project_id).cloned())
            .map(|project| directory.project_view(project))
            .collect();
        approved.sort_by_key(|view| view.project.status != ProjectStatus::InProgress);

        let today = self.ports.clock.utc().date_naive();
        let mut upcoming_deadlines: Vec<DeadlineView> = approved
            .iter()
            .filter_map(|view| {
                let deadline = view.project.deadline.filter(|day| *day >= today)?;
                Some(DeadlineView {
                    project_id: view.project.id,
                    title: view.project.title.clone(),
                    deadline,
                })
            })
            .collect();
        upcoming_deadlines.sort_by_key(|entry| entry.deadline);
        upcoming_deadlines.truncate(UPCOMING_DEADLINES);

        let mut feedback = self.feedback(me).await;
        feedback.truncate(RECENT_FEEDBACK);

        MenteeOverview {
            current_project: approved.into_iter().next(),
            pending_requests: requests
                .iter()
                .filter(|request| request.status == RequestStatus::Pending)
                .count(),
            submissions: or_empty(self.ports.submissions.list_by_mentee(me).await, "submissions")
                .len(),
            upcoming_deadlines,
            recent_feedback: feedback,
        }
    }

    /// Accepted projects plus every application.
    pub async fn my_projects(&self, me: &UserId) -> MyProjects {
        let directory = Directory::load(&self.ports).await;
        let requests = self.my_requests(me).await;
        let projects = requests
            .iter()
            .filter(|request| request.status == RequestStatus::Approved)
            .filter_map(|request| directory.project(request.project_id).cloned())
            .map(|project| directory.project_view(project))
            .collect();
        MyProjects {
            projects,
            requests: requests
                .into_iter()
                .map(|request| directory.request_view(request))
                .collect(),
        }
    }

    /// Projects open for applications.
    pub async fn available_projects(&self) -> Vec<ProjectView> {
        let directory = Directory::load(&self.ports).await;
        or_empty(self.ports.projects.list().await, "projects")
            .into_iter()
            .filter(|project| project.status == ProjectStatus::Available)
            .map(|project| directory.project_view(project))
            .collect()
    }

    /// Apply to join a project.
    ///
    /// # Errors
    /// - `not_found` when the project does not exist.
    /// - `invalid_request` when it is not open for applications.
    /// - `conflict` when `me` already has a pending or approved application.
    pub async fn apply(&self, me: &UserId, project_id: ProjectId) -> Result<RequestView, Error> {
        let project = self
            .ports
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))?;
        if project.status != ProjectStatus::Available {
            return Err(Error::invalid_request("project is not open for applications")
                .with_details(serde_json::json!({
                    "field": "projectId",
                    "code": "project_unavailable",
                })));
        }
        let existing = self.ports.requests.list_by_mentee(me).await?;
        if existing
            .iter()
            .any(|request| request.project_id == project_id && request.status.is_open())
        {
            return Err(Error::conflict("you have already applied to this project")
                .with_details(serde_json::json!({ "code": "already_applied" })));
        }
        let request = ProjectRequest {
            id: RequestId::random(),
            mentee_id: me.clone(),
            project_id,
            status: RequestStatus::Pending,
            created_at: self.ports.clock.utc(),
        };
        self.ports.requests.insert(&request).await?;
        info!(mentee_id = %me, %project_id, request_id = %request.id, "application submitted");
        Ok(Directory::load(&self.ports).await.request_view(request))
    }

    /// Mentor directory, optionally filtered.
    ///
    /// `search` matches names case-insensitively; `expertise` keeps mentors
    /// with a project using that technology.
    pub async fn mentors(&self, search: Option<&str>, expertise: Option<&str>) -> Vec<MentorCard> {
        let mentors = or_empty(self.ports.profiles.list(Some(Role::Mentor)).await, "profiles");
        let projects = or_empty(self.ports.projects.list().await, "projects");
        let search = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);
        let expertise = expertise.map(str::trim).filter(|s| !s.is_empty());
        mentors
            .into_iter()
            .map(|profile| {
                let owned: Vec<_> = projects
                    .iter()
                    .filter(|project| &project.mentor_id == profile.id())
                    .collect();
                let mut expertise: Vec<String> = Vec::new();
                for tech in owned.iter().flat_map(|project| &project.tech_stack) {
                    if !expertise.contains(tech) {
                        expertise.push(tech.clone());
                    }
                }
                MentorCard {
                    id: profile.id().clone(),
                    name: profile.name().as_ref().to_owned(),
                    expertise,
                    project_count: owned.len(),
                }
            })
            .filter(|card| {
                search
                    .as_deref()
                    .is_none_or(|needle| card.name.to_lowercase().contains(needle))
            })
            .filter(|card| {
                expertise.is_none_or(|wanted| {
                    card.expertise
                        .iter()
                        .any(|tech| tech.eq_ignore_ascii_case(wanted))
                })
            })
            .collect()
    }

    /// Tests for projects `me` has an open application on.
    pub async fn tests(&self, me: &UserId) -> Vec<TestView> {
        let engaged = self.engaged_projects(me).await;
        let directory = Directory::load(&self.ports).await;
        or_empty(self.ports.tests.list().await, "project_tests")
            .into_iter()
            .filter(|test| engaged.contains(&test.project_id))
            .map(|test| TestView {
                id: test.id,
                project_id: test.project_id,
                project_title: directory.project_title(test.project_id),
                questions: test.questions.iter().map(|q| q.public_view()).collect(),
                title: test.title,
            })
            .collect()
    }

    async fn visible_test(&self, me: &UserId, test_id: TestId) -> Result<ProjectTest, Error> {
        let test = self
            .ports
            .tests
            .find_by_id(test_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("test {test_id} not found")))?;
        let open = self
            .ports
            .requests
            .list_by_mentee(me)
            .await?
            .iter()
            .any(|request| request.project_id == test.project_id && request.status.is_open());
        if !open {
            return Err(Error::forbidden("apply to the project before taking its test"));
        }
        Ok(test)
    }

    /// Score an attempt. Attempts are not stored.
    ///
    /// # Errors
    /// `not_found` for an unknown test; `forbidden` when `me` has no open
    /// application on the test's project.
    pub async fn take_test(
        &self,
        me: &UserId,
        test_id: TestId,
        attempt: &TestAttempt,
    ) -> Result<TestResult, Error> {
        let test = self.visible_test(me, test_id).await?;
        let score = test.score(&attempt.answers);
        info!(mentee_id = %me, %test_id, correct = score.correct, total = score.total, "test attempt scored");
        Ok(TestResult { test_id, score })
    }

    /// Hand in project work.
    ///
    /// The link/file requirement is checked before anything is uploaded.
    ///
    /// # Errors
    /// - `invalid_request` for a missing project, a missing link and file, or
    ///   an undecodable file.
    /// - `not_found` for an unknown project.
    /// - `forbidden` when `me` has no open application on the project.
    pub async fn submit(&self, me: &UserId, draft: WorkDraft) -> Result<SubmissionView, Error> {
        let project_id = draft.project_id.ok_or_else(|| missing_field("projectId"))?;
        let has_link = draft
            .github_link
            .as_deref()
            .is_some_and(|link| !link.trim().is_empty());
        let file = draft.file.map(decode_file).transpose()?;
        if !has_link && file.is_none() {
            return Err(missing_field("githubLink"));
        }

        let project = self
            .ports
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))?;
        let open = self
            .ports
            .requests
            .list_by_mentee(me)
            .await?
            .iter()
            .any(|request| request.project_id == project.id && request.status.is_open());
        if !open {
            return Err(Error::forbidden("you are not working on this project"));
        }

        let id = SubmissionId::random();
        let file_url = match file {
            Some((name, content_type, bytes)) => Some(
                self.ports
                    .files
                    .upload(FileUpload {
                        path: format!("submissions/{me}/{id}/{name}"),
                        content_type,
                        bytes,
                    })
                    .await?,
            ),
            None => None,
        };
        let submission =
            NewSubmission::try_new(project_id, me.clone(), draft.github_link.as_deref(), file_url.as_deref())?
                .into_submission(id, self.ports.clock.utc());
        self.ports.submissions.insert(&submission).await?;
        info!(mentee_id = %me, %project_id, submission_id = %id, "work submitted");
        Ok(Directory::load(&self.ports).await.submission_view(submission))
    }

    /// Feedback on `me`'s submissions, newest first.
    pub async fn feedback(&self, me: &UserId) -> Vec<FeedbackView> {
        let submissions = or_empty(self.ports.submissions.list_by_mentee(me).await, "submissions");
        if submissions.is_empty() {
            return Vec::new();
        }
        let ids: Vec<SubmissionId> = submissions.iter().map(|row| row.id).collect();
        let feedback = or_empty(self.ports.feedback.list_for_submissions(&ids).await, "feedback");
        let directory = Directory::load(&self.ports).await;
        let submissions = by_id(submissions);
        feedback
            .into_iter()
            .map(|row| directory.feedback_view(row, &submissions))
            .collect()
    }
}

/// Decode an attached file into `(safe name, content type, bytes)`.
fn decode_file(file: FileDraft) -> Result<(String, String, Vec<u8>), Error> {
    let file_error = |code: &str, message: &str| {
        Error::invalid_request(message)
            .with_details(serde_json::json!({ "field": "file", "code": code }))
    };
    let name: String = file
        .name
        .trim()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    if name.is_empty() || name.chars().all(|c| c == '.') {
        return Err(missing_field("file"));
    }
    let bytes = STANDARD
        .decode(file.data.trim())
        .map_err(|_| file_error("invalid_encoding", "file data must be base64"))?;
    if bytes.is_empty() {
        return Err(file_error("empty_file", "file must not be empty"));
    }
    let content_type = file
        .content_type
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "application/octet-stream".to_owned());
    Ok((name, content_type, bytes))
}
