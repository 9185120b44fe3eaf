//! Projects, submissions, feedback, requests and tests.

use std::cmp::Reverse;

use async_trait::async_trait;

use crate::domain::ports::{
    FeedbackRepository, FeedbackRepositoryError, ProjectRepository, ProjectRepositoryError,
    ProjectTestRepository, ProjectTestRepositoryError, RequestRepository, RequestRepositoryError,
    SubmissionRepository, SubmissionRepositoryError,
};
use crate::domain::{
    Feedback, Project, ProjectId, ProjectRequest, ProjectTest, RequestId, RequestStatus,
    Submission, SubmissionId, SubmissionStatus, TestId, UserId,
};

use super::MemoryBackend;

fn newest_submissions(mut rows: Vec<Submission>) -> Vec<Submission> {
    rows.sort_by_key(|row| Reverse(row.submitted_at));
    rows
}

fn newest_feedback(mut rows: Vec<Feedback>) -> Vec<Feedback> {
    rows.sort_by_key(|row| Reverse(row.created_at));
    rows
}

fn newest_requests(mut rows: Vec<ProjectRequest>) -> Vec<ProjectRequest> {
    rows.sort_by_key(|row| Reverse(row.created_at));
    rows
}

#[async_trait]
impl ProjectRepository for MemoryBackend {
    async fn list(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| ProjectRepositoryError::query(err.to_string()))?;
        Ok(tables.projects.clone())
    }

    async fn list_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| ProjectRepositoryError::query(err.to_string()))?;
        Ok(tables
            .projects
            .iter()
            .filter(|project| &project.mentor_id == mentor_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| ProjectRepositoryError::query(err.to_string()))?;
        Ok(tables.projects.iter().find(|project| project.id == id).cloned())
    }

    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut tables = self
            .write()
            .map_err(|err| ProjectRepositoryError::query(err.to_string()))?;
        tables.projects.push(project.clone());
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> Result<bool, ProjectRepositoryError> {
        let mut tables = self
            .write()
            .map_err(|err| ProjectRepositoryError::query(err.to_string()))?;
        let before = tables.projects.len();
        tables.projects.retain(|project| project.id != id);
        Ok(tables.projects.len() != before)
    }
}

#[async_trait]
impl SubmissionRepository for MemoryBackend {
    async fn list(&self) -> Result<Vec<Submission>, SubmissionRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| SubmissionRepositoryError::query(err.to_string()))?;
        Ok(newest_submissions(tables.submissions.clone()))
    }

    async fn list_by_mentee(
        &self,
        mentee_id: &UserId,
    ) -> Result<Vec<Submission>, SubmissionRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| SubmissionRepositoryError::query(err.to_string()))?;
        Ok(newest_submissions(
            tables
                .submissions
                .iter()
                .filter(|row| &row.mentee_id == mentee_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_for_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<Submission>, SubmissionRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| SubmissionRepositoryError::query(err.to_string()))?;
        Ok(newest_submissions(
            tables
                .submissions
                .iter()
                .filter(|row| projects.contains(&row.project_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_id(
        &self,
        id: SubmissionId,
    ) -> Result<Option<Submission>, SubmissionRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| SubmissionRepositoryError::query(err.to_string()))?;
        Ok(tables.submissions.iter().find(|row| row.id == id).cloned())
    }

    async fn insert(&self, submission: &Submission) -> Result<(), SubmissionRepositoryError> {
        let mut tables = self
            .write()
            .map_err(|err| SubmissionRepositoryError::query(err.to_string()))?;
        tables.submissions.push(submission.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>, SubmissionRepositoryError> {
        let mut tables = self
            .write()
            .map_err(|err| SubmissionRepositoryError::query(err.to_string()))?;
        Ok(tables
            .submissions
            .iter_mut()
            .find(|row| row.id == id)
            .map(|row| {
                row.status = status;
                row.clone()
            }))
    }
}

#[async_trait]
impl FeedbackRepository for MemoryBackend {
    async fn list(&self) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| FeedbackRepositoryError::query(err.to_string()))?;
        Ok(newest_feedback(tables.feedback.clone()))
    }

    async fn list_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| FeedbackRepositoryError::query(err.to_string()))?;
        Ok(newest_feedback(
            tables
                .feedback
                .iter()
                .filter(|row| &row.mentor_id == mentor_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_for_submissions(
        &self,
        submissions: &[SubmissionId],
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| FeedbackRepositoryError::query(err.to_string()))?;
        Ok(newest_feedback(
            tables
                .feedback
                .iter()
                .filter(|row| submissions.contains(&row.submission_id))
                .cloned()
                .collect(),
        ))
    }

    async fn insert(&self, feedback: &Feedback) -> Result<(), FeedbackRepositoryError> {
        let mut tables = self
            .write()
            .map_err(|err| FeedbackRepositoryError::query(err.to_string()))?;
        tables.feedback.push(feedback.clone());
        Ok(())
    }
}

#[async_trait]
impl RequestRepository for MemoryBackend {
    async fn list(&self) -> Result<Vec<ProjectRequest>, RequestRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| RequestRepositoryError::query(err.to_string()))?;
        Ok(newest_requests(tables.requests.clone()))
    }

    async fn list_by_mentee(
        &self,
        mentee_id: &UserId,
    ) -> Result<Vec<ProjectRequest>, RequestRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| RequestRepositoryError::query(err.to_string()))?;
        Ok(newest_requests(
            tables
                .requests
                .iter()
                .filter(|row| &row.mentee_id == mentee_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_for_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<ProjectRequest>, RequestRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| RequestRepositoryError::query(err.to_string()))?;
        Ok(newest_requests(
            tables
                .requests
                .iter()
                .filter(|row| projects.contains(&row.project_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_id(
        &self,
        id: RequestId,
    ) -> Result<Option<ProjectRequest>, RequestRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| RequestRepositoryError::query(err.to_string()))?;
        Ok(tables.requests.iter().find(|row| row.id == id).cloned())
    }

    async fn insert(&self, request: &ProjectRequest) -> Result<(), RequestRepositoryError> {
        let mut tables = self
            .write()
            .map_err(|err| RequestRepositoryError::query(err.to_string()))?;
        tables.requests.push(request.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        id: RequestId,
        status: RequestStatus,
    ) -> Result<Option<ProjectRequest>, RequestRepositoryError> {
        let mut tables = self
            .write()
            .map_err(|err| RequestRepositoryError::query(err.to_string()))?;
        Ok(tables
            .requests
            .iter_mut()
            .find(|row| row.id == id)
            .map(|row| {
                row.status = status;
                row.clone()
            }))
    }
}

#[async_trait]
impl ProjectTestRepository for MemoryBackend {
    async fn list(&self) -> Result<Vec<ProjectTest>, ProjectTestRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| ProjectTestRepositoryError::query(err.to_string()))?;
        Ok(tables.tests.clone())
    }

    async fn list_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<ProjectTest>, ProjectTestRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| ProjectTestRepositoryError::query(err.to_string()))?;
        Ok(tables
            .tests
            .iter()
            .filter(|test| &test.mentor_id == mentor_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        id: TestId,
    ) -> Result<Option<ProjectTest>, ProjectTestRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| ProjectTestRepositoryError::query(err.to_string()))?;
        Ok(tables.tests.iter().find(|test| test.id == id).cloned())
    }

    async fn insert(&self, test: &ProjectTest) -> Result<(), ProjectTestRepositoryError> {
        let mut tables = self
            .write()
            .map_err(|err| ProjectTestRepositoryError::query(err.to_string()))?;
        tables.tests.push(test.clone());
        Ok(())
    }
}
