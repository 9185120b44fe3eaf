//! Port for the `submissions` collection.

use async_trait::async_trait;

use crate::domain::{Error, ProjectId, Submission, SubmissionId, SubmissionStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by submission repository adapters.
    pub enum SubmissionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "submission repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "submission repository query failed: {message}",
    }
}

/// Read and write submission records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// All submissions, newest first.
    async fn list(&self) -> Result<Vec<Submission>, SubmissionRepositoryError>;

    /// Submissions handed in by one mentee, newest first.
    async fn list_by_mentee(
        &self,
        mentee_id: &UserId,
    ) -> Result<Vec<Submission>, SubmissionRepositoryError>;

    /// Submissions on any of `projects`, newest first.
    async fn list_for_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<Submission>, SubmissionRepositoryError>;

    /// Fetch one submission.
    async fn find_by_id(
        &self,
        id: SubmissionId,
    ) -> Result<Option<Submission>, SubmissionRepositoryError>;

    /// Insert a new submission.
    async fn insert(&self, submission: &Submission) -> Result<(), SubmissionRepositoryError>;

    /// Set the review status; returns the updated row or `None` if absent.
    async fn update_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>, SubmissionRepositoryError>;
}

/// Fixture with no stored submissions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubmissionRepository;

#[async_trait]
impl SubmissionRepository for FixtureSubmissionRepository {
    async fn list(&self) -> Result<Vec<Submission>, SubmissionRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_mentee(
        &self,
        _mentee_id: &UserId,
    ) -> Result<Vec<Submission>, SubmissionRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_projects(
        &self,
        _projects: &[ProjectId],
    ) -> Result<Vec<Submission>, SubmissionRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: SubmissionId,
    ) -> Result<Option<Submission>, SubmissionRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _submission: &Submission) -> Result<(), SubmissionRepositoryError> {
        Ok(())
    }

    async fn update_status(
        &self,
        _id: SubmissionId,
        _status: SubmissionStatus,
    ) -> Result<Option<Submission>, SubmissionRepositoryError> {
        Ok(None)
    }
}

impl From<SubmissionRepositoryError> for Error {
    fn from(err: SubmissionRepositoryError) -> Self {
        match err {
            SubmissionRepositoryError::Connection { message } => Error::service_unavailable(message),
            SubmissionRepositoryError::Query { message } => Error::internal(message),
        }
    }
}
