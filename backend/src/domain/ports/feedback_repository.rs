//! Port for the `feedback` collection.

use async_trait::async_trait;

use crate::domain::{Error, Feedback, SubmissionId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by feedback repository adapters.
    pub enum FeedbackRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "feedback repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "feedback repository query failed: {message}",
    }
}

/// Read and write feedback records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// All feedback, newest first.
    async fn list(&self) -> Result<Vec<Feedback>, FeedbackRepositoryError>;

    /// Feedback written by one mentor, newest first.
    async fn list_by_mentor(&self, mentor_id: &UserId)
    -> Result<Vec<Feedback>, FeedbackRepositoryError>;

    /// Feedback on any of `submissions`, newest first.
    async fn list_for_submissions(
        &self,
        submissions: &[SubmissionId],
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError>;

    /// Insert a new feedback entry.
    async fn insert(&self, feedback: &Feedback) -> Result<(), FeedbackRepositoryError>;
}

/// Fixture with no stored feedback.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeedbackRepository;

#[async_trait]
impl FeedbackRepository for FixtureFeedbackRepository {
    async fn list(&self) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_mentor(
        &self,
        _mentor_id: &UserId,
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_submissions(
        &self,
        _submissions: &[SubmissionId],
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _feedback: &Feedback) -> Result<(), FeedbackRepositoryError> {
        Ok(())
    }
}

impl From<FeedbackRepositoryError> for Error {
    fn from(err: FeedbackRepositoryError) -> Self {
        match err {
            FeedbackRepositoryError::Connection { message } => Error::service_unavailable(message),
            FeedbackRepositoryError::Query { message } => Error::internal(message),
        }
    }
}
