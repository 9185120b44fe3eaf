//! Port for the `project_requests` collection.

use async_trait::async_trait;

use crate::domain::{Error, ProjectId, ProjectRequest, RequestId, RequestStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by request repository adapters.
    pub enum RequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "request repository query failed: {message}",
    }
}

/// Read and write project applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// All applications, newest first.
    async fn list(&self) -> Result<Vec<ProjectRequest>, RequestRepositoryError>;

    /// Applications made by one mentee, newest first.
    async fn list_by_mentee(
        &self,
        mentee_id: &UserId,
    ) -> Result<Vec<ProjectRequest>, RequestRepositoryError>;

    /// Applications to any of `projects`, newest first.
    async fn list_for_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<ProjectRequest>, RequestRepositoryError>;

    /// Fetch one application.
    async fn find_by_id(
        &self,
        id: RequestId,
    ) -> Result<Option<ProjectRequest>, RequestRepositoryError>;

    /// Insert a new application.
    async fn insert(&self, request: &ProjectRequest) -> Result<(), RequestRepositoryError>;

    /// Set the decision; returns the updated row or `None` if absent.
    async fn update_status(
        &self,
        id: RequestId,
        status: RequestStatus,
    ) -> Result<Option<ProjectRequest>, RequestRepositoryError>;
}

/// Fixture with no stored applications.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRequestRepository;

#[async_trait]
impl RequestRepository for FixtureRequestRepository {
    async fn list(&self) -> Result<Vec<ProjectRequest>, RequestRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_mentee(
        &self,
        _mentee_id: &UserId,
    ) -> Result<Vec<ProjectRequest>, RequestRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_projects(
        &self,
        _projects: &[ProjectId],
    ) -> Result<Vec<ProjectRequest>, RequestRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: RequestId,
    ) -> Result<Option<ProjectRequest>, RequestRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _request: &ProjectRequest) -> Result<(), RequestRepositoryError> {
        Ok(())
    }

    async fn update_status(
        &self,
        _id: RequestId,
        _status: RequestStatus,
    ) -> Result<Option<ProjectRequest>, RequestRepositoryError> {
        Ok(None)
    }
}

impl From<RequestRepositoryError> for Error {
    fn from(err: RequestRepositoryError) -> Self {
        match err {
            RequestRepositoryError::Connection { message } => Error::service_unavailable(message),
            RequestRepositoryError::Query { message } => Error::internal(message),
        }
    }
}
