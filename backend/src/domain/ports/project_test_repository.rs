//! Port for the `project_tests` collection.

use async_trait::async_trait;

use crate::domain::{Error, ProjectTest, TestId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project test repository adapters.
    pub enum ProjectTestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "test repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "test repository query failed: {message}",
    }
}

/// Read and write project tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectTestRepository: Send + Sync {
    /// All tests.
    async fn list(&self) -> Result<Vec<ProjectTest>, ProjectTestRepositoryError>;

    /// Tests written by one mentor.
    async fn list_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<ProjectTest>, ProjectTestRepositoryError>;

    /// Fetch one test.
    async fn find_by_id(&self, id: TestId)
    -> Result<Option<ProjectTest>, ProjectTestRepositoryError>;

    /// Insert a new test.
    async fn insert(&self, test: &ProjectTest) -> Result<(), ProjectTestRepositoryError>;
}

/// Fixture with no stored tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectTestRepository;

#[async_trait]
impl ProjectTestRepository for FixtureProjectTestRepository {
    async fn list(&self) -> Result<Vec<ProjectTest>, ProjectTestRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_mentor(
        &self,
        _mentor_id: &UserId,
    ) -> Result<Vec<ProjectTest>, ProjectTestRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: TestId,
    ) -> Result<Option<ProjectTest>, ProjectTestRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _test: &ProjectTest) -> Result<(), ProjectTestRepositoryError> {
        Ok(())
    }
}

impl From<ProjectTestRepositoryError> for Error {
    fn from(err: ProjectTestRepositoryError) -> Self {
        match err {
            ProjectTestRepositoryError::Connection { message } => {
                Error::service_unavailable(message)
            }
            ProjectTestRepositoryError::Query { message } => Error::internal(message),
        }
    }
}
