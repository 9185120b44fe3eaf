//! Port for the `projects` collection.

use async_trait::async_trait;

use crate::domain::{Error, Project, ProjectId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
    }
}

/// Read and write project records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All projects.
    async fn list(&self) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Projects owned by one mentor.
    async fn list_by_mentor(&self, mentor_id: &UserId)
    -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Fetch one project.
    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Insert a new project.
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Delete a project; returns whether a record was removed.
    async fn delete(&self, id: ProjectId) -> Result<bool, ProjectRepositoryError>;
}

/// Fixture with no stored projects.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectRepository;

#[async_trait]
impl ProjectRepository for FixtureProjectRepository {
    async fn list(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_mentor(
        &self,
        _mentor_id: &UserId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _project: &Project) -> Result<(), ProjectRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: ProjectId) -> Result<bool, ProjectRepositoryError> {
        Ok(false)
    }
}

impl From<ProjectRepositoryError> for Error {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::Connection { message } => Error::service_unavailable(message),
            ProjectRepositoryError::Query { message } => Error::internal(message),
        }
    }
}
