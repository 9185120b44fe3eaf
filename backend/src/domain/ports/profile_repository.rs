//! Port for the `profiles` collection.

use async_trait::async_trait;

use crate::domain::{Error, Profile, Role, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// A profile already exists for the identity.
        Duplicate { id: String } => "profile already exists for {id}",
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
    }
}

/// Read and write profile records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile for an identity; `None` when no record exists.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Insert a new profile.
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;

    /// List profiles, optionally restricted to one role.
    async fn list(&self, role: Option<Role>) -> Result<Vec<Profile>, ProfileRepositoryError>;
}

/// Fixture with no stored profiles that accepts every insert.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _profile: &Profile) -> Result<(), ProfileRepositoryError> {
        Ok(())
    }

    async fn list(&self, _role: Option<Role>) -> Result<Vec<Profile>, ProfileRepositoryError> {
        Ok(Vec::new())
    }
}

impl From<ProfileRepositoryError> for Error {
    fn from(err: ProfileRepositoryError) -> Self {
        match err {
            ProfileRepositoryError::Duplicate { .. } => Error::conflict(err.to_string()),
            ProfileRepositoryError::Connection { message } => Error::service_unavailable(message),
            ProfileRepositoryError::Query { message } => Error::internal(message),
        }
    }
}
