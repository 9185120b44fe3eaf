//! Accounts and profiles.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    AuthService, AuthServiceError, ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{Identity, LoginCredentials, Profile, Role, SignupDetails, UserId};

use super::{MemoryBackend, digest};

#[async_trait]
impl AuthService for MemoryBackend {
    async fn sign_up(&self, details: &SignupDetails) -> Result<Identity, AuthServiceError> {
        let mut tables = self
            .write()
            .map_err(|err| AuthServiceError::query(err.to_string()))?;
        let credentials = details.credentials();
        let email = credentials.email();
        if tables.accounts.contains_key(email.as_ref()) {
            return Err(AuthServiceError::email_taken(email.as_ref()));
        }
        let identity = Identity::new(UserId::random(), details.name().clone(), email.clone());
        tables.insert_account(identity.clone(), credentials.password());
        debug!(user_id = %identity.id(), "account registered");
        Ok(identity)
    }

    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Identity, AuthServiceError> {
        let tables = self
            .read()
            .map_err(|err| AuthServiceError::query(err.to_string()))?;
        tables
            .accounts
            .get(credentials.email().as_ref())
            .filter(|account| account.password_digest == digest(credentials.password()))
            .map(|account| account.identity.clone())
            .ok_or_else(AuthServiceError::invalid_credentials)
    }

    async fn identity(&self, id: &UserId) -> Result<Option<Identity>, AuthServiceError> {
        let tables = self
            .read()
            .map_err(|err| AuthServiceError::query(err.to_string()))?;
        Ok(tables.account_by_id(id).map(|account| account.identity.clone()))
    }

    async fn sign_out(&self, id: &UserId) -> Result<(), AuthServiceError> {
        debug!(user_id = %id, "signed out");
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryBackend {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, ProfileRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| ProfileRepositoryError::query(err.to_string()))?;
        Ok(tables.profiles.get(id).cloned())
    }

    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut tables = self
            .write()
            .map_err(|err| ProfileRepositoryError::query(err.to_string()))?;
        if tables.profiles.contains_key(profile.id()) {
            return Err(ProfileRepositoryError::duplicate(profile.id().to_string()));
        }
        tables.profiles.insert(profile.id().clone(), profile.clone());
        Ok(())
    }

    async fn list(&self, role: Option<Role>) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let tables = self
            .read()
            .map_err(|err| ProfileRepositoryError::query(err.to_string()))?;
        let mut profiles: Vec<Profile> = tables
            .profiles
            .values()
            .filter(|profile| role.is_none_or(|role| profile.role() == role))
            .cloned()
            .collect();
        profiles.sort_by(|a, b| a.name().as_ref().cmp(b.name().as_ref()));
        Ok(profiles)
    }
}
