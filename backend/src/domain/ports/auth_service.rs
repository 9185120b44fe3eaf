//! Port for the authentication collaborator.
//!
//! The collaborator owns accounts and their passwords. The domain only ever
//! sees the resulting [`Identity`]; the role lives in the profile record and is
//! resolved separately.

use async_trait::async_trait;

use crate::domain::{Error, Identity, LoginCredentials, SignupDetails, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by authentication adapters.
    pub enum AuthServiceError {
        /// Email and password did not match an account.
        InvalidCredentials => "invalid email or password",
        /// An account already exists for the email.
        EmailTaken { email: String } => "an account already exists for {email}",
        /// The collaborator could not be reached.
        Connection { message: String } => "auth service connection failed: {message}",
        /// The collaborator rejected or failed the call.
        Query { message: String } => "auth service call failed: {message}",
    }
}

/// Account registration, sign-in and identity lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account and return its identity.
    async fn sign_up(&self, details: &SignupDetails) -> Result<Identity, AuthServiceError>;

    /// Check credentials and return the matching identity.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Identity, AuthServiceError>;

    /// Look up the identity for a previously authenticated id.
    ///
    /// Returns `None` when the account no longer exists.
    async fn identity(&self, id: &UserId) -> Result<Option<Identity>, AuthServiceError>;

    /// End the collaborator-side session for `id`.
    async fn sign_out(&self, id: &UserId) -> Result<(), AuthServiceError>;
}

/// Fixture that knows no accounts.
///
/// Sign-up echoes the submitted details under a fresh id; sign-in always
/// fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthService;

#[async_trait]
impl AuthService for FixtureAuthService {
    async fn sign_up(&self, details: &SignupDetails) -> Result<Identity, AuthServiceError> {
        Ok(Identity::new(
            UserId::random(),
            details.name().clone(),
            details.credentials().email().clone(),
        ))
    }

    async fn sign_in(&self, _credentials: &LoginCredentials) -> Result<Identity, AuthServiceError> {
        Err(AuthServiceError::invalid_credentials())
    }

    async fn identity(&self, _id: &UserId) -> Result<Option<Identity>, AuthServiceError> {
        Ok(None)
    }

    async fn sign_out(&self, _id: &UserId) -> Result<(), AuthServiceError> {
        Ok(())
    }
}

impl From<AuthServiceError> for Error {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::InvalidCredentials => Error::unauthorized(err.to_string()),
            AuthServiceError::EmailTaken { .. } => Error::conflict(err.to_string())
                .with_details(serde_json::json!({ "field": "email", "code": "email_taken" })),
            AuthServiceError::Connection { message } => Error::service_unavailable(message),
            AuthServiceError::Query { message } => Error::internal(message),
        }
    }
}
