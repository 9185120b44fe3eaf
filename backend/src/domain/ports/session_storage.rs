//! Port for per-client session state that survives between requests.
//!
//! Only two values persist: the authenticated identity id and the role
//! override hint. Everything else about a session is derived again on each
//! request.

use crate::domain::{Role, UserId};

use super::define_port_error;

/// Storage key for the authenticated identity id.
pub const USER_ID_KEY: &str = "user_id";

/// Storage key for the role override hint.
pub const ROLE_HINT_KEY: &str = "mockUserRole";

define_port_error! {
    /// Errors raised by session storage adapters.
    pub enum SessionStorageError {
        /// A stored value could not be read or decoded.
        Read { key: String, message: String } => "session value {key} unreadable: {message}",
        /// A value could not be written.
        Write { key: String, message: String } => "session value {key} not stored: {message}",
    }
}

/// Client-scoped key/value state.
///
/// Implementations are request-local, so the trait carries no `Send` bound.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage {
    /// Identity id stored at sign-in.
    fn user_id(&self) -> Result<Option<UserId>, SessionStorageError>;

    /// Persist the identity id.
    fn set_user_id(&mut self, id: &UserId) -> Result<(), SessionStorageError>;

    /// Role override hint, if one was persisted.
    fn role_hint(&self) -> Result<Option<Role>, SessionStorageError>;

    /// Persist the role override hint.
    fn set_role_hint(&mut self, role: Role) -> Result<(), SessionStorageError>;

    /// Remove every stored value.
    fn clear(&mut self);
}

/// Session storage held in process memory.
///
/// Used by tests and by callers that drive a [`crate::domain::SessionStore`]
/// without a cookie session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InMemorySessionStorage {
    user_id: Option<UserId>,
    role_hint: Option<Role>,
}

impl InMemorySessionStorage {
    /// Storage pre-populated with a role hint.
    pub fn with_role_hint(role: Role) -> Self {
        Self {
            role_hint: Some(role),
            ..Self::default()
        }
    }

    /// Storage pre-populated with an identity id.
    pub fn with_user_id(id: UserId) -> Self {
        Self {
            user_id: Some(id),
            ..Self::default()
        }
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn user_id(&self) -> Result<Option<UserId>, SessionStorageError> {
        Ok(self.user_id.clone())
    }

    fn set_user_id(&mut self, id: &UserId) -> Result<(), SessionStorageError> {
        self.user_id = Some(id.clone());
        Ok(())
    }

    fn role_hint(&self) -> Result<Option<Role>, SessionStorageError> {
        Ok(self.role_hint)
    }

    fn set_role_hint(&mut self, role: Role) -> Result<(), SessionStorageError> {
        self.role_hint = Some(role);
        Ok(())
    }

    fn clear(&mut self) {
        self.user_id = None;
        self.role_hint = None;
    }
}
