//! Cookie-backed session storage.
//!
//! [`SessionContext`] wraps the Actix session and implements the domain
//! [`SessionStorage`] port, so a [`crate::domain::SessionStore`] can persist
//! the identity id and role hint without knowing about cookies.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::{ROLE_HINT_KEY, SessionStorage, SessionStorageError, USER_ID_KEY};
use crate::domain::{Role, UserId};

/// Request-scoped handle on the cookie session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    fn read(&self, key: &'static str) -> Result<Option<String>, SessionStorageError> {
        self.0
            .get::<String>(key)
            .map_err(|err| SessionStorageError::read(key, err.to_string()))
    }

    fn write(&self, key: &'static str, value: &str) -> Result<(), SessionStorageError> {
        self.0
            .insert(key, value)
            .map_err(|err| SessionStorageError::write(key, err.to_string()))
    }
}

impl SessionStorage for SessionContext {
    fn user_id(&self) -> Result<Option<UserId>, SessionStorageError> {
        self.read(USER_ID_KEY)?
            .map(|raw| {
                UserId::new(&raw).map_err(|err| SessionStorageError::read(USER_ID_KEY, err.to_string()))
            })
            .transpose()
    }

    fn set_user_id(&mut self, id: &UserId) -> Result<(), SessionStorageError> {
        self.write(USER_ID_KEY, &id.to_string())
    }

    fn role_hint(&self) -> Result<Option<Role>, SessionStorageError> {
        self.read(ROLE_HINT_KEY)?
            .map(|raw| {
                raw.parse::<Role>()
                    .map_err(|err| SessionStorageError::read(ROLE_HINT_KEY, err.to_string()))
            })
            .transpose()
    }

    fn set_role_hint(&mut self, role: Role) -> Result<(), SessionStorageError> {
        self.write(ROLE_HINT_KEY, role.as_str())
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(SessionContext::new) })
    }
}
