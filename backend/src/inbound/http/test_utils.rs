//! Test helpers for the HTTP adapter.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{http::StatusCode, test};
use mockable::DefaultClock;
use serde_json::json;

use crate::domain::ports::FixtureDemoIdentities;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{DEMO_PASSWORD, MemoryBackend};

/// Session middleware with a throwaway key and an insecure cookie, so plain
/// HTTP test requests carry it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over a freshly seeded in-memory backend, with role
/// switching enabled.
///
/// # Panics
/// When the seed data fails validation.
pub fn seeded_state() -> HttpState {
    let backend = MemoryBackend::seeded().expect("seed data is valid");
    HttpState::new(HttpStatePorts {
        auth: Arc::new(backend.clone()),
        dashboard: backend.dashboard_ports(Arc::new(DefaultClock)),
        demo: Some(Arc::new(FixtureDemoIdentities)),
    })
}

/// Log in as a seeded account through `POST /api/v1/login`.
///
/// # Panics
/// When the login is refused.
pub async fn sign_in<S, B, E>(app: &S, email: &str) -> ServiceResponse<B>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = E>,
    E: std::fmt::Debug,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": DEMO_PASSWORD }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::OK, "login as {email}");
    res
}

/// The `session` cookie set by `res`.
///
/// # Panics
/// When the response did not set the cookie.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("response sets the session cookie")
}
