//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer (session,
//! navigation, dashboards, health) and the session cookie security scheme.
//! Schemas referenced by the endpoints are collected from their annotations.
//!
//! The document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{AccessDecision, Error, ErrorCode, NavEntry, Role, Session};
use crate::inbound::http::auth::{LoginRequest, RoleSwitchRequest, SignupRequest};
use crate::inbound::http::dashboard::{coordinator, mentee, mentor};
use crate::inbound::http::navigation::NavigationResponse;

/// Role switching endpoint, documented only when it is compiled in.
#[cfg(feature = "dev-role-switch")]
#[derive(OpenApi)]
#[openapi(paths(crate::inbound::http::auth::switch_role))]
struct RoleSwitchDoc;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        #[cfg(feature = "dev-role-switch")]
        openapi.merge(RoleSwitchDoc::openapi());

        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /api/v1/signup.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Mentorship dashboard API",
        description = "Role-based sessions, route guard, navigation and dashboard data for mentees, mentors and coordinators."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::auth::refresh_role,
        crate::inbound::http::navigation::sidebar,
        crate::inbound::http::navigation::access,
        mentee::overview,
        mentee::my_projects,
        mentee::available_projects,
        mentee::apply,
        mentee::mentors,
        mentee::tests,
        mentee::take_test,
        mentee::submit,
        mentee::feedback,
        mentor::overview,
        mentor::requests,
        mentor::decide_request,
        mentor::tests,
        mentor::create_test,
        mentor::submissions,
        mentor::review_submission,
        mentor::feedback,
        mentor::give_feedback,
        coordinator::overview,
        coordinator::projects,
        coordinator::create_project,
        coordinator::delete_project,
        coordinator::submissions,
        coordinator::feedback,
        coordinator::analytics,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Session,
        Role,
        NavEntry,
        AccessDecision,
        NavigationResponse,
        LoginRequest,
        SignupRequest,
        RoleSwitchRequest,
    )),
    tags(
        (name = "session", description = "Sign-up, login, logout and the current session"),
        (name = "navigation", description = "Sidebar menus and page access"),
        (name = "mentee", description = "Mentee dashboard pages"),
        (name = "mentor", description = "Mentor dashboard pages"),
        (name = "coordinator", description = "Coordinator dashboard pages"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
