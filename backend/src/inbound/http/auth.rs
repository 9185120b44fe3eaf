//! Account and session endpoints.
//!
//! ```text
//! POST /api/v1/signup {"name":"Ada","email":"ada@example.com","password":"secret1","role":"mentee"}
//! POST /api/v1/login {"email":"john@example.com","password":"password"}
//! POST /api/v1/logout
//! GET  /api/v1/session
//! POST /api/v1/session/refresh-role
//! POST /api/v1/session/role {"role":"mentor"}   (feature `dev-role-switch`)
//! ```
//!
//! Each endpoint answers with the resulting [`Session`]; the cookie carries
//! only the identity id and the role hint.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{
    AuthValidationError, Error, LoginCredentials, Role, Session, SignupDetails,
};

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "john@example.com")]
    pub email: String,
    #[schema(value_type = String, example = "password")]
    pub password: Zeroizing<String>,
}

/// Sign-up request body for `POST /api/v1/signup`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(value_type = String, example = "secret1")]
    pub password: Zeroizing<String>,
    pub role: Role,
}

/// Role switch body for `POST /api/v1/session/role`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RoleSwitchRequest {
    pub role: Role,
}

fn map_validation_error(err: AuthValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

/// Register an account, create its profile and sign in.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created and signed in", body = Session,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<Session>> {
    let payload = payload.into_inner();
    let details = SignupDetails::try_from_parts(
        &payload.name,
        &payload.email,
        &payload.password,
        payload.role,
    )
    .map_err(map_validation_error)?;
    let mut store = state.open_session(session).await;
    let current = store.sign_up(&details).await?;
    Ok(web::Json(current.clone()))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = Session,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<Session>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_validation_error)?;
    let mut store = state.open_session(session).await;
    let current = store.sign_in(&credentials).await?;
    Ok(web::Json(current.clone()))
}

/// End the session and forget the role hint.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 200, description = "Signed out", body = Session),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> web::Json<Session> {
    let mut store = state.open_session(session).await;
    store.sign_out().await;
    web::Json(store.session().clone())
}

/// Current identity and role, restored from the cookie.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses((status = 200, description = "Current session", body = Session)),
    tags = ["session"],
    operation_id = "currentSession",
    security([])
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> web::Json<Session> {
    let store = state.open_session(session).await;
    web::Json(store.session().clone())
}

/// Re-derive the role from the profile record.
#[utoipa::path(
    post,
    path = "/api/v1/session/refresh-role",
    responses((status = 200, description = "Session with the refreshed role", body = Session)),
    tags = ["session"],
    operation_id = "refreshRole",
    security([])
)]
#[post("/session/refresh-role")]
pub async fn refresh_role(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> web::Json<Session> {
    let mut store = state.open_session(session).await;
    store.refresh_role().await;
    web::Json(store.session().clone())
}

/// Act as the canned identity for a role. Development builds only.
#[cfg(feature = "dev-role-switch")]
#[utoipa::path(
    post,
    path = "/api/v1/session/role",
    request_body = RoleSwitchRequest,
    responses(
        (status = 200, description = "Session acting as the requested role", body = Session),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Role switching is not available", body = Error)
    ),
    tags = ["session"],
    operation_id = "switchRole",
    security([])
)]
#[post("/session/role")]
pub async fn switch_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RoleSwitchRequest>,
) -> ApiResult<web::Json<Session>> {
    let mut store = state.open_session(session).await;
    let current = store.switch_role(payload.role)?;
    Ok(web::Json(current.clone()))
}
