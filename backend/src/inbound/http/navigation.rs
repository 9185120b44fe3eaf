//! Sidebar and page-access endpoints.
//!
//! ```text
//! GET /api/v1/navigation
//! GET /api/v1/access?path=/dashboard/mentor/requests
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AccessDecision, Error, NavEntry, Role, authorize, find_page, navigation};

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Sidebar for the session's role.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    pub role: Option<Role>,
    /// Dashboard heading; absent without a role.
    #[schema(value_type = Option<String>, example = "Mentor Dashboard")]
    pub title: Option<&'static str>,
    pub entries: Vec<NavEntry>,
}

/// Query for `GET /api/v1/access`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AccessQuery {
    /// Page path to check.
    #[param(example = "/dashboard/mentee/tests")]
    pub path: String,
}

/// Menu entries for the signed-in role, About Us last.
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    responses((status = 200, description = "Sidebar entries", body = NavigationResponse)),
    tags = ["navigation"],
    operation_id = "navigation",
    security([])
)]
#[get("/navigation")]
pub async fn sidebar(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> web::Json<NavigationResponse> {
    let store = state.open_session(session).await;
    let role = store.role();
    web::Json(NavigationResponse {
        role,
        title: role.map(Role::dashboard_title),
        entries: navigation(role),
    })
}

/// Guard decision for a page.
#[utoipa::path(
    get,
    path = "/api/v1/access",
    params(AccessQuery),
    responses(
        (status = 200, description = "Guard decision", body = AccessDecision),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown page", body = Error)
    ),
    tags = ["navigation"],
    operation_id = "access",
    security([])
)]
#[get("/access")]
pub async fn access(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AccessQuery>,
) -> ApiResult<web::Json<AccessDecision>> {
    let rule = find_page(&query.path)
        .ok_or_else(|| Error::not_found(format!("no page at {}", query.path)))?;
    let mut store = state.open_session(session).await;
    Ok(web::Json(authorize(&mut store, rule.allowed).await))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils::{
        seeded_state, session_cookie, sign_in, test_session_middleware,
    };

    macro_rules! nav_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(seeded_state()))
                    .wrap(test_session_middleware())
                    .service(
                        web::scope("/api/v1")
                            .service(crate::inbound::http::auth::login)
                            .service(sidebar)
                            .service(access),
                    ),
            )
            .await
        };
    }

    async fn get_json<S, B, E>(
        app: &S,
        uri: &str,
        cookie: Option<actix_web::cookie::Cookie<'static>>,
    ) -> (StatusCode, Value)
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = E,
            >,
        B: actix_web::body::MessageBody,
        E: std::fmt::Debug,
    {
        let req = test::TestRequest::get().uri(uri);
        let req = match cookie {
            Some(cookie) => req.cookie(cookie),
            None => req,
        };
        let res = test::call_service(app, req.to_request()).await;
        let status = res.status();
        let body = serde_json::from_slice(&test::read_body(res).await).expect("json body");
        (status, body)
    }

    #[rstest]
    #[actix_web::test]
    async fn mentor_menu_offers_requests_but_not_tests() {
        let app = nav_app!();
        let cookie = session_cookie(&sign_in(&app, "sarah@example.com").await);

        let (status, body) = get_json(&app, "/api/v1/navigation", Some(cookie)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Mentor Dashboard");
        let labels: Vec<&str> = body["entries"]
            .as_array()
            .expect("entries")
            .iter()
            .filter_map(|entry| entry["label"].as_str())
            .collect();
        assert!(labels.contains(&"Student Requests"));
        assert!(labels.contains(&"Test Creator"));
        assert!(!labels.contains(&"Take Test"));
        assert_eq!(labels.last(), Some(&"About Us"));
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_menu_is_empty() {
        let app = nav_app!();
        let (_, body) = get_json(&app, "/api/v1/navigation", None).await;
        assert!(body["role"].is_null());
        assert!(body["title"].is_null());
        assert_eq!(body["entries"], Value::Array(Vec::new()));
    }

    #[rstest]
    #[case("/dashboard/coordinator/analytics", "authorized", None)]
    #[case("/dashboard/mentee/tests/", "redirect-home", Some("/dashboard/coordinator"))]
    #[case("/about-us", "authorized", None)]
    #[actix_web::test]
    async fn coordinator_access_follows_the_route_table(
        #[case] path: &str,
        #[case] state: &str,
        #[case] redirect: Option<&str>,
    ) {
        let app = nav_app!();
        let cookie = session_cookie(&sign_in(&app, "michael@example.com").await);

        let (status, body) = get_json(&app, &format!("/api/v1/access?path={path}"), Some(cookie)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], state);
        assert_eq!(body["redirect"].as_str(), redirect);
    }

    #[rstest]
    #[case("/dashboard/mentor")]
    #[case("/dashboard/coordinator/projects")]
    #[actix_web::test]
    async fn anonymous_access_is_sent_to_login(#[case] path: &str) {
        let app = nav_app!();
        let (_, body) = get_json(&app, &format!("/api/v1/access?path={path}"), None).await;
        assert_eq!(body["state"], "redirect-login");
        assert_eq!(body["redirect"], "/login");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_pages_are_not_found() {
        let app = nav_app!();
        let (status, body) = get_json(&app, "/api/v1/access?path=/nowhere", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }
}
