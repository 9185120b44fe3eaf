//! Route guard applied to data endpoints.
//!
//! Every dashboard endpoint belongs to a page of the route table and admits
//! the same roles as that page. A visitor without an identity gets `401`; a
//! signed-in visitor whose role the page excludes gets `403`. Both carry the
//! page the browser should navigate to in `details.redirect`.

use serde_json::json;

use crate::domain::{AccessDecision, Error, UserId, authorize, find_page};

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Admit the session to `page` and return the signed-in user's id.
///
/// # Errors
/// `unauthorized` without an identity, `forbidden` when the resolved role is
/// not admitted, `internal` for a page missing from the route table.
pub(crate) async fn admit(
    state: &HttpState,
    session: SessionContext,
    page: &'static str,
) -> ApiResult<UserId> {
    let rule = find_page(page)
        .ok_or_else(|| Error::internal(format!("page {page} is not in the route table")))?;
    let mut store = state.open_session(session).await;
    match authorize(&mut store, rule.allowed).await {
        AccessDecision::Authorized => store
            .identity()
            .map(|identity| identity.id().clone())
            .ok_or_else(|| Error::unauthorized("sign in to continue")),
        AccessDecision::RedirectLogin { redirect } => {
            Err(Error::unauthorized("sign in to continue").with_details(json!({ "redirect": redirect })))
        }
        AccessDecision::RedirectHome { redirect } => Err(Error::forbidden(format!(
            "{page} is not available to your role"
        ))
        .with_details(json!({ "redirect": redirect }))),
        AccessDecision::Checking => Err(Error::internal("session was not initialised")),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils::{
        seeded_state, session_cookie, sign_in, test_session_middleware,
    };

    async fn guarded(
        state: web::Data<HttpState>,
        session: SessionContext,
        page: web::Query<std::collections::HashMap<String, String>>,
    ) -> ApiResult<HttpResponse> {
        let page: &'static str = match page.get("page").map(String::as_str) {
            Some("/dashboard/mentor/requests") => "/dashboard/mentor/requests",
            Some("/nowhere") => "/nowhere",
            _ => "/dashboard/mentee",
        };
        let id = admit(&state, session, page).await?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    macro_rules! guard_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(seeded_state()))
                    .wrap(test_session_middleware())
                    .route("/guarded", web::get().to(guarded))
                    .service(web::scope("/api/v1").service(crate::inbound::http::auth::login)),
            )
            .await
        };
    }

    async fn error_body<B: actix_web::body::MessageBody>(
        res: actix_web::dev::ServiceResponse<B>,
    ) -> Value {
        serde_json::from_slice(&test::read_body(res).await).expect("error body")
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_visitors_are_sent_to_login() {
        let app = guard_app!();
        let res = test::call_service(&app, test::TestRequest::get().uri("/guarded").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = error_body(res).await;
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["details"]["redirect"], "/login");
    }

    #[rstest]
    #[actix_web::test]
    async fn the_owning_role_is_admitted() {
        let app = guard_app!();
        let login = sign_in(&app, "john@example.com").await;
        let cookie = session_cookie(&login);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/guarded").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "5b1f0c6e-8a41-4d2b-9e07-1f3a6c5d0001");
    }

    #[rstest]
    #[actix_web::test]
    async fn other_roles_are_sent_home() {
        let app = guard_app!();
        let login = sign_in(&app, "john@example.com").await;
        let cookie = session_cookie(&login);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/guarded?page=/dashboard/mentor/requests")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body = error_body(res).await;
        assert_eq!(body["code"], "forbidden");
        assert_eq!(body["details"]["redirect"], "/dashboard/mentee");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_pages_are_a_wiring_fault() {
        let app = guard_app!();
        let login = sign_in(&app, "john@example.com").await;
        let cookie = session_cookie(&login);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/guarded?page=/nowhere").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = error_body(res).await;
        assert_eq!(body["code"], "internal_error");
    }
}
