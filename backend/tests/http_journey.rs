//! End-to-end journeys through the assembled HTTP stack.
//!
//! The app here mirrors the production wiring: trace middleware, extractor
//! error handlers, cookie sessions, health probes and every dashboard route,
//! over the seeded in-memory backend.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test, web};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use backend::Trace;
use backend::domain::TRACE_ID_HEADER;
use backend::inbound::http::auth::{current_session, login, logout, refresh_role, signup};
use backend::inbound::http::dashboard;
use backend::inbound::http::error::configure_extractors;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::navigation::{access, sidebar};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::{DEMO_PASSWORD, MemoryBackend};

const EMILY_REQUEST: &str = "7d0e2a55-3c1b-4f6a-8b29-5e4c1a700302";

fn http_state() -> HttpState {
    let backend = MemoryBackend::seeded().expect("seed data is valid");
    HttpState::new(HttpStatePorts {
        auth: Arc::new(backend.clone()),
        dashboard: backend.dashboard_ports(Arc::new(DefaultClock)),
        demo: None,
    })
}

macro_rules! full_app {
    ($health:expr) => {
        test::init_service(
            App::new()
                .app_data($health)
                .app_data(web::Data::new(http_state()))
                .configure(configure_extractors)
                .wrap(Trace)
                .service(
                    web::scope("/api/v1")
                        .wrap(
                            SessionMiddleware::builder(
                                CookieSessionStore::default(),
                                Key::generate(),
                            )
                            .cookie_name("session".to_owned())
                            .cookie_secure(false)
                            .build(),
                        )
                        .service(signup)
                        .service(login)
                        .service(logout)
                        .service(current_session)
                        .service(refresh_role)
                        .service(sidebar)
                        .service(access)
                        .configure(dashboard::configure),
                )
                .service(ready)
                .service(live),
        )
        .await
    };
}

async fn send<S, B, E>(
    app: &S,
    method: Method,
    uri: &str,
    cookie: Option<&Cookie<'static>>,
    body: Option<Value>,
) -> ServiceResponse<B>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = E>,
    E: std::fmt::Debug,
{
    let mut req = test::TestRequest::default().method(method).uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }
    test::call_service(app, req.to_request()).await
}

fn cookie_of<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

fn trace_header<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header")
}

async fn json_of<B: actix_web::body::MessageBody>(res: ServiceResponse<B>) -> Value {
    let bytes = test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[actix_web::test]
async fn refused_requests_carry_the_trace_identifier() {
    let app = full_app!(web::Data::new(HealthState::new()));

    let res = send(&app, Method::GET, "/api/v1/dashboard/mentee/overview", None, None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = trace_header(&res);
    let body = json_of(res).await;

    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], header.as_str());
}

#[rstest]
#[actix_web::test]
async fn a_new_mentee_is_approved_by_the_mentor() {
    let app = full_app!(web::Data::new(HealthState::new()));

    let res = send(
        &app,
        Method::POST,
        "/api/v1/signup",
        None,
        Some(json!({
            "name": "Priya Patel",
            "email": "priya@example.com",
            "password": "correct horse",
            "role": "mentee"
        })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let mentee = cookie_of(&res);
    let session = json_of(res).await;
    assert_eq!(session["role"], "mentee");

    let res = send(&app, Method::GET, "/api/v1/navigation", Some(&mentee), None).await;
    let nav = json_of(res).await;
    assert_eq!(nav["entries"][0]["path"], "/dashboard/mentee");

    let res = send(
        &app,
        Method::GET,
        "/api/v1/dashboard/mentee/available-projects",
        Some(&mentee),
        None,
    )
    .await;
    let available = json_of(res).await;
    let project_id = available[0]["id"].as_str().expect("project id").to_owned();

    let apply = format!("/api/v1/dashboard/mentee/available-projects/{project_id}/apply");
    let res = send(&app, Method::POST, &apply, Some(&mentee), None).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let request = json_of(res).await;
    let request_id = request["id"].as_str().expect("request id").to_owned();

    let res = send(
        &app,
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({ "email": "sarah@example.com", "password": DEMO_PASSWORD })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let mentor = cookie_of(&res);

    let decide = format!("/api/v1/dashboard/mentor/requests/{request_id}/decision");
    let res = send(
        &app,
        Method::POST,
        &decide,
        Some(&mentor),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(&app, Method::GET, "/api/v1/dashboard/mentee/projects", Some(&mentee), None).await;
    let mine = json_of(res).await;
    assert_eq!(mine["projects"][0]["id"], project_id.as_str());
}

#[rstest]
#[actix_web::test]
async fn rejected_requests_leave_my_projects_empty() {
    let app = full_app!(web::Data::new(HealthState::new()));
    let res = send(
        &app,
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({ "email": "sarah@example.com", "password": DEMO_PASSWORD })),
    )
    .await;
    let mentor = cookie_of(&res);
    let res = send(
        &app,
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({ "email": "emily@example.com", "password": DEMO_PASSWORD })),
    )
    .await;
    let mentee = cookie_of(&res);

    let decide = format!("/api/v1/dashboard/mentor/requests/{EMILY_REQUEST}/decision");
    let res = send(
        &app,
        Method::POST,
        &decide,
        Some(&mentor),
        Some(json!({ "status": "rejected" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(&app, Method::GET, "/api/v1/dashboard/mentee/projects", Some(&mentee), None).await;
    let mine = json_of(res).await;
    assert_eq!(mine["projects"], json!([]));
    assert_eq!(mine["requests"][0]["status"], "rejected");
}

#[rstest]
#[actix_web::test]
async fn logout_closes_the_dashboards() {
    let app = full_app!(web::Data::new(HealthState::new()));
    let res = send(
        &app,
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({ "email": "michael@example.com", "password": DEMO_PASSWORD })),
    )
    .await;
    let signed_in = cookie_of(&res);

    let res = send(
        &app,
        Method::GET,
        "/api/v1/dashboard/coordinator/analytics",
        Some(&signed_in),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(&app, Method::POST, "/api/v1/logout", Some(&signed_in), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let signed_out = cookie_of(&res);

    let res = send(
        &app,
        Method::GET,
        "/api/v1/dashboard/coordinator/analytics",
        Some(&signed_out),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(false, StatusCode::SERVICE_UNAVAILABLE)]
#[case(true, StatusCode::OK)]
#[actix_web::test]
async fn readiness_follows_the_health_state(#[case] ready_now: bool, #[case] expected: StatusCode) {
    let health = web::Data::new(HealthState::new());
    if ready_now {
        health.mark_ready();
    }
    let app = full_app!(health.clone());

    let res = send(&app, Method::GET, "/health/ready", None, None).await;
    assert_eq!(res.status(), expected);
    let res = send(&app, Method::GET, "/health/live", None, None).await;
    assert_eq!(res.status(), StatusCode::OK);
}
