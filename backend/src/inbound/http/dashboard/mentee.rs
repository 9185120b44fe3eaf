//! Mentee pages.
//!
//! ```text
//! GET  /api/v1/dashboard/mentee/overview
//! GET  /api/v1/dashboard/mentee/projects
//! GET  /api/v1/dashboard/mentee/available-projects
//! POST /api/v1/dashboard/mentee/available-projects/{project_id}/apply
//! GET  /api/v1/dashboard/mentee/mentors?search=react&expertise=node
//! GET  /api/v1/dashboard/mentee/tests
//! POST /api/v1/dashboard/mentee/tests/{test_id}/attempts
//! POST /api/v1/dashboard/mentee/submissions
//! GET  /api/v1/dashboard/mentee/feedback
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::dashboard::{
    FeedbackView, MenteeOverview, MentorCard, MyProjects, ProjectView, RequestView,
    SubmissionView, TestAttempt, TestResult, TestView, WorkDraft,
};
use crate::domain::{Error, ProjectId, TestId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::admit;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const HOME: &str = "/dashboard/mentee";
const PROJECTS: &str = "/dashboard/mentee/projects";
const AVAILABLE: &str = "/dashboard/mentee/available-projects";
const MENTORS: &str = "/dashboard/mentee/mentors";
const TESTS: &str = "/dashboard/mentee/tests";
const SUBMIT: &str = "/dashboard/mentee/submit";
const FEEDBACK: &str = "/dashboard/mentee/feedback";

/// Filters for the mentor directory.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MentorQuery {
    /// Case-insensitive match on name or expertise.
    pub search: Option<String>,
    /// Exact expertise tag, case-insensitive.
    pub expertise: Option<String>,
}

/// Counts, current project, deadlines and recent feedback.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentee/overview",
    responses(
        (status = 200, description = "Mentee overview", body = MenteeOverview),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a mentee", body = Error)
    ),
    tags = ["mentee"],
    operation_id = "menteeOverview"
)]
#[get("/dashboard/mentee/overview")]
pub async fn overview(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MenteeOverview>> {
    let me = admit(&state, session, HOME).await?;
    Ok(web::Json(state.mentee.overview(&me).await))
}

/// Approved projects and every application.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentee/projects",
    responses(
        (status = 200, description = "Projects and applications", body = MyProjects),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a mentee", body = Error)
    ),
    tags = ["mentee"],
    operation_id = "menteeProjects"
)]
#[get("/dashboard/mentee/projects")]
pub async fn my_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MyProjects>> {
    let me = admit(&state, session, PROJECTS).await?;
    Ok(web::Json(state.mentee.my_projects(&me).await))
}

/// Projects open for applications.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentee/available-projects",
    responses(
        (status = 200, description = "Available projects", body = [ProjectView]),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a mentee", body = Error)
    ),
    tags = ["mentee"],
    operation_id = "availableProjects"
)]
#[get("/dashboard/mentee/available-projects")]
pub async fn available_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProjectView>>> {
    admit(&state, session, AVAILABLE).await?;
    Ok(web::Json(state.mentee.available_projects().await))
}

/// Apply to work on a project.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/mentee/available-projects/{project_id}/apply",
    params(("project_id" = String, Path, description = "Project to apply for")),
    responses(
        (status = 201, description = "Application filed", body = RequestView),
        (status = 400, description = "Project is not open", body = Error),
        (status = 404, description = "Unknown project", body = Error),
        (status = 409, description = "Already applied", body = Error)
    ),
    tags = ["mentee"],
    operation_id = "applyToProject"
)]
#[post("/dashboard/mentee/available-projects/{project_id}/apply")]
pub async fn apply(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ProjectId>,
) -> ApiResult<HttpResponse> {
    let me = admit(&state, session, AVAILABLE).await?;
    let request = state.mentee.apply(&me, path.into_inner()).await?;
    Ok(HttpResponse::Created().json(request))
}

/// Mentor directory.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentee/mentors",
    params(MentorQuery),
    responses(
        (status = 200, description = "Mentors", body = [MentorCard]),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a mentee", body = Error)
    ),
    tags = ["mentee"],
    operation_id = "mentorDirectory"
)]
#[get("/dashboard/mentee/mentors")]
pub async fn mentors(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<MentorQuery>,
) -> ApiResult<web::Json<Vec<MentorCard>>> {
    admit(&state, session, MENTORS).await?;
    let MentorQuery { search, expertise } = query.into_inner();
    Ok(web::Json(
        state
            .mentee
            .mentors(search.as_deref(), expertise.as_deref())
            .await,
    ))
}

/// Tests for projects the mentee has applied to, without answers.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentee/tests",
    responses(
        (status = 200, description = "Tests", body = [TestView]),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a mentee", body = Error)
    ),
    tags = ["mentee"],
    operation_id = "menteeTests"
)]
#[get("/dashboard/mentee/tests")]
pub async fn tests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<TestView>>> {
    let me = admit(&state, session, TESTS).await?;
    Ok(web::Json(state.mentee.tests(&me).await))
}

/// Score a test attempt.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/mentee/tests/{test_id}/attempts",
    params(("test_id" = String, Path, description = "Test being taken")),
    request_body = TestAttempt,
    responses(
        (status = 200, description = "Score", body = TestResult),
        (status = 403, description = "No open application for the project", body = Error),
        (status = 404, description = "Unknown test", body = Error)
    ),
    tags = ["mentee"],
    operation_id = "takeTest"
)]
#[post("/dashboard/mentee/tests/{test_id}/attempts")]
pub async fn take_test(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TestId>,
    payload: web::Json<TestAttempt>,
) -> ApiResult<web::Json<TestResult>> {
    let me = admit(&state, session, TESTS).await?;
    let result = state
        .mentee
        .take_test(&me, path.into_inner(), &payload)
        .await?;
    Ok(web::Json(result))
}

/// Hand in project work as a link, a base64 file, or both.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/mentee/submissions",
    request_body = WorkDraft,
    responses(
        (status = 201, description = "Submission recorded", body = SubmissionView),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "No open application for the project", body = Error),
        (status = 404, description = "Unknown project", body = Error)
    ),
    tags = ["mentee"],
    operation_id = "submitProject"
)]
#[post("/dashboard/mentee/submissions")]
pub async fn submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<WorkDraft>,
) -> ApiResult<HttpResponse> {
    let me = admit(&state, session, SUBMIT).await?;
    let submission = state.mentee.submit(&me, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(submission))
}

/// Feedback received, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentee/feedback",
    responses(
        (status = 200, description = "Feedback", body = [FeedbackView]),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a mentee", body = Error)
    ),
    tags = ["mentee"],
    operation_id = "menteeFeedback"
)]
#[get("/dashboard/mentee/feedback")]
pub async fn feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FeedbackView>>> {
    let me = admit(&state, session, FEEDBACK).await?;
    Ok(web::Json(state.mentee.feedback(&me).await))
}

/// Register the mentee endpoints.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(overview)
        .service(my_projects)
        .service(available_projects)
        .service(apply)
        .service(mentors)
        .service(tests)
        .service(take_test)
        .service(submit)
        .service(feedback);
}
