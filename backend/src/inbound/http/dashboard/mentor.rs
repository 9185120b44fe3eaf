//! Mentor pages. Every list and decision is limited to the mentor's own
//! projects.
//!
//! ```text
//! GET  /api/v1/dashboard/mentor/overview
//! GET  /api/v1/dashboard/mentor/requests?sort=az
//! POST /api/v1/dashboard/mentor/requests/{request_id}/decision {"status":"approved"}
//! GET  /api/v1/dashboard/mentor/tests
//! POST /api/v1/dashboard/mentor/tests
//! GET  /api/v1/dashboard/mentor/submissions
//! POST /api/v1/dashboard/mentor/submissions/{submission_id}/review {"status":"approved"}
//! GET  /api/v1/dashboard/mentor/feedback
//! POST /api/v1/dashboard/mentor/feedback
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::dashboard::{
    FeedbackDraft, FeedbackView, MentorOverview, RequestDecision, RequestView, ReviewDecision,
    SubmissionView, TestDraft,
};
use crate::domain::{Error, ProjectTest, RequestId, RequestSort, SubmissionId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::admit;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const HOME: &str = "/dashboard/mentor";
const REQUESTS: &str = "/dashboard/mentor/requests";
const TEST_CREATOR: &str = "/dashboard/mentor/test-creator";
const SUBMISSIONS: &str = "/dashboard/mentor/submissions";
const FEEDBACK: &str = "/dashboard/mentor/feedback";

/// Ordering for the request list.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RequestsQuery {
    /// `newest` (default), `oldest`, `az` or `za`.
    #[param(value_type = Option<String>, example = "az")]
    pub sort: Option<RequestSort>,
}

/// Pending work on the mentor's projects.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentor/overview",
    responses(
        (status = 200, description = "Mentor overview", body = MentorOverview),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a mentor", body = Error)
    ),
    tags = ["mentor"],
    operation_id = "mentorOverview"
)]
#[get("/dashboard/mentor/overview")]
pub async fn overview(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MentorOverview>> {
    let me = admit(&state, session, HOME).await?;
    Ok(web::Json(state.mentor.overview(&me).await))
}

/// Applications to the mentor's projects.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentor/requests",
    params(RequestsQuery),
    responses(
        (status = 200, description = "Student requests", body = [RequestView]),
        (status = 400, description = "Unknown sort", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a mentor", body = Error)
    ),
    tags = ["mentor"],
    operation_id = "studentRequests"
)]
#[get("/dashboard/mentor/requests")]
pub async fn requests(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RequestsQuery>,
) -> ApiResult<web::Json<Vec<RequestView>>> {
    let me = admit(&state, session, REQUESTS).await?;
    let sort = query.sort.unwrap_or_default();
    Ok(web::Json(state.mentor.requests(&me, sort).await))
}

/// Approve or reject an application.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/mentor/requests/{request_id}/decision",
    params(("request_id" = String, Path, description = "Request to decide")),
    request_body = RequestDecision,
    responses(
        (status = 200, description = "Updated request", body = RequestView),
        (status = 400, description = "Invalid decision", body = Error),
        (status = 403, description = "Not the mentor's project", body = Error),
        (status = 404, description = "Unknown request", body = Error)
    ),
    tags = ["mentor"],
    operation_id = "decideRequest"
)]
#[post("/dashboard/mentor/requests/{request_id}/decision")]
pub async fn decide_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<RequestId>,
    payload: web::Json<RequestDecision>,
) -> ApiResult<web::Json<RequestView>> {
    let me = admit(&state, session, REQUESTS).await?;
    let view = state
        .mentor
        .decide_request(&me, path.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(view))
}

/// Tests the mentor has written, answers included.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentor/tests",
    responses(
        (status = 200, description = "Tests", body = [ProjectTest]),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a mentor", body = Error)
    ),
    tags = ["mentor"],
    operation_id = "mentorTests"
)]
#[get("/dashboard/mentor/tests")]
pub async fn tests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProjectTest>>> {
    let me = admit(&state, session, TEST_CREATOR).await?;
    Ok(web::Json(state.mentor.tests(&me).await))
}

/// Create a multiple-choice test for an owned project.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/mentor/tests",
    request_body = TestDraft,
    responses(
        (status = 201, description = "Test created", body = ProjectTest),
        (status = 400, description = "Invalid test", body = Error),
        (status = 403, description = "Not the mentor's project", body = Error),
        (status = 404, description = "Unknown project", body = Error)
    ),
    tags = ["mentor"],
    operation_id = "createTest"
)]
#[post("/dashboard/mentor/tests")]
pub async fn create_test(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TestDraft>,
) -> ApiResult<HttpResponse> {
    let me = admit(&state, session, TEST_CREATOR).await?;
    let test = state.mentor.create_test(&me, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(test))
}

/// Work handed in on the mentor's projects.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentor/submissions",
    responses(
        (status = 200, description = "Submissions", body = [SubmissionView]),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a mentor", body = Error)
    ),
    tags = ["mentor"],
    operation_id = "mentorSubmissions"
)]
#[get("/dashboard/mentor/submissions")]
pub async fn submissions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SubmissionView>>> {
    let me = admit(&state, session, SUBMISSIONS).await?;
    Ok(web::Json(state.mentor.submissions(&me).await))
}

/// Settle a submission.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/mentor/submissions/{submission_id}/review",
    params(("submission_id" = String, Path, description = "Submission to review")),
    request_body = ReviewDecision,
    responses(
        (status = 200, description = "Updated submission", body = SubmissionView),
        (status = 400, description = "Invalid verdict", body = Error),
        (status = 403, description = "Not the mentor's project", body = Error),
        (status = 404, description = "Unknown submission", body = Error)
    ),
    tags = ["mentor"],
    operation_id = "reviewSubmission"
)]
#[post("/dashboard/mentor/submissions/{submission_id}/review")]
pub async fn review_submission(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<SubmissionId>,
    payload: web::Json<ReviewDecision>,
) -> ApiResult<web::Json<SubmissionView>> {
    let me = admit(&state, session, SUBMISSIONS).await?;
    let view = state
        .mentor
        .review_submission(&me, path.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(view))
}

/// Feedback the mentor has given.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentor/feedback",
    responses(
        (status = 200, description = "Feedback", body = [FeedbackView]),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a mentor", body = Error)
    ),
    tags = ["mentor"],
    operation_id = "mentorFeedback"
)]
#[get("/dashboard/mentor/feedback")]
pub async fn feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FeedbackView>>> {
    let me = admit(&state, session, FEEDBACK).await?;
    Ok(web::Json(state.mentor.feedback(&me).await))
}

/// Rate and comment on a submission.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/mentor/feedback",
    request_body = FeedbackDraft,
    responses(
        (status = 201, description = "Feedback recorded", body = FeedbackView),
        (status = 400, description = "Invalid feedback", body = Error),
        (status = 403, description = "Not the mentor's project", body = Error),
        (status = 404, description = "Unknown submission", body = Error)
    ),
    tags = ["mentor"],
    operation_id = "giveFeedback"
)]
#[post("/dashboard/mentor/feedback")]
pub async fn give_feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FeedbackDraft>,
) -> ApiResult<HttpResponse> {
    let me = admit(&state, session, FEEDBACK).await?;
    let view = state.mentor.give_feedback(&me, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(view))
}

/// Register the mentor endpoints.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(overview)
        .service(requests)
        .service(decide_request)
        .service(tests)
        .service(create_test)
        .service(submissions)
        .service(review_submission)
        .service(feedback)
        .service(give_feedback);
}
