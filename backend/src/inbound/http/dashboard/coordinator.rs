//! Coordinator pages: programme-wide views and project administration.
//!
//! ```text
//! GET    /api/v1/dashboard/coordinator/overview
//! GET    /api/v1/dashboard/coordinator/projects
//! POST   /api/v1/dashboard/coordinator/projects
//! DELETE /api/v1/dashboard/coordinator/projects/{project_id}
//! GET    /api/v1/dashboard/coordinator/submissions
//! GET    /api/v1/dashboard/coordinator/feedback
//! GET    /api/v1/dashboard/coordinator/analytics
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::dashboard::{
    Analytics, CoordinatorOverview, FeedbackView, ProjectDraft, ProjectView, SubmissionView,
};
use crate::domain::{Error, ProjectId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::admit;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const HOME: &str = "/dashboard/coordinator";
const PROJECTS: &str = "/dashboard/coordinator/projects";
const SUBMISSIONS: &str = "/dashboard/coordinator/submissions";
const FEEDBACK: &str = "/dashboard/coordinator/feedback";
const ANALYTICS: &str = "/dashboard/coordinator/analytics";

/// Programme totals and the latest projects.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/coordinator/overview",
    responses(
        (status = 200, description = "Coordinator overview", body = CoordinatorOverview),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a coordinator", body = Error)
    ),
    tags = ["coordinator"],
    operation_id = "coordinatorOverview"
)]
#[get("/dashboard/coordinator/overview")]
pub async fn overview(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CoordinatorOverview>> {
    admit(&state, session, HOME).await?;
    Ok(web::Json(state.coordinator.overview().await))
}

/// Every project.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/coordinator/projects",
    responses(
        (status = 200, description = "Projects", body = [ProjectView]),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a coordinator", body = Error)
    ),
    tags = ["coordinator"],
    operation_id = "allProjects"
)]
#[get("/dashboard/coordinator/projects")]
pub async fn projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProjectView>>> {
    admit(&state, session, PROJECTS).await?;
    Ok(web::Json(state.coordinator.projects().await))
}

/// Publish a project under a mentor.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/coordinator/projects",
    request_body = ProjectDraft,
    responses(
        (status = 201, description = "Project created", body = ProjectView),
        (status = 400, description = "Invalid project", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a coordinator", body = Error)
    ),
    tags = ["coordinator"],
    operation_id = "createProject"
)]
#[post("/dashboard/coordinator/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProjectDraft>,
) -> ApiResult<HttpResponse> {
    admit(&state, session, PROJECTS).await?;
    let view = state.coordinator.create_project(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(view))
}

/// Remove a project. Related records are kept.
#[utoipa::path(
    delete,
    path = "/api/v1/dashboard/coordinator/projects/{project_id}",
    params(("project_id" = String, Path, description = "Project to delete")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Unknown project", body = Error)
    ),
    tags = ["coordinator"],
    operation_id = "deleteProject"
)]
#[delete("/dashboard/coordinator/projects/{project_id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ProjectId>,
) -> ApiResult<HttpResponse> {
    admit(&state, session, PROJECTS).await?;
    state.coordinator.delete_project(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Every submission.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/coordinator/submissions",
    responses(
        (status = 200, description = "Submissions", body = [SubmissionView]),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a coordinator", body = Error)
    ),
    tags = ["coordinator"],
    operation_id = "allSubmissions"
)]
#[get("/dashboard/coordinator/submissions")]
pub async fn submissions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SubmissionView>>> {
    admit(&state, session, SUBMISSIONS).await?;
    Ok(web::Json(state.coordinator.submissions().await))
}

/// Every piece of feedback.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/coordinator/feedback",
    responses(
        (status = 200, description = "Feedback", body = [FeedbackView]),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a coordinator", body = Error)
    ),
    tags = ["coordinator"],
    operation_id = "allFeedback"
)]
#[get("/dashboard/coordinator/feedback")]
pub async fn feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FeedbackView>>> {
    admit(&state, session, FEEDBACK).await?;
    Ok(web::Json(state.coordinator.feedback().await))
}

/// Status breakdowns and the average rating.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/coordinator/analytics",
    responses(
        (status = 200, description = "Analytics", body = Analytics),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a coordinator", body = Error)
    ),
    tags = ["coordinator"],
    operation_id = "analytics"
)]
#[get("/dashboard/coordinator/analytics")]
pub async fn analytics(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Analytics>> {
    admit(&state, session, ANALYTICS).await?;
    Ok(web::Json(state.coordinator.analytics().await))
}

/// Register the coordinator endpoints.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(overview)
        .service(projects)
        .service(create_project)
        .service(delete_project)
        .service(submissions)
        .service(feedback)
        .service(analytics);
}
