//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed dashboard model (identities, roles,
//! projects, submissions, feedback, requests and tests) together with the
//! services that act on it. Framework concerns stay outside; collaborators are
//! reached through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - Role, Identity, Profile: who is signed in and what they may see.
//! - SessionStore: client-side session state and its operations.
//! - authorize / decide: route guard.
//! - navigation: per-role sidebar menus.
//! - MenteeDashboard, MentorDashboard, CoordinatorDashboard: page data.

pub mod assessment;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod feedback;
pub mod ids;
pub mod navigation;
pub mod ports;
pub mod profile;
pub mod project;
pub mod request;
pub mod role;
pub mod role_resolver;
pub mod route_guard;
pub mod routes;
pub mod session;
pub mod submission;
pub mod trace_id;
pub mod user;

pub use self::assessment::{
    Answer, NewProjectTest, ProjectTest, PublicQuestion, Question, TestScore,
};
pub use self::auth::{AuthValidationError, LoginCredentials, SignupDetails};
pub use self::dashboard::{
    CoordinatorDashboard, DashboardPorts, MenteeDashboard, MentorDashboard,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feedback::{Feedback, NewFeedback, Rating, RatingError};
pub use self::ids::{FeedbackId, ProjectId, RequestId, SubmissionId, TestId};
pub use self::navigation::{ABOUT_US, NavEntry, NavIcon, navigation, role_menu};
pub use self::profile::Profile;
pub use self::project::{NewProject, Project, ProjectStatus};
pub use self::request::{ProjectRequest, RequestSort, RequestStatus};
pub use self::role::{Role, RoleParseError};
pub use self::role_resolver::{RoleResolution, RoleResolver};
pub use self::route_guard::{AccessDecision, authorize, decide};
pub use self::routes::{LOGIN_PATH, PUBLIC_PAGES, PageRule, all_pages, find_page};
pub use self::session::{Session, SessionServices, SessionStore};
pub use self::submission::{NewSubmission, Submission, SubmissionStatus};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, EmailAddress, Identity, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
