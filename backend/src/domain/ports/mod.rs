//! Domain ports for the hexagonal boundary.
//!
//! Every collaborator the dashboard talks to (authentication, relational
//! collections, file storage, the per-client session) is reached through one
//! of these traits. Each port ships a `Fixture*` implementation for tests that
//! do not exercise it and, under `cfg(test)`, a mockall mock.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod demo_identities;
mod feedback_repository;
mod file_storage;
mod profile_repository;
mod project_repository;
mod project_test_repository;
mod request_repository;
mod session_storage;
mod submission_repository;

#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::{AuthService, AuthServiceError, FixtureAuthService};
#[cfg(test)]
pub use demo_identities::MockDemoIdentities;
pub use demo_identities::{
    DEMO_AVATAR, DEMO_USERS, DemoIdentities, DemoUser, FixtureDemoIdentities,
};
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
pub use feedback_repository::{
    FeedbackRepository, FeedbackRepositoryError, FixtureFeedbackRepository,
};
#[cfg(test)]
pub use file_storage::MockFileStorage;
pub use file_storage::{
    FileStorage, FileStorageError, FileUpload, FixtureFileStorage, MAX_UPLOAD_BYTES,
};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{
    FixtureProfileRepository, ProfileRepository, ProfileRepositoryError,
};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{
    FixtureProjectRepository, ProjectRepository, ProjectRepositoryError,
};
#[cfg(test)]
pub use project_test_repository::MockProjectTestRepository;
pub use project_test_repository::{
    FixtureProjectTestRepository, ProjectTestRepository, ProjectTestRepositoryError,
};
#[cfg(test)]
pub use request_repository::MockRequestRepository;
pub use request_repository::{
    FixtureRequestRepository, RequestRepository, RequestRepositoryError,
};
#[cfg(test)]
pub use session_storage::MockSessionStorage;
pub use session_storage::{
    InMemorySessionStorage, ROLE_HINT_KEY, SessionStorage, SessionStorageError, USER_ID_KEY,
};
#[cfg(test)]
pub use submission_repository::MockSubmissionRepository;
pub use submission_repository::{
    FixtureSubmissionRepository, SubmissionRepository, SubmissionRepositoryError,
};
