//! Behaviour coverage for the in-memory backend.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::seed::{ECOMMERCE_ID, EMILY_ID, SOCIAL_ID, TASKS_ID};
use super::*;
use crate::domain::ports::{
    AuthService, AuthServiceError, DEMO_USERS, DemoUser, FeedbackRepository, FileStorage,
    FileStorageError, FileUpload, ProfileRepository, ProfileRepositoryError, ProjectRepository,
    RequestRepository, SubmissionRepository,
};
use crate::domain::{
    DisplayName, LoginCredentials, ProjectStatus, RequestId, RequestStatus, Role, SignupDetails,
    SubmissionId, SubmissionStatus,
};

#[fixture]
fn backend() -> MemoryBackend {
    MemoryBackend::seeded().expect("seed data is valid")
}

fn mentor() -> UserId {
    DemoUser::for_role(Role::Mentor).id.clone()
}

#[rstest]
#[tokio::test]
async fn demo_accounts_sign_in_with_the_demo_password(backend: MemoryBackend) {
    for user in &DEMO_USERS {
        let creds = LoginCredentials::try_from_parts(user.email, DEMO_PASSWORD).expect("shape");
        let identity = backend.sign_in(&creds).await.expect("signed in");
        assert_eq!(identity.id(), &user.id);
        let profile = ProfileRepository::find_by_id(&backend, &user.id)
            .await
            .expect("lookup")
            .expect("profile seeded");
        assert_eq!(profile.role(), user.role);
    }
}

#[rstest]
#[case("john@example.com", "wrong")]
#[case("nobody@example.com", DEMO_PASSWORD)]
#[tokio::test]
async fn bad_credentials_are_rejected(
    backend: MemoryBackend,
    #[case] email: &str,
    #[case] password: &str,
) {
    let creds = LoginCredentials::try_from_parts(email, password).expect("shape");
    let err = backend.sign_in(&creds).await.expect_err("rejected");
    assert_eq!(err, AuthServiceError::invalid_credentials());
}

#[rstest]
#[tokio::test]
async fn sign_up_registers_once_per_email(backend: MemoryBackend) {
    let details =
        SignupDetails::try_from_parts("Ada Lovelace", "Ada@Example.com", "secret1", Role::Mentor)
            .expect("valid");
    let identity = backend.sign_up(&details).await.expect("registered");
    assert_eq!(identity.email().as_ref(), "ada@example.com");
    assert_eq!(
        backend.identity(identity.id()).await.expect("lookup"),
        Some(identity.clone())
    );

    let again = backend.sign_up(&details).await.expect_err("duplicate");
    assert!(matches!(again, AuthServiceError::EmailTaken { .. }));

    let creds = LoginCredentials::try_from_parts("ada@example.com", "secret1").expect("shape");
    assert_eq!(backend.sign_in(&creds).await.expect("signed in"), identity);
}

#[rstest]
#[tokio::test]
async fn duplicate_profiles_are_refused(backend: MemoryBackend) {
    let profile = Profile::new(
        EMILY_ID,
        DisplayName::new("Emily Davis").expect("name"),
        Role::Coordinator,
    );
    let err = ProfileRepository::insert(&backend, &profile)
        .await
        .expect_err("exists");
    assert!(matches!(err, ProfileRepositoryError::Duplicate { .. }));
}

#[rstest]
#[tokio::test]
async fn profiles_filter_by_role(backend: MemoryBackend) {
    let mentees = ProfileRepository::list(&backend, Some(Role::Mentee))
        .await
        .expect("list");
    let names: Vec<_> = mentees.iter().map(|p| p.name().as_ref().to_owned()).collect();
    assert_eq!(names, ["Emily Davis", "John Smith"]);
    assert_eq!(
        ProfileRepository::list(&backend, None).await.expect("list").len(),
        4
    );
}

#[rstest]
#[tokio::test]
async fn seeded_projects_belong_to_the_demo_mentor(backend: MemoryBackend) {
    let projects = ProjectRepository::list_by_mentor(&backend, &mentor()).await.expect("list");
    let ids: Vec<_> = projects.iter().map(|p| p.id).collect();
    assert_eq!(ids, [ECOMMERCE_ID, TASKS_ID, SOCIAL_ID]);
    assert_eq!(projects[1].status, ProjectStatus::Available);
}

#[rstest]
#[tokio::test]
async fn deleting_a_project_reports_whether_it_existed(backend: MemoryBackend) {
    assert!(ProjectRepository::delete(&backend, SOCIAL_ID).await.expect("delete"));
    assert!(!ProjectRepository::delete(&backend, SOCIAL_ID).await.expect("delete"));
    assert_eq!(ProjectRepository::list(&backend).await.expect("list").len(), 2);
}

#[rstest]
#[tokio::test]
async fn requests_list_newest_first(backend: MemoryBackend) {
    let rows = RequestRepository::list(&backend).await.expect("list");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].mentee_id, EMILY_ID);
    assert!(rows[0].created_at > rows[1].created_at);

    let scoped = RequestRepository::list_for_projects(&backend, &[TASKS_ID])
        .await
        .expect("list");
    assert_eq!(scoped.len(), 1);
}

#[rstest]
#[tokio::test]
async fn status_updates_return_the_row(backend: MemoryBackend) {
    let request = RequestRepository::list_by_mentee(&backend, &EMILY_ID)
        .await
        .expect("list")
        .remove(0);
    let updated = RequestRepository::update_status(&backend, request.id, RequestStatus::Approved)
        .await
        .expect("update")
        .expect("present");
    assert_eq!(updated.status, RequestStatus::Approved);

    let missing =
        RequestRepository::update_status(&backend, RequestId::random(), RequestStatus::Rejected)
            .await
            .expect("update");
    assert!(missing.is_none());

    let absent = SubmissionRepository::update_status(
        &backend,
        SubmissionId::random(),
        SubmissionStatus::Approved,
    )
    .await
    .expect("update");
    assert!(absent.is_none());
}

#[rstest]
#[tokio::test]
async fn submissions_sort_by_submission_time(backend: MemoryBackend) {
    let mentee = DemoUser::for_role(Role::Mentee).id.clone();
    let later = Submission {
        id: SubmissionId::random(),
        project_id: TASKS_ID,
        mentee_id: mentee.clone(),
        github_link: None,
        file_url: Some("/files/a.zip".into()),
        submitted_at: Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).single().expect("ts"),
        status: SubmissionStatus::Pending,
    };
    SubmissionRepository::insert(&backend, &later).await.expect("insert");

    let rows = SubmissionRepository::list_by_mentee(&backend, &mentee).await.expect("list");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, later.id);

    let feedback = backend
        .list_for_submissions(&[rows[1].id])
        .await
        .expect("list");
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].rating.get(), 4);
}

#[rstest]
#[tokio::test]
async fn uploads_are_stored_and_published(backend: MemoryBackend) {
    let url = backend
        .upload(FileUpload {
            path: "/submissions/john/site.zip".into(),
            content_type: "application/zip".into(),
            bytes: vec![1, 2, 3],
        })
        .await
        .expect("stored");
    assert_eq!(url, "/files/submissions/john/site.zip");
    let stored = backend.file("submissions/john/site.zip").expect("present");
    assert_eq!(stored.bytes, [1, 2, 3]);
}

#[rstest]
#[tokio::test]
async fn oversized_uploads_are_refused(backend: MemoryBackend) {
    let err = backend
        .upload(FileUpload {
            path: "big.bin".into(),
            content_type: "application/octet-stream".into(),
            bytes: vec![0; MAX_UPLOAD_BYTES + 1],
        })
        .await
        .expect_err("too large");
    assert_eq!(err, FileStorageError::too_large(MAX_UPLOAD_BYTES));
    assert!(backend.file("big.bin").is_none());
}

#[rstest]
#[tokio::test]
async fn poisoned_tables_surface_as_query_errors() {
    let backend = MemoryBackend::default();
    let poisoner = backend.clone();
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.tables.write().expect("lock");
        panic!("poison the lock");
    })
    .join();

    let err = ProjectRepository::list(&backend).await.expect_err("poisoned");
    assert!(err.to_string().contains("unavailable"));
    assert!(FeedbackRepository::list(&backend).await.is_err());
}
