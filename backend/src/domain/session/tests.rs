//! Behaviour coverage for the session store.

use super::*;
use crate::domain::ports::{
    AuthServiceError, FixtureAuthService, FixtureDemoIdentities, FixtureProfileRepository,
    InMemorySessionStorage, MockAuthService, MockProfileRepository, ProfileRepositoryError,
};
use crate::domain::{AccessDecision, DisplayName, ErrorCode, UserId, authorize, find_page};
use crate::outbound::memory::MemoryBackend;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then};

const EMILY_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn emily() -> Identity {
    Identity::try_from_strings(EMILY_ID, "Emily Davis", "emily@example.com")
        .expect("valid identity")
}

fn profile(identity: &Identity, role: Role) -> Profile {
    Profile::new(
        identity.id().clone(),
        DisplayName::new(identity.display_name().as_ref()).expect("name"),
        role,
    )
}

fn auth_knowing(identity: &Identity) -> MockAuthService {
    let mut auth = MockAuthService::new();
    let known = identity.clone();
    auth.expect_identity()
        .returning(move |id| Ok((id == known.id()).then(|| known.clone())));
    auth
}

fn profiles_with(profile: Profile) -> MockProfileRepository {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok((id == profile.id()).then(|| profile.clone())));
    repo
}

fn store_over(
    services: SessionServices,
    storage: InMemorySessionStorage,
) -> SessionStore<InMemorySessionStorage> {
    SessionStore::new(services, storage)
}

#[given("a demo session store with a persisted role hint")]
fn a_demo_session_store_with_a_persisted_role_hint(
    role: Role,
) -> SessionStore<InMemorySessionStorage> {
    let services = SessionServices::new(Arc::new(FixtureAuthService), Arc::new(FixtureProfileRepository))
        .with_demo_identities(Arc::new(FixtureDemoIdentities));
    store_over(services, InMemorySessionStorage::with_role_hint(role))
}

#[given("a session store without a canned identity provider")]
fn a_session_store_without_a_canned_identity_provider(
    storage: InMemorySessionStorage,
) -> SessionStore<InMemorySessionStorage> {
    let services = SessionServices::new(Arc::new(FixtureAuthService), Arc::new(FixtureProfileRepository));
    store_over(services, storage)
}

#[then("the session is signed out")]
fn the_session_is_signed_out(store: &SessionStore<InMemorySessionStorage>) {
    assert!(!store.is_loading(), "initialisation must finish");
    assert!(store.identity().is_none());
    assert!(store.role().is_none());
}

fn assert_acts_as(store: &SessionStore<InMemorySessionStorage>, role: Role, name: &str) {
    assert!(!store.is_loading());
    assert_eq!(store.role(), Some(role));
    let identity = store.identity().expect("identity present");
    assert_eq!(identity.display_name().as_ref(), name);
}

#[rstest]
#[case(Role::Mentee, "John Smith")]
#[case(Role::Mentor, "Sarah Johnson")]
#[case(Role::Coordinator, "Michael Brown")]
#[tokio::test]
async fn role_hint_selects_the_canned_identity(#[case] role: Role, #[case] name: &str) {
    let mut store = a_demo_session_store_with_a_persisted_role_hint(role);
    assert!(store.is_loading());
    store.initialize().await;
    assert_acts_as(&store, role, name);
}

#[rstest]
#[tokio::test]
async fn role_hint_is_ignored_without_a_provider() {
    let mut store =
        a_session_store_without_a_canned_identity_provider(InMemorySessionStorage::with_role_hint(Role::Mentor));
    store.initialize().await;
    the_session_is_signed_out(&store);
}

#[rstest]
#[case(Role::Coordinator)]
#[case(Role::Mentor)]
#[tokio::test]
async fn stored_identity_takes_its_profile_role(emily: Identity, #[case] role: Role) {
    let services = SessionServices::new(
        Arc::new(auth_knowing(&emily)),
        Arc::new(profiles_with(profile(&emily, role))),
    );
    let mut store = store_over(services, InMemorySessionStorage::with_user_id(emily.id().clone()));
    store.initialize().await;
    assert_acts_as(&store, role, "Emily Davis");
}

#[rstest]
#[tokio::test]
async fn missing_profile_defaults_to_mentee_and_creates_one(emily: Identity) {
    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_by_id().returning(|_| Ok(None));
    let expected = emily.id().clone();
    profiles
        .expect_insert()
        .withf(move |p| p.id() == &expected && p.role() == Role::Mentee)
        .times(1)
        .returning(|_| Ok(()));
    let services = SessionServices::new(Arc::new(auth_knowing(&emily)), Arc::new(profiles));
    let mut store = store_over(services, InMemorySessionStorage::with_user_id(emily.id().clone()));

    store.initialize().await;

    assert_acts_as(&store, Role::Mentee, "Emily Davis");
}

#[rstest]
#[tokio::test]
async fn failed_profile_lookup_leaves_role_unknown(emily: Identity) {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_id()
        .returning(|_| Err(ProfileRepositoryError::connection("refused")));
    let services = SessionServices::new(Arc::new(auth_knowing(&emily)), Arc::new(profiles));
    let mut store = store_over(services, InMemorySessionStorage::with_user_id(emily.id().clone()));

    store.initialize().await;

    assert!(store.identity().is_some());
    assert_eq!(store.role(), None);
}

#[rstest]
#[tokio::test]
async fn failed_identity_lookup_leaves_session_empty(emily: Identity) {
    let mut auth = MockAuthService::new();
    auth.expect_identity()
        .returning(|_| Err(AuthServiceError::connection("timeout")));
    let services = SessionServices::new(Arc::new(auth), Arc::new(FixtureProfileRepository));
    let mut store = store_over(services, InMemorySessionStorage::with_user_id(emily.id().clone()));

    store.initialize().await;

    the_session_is_signed_out(&store);
}

#[rstest]
#[tokio::test]
async fn switching_role_twice_equals_once() {
    let mut store = a_demo_session_store_with_a_persisted_role_hint(Role::Mentee);
    store.initialize().await;

    let once = store.switch_role(Role::Mentor).expect("switch").clone();
    let twice = store.switch_role(Role::Mentor).expect("switch again").clone();

    assert_eq!(once, twice);
    assert_acts_as(&store, Role::Mentor, "Sarah Johnson");
    assert_eq!(store.storage.role_hint().expect("readable"), Some(Role::Mentor));
}

#[rstest]
#[case(Role::Mentor, "/dashboard/mentor/requests")]
#[case(Role::Coordinator, "/dashboard/coordinator/analytics")]
#[tokio::test]
async fn switched_roles_survive_an_unseeded_backend(#[case] role: Role, #[case] page: &str) {
    let backend = MemoryBackend::default();
    let services = SessionServices::new(Arc::new(backend.clone()), Arc::new(backend.clone()))
        .with_demo_identities(Arc::new(FixtureDemoIdentities));
    let allowed = find_page(page).and_then(|rule| rule.allowed);

    let mut store = store_over(services.clone(), InMemorySessionStorage::default());
    store.initialize().await;
    store.switch_role(role).expect("switch");
    assert_eq!(authorize(&mut store, allowed).await, AccessDecision::Authorized);

    let mut next = store_over(services, InMemorySessionStorage::with_role_hint(role));
    next.initialize().await;
    assert_eq!(authorize(&mut next, allowed).await, AccessDecision::Authorized);
    assert_eq!(next.role(), Some(role));

    let id = next.identity().expect("canned identity").id().clone();
    let recorded = ProfileRepository::find_by_id(&backend, &id)
        .await
        .expect("lookup")
        .expect("profile created");
    assert_eq!(recorded.role(), role);
}

#[rstest]
fn switching_role_requires_a_provider() {
    let mut store = a_session_store_without_a_canned_identity_provider(InMemorySessionStorage::default());
    let err = store.switch_role(Role::Coordinator).expect_err("no provider");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(store.storage.role_hint().expect("readable"), None);
}

#[rstest]
#[tokio::test]
async fn sign_out_then_initialize_is_signed_out() {
    let mut store = a_demo_session_store_with_a_persisted_role_hint(Role::Coordinator);
    store.initialize().await;

    store.sign_out().await;
    the_session_is_signed_out(&store);

    store.initialize().await;
    the_session_is_signed_out(&store);
}

#[rstest]
#[tokio::test]
async fn sign_out_clears_state_when_the_collaborator_fails(emily: Identity) {
    let mut auth = auth_knowing(&emily);
    auth.expect_sign_out()
        .times(1)
        .returning(|_| Err(AuthServiceError::connection("offline")));
    let services = SessionServices::new(
        Arc::new(auth),
        Arc::new(profiles_with(profile(&emily, Role::Mentor))),
    );
    let mut store = store_over(services, InMemorySessionStorage::with_user_id(emily.id().clone()));
    store.initialize().await;

    store.sign_out().await;

    the_session_is_signed_out(&store);
    assert_eq!(store.storage, InMemorySessionStorage::default());
}

#[rstest]
#[tokio::test]
async fn refresh_role_without_identity_is_a_no_op() {
    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_by_id().never();
    let services = SessionServices::new(Arc::new(FixtureAuthService), Arc::new(profiles));
    let mut store = store_over(services, InMemorySessionStorage::default());
    store.initialize().await;

    store.refresh_role().await;

    the_session_is_signed_out(&store);
}

#[rstest]
#[tokio::test]
async fn sign_in_with_bad_credentials_persists_nothing() {
    let mut auth = MockAuthService::new();
    auth.expect_sign_in()
        .returning(|_| Err(AuthServiceError::invalid_credentials()));
    let services = SessionServices::new(Arc::new(auth), Arc::new(FixtureProfileRepository));
    let mut store = store_over(services, InMemorySessionStorage::default());
    let creds = LoginCredentials::try_from_parts("john@example.com", "wrong").expect("shape");

    let err = store.sign_in(&creds).await.expect_err("bad credentials");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(store.storage, InMemorySessionStorage::default());
}

#[rstest]
#[tokio::test]
async fn sign_in_replaces_a_stale_role_hint(emily: Identity) {
    let mut auth = MockAuthService::new();
    let signed_in = emily.clone();
    auth.expect_sign_in()
        .returning(move |_| Ok(signed_in.clone()));
    let services = SessionServices::new(
        Arc::new(auth),
        Arc::new(profiles_with(profile(&emily, Role::Mentor))),
    )
    .with_demo_identities(Arc::new(FixtureDemoIdentities));
    let mut store = store_over(services, InMemorySessionStorage::with_role_hint(Role::Coordinator));
    let creds = LoginCredentials::try_from_parts("emily@example.com", "secret1").expect("shape");

    let session = store.sign_in(&creds).await.expect("signed in").clone();

    assert_eq!(session.role, Some(Role::Mentor));
    assert_eq!(store.storage.role_hint().expect("readable"), None);
    assert_eq!(
        store.storage.user_id().expect("readable"),
        Some(UserId::new(EMILY_ID).expect("uuid"))
    );
}

#[rstest]
#[tokio::test]
async fn sign_up_records_the_chosen_role(emily: Identity) {
    let mut auth = MockAuthService::new();
    let registered = emily.clone();
    auth.expect_sign_up()
        .returning(move |_| Ok(registered.clone()));
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_insert()
        .withf(|p| p.role() == Role::Coordinator)
        .times(1)
        .returning(|_| Ok(()));
    let stored = profile(&emily, Role::Coordinator);
    profiles
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    let services = SessionServices::new(Arc::new(auth), Arc::new(profiles));
    let mut store = store_over(services, InMemorySessionStorage::default());
    let details = SignupDetails::try_from_parts(
        "Emily Davis",
        "emily@example.com",
        "secret1",
        Role::Coordinator,
    )
    .expect("valid details");

    let session = store.sign_up(&details).await.expect("registered").clone();

    assert_eq!(session.role, Some(Role::Coordinator));
    assert!(session.is_authenticated());
}

#[rstest]
#[tokio::test]
async fn sign_up_with_a_taken_email_conflicts() {
    let mut auth = MockAuthService::new();
    auth.expect_sign_up()
        .returning(|details| Err(AuthServiceError::email_taken(details.credentials().email().as_ref())));
    let mut profiles = MockProfileRepository::new();
    profiles.expect_insert().never();
    let services = SessionServices::new(Arc::new(auth), Arc::new(profiles));
    let mut store = store_over(services, InMemorySessionStorage::default());
    let details =
        SignupDetails::try_from_parts("John Smith", "john@example.com", "secret1", Role::Mentee)
            .expect("valid details");

    let err = store.sign_up(&details).await.expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::Conflict);
}
