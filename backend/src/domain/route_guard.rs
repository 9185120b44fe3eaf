//! Route guard: decide whether the session may open a page.
//!
//! The guard never trusts the role cached in the session. It resolves the
//! role again from the profile record and decides on that value; when the two
//! disagree the store is asked to refresh.

use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use super::ports::SessionStorage;
use super::routes::LOGIN_PATH;
use super::{Role, SessionStore};

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum AccessDecision {
    /// The session is still being initialised.
    Checking,
    /// The page may be shown.
    Authorized,
    /// Send the visitor to the login page.
    RedirectLogin { redirect: String },
    /// Send the visitor to their role's landing page.
    RedirectHome { redirect: String },
}

impl AccessDecision {
    /// Redirect target, if the decision is a redirect.
    pub fn redirect(&self) -> Option<&str> {
        match self {
            Self::RedirectLogin { redirect } | Self::RedirectHome { redirect } => Some(redirect),
            Self::Checking | Self::Authorized => None,
        }
    }
}

/// Decide access from already-resolved inputs.
///
/// # Examples
/// ```
/// use backend::domain::{decide, AccessDecision, Role};
///
/// let decision = decide(true, Some(Role::Coordinator), Some(&[Role::Mentee]));
/// assert_eq!(
///     decision,
///     AccessDecision::RedirectHome { redirect: "/dashboard/coordinator".into() }
/// );
/// ```
pub fn decide(has_identity: bool, role: Option<Role>, allowed: Option<&[Role]>) -> AccessDecision {
    if !has_identity {
        return redirect_login();
    }
    let Some(allowed) = allowed else {
        return AccessDecision::Authorized;
    };
    match role {
        None => redirect_login(),
        Some(role) if allowed.contains(&role) => AccessDecision::Authorized,
        Some(role) => AccessDecision::RedirectHome {
            redirect: role.default_path().to_owned(),
        },
    }
}

fn redirect_login() -> AccessDecision {
    AccessDecision::RedirectLogin {
        redirect: LOGIN_PATH.to_owned(),
    }
}

/// Check the session against a page's allowed roles.
///
/// Returns [`AccessDecision::Checking`] until the store has been initialised.
pub async fn authorize<S: SessionStorage>(
    store: &mut SessionStore<S>,
    allowed: Option<&[Role]>,
) -> AccessDecision {
    if store.is_loading() {
        return AccessDecision::Checking;
    }
    let Some(identity) = store.identity().cloned() else {
        return decide(false, None, allowed);
    };
    let id = identity.id();
    let fresh = store.lookup_role(&identity).await;
    if fresh != store.role() {
        debug!(user_id = %id, cached = ?store.role(), ?fresh, "cached role is stale");
        store.adopt_role(fresh);
    }
    let decision = decide(true, fresh, allowed);
    if let AccessDecision::RedirectHome { redirect } = &decision {
        info!(user_id = %id, ?fresh, ?allowed, %redirect, "access denied for role");
    }
    decision
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{
        FixtureAuthService, FixtureDemoIdentities, InMemorySessionStorage, MockProfileRepository,
    };
    use crate::domain::{DisplayName, Profile, SessionServices, all_pages};
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    #[rstest]
    fn unauthenticated_sessions_go_to_login_everywhere() {
        for page in all_pages() {
            for role in [None, Some(Role::Mentee), Some(Role::Coordinator)] {
                assert_eq!(
                    decide(false, role, page.allowed),
                    AccessDecision::RedirectLogin {
                        redirect: "/login".into()
                    },
                    "page {}",
                    page.path
                );
            }
        }
    }

    #[rstest]
    #[case(Role::Mentee, &[Role::Mentor], "/dashboard/mentee")]
    #[case(Role::Mentor, &[Role::Coordinator], "/dashboard/mentor")]
    #[case(Role::Coordinator, &[Role::Mentee, Role::Mentor], "/dashboard/coordinator")]
    fn excluded_roles_go_home(
        #[case] role: Role,
        #[case] allowed: &'static [Role],
        #[case] home: &str,
    ) {
        let decision = decide(true, Some(role), Some(allowed));
        assert_eq!(decision.redirect(), Some(home));
        assert!(matches!(decision, AccessDecision::RedirectHome { .. }));
    }

    #[rstest]
    #[case(None, None, AccessDecision::Authorized)]
    #[case(Some(Role::Mentor), None, AccessDecision::Authorized)]
    #[case(Some(Role::Mentor), Some(&[Role::Mentor][..]), AccessDecision::Authorized)]
    #[case(None, Some(&[Role::Mentor][..]), AccessDecision::RedirectLogin { redirect: "/login".into() })]
    fn authenticated_decisions(
        #[case] role: Option<Role>,
        #[case] allowed: Option<&'static [Role]>,
        #[case] expected: AccessDecision,
    ) {
        assert_eq!(decide(true, role, allowed), expected);
    }

    #[given("a mentee session whose profile now says coordinator")]
    fn a_mentee_session_whose_profile_now_says_coordinator()
    -> SessionStore<InMemorySessionStorage> {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_find_by_id().returning(|id| {
            Ok(Some(Profile::new(
                id.clone(),
                DisplayName::new("John Smith").expect("name"),
                Role::Coordinator,
            )))
        });
        let services = SessionServices::new(Arc::new(FixtureAuthService), Arc::new(profiles))
            .with_demo_identities(Arc::new(FixtureDemoIdentities));
        SessionStore::new(services, InMemorySessionStorage::with_role_hint(Role::Mentee))
    }

    #[when("the guard checks a mentee page")]
    fn the_guard_checks_a_mentee_page() -> Option<&'static [Role]> {
        crate::domain::find_page("/dashboard/mentee/tests").and_then(|page| page.allowed)
    }

    #[then("the visitor is sent to the coordinator dashboard")]
    fn the_visitor_is_sent_to_the_coordinator_dashboard(decision: AccessDecision) {
        assert_eq!(
            decision,
            AccessDecision::RedirectHome {
                redirect: "/dashboard/coordinator".into()
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn fresh_profile_role_overrides_the_cached_one() {
        let mut store = a_mentee_session_whose_profile_now_says_coordinator();
        store.initialize().await;
        assert_eq!(store.role(), Some(Role::Mentee));

        let allowed = the_guard_checks_a_mentee_page();
        let decision = authorize(&mut store, allowed).await;

        the_visitor_is_sent_to_the_coordinator_dashboard(decision);
        assert_eq!(store.role(), Some(Role::Coordinator), "store refreshed");
    }

    #[rstest]
    #[tokio::test]
    async fn uninitialised_store_is_checking() {
        let mut store = a_mentee_session_whose_profile_now_says_coordinator();
        assert_eq!(authorize(&mut store, None).await, AccessDecision::Checking);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_role_on_restricted_page_goes_to_login() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_find_by_id().returning(|_| {
            Err(crate::domain::ports::ProfileRepositoryError::connection("down"))
        });
        let services = SessionServices::new(Arc::new(FixtureAuthService), Arc::new(profiles))
            .with_demo_identities(Arc::new(FixtureDemoIdentities));
        let mut store =
            SessionStore::new(services, InMemorySessionStorage::with_role_hint(Role::Mentor));
        store.initialize().await;

        let restricted = authorize(&mut store, Some(&[Role::Mentor])).await;
        let open = authorize(&mut store, None).await;

        assert_eq!(restricted.redirect(), Some("/login"));
        assert_eq!(open, AccessDecision::Authorized);
        assert!(store.identity().is_some());
    }
}
