//! Determine the acting role for an identity from its profile record.

use std::sync::Arc;

use tracing::{debug, warn};

use super::ports::ProfileRepository;
use super::{Identity, Profile, Role, UserId};

/// Outcome of a role lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleResolution {
    /// The profile record names the role.
    Known(Role),
    /// No profile exists; the record is created, as a mentee unless the
    /// identity is a canned one.
    Defaulted,
    /// The lookup failed; access control treats this as signed out.
    Unknown,
}

impl RoleResolution {
    /// Role to act as, if any.
    pub const fn role(self) -> Option<Role> {
        match self {
            Self::Known(role) => Some(role),
            Self::Defaulted => Some(Role::Mentee),
            Self::Unknown => None,
        }
    }
}

/// Reads profile records to decide which role an identity acts as.
#[derive(Clone)]
pub struct RoleResolver {
    profiles: Arc<dyn ProfileRepository>,
}

impl RoleResolver {
    /// Build a resolver over the profile repository.
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Look up the role recorded for `id`.
    pub async fn resolve(&self, id: &UserId) -> RoleResolution {
        match self.profiles.find_by_id(id).await {
            Ok(Some(profile)) => RoleResolution::Known(profile.role()),
            Ok(None) => {
                debug!(user_id = %id, "no profile record; defaulting to mentee");
                RoleResolution::Defaulted
            }
            Err(error) => {
                warn!(user_id = %id, %error, "profile lookup failed");
                RoleResolution::Unknown
            }
        }
    }

    /// Insert the profile implied by [`RoleResolution::Defaulted`].
    ///
    /// Best-effort: failures are logged and otherwise ignored.
    pub async fn create_profile(&self, identity: &Identity, role: Role) {
        let profile = Profile::new(identity.id().clone(), identity.display_name().clone(), role);
        if let Err(error) = self.profiles.insert(&profile).await {
            warn!(user_id = %identity.id(), %role, %error, "missing profile not created");
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::DisplayName;
    use crate::domain::ports::{MockProfileRepository, ProfileRepositoryError};
    use rstest::{fixture, rstest};

    #[fixture]
    fn identity() -> Identity {
        Identity::try_from_strings(
            "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "Emily Davis",
            "emily@example.com",
        )
        .expect("valid identity")
    }

    fn resolver_with(repo: MockProfileRepository) -> RoleResolver {
        RoleResolver::new(Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn known_profile_yields_its_role(identity: Identity) {
        let mut repo = MockProfileRepository::new();
        let profile = Profile::new(
            identity.id().clone(),
            DisplayName::new("Emily Davis").expect("name"),
            Role::Coordinator,
        );
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(profile)));

        let resolution = resolver_with(repo).resolve(identity.id()).await;
        assert_eq!(resolution, RoleResolution::Known(Role::Coordinator));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_profile_defaults_to_mentee(identity: Identity) {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));

        let resolution = resolver_with(repo).resolve(identity.id()).await;
        assert_eq!(resolution, RoleResolution::Defaulted);
        assert_eq!(resolution.role(), Some(Role::Mentee));
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_failure_is_unknown(identity: Identity) {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id()
            .return_once(|_| Err(ProfileRepositoryError::connection("refused")));

        let resolution = resolver_with(repo).resolve(identity.id()).await;
        assert_eq!(resolution.role(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn profile_insert_failure_is_swallowed(identity: Identity) {
        let mut repo = MockProfileRepository::new();
        let expected_id = identity.id().clone();
        repo.expect_insert()
            .withf(move |profile| profile.id() == &expected_id && profile.role() == Role::Mentee)
            .times(1)
            .return_once(|_| Err(ProfileRepositoryError::query("read only")));

        resolver_with(repo).create_profile(&identity, Role::Mentee).await;
    }
}
