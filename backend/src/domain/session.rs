//! Session store: the current identity, its role and a loading flag.
//!
//! A [`SessionStore`] is built per request over a [`SessionStorage`] adapter.
//! Only the identity id and the role hint live in storage; the identity and
//! role are derived again by [`SessionStore::initialize`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use super::ports::{AuthService, DemoIdentities, ProfileRepository, SessionStorage};
use super::{
    Error, Identity, LoginCredentials, Profile, Role, RoleResolution, RoleResolver, SignupDetails,
    UserId,
};

/// Snapshot of a session.
///
/// ## Invariants
/// - `role` is `None` whenever `identity` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub identity: Option<Identity>,
    pub role: Option<Role>,
    pub loading: bool,
}

impl Session {
    /// Fresh session awaiting [`SessionStore::initialize`].
    pub const fn loading() -> Self {
        Self {
            identity: None,
            role: None,
            loading: true,
        }
    }

    /// Whether an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Collaborators shared by every session store.
#[derive(Clone)]
pub struct SessionServices {
    auth: Arc<dyn AuthService>,
    profiles: Arc<dyn ProfileRepository>,
    resolver: RoleResolver,
    demo: Option<Arc<dyn DemoIdentities>>,
}

impl SessionServices {
    /// Wire the auth collaborator and profile repository.
    pub fn new(auth: Arc<dyn AuthService>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            auth,
            resolver: RoleResolver::new(profiles.clone()),
            profiles,
            demo: None,
        }
    }

    /// Enable the role hint and role switching with a canned identity provider.
    #[must_use]
    pub fn with_demo_identities(mut self, demo: Arc<dyn DemoIdentities>) -> Self {
        self.demo = Some(demo);
        self
    }

    /// Resolver used for role lookups.
    pub fn resolver(&self) -> &RoleResolver {
        &self.resolver
    }

    /// Whether a canned identity provider is wired in.
    pub fn demo_enabled(&self) -> bool {
        self.demo.is_some()
    }

    /// Role whose canned identity has `id`, if any.
    fn canned_role(&self, id: &UserId) -> Option<Role> {
        let demo = self.demo.as_ref()?;
        Role::ALL
            .into_iter()
            .find(|role| demo.identity_for(*role).is_ok_and(|identity| identity.id() == id))
    }
}

/// Per-request session state over a storage adapter.
pub struct SessionStore<S> {
    services: SessionServices,
    storage: S,
    session: Session,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Create an uninitialised store.
    pub fn new(services: SessionServices, storage: S) -> Self {
        Self {
            services,
            storage,
            session: Session::loading(),
        }
    }

    /// Current snapshot.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity.as_ref()
    }

    /// Cached role, if any.
    pub fn role(&self) -> Option<Role> {
        self.session.role
    }

    /// Whether [`Self::initialize`] has not completed yet.
    pub fn is_loading(&self) -> bool {
        self.session.loading
    }

    /// Collaborators backing the store.
    pub fn services(&self) -> &SessionServices {
        &self.services
    }

    /// Restore the session from storage.
    ///
    /// A persisted role hint wins when a canned identity provider is wired
    /// in. Otherwise the stored identity id is looked up and its role
    /// resolved. Failures are logged and leave the identity empty.
    pub async fn initialize(&mut self) {
        self.session = Session::loading();
        if !self.restore_from_hint() {
            self.restore_from_identity_id().await;
        }
        self.session.loading = false;
    }

    fn restore_from_hint(&mut self) -> bool {
        let Some(demo) = self.services.demo.clone() else {
            return false;
        };
        let role = match self.storage.role_hint() {
            Ok(Some(role)) => role,
            Ok(None) => return false,
            Err(error) => {
                warn!(%error, "role hint unreadable");
                return false;
            }
        };
        match demo.identity_for(role) {
            Ok(identity) => {
                debug!(%role, user_id = %identity.id(), "session restored from role hint");
                self.session.identity = Some(identity);
                self.session.role = Some(role);
                true
            }
            Err(error) => {
                warn!(%role, %error, "canned identity unavailable");
                false
            }
        }
    }

    async fn restore_from_identity_id(&mut self) {
        let id = match self.storage.user_id() {
            Ok(Some(id)) => id,
            Ok(None) => return,
            Err(error) => {
                warn!(%error, "stored identity id unreadable");
                return;
            }
        };
        match self.services.auth.identity(&id).await {
            Ok(Some(identity)) => {
                let role = self.lookup_role(&identity).await;
                self.session.identity = Some(identity);
                self.session.role = role;
            }
            Ok(None) => warn!(user_id = %id, "stored identity no longer exists"),
            Err(error) => warn!(user_id = %id, %error, "identity lookup failed"),
        }
    }

    /// Role recorded for `identity`, looked up afresh.
    ///
    /// A missing profile is created: canned identities keep their canned
    /// role, anyone else becomes a mentee.
    pub async fn lookup_role(&self, identity: &Identity) -> Option<Role> {
        match self.services.resolver.resolve(identity.id()).await {
            RoleResolution::Defaulted => {
                let role = self
                    .services
                    .canned_role(identity.id())
                    .unwrap_or(Role::Mentee);
                self.services.resolver.create_profile(identity, role).await;
                Some(role)
            }
            resolution => resolution.role(),
        }
    }

    /// Replace the cached role with one looked up by the caller.
    pub(crate) fn adopt_role(&mut self, role: Option<Role>) {
        if role != self.session.role {
            debug!(?role, cached = ?self.session.role, "role refreshed");
        }
        self.session.role = role;
    }

    /// Clear the session and the persisted state.
    ///
    /// The auth collaborator is asked to end its session first; a failure
    /// there is logged and local state is cleared regardless.
    pub async fn sign_out(&mut self) {
        let id = self
            .session
            .identity
            .as_ref()
            .map(|identity| identity.id().clone())
            .or_else(|| self.storage.user_id().ok().flatten());
        if let Some(id) = id {
            if let Err(error) = self.services.auth.sign_out(&id).await {
                warn!(user_id = %id, %error, "auth sign-out failed");
            }
        }
        self.storage.clear();
        self.session = Session {
            identity: None,
            role: None,
            loading: false,
        };
        info!("session signed out");
    }

    /// Act as the canned identity for `role` and persist the hint.
    ///
    /// Fails with [`super::ErrorCode::Forbidden`] when no canned identity
    /// provider is wired in.
    pub fn switch_role(&mut self, role: Role) -> Result<&Session, Error> {
        let demo = self
            .services
            .demo
            .clone()
            .ok_or_else(|| Error::forbidden("role switching is not available"))?;
        let identity = demo.identity_for(role)?;
        self.storage
            .set_role_hint(role)
            .map_err(|err| Error::internal(err.to_string()))?;
        debug!(%role, user_id = %identity.id(), "switched role");
        self.session = Session {
            identity: Some(identity),
            role: Some(role),
            loading: false,
        };
        Ok(&self.session)
    }

    /// Re-derive the role for the current identity. No-op when signed out.
    pub async fn refresh_role(&mut self) {
        let Some(identity) = self.session.identity.clone() else {
            return;
        };
        let role = self.lookup_role(&identity).await;
        self.adopt_role(role);
    }

    /// Authenticate and persist the identity id.
    ///
    /// A stale role hint is discarded so the authenticated identity wins on
    /// the next [`Self::initialize`].
    pub async fn sign_in(&mut self, credentials: &LoginCredentials) -> Result<&Session, Error> {
        let identity = self.services.auth.sign_in(credentials).await?;
        self.establish(identity).await
    }

    /// Register an account, create its profile and sign in.
    pub async fn sign_up(&mut self, details: &SignupDetails) -> Result<&Session, Error> {
        let identity = self.services.auth.sign_up(details).await?;
        let profile = Profile::new(
            identity.id().clone(),
            details.name().clone(),
            details.role(),
        );
        self.services.profiles.insert(&profile).await?;
        info!(user_id = %identity.id(), role = %details.role(), "account registered");
        self.establish(identity).await
    }

    async fn establish(&mut self, identity: Identity) -> Result<&Session, Error> {
        self.storage.clear();
        self.storage
            .set_user_id(identity.id())
            .map_err(|err| Error::internal(err.to_string()))?;
        let role = self.lookup_role(&identity).await;
        info!(user_id = %identity.id(), ?role, "session established");
        self.session = Session {
            identity: Some(identity),
            role,
            loading: false,
        };
        Ok(&self.session)
    }
}

#[cfg(test)]
mod tests;
