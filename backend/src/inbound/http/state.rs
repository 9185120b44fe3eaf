//! Shared HTTP adapter state.
//!
//! Handlers receive [`HttpState`] through `web::Data` and only ever talk to
//! domain services, so they can be exercised against fixture ports.

use std::sync::Arc;

use crate::domain::ports::{AuthService, DemoIdentities};
use crate::domain::{
    CoordinatorDashboard, DashboardPorts, MenteeDashboard, MentorDashboard, SessionServices,
    SessionStore,
};

use super::session::SessionContext;

/// Parameter object bundling the ports the adapter is wired over.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn AuthService>,
    pub dashboard: DashboardPorts,
    /// Canned identities; enables the role hint and role switching.
    pub demo: Option<Arc<dyn DemoIdentities>>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sessions: SessionServices,
    pub mentee: MenteeDashboard,
    pub mentor: MentorDashboard,
    pub coordinator: CoordinatorDashboard,
}

impl HttpState {
    /// Build every service over one set of ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::outbound::memory::MemoryBackend;
    /// use mockable::DefaultClock;
    ///
    /// let backend = MemoryBackend::default();
    /// let state = HttpState::new(HttpStatePorts {
    ///     auth: Arc::new(backend.clone()),
    ///     dashboard: backend.dashboard_ports(Arc::new(DefaultClock)),
    ///     demo: None,
    /// });
    /// assert!(!state.sessions.demo_enabled());
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            auth,
            dashboard,
            demo,
        } = ports;
        let sessions = SessionServices::new(auth, dashboard.profiles.clone());
        let sessions = match demo {
            Some(demo) => sessions.with_demo_identities(demo),
            None => sessions,
        };
        Self {
            sessions,
            mentee: MenteeDashboard::new(dashboard.clone()),
            mentor: MentorDashboard::new(dashboard.clone()),
            coordinator: CoordinatorDashboard::new(dashboard),
        }
    }

    /// Session store over this request's cookie, restored from storage.
    pub async fn open_session(&self, session: SessionContext) -> SessionStore<SessionContext> {
        let mut store = SessionStore::new(self.sessions.clone(), session);
        store.initialize().await;
        store
    }
}
