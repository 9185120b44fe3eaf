//! Builders wiring the in-memory backend into HTTP handler state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use backend::domain::ports::DemoIdentities;
#[cfg(feature = "dev-role-switch")]
use backend::domain::ports::FixtureDemoIdentities;
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::MemoryBackend;

/// Canned identities are only wired in when role switching is compiled in.
#[cfg(feature = "dev-role-switch")]
fn demo_identities() -> Option<Arc<dyn DemoIdentities>> {
    info!("role switching enabled with canned identities");
    Some(Arc::new(FixtureDemoIdentities))
}

#[cfg(not(feature = "dev-role-switch"))]
fn demo_identities() -> Option<Arc<dyn DemoIdentities>> {
    None
}

/// Handler state with every port served by `backend`.
pub(super) fn build_http_state(backend: &MemoryBackend) -> web::Data<HttpState> {
    let state = HttpState::new(HttpStatePorts {
        auth: Arc::new(backend.clone()),
        dashboard: backend.dashboard_ports(Arc::new(DefaultClock)),
        demo: demo_identities(),
    });
    info!(demo = state.sessions.demo_enabled(), "http state built");
    web::Data::new(state)
}
