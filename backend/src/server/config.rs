//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use backend::inbound::http::session_config::SessionSettings;
use backend::outbound::memory::MemoryBackend;

/// Everything [`super::create_server`] needs to start listening.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) backend: MemoryBackend,
}

impl ServerConfig {
    /// Combine validated session settings with the listener address.
    ///
    /// Starts over an empty in-memory store; see [`Self::with_backend`].
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            backend: MemoryBackend::default(),
        }
    }

    /// Serve records from `backend`, typically a seeded one.
    #[must_use]
    pub fn with_backend(mut self, backend: MemoryBackend) -> Self {
        self.backend = backend;
        self
    }
}
