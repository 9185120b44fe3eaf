//! Server settings loaded via OrthoConfig.
//!
//! Values come from `MENTORSHIP_*` environment variables, a configuration
//! file or command-line flags, in OrthoConfig's usual precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("MENTORSHIP_HOST='{value}' is not an IP address")]
    InvalidHost { value: String },
}

/// Listener and data settings for the API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MENTORSHIP")]
pub struct AppSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<String>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// Load the demo accounts and records into the in-memory store; defaults
    /// to `true`.
    pub seed_demo_data: Option<bool>,
}

impl AppSettings {
    /// Whether the in-memory store starts with the demo data.
    #[must_use]
    pub fn seeds_demo_data(&self) -> bool {
        self.seed_demo_data.unwrap_or(true)
    }

    /// Socket address the server listens on.
    ///
    /// # Errors
    /// [`SettingsError::InvalidHost`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = match self.host.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_HOST,
            Some(raw) => raw.parse().map_err(|_| SettingsError::InvalidHost {
                value: raw.to_owned(),
            })?,
        };
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }
}
