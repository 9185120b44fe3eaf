//! Backend entry-point: loads settings, builds the in-memory store and starts
//! the HTTP server.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use backend::outbound::memory::MemoryBackend;
use backend::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("load server settings")?;
    let bind_addr = settings.bind_addr()?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .wrap_err("load session settings")?;
    info!(fingerprint = %session.fingerprint(), "session key loaded");

    let seeded = settings.seeds_demo_data();
    let backend = if seeded {
        MemoryBackend::seeded().wrap_err("seed demo data")?
    } else {
        MemoryBackend::default()
    };
    info!(%bind_addr, seeded, "starting server");

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(session, bind_addr).with_backend(backend);
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated")
}
