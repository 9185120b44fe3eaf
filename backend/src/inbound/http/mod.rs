//! HTTP inbound adapter exposing the session, navigation and dashboard API.

pub mod auth;
pub mod dashboard;
pub mod error;
pub(crate) mod guard;
pub mod health;
pub mod navigation;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
