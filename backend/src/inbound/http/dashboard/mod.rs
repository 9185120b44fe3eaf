//! Role-scoped dashboard endpoints.
//!
//! Each handler first admits the session to the page it serves (see
//! [`super::guard`]) and then hands the signed-in id to the matching domain
//! service. Request bodies are the domain drafts; responses are the domain
//! views.

pub mod coordinator;
pub mod mentee;
pub mod mentor;

use actix_web::web;

/// Register every dashboard endpoint.
pub fn configure(cfg: &mut web::ServiceConfig) {
    mentee::configure(cfg);
    mentor::configure(cfg);
    coordinator::configure(cfg);
}
