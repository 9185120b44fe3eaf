//! In-memory backend implementing every collaborator port.
//!
//! One [`MemoryBackend`] value owns all tables behind a single `RwLock` and is
//! shared (cheap clone) between the auth, profile, record and file-storage
//! ports. Lists come back in the order the ports document; nothing here
//! applies dashboard rules.
//!
//! A poisoned lock is reported as the port's `Query` error, which the domain
//! maps to an internal error.

mod accounts;
mod files;
mod records;
mod seed;

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mockable::Clock;
use sha2::{Digest, Sha256};

use crate::domain::{
    DashboardPorts, Feedback, Identity, Profile, Project, ProjectRequest, ProjectTest, Submission, UserId,
};

pub use crate::domain::ports::MAX_UPLOAD_BYTES;
pub use files::StoredFile;
pub use seed::{DEMO_PASSWORD, SeedError};

/// Registered account: identity plus hex SHA-256 of the password.
#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password_digest: String,
}

fn digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[derive(Debug, Default)]
struct Tables {
    /// Keyed by normalised email.
    accounts: HashMap<String, Account>,
    profiles: HashMap<UserId, Profile>,
    projects: Vec<Project>,
    submissions: Vec<Submission>,
    feedback: Vec<Feedback>,
    requests: Vec<ProjectRequest>,
    tests: Vec<ProjectTest>,
    files: HashMap<String, StoredFile>,
}

impl Tables {
    fn insert_account(&mut self, identity: Identity, password: &str) {
        let key = identity.email().as_ref().to_owned();
        self.accounts.insert(
            key,
            Account {
                identity,
                password_digest: digest(password),
            },
        );
    }

    fn account_by_id(&self, id: &UserId) -> Option<&Account> {
        self.accounts
            .values()
            .find(|account| account.identity.id() == id)
    }
}

/// The tables lock was poisoned by a panicking writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("in-memory tables are unavailable after a writer panicked")]
struct PoisonedTables;

/// Shared in-memory tables.
///
/// # Examples
/// ```
/// use backend::outbound::memory::MemoryBackend;
///
/// let backend = MemoryBackend::seeded().expect("seed data is valid");
/// let empty = MemoryBackend::default();
/// # let _ = (backend, empty);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryBackend {
    /// Backend preloaded with the demo accounts and records.
    ///
    /// # Errors
    /// Returns [`SeedError`] when a seed record fails domain validation.
    pub fn seeded() -> Result<Self, SeedError> {
        let mut tables = Tables::default();
        seed::load(&mut tables)?;
        Ok(Self {
            tables: Arc::new(RwLock::new(tables)),
        })
    }

    /// Every dashboard port served by this backend.
    pub fn dashboard_ports(&self, clock: Arc<dyn Clock>) -> DashboardPorts {
        let shared = Arc::new(self.clone());
        DashboardPorts {
            profiles: shared.clone(),
            projects: shared.clone(),
            submissions: shared.clone(),
            feedback: shared.clone(),
            requests: shared.clone(),
            tests: shared.clone(),
            files: shared,
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, PoisonedTables> {
        self.tables.read().map_err(|_| PoisonedTables)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, PoisonedTables> {
        self.tables.write().map_err(|_| PoisonedTables)
    }
}

#[cfg(test)]
mod tests;
