//! Cookie session settings read from the environment.
//!
//! Debug builds fall back to permissive defaults with a warning; release builds
//! insist on every toggle being present and valid, and on a real key file.
//!
//! | Variable | Meaning | Debug default |
//! |---|---|---|
//! | `SESSION_KEY_FILE` | path to at least 64 bytes of key material | `/run/secrets/session_key` |
//! | `SESSION_COOKIE_SECURE` | mark the cookie `Secure` | `true` |
//! | `SESSION_SAMESITE` | `Strict`, `Lax` or `None` | `Lax` |
//! | `SESSION_ALLOW_EPHEMERAL` | generate a key when the file is unreadable | `false` |

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

pub(crate) const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const DEFAULT_KEY_PATH: &str = "/run/secrets/session_key";
pub(crate) const KEY_MIN_LEN: usize = 64;
const FLAG_VALUES: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_VALUES: &str = "Strict|Lax|None";
const FINGERPRINT_BYTES: usize = 8;

/// Which validation regime applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildMode {
    /// Missing or invalid toggles fall back to defaults.
    Debug,
    /// Missing or invalid toggles are errors.
    Release,
}

impl BuildMode {
    /// Mode matching `cfg!(debug_assertions)`.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated cookie session settings.
pub struct SessionSettings {
    /// Signing and encryption key.
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Short fingerprint of the active key, safe to log.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        key_fingerprint(&self.key)
    }
}

/// Reasons the session settings cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },
    #[error("{name}='{value}' is not one of {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("cannot read session key {path}: {source}")]
    KeyUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key {path} has {length} bytes; at least {min} are required")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min: usize,
    },
    #[error("SESSION_SAMESITE=None needs SESSION_COOKIE_SECURE enabled")]
    SameSiteNoneInsecure,
    #[error("SESSION_ALLOW_EPHEMERAL is not permitted in release builds")]
    EphemeralInRelease,
}

/// Read and validate the session settings.
///
/// # Errors
/// Any [`SessionConfigError`]; debug builds only fail on nothing.
///
/// # Examples
/// ```
/// use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let reader = Reader { env, mode };
    let cookie_secure = reader.flag(COOKIE_SECURE_ENV, true)?;
    let same_site = reader.same_site(cookie_secure)?;
    let allow_ephemeral = reader.flag(ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralInRelease);
    }
    let key = reader.key(allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// First eight bytes of the SHA-256 of the signing key, hex encoded.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

struct Reader<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> Reader<'_, E> {
    /// Release builds surface `error`; debug builds warn and use `fallback`.
    fn lenient<T>(&self, fallback: T, error: SessionConfigError) -> Result<T, SessionConfigError> {
        match self.mode {
            BuildMode::Release => Err(error),
            BuildMode::Debug => {
                warn!(%error, "session setting defaulted");
                Ok(fallback)
            }
        }
    }

    fn flag(&self, name: &'static str, fallback: bool) -> Result<bool, SessionConfigError> {
        let Some(value) = self.env.string(name) else {
            return self.lenient(fallback, SessionConfigError::Missing { name });
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" => Ok(true),
            "0" | "false" | "no" | "n" => Ok(false),
            _ => self.lenient(
                fallback,
                SessionConfigError::Invalid {
                    name,
                    value,
                    expected: FLAG_VALUES,
                },
            ),
        }
    }

    fn same_site(&self, cookie_secure: bool) -> Result<SameSite, SessionConfigError> {
        let fallback = match self.mode {
            BuildMode::Debug => SameSite::Lax,
            BuildMode::Release => SameSite::Strict,
        };
        let Some(value) = self.env.string(SAMESITE_ENV) else {
            return self.lenient(fallback, SessionConfigError::Missing { name: SAMESITE_ENV });
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" if cookie_secure => Ok(SameSite::None),
            "none" => self.lenient(SameSite::None, SessionConfigError::SameSiteNoneInsecure),
            _ => self.lenient(
                fallback,
                SessionConfigError::Invalid {
                    name: SAMESITE_ENV,
                    value,
                    expected: SAMESITE_VALUES,
                },
            ),
        }
    }

    fn key(&self, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
        let path = PathBuf::from(
            self.env
                .string(KEY_FILE_ENV)
                .unwrap_or_else(|| DEFAULT_KEY_PATH.to_owned()),
        );
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => Zeroizing::new(bytes),
            Err(source) if allow_ephemeral || self.mode == BuildMode::Debug => {
                warn!(path = %path.display(), error = %source, "session key unreadable; generating an ephemeral key");
                return Ok(Key::generate());
            }
            Err(source) => return Err(SessionConfigError::KeyUnreadable { path, source }),
        };
        if bytes.len() < KEY_MIN_LEN {
            let error = SessionConfigError::KeyTooShort {
                path,
                length: bytes.len(),
                min: KEY_MIN_LEN,
            };
            return self.lenient(Key::generate(), error);
        }
        Ok(Key::derive_from(&bytes))
    }
}
