//! Identity data model.
//!
//! An [`Identity`] is the account record returned by the auth collaborator:
//! id, display name, email and an optional avatar reference. Values are
//! validated on construction so handlers and services never see raw rows.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for identity components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
    #[error("display name may only contain letters, numbers, spaces, apostrophes, dots or hyphens")]
    DisplayNameInvalidCharacters,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must look like name@domain")]
    InvalidEmail,
}

/// Stable identity identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from text.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("uuid");
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(UserId::new("user1").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

static DISPLAY_NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn display_name_regex() -> &'static Regex {
    DISPLAY_NAME_RE.get_or_init(|| {
        Regex::new(r"^[\p{L}\p{N} .'\-]+$")
            .unwrap_or_else(|error| panic!("display name regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Human readable name shown in menus and request lists.
///
/// Leading and trailing whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = display_name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        if !display_name_regex().is_match(trimmed) {
            return Err(UserValidationError::DisplayNameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Login email. Stored lower-cased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new(" Sarah@Example.com ").expect("valid");
    /// assert_eq!(email.as_ref(), "sarah@example.com");
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authenticated account record.
///
/// ## Invariants
/// - `id` is a valid UUID.
/// - `display_name` and `email` satisfy their own validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "IdentityDto", into = "IdentityDto")]
pub struct Identity {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "Sarah Johnson")]
    display_name: DisplayName,
    #[schema(value_type = String, example = "sarah@example.com")]
    email: EmailAddress,
    #[schema(example = "/placeholder.svg")]
    avatar: Option<String>,
}

impl Identity {
    /// Build an identity from validated components.
    pub fn new(id: UserId, display_name: DisplayName, email: EmailAddress) -> Self {
        Self {
            id,
            display_name,
            email,
            avatar: None,
        }
    }

    /// Fallible constructor from raw strings.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        display_name: impl Into<String>,
        email: impl AsRef<str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            DisplayName::new(display_name)?,
            EmailAddress::new(email)?,
        ))
    }

    /// Attach an avatar reference; blank references are dropped.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        let avatar = avatar.into();
        self.avatar = (!avatar.trim().is_empty()).then_some(avatar);
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Name shown to other users.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Avatar reference, if any.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityDto {
    id: String,
    #[serde(alias = "name", alias = "display_name")]
    display_name: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
}

impl From<Identity> for IdentityDto {
    fn from(value: Identity) -> Self {
        let Identity {
            id,
            display_name,
            email,
            avatar,
        } = value;
        Self {
            id: id.to_string(),
            display_name: display_name.into(),
            email: email.into(),
            avatar,
        }
    }
}

impl TryFrom<IdentityDto> for Identity {
    type Error = UserValidationError;

    fn try_from(value: IdentityDto) -> Result<Self, Self::Error> {
        let identity = Self::try_from_strings(value.id, value.display_name, value.email)?;
        Ok(match value.avatar {
            Some(avatar) => identity.with_avatar(avatar),
            None => identity,
        })
    }
}
