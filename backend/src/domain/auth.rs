//! Authentication inputs: login credentials and sign-up details.
//!
//! Inbound payload parsing stays outside the domain; handlers call these
//! constructors so validation failures are caught before any collaborator is
//! contacted.

use zeroize::Zeroizing;

use super::{DisplayName, EmailAddress, Role, UserValidationError};

/// Minimum password length accepted at sign-up.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthValidationError {
    /// Email was missing or malformed.
    #[error("{0}")]
    Email(UserValidationError),
    /// Display name was missing or malformed.
    #[error("{0}")]
    Name(UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Password shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl AuthValidationError {
    /// Payload field the error refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Name(_) => "name",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
        }
    }

    /// Stable machine-readable code for clients.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Email(UserValidationError::EmptyEmail) => "empty_email",
            Self::Email(_) => "invalid_email",
            Self::Name(UserValidationError::EmptyDisplayName) => "empty_name",
            Self::Name(_) => "invalid_name",
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooShort { .. } => "password_too_short",
        }
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is a normalised [`EmailAddress`].
/// - `password` is non-empty; whitespace is preserved.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("john@example.com", "hunter2").unwrap();
/// assert_eq!(creds.email().as_ref(), "john@example.com");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = EmailAddress::new(email).map_err(AuthValidationError::Email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the identity lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up request: account credentials plus the profile to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    name: DisplayName,
    credentials: LoginCredentials,
    role: Role,
}

impl SignupDetails {
    /// Construct sign-up details from raw inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Self, AuthValidationError> {
        let name = DisplayName::new(name).map_err(AuthValidationError::Name)?;
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            name,
            credentials,
            role,
        })
    }

    /// Display name for the new profile.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Credentials for the new account.
    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    /// Role recorded on the new profile.
    pub fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", "email", "empty_email")]
    #[case("not-an-email", "pw", "email", "invalid_email")]
    #[case("john@example.com", "", "password", "empty_password")]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!((err.field(), err.code()), (field, code));
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts("john@example.com", "  pass  ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.password(), "  pass  ");
    }

    #[rstest]
    #[case("", "john@example.com", "secret1", "empty_name")]
    #[case("John", "john@example.com", "short", "password_too_short")]
    #[case("John", "john", "secret1", "invalid_email")]
    fn invalid_signup(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] code: &str,
    ) {
        let err = SignupDetails::try_from_parts(name, email, password, Role::Mentee)
            .expect_err("invalid sign-up must fail");
        assert_eq!(err.code(), code);
    }

    #[rstest]
    fn valid_signup_keeps_role() {
        let details =
            SignupDetails::try_from_parts("Emily Davis", "emily@example.com", "secret1", Role::Mentor)
                .expect("valid sign-up");
        assert_eq!(details.role(), Role::Mentor);
        assert_eq!(details.name().as_ref(), "Emily Davis");
        assert_eq!(details.credentials().email().as_ref(), "emily@example.com");
    }
}
