//! Roles attached to identities.
//!
//! Every role-dependent decision (menus, default pages, route access) matches
//! on [`Role`] exhaustively, so adding a role is a compile-time exercise.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acting role of an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Student working on projects.
    Mentee,
    /// Reviewer owning projects and tests.
    Mentor,
    /// Programme administrator.
    Coordinator,
}

/// Raised when text does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'; expected mentee, mentor or coordinator")]
pub struct RoleParseError(pub String);

impl Role {
    /// All roles in menu order.
    pub const ALL: [Self; 3] = [Self::Mentee, Self::Mentor, Self::Coordinator];

    /// Lower-case wire name, also used in page paths.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mentee => "mentee",
            Self::Mentor => "mentor",
            Self::Coordinator => "coordinator",
        }
    }

    /// Landing page for the role; the route guard redirects here when a page
    /// does not admit the role.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Role;
    ///
    /// assert_eq!(Role::Coordinator.default_path(), "/dashboard/coordinator");
    /// ```
    pub const fn default_path(self) -> &'static str {
        match self {
            Self::Mentee => "/dashboard/mentee",
            Self::Mentor => "/dashboard/mentor",
            Self::Coordinator => "/dashboard/coordinator",
        }
    }

    /// Heading shown above the role's menu.
    pub const fn dashboard_title(self) -> &'static str {
        match self {
            Self::Mentee => "Student Dashboard",
            Self::Mentor => "Mentor Dashboard",
            Self::Coordinator => "Coordinator Dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RoleParseError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mentee", Role::Mentee)]
    #[case(" Mentor ", Role::Mentor)]
    #[case("COORDINATOR", Role::Coordinator)]
    fn parses_role_names(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("admin")]
    #[case("mentees")]
    fn rejects_unknown_roles(#[case] raw: &str) {
        assert_eq!(raw.parse::<Role>(), Err(RoleParseError(raw.to_owned())));
    }

    #[rstest]
    fn default_paths_embed_the_wire_name() {
        for role in Role::ALL {
            assert_eq!(role.default_path(), format!("/dashboard/{role}"));
        }
    }

    #[rstest]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Role::Coordinator).expect("serialise");
        assert_eq!(json, "\"coordinator\"");
        let back: Role = serde_json::from_str("\"mentor\"").expect("deserialise");
        assert_eq!(back, Role::Mentor);
    }
}
