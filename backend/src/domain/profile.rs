//! Profile records linking an identity to its role.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{DisplayName, Role, UserId};

/// Row of the `profiles` collection.
///
/// The profile is the authority for an identity's role; see
/// [`crate::domain::RoleResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "Sarah Johnson")]
    name: DisplayName,
    role: Role,
}

impl Profile {
    /// Build a profile from validated parts.
    pub fn new(id: UserId, name: DisplayName, role: Role) -> Self {
        Self { id, name, role }
    }

    /// Identity the profile belongs to.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name recorded on the profile.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Role recorded on the profile.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Copy of the profile carrying a different role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}
