//! Development seam supplying a canned identity per role.
//!
//! Wiring a [`DemoIdentities`] provider into the session store enables the
//! role override hint and role switching. Production wiring leaves it out.

use uuid::Uuid;

use crate::domain::{Error, Identity, Role, UserId};

/// Canned account used while developing against a given role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoUser {
    pub role: Role,
    pub id: UserId,
    pub name: &'static str,
    pub email: &'static str,
}

/// Avatar reference shared by the canned accounts.
pub const DEMO_AVATAR: &str = "/placeholder.svg";

/// One canned account per role.
pub const DEMO_USERS: [DemoUser; 3] = [
    DemoUser {
        role: Role::Mentee,
        id: UserId::from_uuid(Uuid::from_u128(0x5b1f_0c6e_8a41_4d2b_9e07_1f3a_6c5d_0001)),
        name: "John Smith",
        email: "john@example.com",
    },
    DemoUser {
        role: Role::Mentor,
        id: UserId::from_uuid(Uuid::from_u128(0x5b1f_0c6e_8a41_4d2b_9e07_1f3a_6c5d_0002)),
        name: "Sarah Johnson",
        email: "sarah@example.com",
    },
    DemoUser {
        role: Role::Coordinator,
        id: UserId::from_uuid(Uuid::from_u128(0x5b1f_0c6e_8a41_4d2b_9e07_1f3a_6c5d_0003)),
        name: "Michael Brown",
        email: "michael@example.com",
    },
];

impl DemoUser {
    /// Canned account for `role`.
    pub fn for_role(role: Role) -> &'static DemoUser {
        match role {
            Role::Mentee => &DEMO_USERS[0],
            Role::Mentor => &DEMO_USERS[1],
            Role::Coordinator => &DEMO_USERS[2],
        }
    }

    /// Validated identity for this account.
    pub fn identity(&self) -> Result<Identity, Error> {
        Identity::try_from_strings(self.id.to_string(), self.name, self.email)
            .map(|identity| identity.with_avatar(DEMO_AVATAR))
            .map_err(|err| Error::internal(format!("invalid demo identity: {err}")))
    }
}

/// Canned identity per role.
#[cfg_attr(test, mockall::automock)]
pub trait DemoIdentities: Send + Sync {
    /// Identity to act as when developing against `role`.
    fn identity_for(&self, role: Role) -> Result<Identity, Error>;
}

/// Provider backed by [`DEMO_USERS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDemoIdentities;

impl DemoIdentities for FixtureDemoIdentities {
    fn identity_for(&self, role: Role) -> Result<Identity, Error> {
        DemoUser::for_role(role).identity()
    }
}
