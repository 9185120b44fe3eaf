//! UUID-backed identifiers for dashboard records.

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        #[serde(transparent)]
        #[schema(value_type = String, format = Uuid)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Parse an identifier from text.
            pub fn parse(raw: &str) -> Result<Self, $crate::domain::Error> {
                uuid::Uuid::parse_str(raw.trim()).map(Self).map_err(|_| {
                    $crate::domain::Error::invalid_request(concat!($label, " id must be a valid UUID"))
                })
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_entity_id!(
    /// Identifier of a [`crate::domain::Project`].
    ProjectId,
    "project"
);
define_entity_id!(
    /// Identifier of a [`crate::domain::Submission`].
    SubmissionId,
    "submission"
);
define_entity_id!(
    /// Identifier of a [`crate::domain::Feedback`] entry.
    FeedbackId,
    "feedback"
);
define_entity_id!(
    /// Identifier of a [`crate::domain::ProjectRequest`].
    RequestId,
    "request"
);
define_entity_id!(
    /// Identifier of a [`crate::domain::ProjectTest`].
    TestId,
    "test"
);
