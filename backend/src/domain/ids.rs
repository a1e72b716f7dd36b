//! UUID-backed identifier newtypes.

/// Error raised when an identifier is not a canonical UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be a valid UUID")]
pub struct InvalidId {
    pub(crate) kind: &'static str,
}

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
            utoipa::ToSchema,
        )]
        #[serde(transparent)]
        #[schema(value_type = String, format = Uuid)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Parse an identifier, rejecting padded or malformed input.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, $crate::domain::ids::InvalidId> {
                let raw = raw.as_ref();
                if raw.trim() != raw {
                    return Err($crate::domain::ids::InvalidId { kind: $kind });
                }
                uuid::Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| $crate::domain::ids::InvalidId { kind: $kind })
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::ids::InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

pub(crate) use define_uuid_id;
