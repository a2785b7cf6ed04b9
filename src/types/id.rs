//! Entity identifiers.
//!
//! Each persisted entity gets its own newtype over [`Uuid`] so that an
//! owner id can never be passed where an item id is expected. All ids
//! implement `Ord` for deterministic ordering in listings and stores.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Create an id from an existing UUID.
            pub fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a fresh random id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an id from a UUID string.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Get the inner UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a content item (project or blog post).
    ItemId
}

entity_id! {
    /// Unique identifier for an owner account.
    OwnerId
}

entity_id! {
    /// Unique identifier for a contact message.
    MessageId
}

entity_id! {
    /// Unique identifier for a skill entry.
    SkillId
}

entity_id! {
    /// Unique identifier for a timeline experience entry.
    ExperienceId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_ordering() {
        let id1 = ItemId::parse("00000000-0000-0000-0000-000000000001").unwrap();
        let id2 = ItemId::parse("00000000-0000-0000-0000-000000000002").unwrap();
        assert!(id1 < id2);
    }

    #[test]
    fn test_id_display_round_trip() {
        let id = OwnerId::generate();
        let parsed = OwnerId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ItemId::parse("not-a-uuid").is_err());
    }
}
