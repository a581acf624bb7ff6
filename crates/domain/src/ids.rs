use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// NPC family
define_id!(NpcId);
define_id!(NpcPersonalityId);
define_id!(NpcRelationshipId);
define_id!(RelationshipEventId);
define_id!(RoutineActivityId);

// Settlement family
define_id!(SettlementId);
define_id!(SettlementLocationId);
define_id!(SettlementRelationshipId);

// Shared by both ledgers
define_id!(DevotionHistoryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_hyphenated_uuid() {
        let uuid = Uuid::parse_str("123e4567-e89b-12d3-a456-426614174000").expect("uuid");
        let id = NpcId::from_uuid(uuid);
        assert_eq!(id.to_string(), "123e4567-e89b-12d3-a456-426614174000");
        assert_eq!(Uuid::from(id), uuid);
    }

    #[test]
    fn ordering_follows_uuid_bytes() {
        let low = SettlementId::from_uuid(Uuid::from_u128(1));
        let high = SettlementId::from_uuid(Uuid::from_u128(2));
        assert!(low < high);
        assert!(low.to_string() < high.to_string());
    }

    #[test]
    fn serializes_as_bare_uuid() {
        let id = SettlementId::from_uuid(Uuid::from_u128(7));
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{}\"", Uuid::from_u128(7)));
    }
}
