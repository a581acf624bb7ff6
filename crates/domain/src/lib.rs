//! Echoledger domain.
//!
//! NPCs, settlements, their relationships, and the devotion ledger that
//! records every change of an entity's devotion toward the Echo.

extern crate self as echoledger_domain;

#[macro_use]
mod macros;

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    ActivityType, DailyRoutineActivity, DevotionHistoryEntry, EconomyType, Gender, MaritalStatus,
    Npc, NpcDevotionHistoryEntry, NpcPatch, NpcPersonality, NpcRelationship, RelationType,
    RelationshipEvent, Settlement, SettlementDevotionHistoryEntry, SettlementLocation,
    SettlementPatch, SettlementRelationship, SettlementType, Sexuality,
    DEFAULT_RELATIONSHIP_SCORE,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{
    DevotionHistoryId, NpcId, NpcPersonalityId, NpcRelationshipId, RelationshipEventId,
    RoutineActivityId, SettlementId, SettlementLocationId, SettlementRelationshipId,
};

pub use value_objects::{
    Attributes, CanonicalPair, LocationFilter, NpcFilter, Page, SettlementFilter, DEVOTION_MAX,
    DEVOTION_MIN,
};
