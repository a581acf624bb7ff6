//! Domain entities - Core business objects with identity

mod devotion_history;
mod npc;
mod npc_personality;
mod npc_relationship;
mod routine;
mod settlement;
mod settlement_location;
mod settlement_relationship;

pub use devotion_history::{
    DevotionHistoryEntry, NpcDevotionHistoryEntry, SettlementDevotionHistoryEntry,
};
pub use npc::{Gender, MaritalStatus, Npc, NpcPatch, Sexuality};
pub use npc_personality::NpcPersonality;
pub use npc_relationship::{NpcRelationship, RelationType, RelationshipEvent};
pub use routine::{ActivityType, DailyRoutineActivity};
pub use settlement::{EconomyType, Settlement, SettlementPatch, SettlementType};
pub use settlement_location::SettlementLocation;
pub use settlement_relationship::{SettlementRelationship, DEFAULT_RELATIONSHIP_SCORE};
