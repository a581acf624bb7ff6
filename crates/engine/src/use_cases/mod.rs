//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area. Missing
//! entities are reported as `Ok(None)`; `Err` is reserved for storage
//! failures.

pub mod npc;
pub mod settlement;

// Re-export main types
pub use npc::{NpcDevotion, NpcRecords, NpcRelationships, NpcRoutine, NpcUseCases};
pub use settlement::{
    SettlementDevotion, SettlementLocations, SettlementPage, SettlementRecords,
    SettlementRelationships, SettlementUseCases,
};
