//! NPC use cases.
//!
//! Handles NPC records, devotion, relationships and daily routines.

use std::sync::Arc;

mod devotion;
mod records;
mod relationships;
mod routine;

pub use devotion::NpcDevotion;
pub use records::NpcRecords;
pub use relationships::NpcRelationships;
pub use routine::NpcRoutine;

/// Container for NPC use cases.
pub struct NpcUseCases {
    pub records: Arc<NpcRecords>,
    pub devotion: Arc<NpcDevotion>,
    pub relationships: Arc<NpcRelationships>,
    pub routine: Arc<NpcRoutine>,
}

impl NpcUseCases {
    pub fn new(
        records: Arc<NpcRecords>,
        devotion: Arc<NpcDevotion>,
        relationships: Arc<NpcRelationships>,
        routine: Arc<NpcRoutine>,
    ) -> Self {
        Self {
            records,
            devotion,
            relationships,
            routine,
        }
    }
}
