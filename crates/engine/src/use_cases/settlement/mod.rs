//! Settlement use cases.
//!
//! Handles settlement records, devotion, inter-settlement relationships and
//! locations inside a settlement.

use std::sync::Arc;

mod devotion;
mod locations;
mod records;
mod relationships;

pub use devotion::SettlementDevotion;
pub use locations::SettlementLocations;
pub use records::{SettlementPage, SettlementRecords};
pub use relationships::SettlementRelationships;

/// Container for settlement use cases.
pub struct SettlementUseCases {
    pub records: Arc<SettlementRecords>,
    pub devotion: Arc<SettlementDevotion>,
    pub relationships: Arc<SettlementRelationships>,
    pub locations: Arc<SettlementLocations>,
}

impl SettlementUseCases {
    pub fn new(
        records: Arc<SettlementRecords>,
        devotion: Arc<SettlementDevotion>,
        relationships: Arc<SettlementRelationships>,
        locations: Arc<SettlementLocations>,
    ) -> Self {
        Self {
            records,
            devotion,
            relationships,
            locations,
        }
    }
}
