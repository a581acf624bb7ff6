//! Repository port traits for database access.
//!
//! Every method is one unit of work: multi-row writes commit together or not
//! at all. Missing rows are reported as `Ok(None)` by getters.

use async_trait::async_trait;
use echoledger_domain::*;

use super::error::RepoError;

// =============================================================================
// NPC family
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NpcRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: NpcId) -> Result<Option<Npc>, RepoError>;
    /// Insert the NPC and, when given, its personality in one transaction.
    async fn create(
        &self,
        npc: &Npc,
        personality: Option<NpcPersonality>,
    ) -> Result<(), RepoError>;
    async fn get_personality(&self, npc_id: NpcId) -> Result<Option<NpcPersonality>, RepoError>;
    /// Persist every field except devotion.
    async fn update(&self, npc: &Npc) -> Result<(), RepoError>;
    async fn list(&self, filter: &NpcFilter, page: Page) -> Result<Vec<Npc>, RepoError>;

    // Devotion ledger
    /// Append `entry` and write the NPC's new devotion and `updated_at` atomically.
    ///
    /// Fails with `NotFound` (and writes nothing) if the NPC row is gone.
    async fn record_devotion_change(
        &self,
        npc: &Npc,
        entry: &NpcDevotionHistoryEntry,
    ) -> Result<(), RepoError>;
    /// Most recent first.
    async fn devotion_history(
        &self,
        npc_id: NpcId,
        page: Page,
    ) -> Result<Vec<NpcDevotionHistoryEntry>, RepoError>;

    // Relationships
    async fn save_relationship(&self, relationship: &NpcRelationship) -> Result<(), RepoError>;
    async fn get_relationship(
        &self,
        id: NpcRelationshipId,
    ) -> Result<Option<NpcRelationship>, RepoError>;
    /// Relationships where the NPC is initiator or recipient.
    async fn relationships_for(
        &self,
        npc_id: NpcId,
        active_only: bool,
    ) -> Result<Vec<NpcRelationship>, RepoError>;
    async fn save_relationship_event(&self, event: &RelationshipEvent) -> Result<(), RepoError>;
    /// Most recent first.
    async fn relationship_events(
        &self,
        relationship_id: NpcRelationshipId,
    ) -> Result<Vec<RelationshipEvent>, RepoError>;

    // Daily routine
    async fn add_routine_activity(&self, activity: &DailyRoutineActivity)
        -> Result<(), RepoError>;
    /// Ordered by start time.
    async fn routine(&self, npc_id: NpcId) -> Result<Vec<DailyRoutineActivity>, RepoError>;
}

// =============================================================================
// Settlement family
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettlementRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: SettlementId) -> Result<Option<Settlement>, RepoError>;
    async fn create(&self, settlement: &Settlement) -> Result<(), RepoError>;
    /// Persist every field except devotion.
    async fn update(&self, settlement: &Settlement) -> Result<(), RepoError>;
    /// One page of matches plus the number of matches before pagination.
    async fn list(
        &self,
        filter: &SettlementFilter,
        page: Page,
    ) -> Result<(Vec<Settlement>, u64), RepoError>;

    // Devotion ledger
    /// Append `entry` and write the settlement's new devotion and `updated_at` atomically.
    ///
    /// Fails with `NotFound` (and writes nothing) if the settlement row is gone.
    async fn record_devotion_change(
        &self,
        settlement: &Settlement,
        entry: &SettlementDevotionHistoryEntry,
    ) -> Result<(), RepoError>;
    /// Most recent first.
    async fn devotion_history(
        &self,
        settlement_id: SettlementId,
        page: Page,
    ) -> Result<Vec<SettlementDevotionHistoryEntry>, RepoError>;

    // Locations
    async fn save_location(&self, location: &SettlementLocation) -> Result<(), RepoError>;
    async fn locations(
        &self,
        settlement_id: SettlementId,
        filter: &LocationFilter,
    ) -> Result<Vec<SettlementLocation>, RepoError>;

    // Relationships
    /// Insert `candidate` unless a relationship for the same unordered pair
    /// exists, in which case only its score and `last_updated` are replaced.
    /// Returns the stored row.
    async fn upsert_relationship(
        &self,
        candidate: &SettlementRelationship,
    ) -> Result<SettlementRelationship, RepoError>;
    async fn relationship_between(
        &self,
        pair: CanonicalPair<SettlementId>,
    ) -> Result<Option<SettlementRelationship>, RepoError>;
    /// Relationships where the settlement is on either side.
    async fn relationships_for(
        &self,
        settlement_id: SettlementId,
    ) -> Result<Vec<SettlementRelationship>, RepoError>;
}
