//! Symmetric relationships between settlements.

use std::sync::Arc;

use echoledger_domain::{CanonicalPair, SettlementId, SettlementRelationship};

use crate::infrastructure::ports::{ClockPort, RepoError, SettlementRepo};

pub struct SettlementRelationships {
    settlements: Arc<dyn SettlementRepo>,
    clock: Arc<dyn ClockPort>,
}

impl SettlementRelationships {
    pub fn new(settlements: Arc<dyn SettlementRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { settlements, clock }
    }

    /// Set the score between two settlements, in either argument order.
    ///
    /// Updates the pair's relationship if one exists, otherwise creates it
    /// with `settlement_a = first` and `settlement_b = second`. Unknown
    /// settlements are rejected by storage as a constraint violation.
    pub async fn upsert(
        &self,
        first: SettlementId,
        second: SettlementId,
        score: i32,
    ) -> Result<SettlementRelationship, RepoError> {
        let candidate = SettlementRelationship::new(first, second, score, self.clock.now());
        let stored = self.settlements.upsert_relationship(&candidate).await?;

        tracing::info!(
            relationship_id = %stored.id,
            settlement_a = %stored.settlement_a,
            settlement_b = %stored.settlement_b,
            score = stored.score,
            created = (stored.id == candidate.id),
            "Settlement relationship stored"
        );
        Ok(stored)
    }

    pub async fn between(
        &self,
        first: SettlementId,
        second: SettlementId,
    ) -> Result<Option<SettlementRelationship>, RepoError> {
        self.settlements
            .relationship_between(CanonicalPair::new(first, second))
            .await
    }

    pub async fn for_settlement(
        &self,
        settlement_id: SettlementId,
    ) -> Result<Vec<SettlementRelationship>, RepoError> {
        self.settlements.relationships_for(settlement_id).await
    }
}
