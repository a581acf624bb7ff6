//! Places inside a settlement.

use std::sync::Arc;

use echoledger_domain::{LocationFilter, SettlementId, SettlementLocation};

use crate::infrastructure::ports::{RepoError, SettlementRepo};

pub struct SettlementLocations {
    settlements: Arc<dyn SettlementRepo>,
}

impl SettlementLocations {
    pub fn new(settlements: Arc<dyn SettlementRepo>) -> Self {
        Self { settlements }
    }

    /// Store a location. Returns `None` when its settlement does not exist.
    pub async fn create(
        &self,
        location: SettlementLocation,
    ) -> Result<Option<SettlementLocation>, RepoError> {
        if self.settlements.get(location.settlement_id).await?.is_none() {
            tracing::warn!(
                settlement_id = %location.settlement_id,
                "Cannot create location: settlement not found"
            );
            return Ok(None);
        }

        self.settlements.save_location(&location).await?;
        tracing::info!(
            location_id = %location.id,
            settlement_id = %location.settlement_id,
            location_type = %location.location_type,
            "Settlement location created"
        );
        Ok(Some(location))
    }

    pub async fn list(
        &self,
        settlement_id: SettlementId,
        filter: &LocationFilter,
    ) -> Result<Vec<SettlementLocation>, RepoError> {
        let locations = self.settlements.locations(settlement_id, filter).await?;
        tracing::debug!(
            settlement_id = %settlement_id,
            count = locations.len(),
            "Listed settlement locations"
        );
        Ok(locations)
    }
}
