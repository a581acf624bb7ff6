//! History-tracked settlement devotion changes.

use std::sync::Arc;

use echoledger_domain::{Attributes, Page, Settlement, SettlementDevotionHistoryEntry, SettlementId};

use crate::infrastructure::ports::{ClockPort, RepoError, SettlementRepo};

pub struct SettlementDevotion {
    settlements: Arc<dyn SettlementRepo>,
    clock: Arc<dyn ClockPort>,
}

impl SettlementDevotion {
    pub fn new(settlements: Arc<dyn SettlementRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { settlements, clock }
    }

    /// Set the settlement's devotion and append the matching history entry.
    ///
    /// Both writes commit together. Values outside [-100, 100] are rejected
    /// by storage as `RepoError::ConstraintViolation`.
    pub async fn update_devotion(
        &self,
        id: SettlementId,
        new_devotion: i32,
        reason: impl Into<String>,
        details: Option<Attributes>,
    ) -> Result<Option<Settlement>, RepoError> {
        let Some(mut settlement) = self.settlements.get(id).await? else {
            tracing::warn!(settlement_id = %id, "Cannot update devotion: settlement not found");
            return Ok(None);
        };

        let entry = settlement.record_devotion(new_devotion, reason, details, self.clock.now());
        match self
            .settlements
            .record_devotion_change(&settlement, &entry)
            .await
        {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    settlement_id = %id,
                    "Settlement disappeared before devotion update"
                );
                return Ok(None);
            }
            Err(e) => return Err(e),
        }

        tracing::info!(
            settlement_id = %id,
            previous = entry.previous_devotion(),
            new = entry.new_devotion(),
            reason = %entry.reason(),
            "Settlement devotion changed"
        );
        Ok(Some(settlement))
    }

    /// Devotion changes, most recent first.
    pub async fn history(
        &self,
        id: SettlementId,
        page: Page,
    ) -> Result<Vec<SettlementDevotionHistoryEntry>, RepoError> {
        let entries = self.settlements.devotion_history(id, page).await?;
        tracing::debug!(
            settlement_id = %id,
            count = entries.len(),
            "Read settlement devotion history"
        );
        Ok(entries)
    }
}
