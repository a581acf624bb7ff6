//! Settlement record keeping: create, read, list and patch.

use std::sync::Arc;

use echoledger_domain::{Page, Settlement, SettlementFilter, SettlementId, SettlementPatch};
use serde::Serialize;

use crate::infrastructure::ports::{ClockPort, RepoError, SettlementRepo};

/// One page of a settlement listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementPage {
    pub settlements: Vec<Settlement>,
    /// Matches before pagination
    pub total: u64,
}

pub struct SettlementRecords {
    settlements: Arc<dyn SettlementRepo>,
    clock: Arc<dyn ClockPort>,
}

impl SettlementRecords {
    pub fn new(settlements: Arc<dyn SettlementRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { settlements, clock }
    }

    /// Store a new settlement with clock-supplied timestamps.
    pub async fn create(&self, mut settlement: Settlement) -> Result<Settlement, RepoError> {
        let now = self.clock.now();
        settlement.created_at = now;
        settlement.updated_at = now;

        self.settlements.create(&settlement).await?;
        tracing::info!(
            settlement_id = %settlement.id,
            name = %settlement.name,
            region = %settlement.region,
            "Settlement created"
        );
        Ok(settlement)
    }

    pub async fn get(&self, id: SettlementId) -> Result<Option<Settlement>, RepoError> {
        self.settlements.get(id).await
    }

    pub async fn list(
        &self,
        filter: &SettlementFilter,
        page: Page,
    ) -> Result<SettlementPage, RepoError> {
        let (settlements, total) = self.settlements.list(filter, page).await?;
        tracing::debug!(
            count = settlements.len(),
            total,
            offset = page.offset,
            limit = page.limit,
            "Listed settlements"
        );
        Ok(SettlementPage { settlements, total })
    }

    /// Apply `patch` to the settlement. Devotion cannot be changed this way.
    pub async fn update(
        &self,
        id: SettlementId,
        patch: SettlementPatch,
    ) -> Result<Option<Settlement>, RepoError> {
        let Some(mut settlement) = self.settlements.get(id).await? else {
            tracing::warn!(settlement_id = %id, "Cannot update settlement: not found");
            return Ok(None);
        };

        settlement.apply_patch(patch, self.clock.now());
        match self.settlements.update(&settlement).await {
            Ok(()) => {
                tracing::info!(settlement_id = %id, "Settlement updated");
                Ok(Some(settlement))
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(settlement_id = %id, "Settlement disappeared before update");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use echoledger_domain::{EconomyType, SettlementType};
    use mockall::predicate::eq;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockSettlementRepo;

    #[tokio::test]
    async fn when_listing_then_total_is_passed_through() {
        let filter = SettlementFilter::default().in_region("north");
        let page = Page::new(20, 10);
        let mut repo = MockSettlementRepo::new();
        repo.expect_list()
            .with(eq(filter.clone()), eq(page))
            .returning(|_, _| Ok((Vec::new(), 42)));

        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let listing = SettlementRecords::new(Arc::new(repo), Arc::new(FixedClock(now)))
            .list(&filter, page)
            .await
            .expect("list");

        assert!(listing.settlements.is_empty());
        assert_eq!(listing.total, 42);
    }

    #[tokio::test]
    async fn when_updating_missing_settlement_then_returns_none() {
        let id = SettlementId::new();
        let mut repo = MockSettlementRepo::new();
        repo.expect_get().with(eq(id)).returning(|_| Ok(None));
        repo.expect_update().times(0);

        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let result = SettlementRecords::new(Arc::new(repo), Arc::new(FixedClock(now)))
            .update(id, SettlementPatch::default())
            .await
            .expect("update");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn when_created_then_clock_supplies_timestamps() {
        let now = Utc.with_ymd_and_hms(2025, 5, 5, 5, 5, 5).unwrap();
        let placeholder = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        let mut repo = MockSettlementRepo::new();
        repo.expect_create()
            .withf(move |s| s.created_at == now && s.updated_at == now)
            .times(1)
            .returning(|_| Ok(()));

        let draft = Settlement::new(
            "Saltreach",
            SettlementType::City,
            "coast",
            (4.0, 9.0),
            EconomyType::Livestock,
            placeholder,
        );
        let created = SettlementRecords::new(Arc::new(repo), Arc::new(FixedClock(now)))
            .create(draft)
            .await
            .expect("create");

        assert_eq!(created.updated_at, now);
    }
}
