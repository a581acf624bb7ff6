//! Symmetric relationships between settlements
//!
//! At most one relationship exists per unordered pair of settlements. The
//! creation order (`settlement_a`, `settlement_b`) is kept for display, but
//! identity is the [`CanonicalPair`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{SettlementId, SettlementRelationshipId};
use crate::value_objects::{Attributes, CanonicalPair};

/// Default relationship score (0 = enemies, 100 = friends).
pub const DEFAULT_RELATIONSHIP_SCORE: i32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRelationship {
    pub id: SettlementRelationshipId,
    pub settlement_a: SettlementId,
    pub settlement_b: SettlementId,
    pub score: i32,
    pub start_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub trade_volume: i64,
    pub details: Attributes,
}

impl SettlementRelationship {
    pub fn new(
        settlement_a: SettlementId,
        settlement_b: SettlementId,
        score: i32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SettlementRelationshipId::new(),
            settlement_a,
            settlement_b,
            score,
            start_date: now,
            last_updated: now,
            trade_volume: 0,
            details: Attributes::new(),
        }
    }

    pub fn with_trade_volume(mut self, trade_volume: i64) -> Self {
        self.trade_volume = trade_volume;
        self
    }

    pub fn pair(&self) -> CanonicalPair<SettlementId> {
        CanonicalPair::new(self.settlement_a, self.settlement_b)
    }

    pub fn rescore(&mut self, score: i32, at: DateTime<Utc>) {
        self.score = score;
        self.last_updated = at;
    }

    pub fn counterpart(&self, settlement_id: SettlementId) -> Option<SettlementId> {
        self.pair().other(settlement_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pair_ignores_creation_order() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let (a, b) = (SettlementId::new(), SettlementId::new());

        let forward = SettlementRelationship::new(a, b, 70, now);
        let backward = SettlementRelationship::new(b, a, 40, now);

        assert_eq!(forward.pair(), backward.pair());
        assert_eq!(forward.counterpart(a), Some(b));
    }

    #[test]
    fn rescore_keeps_start_date() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let mut rel = SettlementRelationship::new(SettlementId::new(), SettlementId::new(), 70, start);

        rel.rescore(40, later);

        assert_eq!(rel.score, 40);
        assert_eq!(rel.start_date, start);
        assert_eq!(rel.last_updated, later);
    }
}
