//! Devotion history ledger entries.
//!
//! One entry is produced by every devotion change on an NPC or settlement.
//! Entries are never edited after creation: fields are read through accessors
//! only, and no storage path updates or deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{DevotionHistoryId, NpcId, SettlementId};
use crate::value_objects::Attributes;

/// A single recorded devotion change for the entity identified by `I`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevotionHistoryEntry<I> {
    id: DevotionHistoryId,
    entity_id: I,
    previous_devotion: i32,
    new_devotion: i32,
    reason: String,
    change_date: DateTime<Utc>,
    details: Attributes,
}

pub type NpcDevotionHistoryEntry = DevotionHistoryEntry<NpcId>;
pub type SettlementDevotionHistoryEntry = DevotionHistoryEntry<SettlementId>;

impl<I: Copy> DevotionHistoryEntry<I> {
    /// Capture a change from `previous_devotion` to `new_devotion` made at `change_date`.
    pub fn capture(
        entity_id: I,
        previous_devotion: i32,
        new_devotion: i32,
        reason: impl Into<String>,
        details: Option<Attributes>,
        change_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DevotionHistoryId::new(),
            entity_id,
            previous_devotion,
            new_devotion,
            reason: reason.into(),
            change_date,
            details: details.unwrap_or_default(),
        }
    }

    /// Rebuild a stored entry.
    pub fn from_storage(
        id: DevotionHistoryId,
        entity_id: I,
        previous_devotion: i32,
        new_devotion: i32,
        reason: String,
        change_date: DateTime<Utc>,
        details: Attributes,
    ) -> Self {
        Self {
            id,
            entity_id,
            previous_devotion,
            new_devotion,
            reason,
            change_date,
            details,
        }
    }

    pub fn id(&self) -> DevotionHistoryId {
        self.id
    }

    pub fn entity_id(&self) -> I {
        self.entity_id
    }

    pub fn previous_devotion(&self) -> i32 {
        self.previous_devotion
    }

    pub fn new_devotion(&self) -> i32 {
        self.new_devotion
    }

    /// Signed size of the change.
    pub fn delta(&self) -> i32 {
        self.new_devotion - self.previous_devotion
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn change_date(&self) -> DateTime<Utc> {
        self.change_date
    }

    pub fn details(&self) -> &Attributes {
        &self.details
    }
}
