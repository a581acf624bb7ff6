//! Directional relationships between NPCs
//!
//! A relationship has an initiator and a recipient. Several relationships of
//! different types may exist between the same two NPCs at once; queries by NPC
//! match either side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{NpcId, NpcRelationshipId, RelationshipEventId};
use crate::value_objects::Attributes;

string_enum! {
    pub enum RelationType {
        Family => "family",
        Friend => "friend",
        Romantic => "romantic",
        Professional => "professional",
        Enemy => "enemy",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcRelationship {
    pub id: NpcRelationshipId,
    pub initiator: NpcId,
    pub recipient: NpcId,
    pub relationship_type: RelationType,
    /// Ranges roughly from -100 to 200
    pub strength: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub details: Attributes,
}

impl NpcRelationship {
    pub fn new(
        initiator: NpcId,
        recipient: NpcId,
        relationship_type: RelationType,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NpcRelationshipId::new(),
            initiator,
            recipient,
            relationship_type,
            strength: 0,
            start_date,
            end_date: None,
            is_active: true,
            details: Attributes::new(),
        }
    }

    pub fn with_strength(mut self, strength: i32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_details(mut self, details: Attributes) -> Self {
        self.details = details;
        self
    }

    /// Mark as ended at `end_date`.
    pub fn ended(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self.is_active = false;
        self
    }

    pub fn involves(&self, npc_id: NpcId) -> bool {
        self.initiator == npc_id || self.recipient == npc_id
    }

    /// The other side of the relationship as seen from `npc_id`.
    pub fn counterpart(&self, npc_id: NpcId) -> Option<NpcId> {
        if self.initiator == npc_id {
            Some(self.recipient)
        } else if self.recipient == npc_id {
            Some(self.initiator)
        } else {
            None
        }
    }
}

/// A notable moment in a relationship ("married", "became_enemies", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEvent {
    pub id: RelationshipEventId,
    pub relationship_id: NpcRelationshipId,
    pub event_date: DateTime<Utc>,
    pub event_type: String,
    pub description: String,
    pub details: Attributes,
}

impl RelationshipEvent {
    pub fn new(
        relationship_id: NpcRelationshipId,
        event_type: impl Into<String>,
        description: impl Into<String>,
        details: Option<Attributes>,
        event_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RelationshipEventId::new(),
            relationship_id,
            event_date,
            event_type: event_type.into(),
            description: description.into(),
            details: details.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn counterpart_works_from_both_sides() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        let (a, b) = (NpcId::new(), NpcId::new());
        let rel = NpcRelationship::new(a, b, RelationType::Friend, now);

        assert_eq!(rel.counterpart(a), Some(b));
        assert_eq!(rel.counterpart(b), Some(a));
        assert_eq!(rel.counterpart(NpcId::new()), None);
        assert!(rel.involves(b));
    }

    #[test]
    fn ended_relationship_is_inactive() {
        let start = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let rel = NpcRelationship::new(NpcId::new(), NpcId::new(), RelationType::Romantic, start)
            .ended(end);

        assert!(!rel.is_active);
        assert_eq!(rel.end_date, Some(end));
    }
}
