//! Directional NPC relationships and their event log.

use std::sync::Arc;

use echoledger_domain::{
    Attributes, NpcId, NpcRelationship, NpcRelationshipId, RelationType, RelationshipEvent,
};

use crate::infrastructure::ports::{ClockPort, NpcRepo, RepoError};

pub struct NpcRelationships {
    npcs: Arc<dyn NpcRepo>,
    clock: Arc<dyn ClockPort>,
}

impl NpcRelationships {
    pub fn new(npcs: Arc<dyn NpcRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { npcs, clock }
    }

    /// Start a relationship from `initiator` towards `recipient`.
    ///
    /// Existing relationships between the pair are left alone, so one pair
    /// may hold several relationships of different types. Returns `None`
    /// when either NPC does not exist.
    pub async fn create(
        &self,
        initiator: NpcId,
        recipient: NpcId,
        relationship_type: RelationType,
        strength: i32,
        details: Option<Attributes>,
    ) -> Result<Option<NpcRelationship>, RepoError> {
        for id in [initiator, recipient] {
            if self.npcs.get(id).await?.is_none() {
                tracing::warn!(npc_id = %id, "Cannot create relationship: NPC not found");
                return Ok(None);
            }
        }

        let relationship =
            NpcRelationship::new(initiator, recipient, relationship_type, self.clock.now())
                .with_strength(strength)
                .with_details(details.unwrap_or_default());
        self.npcs.save_relationship(&relationship).await?;

        tracing::info!(
            relationship_id = %relationship.id,
            initiator = %initiator,
            recipient = %recipient,
            relationship_type = %relationship_type,
            "NPC relationship created"
        );
        Ok(Some(relationship))
    }

    /// Relationships where the NPC is initiator or recipient.
    pub async fn for_npc(
        &self,
        npc_id: NpcId,
        active_only: bool,
    ) -> Result<Vec<NpcRelationship>, RepoError> {
        let relationships = self.npcs.relationships_for(npc_id, active_only).await?;
        tracing::debug!(
            npc_id = %npc_id,
            active_only,
            count = relationships.len(),
            "Listed NPC relationships"
        );
        Ok(relationships)
    }

    /// Mark a relationship as ended now.
    pub async fn end(
        &self,
        id: NpcRelationshipId,
    ) -> Result<Option<NpcRelationship>, RepoError> {
        let Some(relationship) = self.npcs.get_relationship(id).await? else {
            tracing::warn!(relationship_id = %id, "Cannot end relationship: not found");
            return Ok(None);
        };
        if !relationship.is_active {
            return Ok(Some(relationship));
        }

        let relationship = relationship.ended(self.clock.now());
        self.npcs.save_relationship(&relationship).await?;
        tracing::info!(relationship_id = %id, "NPC relationship ended");
        Ok(Some(relationship))
    }

    /// Append an event to a relationship's log.
    pub async fn record_event(
        &self,
        relationship_id: NpcRelationshipId,
        event_type: impl Into<String>,
        description: impl Into<String>,
        details: Option<Attributes>,
    ) -> Result<Option<RelationshipEvent>, RepoError> {
        if self.npcs.get_relationship(relationship_id).await?.is_none() {
            tracing::warn!(
                relationship_id = %relationship_id,
                "Cannot record event: relationship not found"
            );
            return Ok(None);
        }

        let event = RelationshipEvent::new(
            relationship_id,
            event_type,
            description,
            details,
            self.clock.now(),
        );
        self.npcs.save_relationship_event(&event).await?;
        tracing::info!(
            relationship_id = %relationship_id,
            event_type = %event.event_type,
            "Relationship event recorded"
        );
        Ok(Some(event))
    }

    /// Events for a relationship, most recent first.
    pub async fn events(
        &self,
        relationship_id: NpcRelationshipId,
    ) -> Result<Vec<RelationshipEvent>, RepoError> {
        self.npcs.relationship_events(relationship_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use echoledger_domain::{Gender, Npc, SettlementId};
    use mockall::predicate::eq;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockNpcRepo;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap()
    }

    fn npc(id: NpcId) -> Npc {
        Npc::new("Wren", 19, now(), Gender::Female, "courier", SettlementId::new(), now())
            .with_id(id)
    }

    fn use_case(repo: MockNpcRepo) -> NpcRelationships {
        NpcRelationships::new(Arc::new(repo), Arc::new(FixedClock(now())))
    }

    #[tokio::test]
    async fn when_recipient_missing_then_nothing_is_saved() {
        let (initiator, recipient) = (NpcId::new(), NpcId::new());
        let mut repo = MockNpcRepo::new();
        repo.expect_get()
            .with(eq(initiator))
            .returning(move |id| Ok(Some(npc(id))));
        repo.expect_get().with(eq(recipient)).returning(|_| Ok(None));
        repo.expect_save_relationship().times(0);

        let result = use_case(repo)
            .create(initiator, recipient, RelationType::Friend, 10, None)
            .await
            .expect("create");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn when_both_exist_then_directional_relationship_is_saved() {
        let (initiator, recipient) = (NpcId::new(), NpcId::new());
        let mut repo = MockNpcRepo::new();
        repo.expect_get().returning(|id| Ok(Some(npc(id))));
        repo.expect_save_relationship()
            .withf(move |rel| {
                rel.initiator == initiator
                    && rel.recipient == recipient
                    && rel.relationship_type == RelationType::Enemy
                    && rel.strength == -60
                    && rel.start_date == now()
                    && rel.is_active
            })
            .times(1)
            .returning(|_| Ok(()));

        let rel = use_case(repo)
            .create(initiator, recipient, RelationType::Enemy, -60, None)
            .await
            .expect("create")
            .expect("created");

        assert_eq!(rel.counterpart(recipient), Some(initiator));
    }

    #[tokio::test]
    async fn when_relationship_missing_then_event_is_not_recorded() {
        let id = NpcRelationshipId::new();
        let mut repo = MockNpcRepo::new();
        repo.expect_get_relationship()
            .with(eq(id))
            .returning(|_| Ok(None));
        repo.expect_save_relationship_event().times(0);

        let result = use_case(repo)
            .record_event(id, "betrayal", "Sold the map", None)
            .await
            .expect("record");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn when_ended_then_relationship_is_inactive_with_end_date() {
        let rel = NpcRelationship::new(NpcId::new(), NpcId::new(), RelationType::Romantic, now());
        let id = rel.id;
        let mut repo = MockNpcRepo::new();
        repo.expect_get_relationship()
            .returning(move |_| Ok(Some(rel.clone())));
        repo.expect_save_relationship()
            .withf(|rel| !rel.is_active && rel.end_date == Some(now()))
            .times(1)
            .returning(|_| Ok(()));

        let ended = use_case(repo).end(id).await.expect("end").expect("present");
        assert!(!ended.is_active);
    }
}
