//! History-tracked NPC devotion changes.

use std::sync::Arc;

use echoledger_domain::{Attributes, Npc, NpcDevotionHistoryEntry, NpcId, Page};

use crate::infrastructure::ports::{ClockPort, NpcRepo, RepoError};

pub struct NpcDevotion {
    npcs: Arc<dyn NpcRepo>,
    clock: Arc<dyn ClockPort>,
}

impl NpcDevotion {
    pub fn new(npcs: Arc<dyn NpcRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { npcs, clock }
    }

    /// Set the NPC's devotion and append the matching history entry.
    ///
    /// Both writes commit together. `new_devotion` is not range-checked
    /// here; storage rejects values outside [-100, 100] with
    /// `RepoError::ConstraintViolation` and nothing is written.
    pub async fn update_devotion(
        &self,
        id: NpcId,
        new_devotion: i32,
        reason: impl Into<String>,
        details: Option<Attributes>,
    ) -> Result<Option<Npc>, RepoError> {
        let Some(mut npc) = self.npcs.get(id).await? else {
            tracing::warn!(npc_id = %id, "Cannot update devotion: NPC not found");
            return Ok(None);
        };

        let entry = npc.record_devotion(new_devotion, reason, details, self.clock.now());
        match self.npcs.record_devotion_change(&npc, &entry).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                tracing::warn!(npc_id = %id, "NPC disappeared before devotion update");
                return Ok(None);
            }
            Err(e) => return Err(e),
        }

        tracing::info!(
            npc_id = %id,
            previous = entry.previous_devotion(),
            new = entry.new_devotion(),
            reason = %entry.reason(),
            "NPC devotion changed"
        );
        Ok(Some(npc))
    }

    /// Devotion changes, most recent first.
    pub async fn history(
        &self,
        id: NpcId,
        page: Page,
    ) -> Result<Vec<NpcDevotionHistoryEntry>, RepoError> {
        let entries = self.npcs.devotion_history(id, page).await?;
        tracing::debug!(npc_id = %id, count = entries.len(), "Read NPC devotion history");
        Ok(entries)
    }
}
