//! NPC record keeping: create, read, list and patch.

use std::sync::Arc;

use echoledger_domain::{Npc, NpcFilter, NpcId, NpcPatch, NpcPersonality, Page};

use crate::infrastructure::ports::{ClockPort, NpcRepo, RepoError};

pub struct NpcRecords {
    npcs: Arc<dyn NpcRepo>,
    clock: Arc<dyn ClockPort>,
}

impl NpcRecords {
    pub fn new(npcs: Arc<dyn NpcRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { npcs, clock }
    }

    /// Store a new NPC, optionally with its personality.
    ///
    /// Timestamps are taken from the clock. An unknown home settlement is
    /// rejected by storage as a constraint violation.
    pub async fn create(
        &self,
        mut npc: Npc,
        personality: Option<NpcPersonality>,
    ) -> Result<Npc, RepoError> {
        let now = self.clock.now();
        npc.created_at = now;
        npc.updated_at = now;
        let personality = personality.map(|p| NpcPersonality { npc_id: npc.id, ..p });

        self.npcs.create(&npc, personality).await?;
        tracing::info!(npc_id = %npc.id, name = %npc.name, "NPC created");
        Ok(npc)
    }

    pub async fn get(&self, id: NpcId) -> Result<Option<Npc>, RepoError> {
        self.npcs.get(id).await
    }

    pub async fn list(&self, filter: &NpcFilter, page: Page) -> Result<Vec<Npc>, RepoError> {
        let npcs = self.npcs.list(filter, page).await?;
        tracing::debug!(
            count = npcs.len(),
            offset = page.offset,
            limit = page.limit,
            "Listed NPCs"
        );
        Ok(npcs)
    }

    pub async fn personality(&self, id: NpcId) -> Result<Option<NpcPersonality>, RepoError> {
        self.npcs.get_personality(id).await
    }

    /// Apply `patch` to the NPC. Devotion cannot be changed this way.
    pub async fn update(&self, id: NpcId, patch: NpcPatch) -> Result<Option<Npc>, RepoError> {
        let Some(mut npc) = self.npcs.get(id).await? else {
            tracing::warn!(npc_id = %id, "Cannot update NPC: not found");
            return Ok(None);
        };

        npc.apply_patch(patch, self.clock.now());
        match self.npcs.update(&npc).await {
            Ok(()) => {
                tracing::info!(npc_id = %id, "NPC updated");
                Ok(Some(npc))
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(npc_id = %id, "NPC disappeared before update");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
