//! NPC daily schedules.

use std::sync::Arc;

use echoledger_domain::{DailyRoutineActivity, NpcId};

use crate::infrastructure::ports::{NpcRepo, RepoError};

pub struct NpcRoutine {
    npcs: Arc<dyn NpcRepo>,
}

impl NpcRoutine {
    pub fn new(npcs: Arc<dyn NpcRepo>) -> Self {
        Self { npcs }
    }

    /// Add a slot to the NPC's schedule. Returns `None` when the NPC does not exist.
    pub async fn add(
        &self,
        activity: DailyRoutineActivity,
    ) -> Result<Option<DailyRoutineActivity>, RepoError> {
        if self.npcs.get(activity.npc_id).await?.is_none() {
            tracing::warn!(npc_id = %activity.npc_id, "Cannot add routine activity: NPC not found");
            return Ok(None);
        }

        self.npcs.add_routine_activity(&activity).await?;
        tracing::info!(
            npc_id = %activity.npc_id,
            activity_type = %activity.activity_type,
            start = %activity.start_time,
            "Routine activity added"
        );
        Ok(Some(activity))
    }

    /// The NPC's schedule ordered by start time.
    pub async fn list(&self, npc_id: NpcId) -> Result<Vec<DailyRoutineActivity>, RepoError> {
        self.npcs.routine(npc_id).await
    }
}
