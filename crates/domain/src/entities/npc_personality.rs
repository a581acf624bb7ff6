use serde::{Deserialize, Serialize};

use crate::ids::{NpcId, NpcPersonalityId};

/// Big Five personality profile, one per NPC at most. All traits are 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcPersonality {
    pub id: NpcPersonalityId,
    pub npc_id: NpcId,
    pub extraversion: i32,
    pub agreeableness: i32,
    pub conscientiousness: i32,
    pub neuroticism: i32,
    pub openness: i32,
    /// How reliably the NPC recalls details
    pub memory_reliability: i32,
}

impl NpcPersonality {
    pub fn new(npc_id: NpcId) -> Self {
        Self {
            id: NpcPersonalityId::new(),
            npc_id,
            extraversion: 50,
            agreeableness: 50,
            conscientiousness: 50,
            neuroticism: 50,
            openness: 50,
            memory_reliability: 80,
        }
    }

    pub fn with_traits(
        mut self,
        extraversion: i32,
        agreeableness: i32,
        conscientiousness: i32,
        neuroticism: i32,
        openness: i32,
    ) -> Self {
        self.extraversion = extraversion;
        self.agreeableness = agreeableness;
        self.conscientiousness = conscientiousness;
        self.neuroticism = neuroticism;
        self.openness = openness;
        self
    }

    pub fn with_memory_reliability(mut self, value: i32) -> Self {
        self.memory_reliability = value;
        self
    }
}
