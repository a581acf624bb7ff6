use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::ids::{NpcId, RoutineActivityId, SettlementId};

string_enum! {
    pub enum ActivityType {
        Work => "work",
        Sleep => "sleep",
        Eat => "eat",
        Leisure => "leisure",
        Social => "social",
        Shopping => "shopping",
        Worship => "worship",
        Rest => "rest",
    }
}

/// One slot in an NPC's daily schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRoutineActivity {
    pub id: RoutineActivityId,
    pub npc_id: NpcId,
    pub activity_type: ActivityType,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location_id: Option<SettlementId>,
    pub description: String,
    /// Higher wins when slots overlap
    pub priority: i32,
}

impl DailyRoutineActivity {
    pub fn new(
        npc_id: NpcId,
        activity_type: ActivityType,
        start_time: NaiveTime,
        end_time: NaiveTime,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: RoutineActivityId::new(),
            npc_id,
            activity_type,
            start_time,
            end_time,
            location_id: None,
            description: description.into(),
            priority: 1,
        }
    }

    pub fn at(mut self, location_id: SettlementId) -> Self {
        self.location_id = Some(location_id);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}
