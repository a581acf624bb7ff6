//! NPC entity - a simulated resident of a settlement
//!
//! Devotion is private: it starts at a creation-time value and afterwards only
//! changes through [`Npc::record_devotion`], which always yields the matching
//! history entry. Everything else is editable through [`NpcPatch`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::NpcDevotionHistoryEntry;
use crate::ids::{NpcId, SettlementId};
use crate::value_objects::{Attributes, DEFAULT_DEVOTION, DEFAULT_INDEPENDENT_THINKING};

string_enum! {
    pub enum Gender {
        Male => "male",
        Female => "female",
        NonBinary => "non_binary",
        Other => "other",
    }
}

string_enum! {
    pub enum Sexuality {
        Heterosexual => "heterosexual",
        Homosexual => "homosexual",
        Bisexual => "bisexual",
        Asexual => "asexual",
    }
}

impl Default for Sexuality {
    fn default() -> Self {
        Self::Heterosexual
    }
}

string_enum! {
    pub enum MaritalStatus {
        Single => "single",
        Married => "married",
        Divorced => "divorced",
        Widowed => "widowed",
    }
}

impl Default for MaritalStatus {
    fn default() -> Self {
        Self::Single
    }
}

/// A non-player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    pub age: i32,
    pub birth_date: DateTime<Utc>,
    pub gender: Gender,
    pub sexuality: Sexuality,
    pub occupation: String,
    pub marital_status: MaritalStatus,
    pub is_alive: bool,
    /// Settlement the NPC lives in
    pub location_id: SettlementId,

    devotion: i32,
    /// Likelihood of devotion shifting (0-100)
    pub independent_thinking: i32,

    // Gameplay stats (0-100)
    pub health: i32,
    pub happiness: i32,
    pub wealth: i32,

    /// Handle into the external conversation memory store
    pub memory_id: Option<String>,
    pub last_conversation_time: Option<DateTime<Utc>>,

    pub attributes: Attributes,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub death_date: Option<DateTime<Utc>>,
}

impl Npc {
    pub fn new(
        name: impl Into<String>,
        age: i32,
        birth_date: DateTime<Utc>,
        gender: Gender,
        occupation: impl Into<String>,
        location_id: SettlementId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NpcId::new(),
            name: name.into(),
            age,
            birth_date,
            gender,
            sexuality: Sexuality::default(),
            occupation: occupation.into(),
            marital_status: MaritalStatus::default(),
            is_alive: true,
            location_id,
            devotion: DEFAULT_DEVOTION,
            independent_thinking: DEFAULT_INDEPENDENT_THINKING,
            health: 100,
            happiness: 50,
            wealth: 50,
            memory_id: None,
            last_conversation_time: None,
            attributes: Attributes::new(),
            created_at: now,
            updated_at: now,
            death_date: None,
        }
    }

    pub fn with_id(mut self, id: NpcId) -> Self {
        self.id = id;
        self
    }

    /// Initial devotion, before any history exists.
    pub fn with_devotion(mut self, devotion: i32) -> Self {
        self.devotion = devotion;
        self
    }

    pub fn with_sexuality(mut self, sexuality: Sexuality) -> Self {
        self.sexuality = sexuality;
        self
    }

    pub fn with_marital_status(mut self, status: MaritalStatus) -> Self {
        self.marital_status = status;
        self
    }

    pub fn with_independent_thinking(mut self, value: i32) -> Self {
        self.independent_thinking = value;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn devotion(&self) -> i32 {
        self.devotion
    }

    /// Change devotion and produce the history entry describing the change.
    ///
    /// The returned entry and this NPC must be persisted together.
    pub fn record_devotion(
        &mut self,
        new_devotion: i32,
        reason: impl Into<String>,
        details: Option<Attributes>,
        at: DateTime<Utc>,
    ) -> NpcDevotionHistoryEntry {
        let entry = NpcDevotionHistoryEntry::capture(
            self.id,
            self.devotion,
            new_devotion,
            reason,
            details,
            at,
        );
        self.devotion = new_devotion;
        self.updated_at = at;
        entry
    }

    /// Apply a partial update of non-devotion fields.
    pub fn apply_patch(&mut self, patch: NpcPatch, at: DateTime<Utc>) {
        let NpcPatch {
            name,
            age,
            birth_date,
            gender,
            sexuality,
            occupation,
            marital_status,
            is_alive,
            location_id,
            independent_thinking,
            health,
            happiness,
            wealth,
            memory_id,
            last_conversation_time,
            attributes,
            death_date,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = age {
            self.age = v;
        }
        if let Some(v) = birth_date {
            self.birth_date = v;
        }
        if let Some(v) = gender {
            self.gender = v;
        }
        if let Some(v) = sexuality {
            self.sexuality = v;
        }
        if let Some(v) = occupation {
            self.occupation = v;
        }
        if let Some(v) = marital_status {
            self.marital_status = v;
        }
        if let Some(v) = is_alive {
            self.is_alive = v;
        }
        if let Some(v) = location_id {
            self.location_id = v;
        }
        if let Some(v) = independent_thinking {
            self.independent_thinking = v;
        }
        if let Some(v) = health {
            self.health = v;
        }
        if let Some(v) = happiness {
            self.happiness = v;
        }
        if let Some(v) = wealth {
            self.wealth = v;
        }
        if let Some(v) = memory_id {
            self.memory_id = v;
        }
        if let Some(v) = last_conversation_time {
            self.last_conversation_time = v;
        }
        if let Some(v) = attributes {
            self.attributes = v;
        }
        if let Some(v) = death_date {
            self.death_date = v;
        }
        self.updated_at = at;
    }
}

/// Partial update for an NPC. Unset fields are left untouched.
///
/// Nullable fields use `Some(None)` to clear the stored value. Devotion is
/// deliberately absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NpcPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub birth_date: Option<DateTime<Utc>>,
    pub gender: Option<Gender>,
    pub sexuality: Option<Sexuality>,
    pub occupation: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub is_alive: Option<bool>,
    pub location_id: Option<SettlementId>,
    pub independent_thinking: Option<i32>,
    pub health: Option<i32>,
    pub happiness: Option<i32>,
    pub wealth: Option<i32>,
    pub memory_id: Option<Option<String>>,
    pub last_conversation_time: Option<Option<DateTime<Utc>>>,
    pub attributes: Option<Attributes>,
    pub death_date: Option<Option<DateTime<Utc>>>,
}
