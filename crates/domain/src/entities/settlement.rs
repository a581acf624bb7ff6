//! Settlement entity - a city or village in the game world
//!
//! Like [`crate::Npc`], a settlement's devotion is only changed through
//! [`Settlement::record_devotion`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::SettlementDevotionHistoryEntry;
use crate::ids::SettlementId;
use crate::value_objects::{Attributes, DEFAULT_DEVOTION, DEFAULT_INDEPENDENT_THINKING};

string_enum! {
    pub enum SettlementType {
        City => "city",
        Village => "village",
    }
}

string_enum! {
    pub enum EconomyType {
        Crops => "crops",
        Livestock => "livestock",
        Ore => "ore",
        Wine => "wine",
        Herbs => "herbs",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: SettlementId,
    pub name: String,
    pub settlement_type: SettlementType,
    pub population: i64,
    pub founded_date: DateTime<Utc>,

    // World map position
    pub coordinates_x: f64,
    pub coordinates_y: f64,
    pub region: String,

    // Economy
    pub primary_economy: EconomyType,
    pub secondary_economy: Option<EconomyType>,
    pub wealth_rating: i32,
    pub trade_activity: i32,

    devotion: i32,
    pub independent_thinking: i32,

    // Status (ratings 0-100)
    pub is_active: bool,
    pub safety_rating: i32,
    pub quality_of_life: i32,

    pub cultural_traits: Vec<String>,
    pub notable_features: Vec<String>,
    pub attributes: Attributes,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Settlement {
    pub fn new(
        name: impl Into<String>,
        settlement_type: SettlementType,
        region: impl Into<String>,
        coordinates: (f64, f64),
        primary_economy: EconomyType,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SettlementId::new(),
            name: name.into(),
            settlement_type,
            population: 0,
            founded_date: now,
            coordinates_x: coordinates.0,
            coordinates_y: coordinates.1,
            region: region.into(),
            primary_economy,
            secondary_economy: None,
            wealth_rating: 50,
            trade_activity: 50,
            devotion: DEFAULT_DEVOTION,
            independent_thinking: DEFAULT_INDEPENDENT_THINKING,
            is_active: true,
            safety_rating: 50,
            quality_of_life: 50,
            cultural_traits: Vec::new(),
            notable_features: Vec::new(),
            attributes: Attributes::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: SettlementId) -> Self {
        self.id = id;
        self
    }

    /// Initial devotion, before any history exists.
    pub fn with_devotion(mut self, devotion: i32) -> Self {
        self.devotion = devotion;
        self
    }

    pub fn with_population(mut self, population: i64) -> Self {
        self.population = population;
        self
    }

    pub fn with_founded_date(mut self, founded_date: DateTime<Utc>) -> Self {
        self.founded_date = founded_date;
        self
    }

    pub fn with_secondary_economy(mut self, economy: EconomyType) -> Self {
        self.secondary_economy = Some(economy);
        self
    }

    pub fn with_independent_thinking(mut self, value: i32) -> Self {
        self.independent_thinking = value;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn with_cultural_trait(mut self, value: impl Into<String>) -> Self {
        self.cultural_traits.push(value.into());
        self
    }

    pub fn with_notable_feature(mut self, value: impl Into<String>) -> Self {
        self.notable_features.push(value.into());
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
    /// The returned entry and this settlement must be persisted together.
    pub fn record_devotion(
        &mut self,
        new_devotion: i32,
        reason: impl Into<String>,
        details: Option<Attributes>,
        at: DateTime<Utc>,
    ) -> SettlementDevotionHistoryEntry {
        let entry = SettlementDevotionHistoryEntry::capture(
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
    pub fn apply_patch(&mut self, patch: SettlementPatch, at: DateTime<Utc>) {
        let SettlementPatch {
            name,
            settlement_type,
            population,
            founded_date,
            coordinates_x,
            coordinates_y,
            region,
            primary_economy,
            secondary_economy,
            wealth_rating,
            trade_activity,
            independent_thinking,
            is_active,
            safety_rating,
            quality_of_life,
            cultural_traits,
            notable_features,
            attributes,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = settlement_type {
            self.settlement_type = v;
        }
        if let Some(v) = population {
            self.population = v;
        }
        if let Some(v) = founded_date {
            self.founded_date = v;
        }
        if let Some(v) = coordinates_x {
            self.coordinates_x = v;
        }
        if let Some(v) = coordinates_y {
            self.coordinates_y = v;
        }
        if let Some(v) = region {
            self.region = v;
        }
        if let Some(v) = primary_economy {
            self.primary_economy = v;
        }
        if let Some(v) = secondary_economy {
            self.secondary_economy = v;
        }
        if let Some(v) = wealth_rating {
            self.wealth_rating = v;
        }
        if let Some(v) = trade_activity {
            self.trade_activity = v;
        }
        if let Some(v) = independent_thinking {
            self.independent_thinking = v;
        }
        if let Some(v) = is_active {
            self.is_active = v;
        }
        if let Some(v) = safety_rating {
            self.safety_rating = v;
        }
        if let Some(v) = quality_of_life {
            self.quality_of_life = v;
        }
        if let Some(v) = cultural_traits {
            self.cultural_traits = v;
        }
        if let Some(v) = notable_features {
            self.notable_features = v;
        }
        if let Some(v) = attributes {
            self.attributes = v;
        }
        self.updated_at = at;
    }
}

/// Partial update for a settlement. Unset fields are left untouched.
///
/// `secondary_economy: Some(None)` clears the secondary economy. Devotion is
/// deliberately absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementPatch {
    pub name: Option<String>,
    pub settlement_type: Option<SettlementType>,
    pub population: Option<i64>,
    pub founded_date: Option<DateTime<Utc>>,
    pub coordinates_x: Option<f64>,
    pub coordinates_y: Option<f64>,
    pub region: Option<String>,
    pub primary_economy: Option<EconomyType>,
    pub secondary_economy: Option<Option<EconomyType>>,
    pub wealth_rating: Option<i32>,
    pub trade_activity: Option<i32>,
    pub independent_thinking: Option<i32>,
    pub is_active: Option<bool>,
    pub safety_rating: Option<i32>,
    pub quality_of_life: Option<i32>,
    pub cultural_traits: Option<Vec<String>>,
    pub notable_features: Option<Vec<String>>,
    pub attributes: Option<Attributes>,
}
