//! Optional equality filters for listings.
//!
//! Every field is optional; unset fields are not applied and set fields are
//! combined with AND.

use serde::{Deserialize, Serialize};

use crate::entities::SettlementType;
use crate::ids::SettlementId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcFilter {
    /// Settlement the NPC lives in (`Npc::location_id`)
    pub settlement_id: Option<SettlementId>,
    pub is_alive: Option<bool>,
}

impl NpcFilter {
    pub fn in_settlement(mut self, settlement_id: SettlementId) -> Self {
        self.settlement_id = Some(settlement_id);
        self
    }

    pub fn alive(mut self, is_alive: bool) -> Self {
        self.is_alive = Some(is_alive);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementFilter {
    pub region: Option<String>,
    pub settlement_type: Option<SettlementType>,
    pub is_active: Option<bool>,
}

impl SettlementFilter {
    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn of_type(mut self, settlement_type: SettlementType) -> Self {
        self.settlement_type = Some(settlement_type);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Region to match, treating an empty string as unset.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFilter {
    pub location_type: Option<String>,
    pub is_public: Option<bool>,
}

impl LocationFilter {
    pub fn of_type(mut self, location_type: impl Into<String>) -> Self {
        self.location_type = Some(location_type.into());
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    /// Location type to match, treating an empty string as unset.
    pub fn location_type(&self) -> Option<&str> {
        self.location_type.as_deref().filter(|t| !t.is_empty())
    }
}
