use serde::{Deserialize, Serialize};

use crate::ids::{SettlementId, SettlementLocationId};
use crate::value_objects::Attributes;

/// A place inside a settlement: tavern, market, temple, house, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementLocation {
    pub id: SettlementLocationId,
    pub settlement_id: SettlementId,
    pub name: String,
    pub location_type: String,
    pub description: String,
    pub capacity: Option<i32>,
    pub is_public: bool,
    /// Position within the settlement
    pub coordinates_x: Option<f64>,
    pub coordinates_y: Option<f64>,
    pub attributes: Attributes,
}

impl SettlementLocation {
    pub fn new(
        settlement_id: SettlementId,
        name: impl Into<String>,
        location_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: SettlementLocationId::new(),
            settlement_id,
            name: name.into(),
            location_type: location_type.into(),
            description: description.into(),
            capacity: None,
            is_public: true,
            coordinates_x: None,
            coordinates_y: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.coordinates_x = Some(x);
        self.coordinates_y = Some(y);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}
