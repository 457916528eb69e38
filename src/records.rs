//! Input records: the generic `RawRecord` consumed by the aggregator and the
//! typed `StormEvent` row read from the storm dataset.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analyzers::magnitude::{MagnitudeCode, normalize};

pub const FATALITIES: &str = "fatalities";
pub const INJURIES: &str = "injuries";
pub const PROPERTY_DAMAGE: &str = "property_damage";
pub const CROP_DAMAGE: &str = "crop_damage";

/// One observed event: a category label and named numeric values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    pub category: String,
    pub values: HashMap<String, f64>,
}

impl RawRecord {
    pub fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            values: HashMap::new(),
        }
    }

    /// Set a numeric field
    pub fn with_value(mut self, field: &str, value: f64) -> Self {
        self.values.insert(field.to_string(), value);
        self
    }

    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }
}

/// A single row deserialized from the storm events CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormEvent {
    #[serde(rename = "EVTYPE")]
    pub event_type: String,
    #[serde(rename = "FATALITIES")]
    pub fatalities: f64,
    #[serde(rename = "INJURIES")]
    pub injuries: f64,

    // damage amounts are stored as base value + magnitude code
    #[serde(rename = "PROPDMG")]
    pub property_damage: f64,
    #[serde(rename = "PROPDMGEXP", default)]
    pub property_damage_exp: MagnitudeCode,
    #[serde(rename = "CROPDMG")]
    pub crop_damage: f64,
    #[serde(rename = "CROPDMGEXP", default)]
    pub crop_damage_exp: MagnitudeCode,
}

impl StormEvent {
    pub fn property_damage_amount(&self) -> f64 {
        normalize(self.property_damage, &self.property_damage_exp)
    }

    pub fn crop_damage_amount(&self) -> f64 {
        normalize(self.crop_damage, &self.crop_damage_exp)
    }

    /// Converts to a `RawRecord` keyed by event type, with both damage
    /// fields already scaled to absolute amounts.
    pub fn to_record(&self) -> RawRecord {
        RawRecord::new(&self.event_type)
            .with_value(FATALITIES, self.fatalities)
            .with_value(INJURIES, self.injuries)
            .with_value(PROPERTY_DAMAGE, self.property_damage_amount())
            .with_value(CROP_DAMAGE, self.crop_damage_amount())
    }
}
