use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata key for phone battery health, value is a percentage string (`"87"`).
pub const BATTERY_HEALTH_KEY: &str = "batteryHealth";
/// Metadata key for scooter odometer readings in kilometres (`"1200"`).
pub const MILEAGE_KEY: &str = "mileage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Laptop,
    Phone,
    Scooter,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Laptop => write!(f, "Laptop"),
            Category::Phone => write!(f, "Phone"),
            Category::Scooter => write!(f, "Scooter"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    New,
    Used,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::New => write!(f, "New"),
            Condition::Used => write!(f, "Used"),
        }
    }
}

/// Structured attributes extracted from free text.
///
/// Every field is optional. Text that matches nothing yields
/// `ParsedSpec::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Canonical CPU (or device model for phones and scooters), e.g. `"I51145G7"`,
    /// `"I7 12th Gen"`, `"M2 Pro"`, `"iPhone 13 Pro"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ParsedSpec {
    /// Returns `true` when no attribute was recognised.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_is_empty() {
        assert!(ParsedSpec::default().is_empty());
    }

    #[test]
    fn empty_spec_serializes_to_empty_object() {
        let json = serde_json::to_string(&ParsedSpec::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn metadata_serializes_with_known_keys() {
        let mut spec = ParsedSpec {
            category: Some(Category::Phone),
            ..ParsedSpec::default()
        };
        spec.metadata
            .insert(BATTERY_HEALTH_KEY.to_string(), "87".to_string());
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["category"], "Phone");
        assert_eq!(value["metadata"]["batteryHealth"], "87");
        assert!(!spec.is_empty());
    }
}
