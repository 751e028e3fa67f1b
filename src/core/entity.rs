//! Entity trait - common interface for all catalog entity types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::EntityId;

/// Common trait for all OSB catalog entities
pub trait Entity: Serialize + DeserializeOwned {
    /// The entity type prefix (e.g., "APP", "OSS")
    const PREFIX: &'static str;

    /// Get the entity's unique ID
    fn id(&self) -> &EntityId;

    /// Get the entity's display name
    fn name(&self) -> &str;

    /// Get the entity's URL slug
    fn slug(&self) -> &str;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;

    /// Get the author
    fn author(&self) -> &str;
}

/// Complexity tier for capabilities and their implementations
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Complexity {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Complexity::Basic => write!(f, "basic"),
            Complexity::Intermediate => write!(f, "intermediate"),
            Complexity::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Complexity::Basic),
            "intermediate" => Ok(Complexity::Intermediate),
            "advanced" => Ok(Complexity::Advanced),
            _ => Err(format!("Unknown complexity: {}", s)),
        }
    }
}

/// Maintenance status of an open-source alternative
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum AltStatus {
    #[default]
    Active,
    Maintenance,
    Deprecated,
    Beta,
}

impl std::fmt::Display for AltStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AltStatus::Active => write!(f, "active"),
            AltStatus::Maintenance => write!(f, "maintenance"),
            AltStatus::Deprecated => write!(f, "deprecated"),
            AltStatus::Beta => write!(f, "beta"),
        }
    }
}

impl std::str::FromStr for AltStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AltStatus::Active),
            "maintenance" => Ok(AltStatus::Maintenance),
            "deprecated" => Ok(AltStatus::Deprecated),
            "beta" => Ok(AltStatus::Beta),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_parse_roundtrip() {
        for c in [Complexity::Basic, Complexity::Intermediate, Complexity::Advanced] {
            let parsed: Complexity = c.to_string().parse().unwrap();
            assert_eq!(parsed, c);
        }
    }

    #[test]
    fn test_alt_status_default_is_active() {
        assert_eq!(AltStatus::default(), AltStatus::Active);
    }
}
