//! Capability entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Complexity, Entity};
use crate::core::identity::EntityId;
use crate::core::slug::slugify;

/// A capability entity - a named feature/function trackable across products
/// (e.g., "real-time collaboration")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// URL slug (lowercase, hyphen-separated)
    pub slug: String,

    /// What this capability covers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category (user-defined, e.g., "collaboration", "e_commerce")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Complexity tier
    #[serde(default)]
    pub complexity: Complexity,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this entry)
    pub author: String,
}

impl Entity for Capability {
    const PREFIX: &'static str = "CAP";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Capability {
    /// Create a new capability with a slug derived from the name
    pub fn new(name: String, author: String) -> Self {
        let slug = slugify(&name);
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Cap),
            name,
            slug,
            description: None,
            category: None,
            complexity: Complexity::default(),
            created: Utc::now(),
            author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_roundtrip() {
        let cap = Capability::new("Real-Time Collaboration".to_string(), "test".to_string());

        let yaml = serde_yml::to_string(&cap).unwrap();
        let parsed: Capability = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(cap.id, parsed.id);
        assert_eq!(cap.name, parsed.name);
        assert_eq!(cap.slug, parsed.slug);
    }

    #[test]
    fn test_capability_slug_derived_from_name() {
        let cap = Capability::new("Real-Time Collaboration".to_string(), "test".to_string());
        assert_eq!(cap.slug, "real-time-collaboration");
    }

    #[test]
    fn test_capability_default_complexity_is_basic() {
        let cap = Capability::new("Search".to_string(), "test".to_string());
        let yaml = serde_yml::to_string(&cap).unwrap();
        assert!(yaml.contains("complexity: basic"));
    }
}
