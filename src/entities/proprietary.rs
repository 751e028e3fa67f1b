//! Proprietary application entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::slug::slugify;

/// Links to other entities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Links {
    /// Capabilities this application declares
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<EntityId>,

    /// Open-source alternatives to this application
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<EntityId>,
}

/// A proprietary application entity (the product visitors want to replace)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProprietaryApp {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// URL slug (lowercase, hyphen-separated)
    pub slug: String,

    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Product website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    /// Simple-icons slug for the product logo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_icon_slug: Option<String>,

    /// Brand color as a hex string (e.g., "#7AB55C")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_icon_color: Option<String>,

    /// Links to other entities
    #[serde(default)]
    pub links: Links,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this entry)
    pub author: String,
}

impl Entity for ProprietaryApp {
    const PREFIX: &'static str = "APP";

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

impl ProprietaryApp {
    /// Create a new proprietary application with a slug derived from the name
    pub fn new(name: String, author: String) -> Self {
        let slug = slugify(&name);
        Self {
            id: EntityId::new(crate::core::EntityPrefix::App),
            name,
            slug,
            description: None,
            website_url: None,
            simple_icon_slug: None,
            simple_icon_color: None,
            links: Links::default(),
            created: Utc::now(),
            author,
        }
    }

    /// The deduplicated set of capability IDs this application declares
    pub fn declared_capability_ids(&self) -> HashSet<EntityId> {
        self.links.capabilities.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityPrefix;

    #[test]
    fn test_proprietary_roundtrip() {
        let mut app = ProprietaryApp::new("Shopify".to_string(), "test".to_string());
        app.description = Some("E-commerce platform".to_string());
        app.links.capabilities.push(EntityId::new(EntityPrefix::Cap));

        let yaml = serde_yml::to_string(&app).unwrap();
        let parsed: ProprietaryApp = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(app.id, parsed.id);
        assert_eq!(app.slug, parsed.slug);
        assert_eq!(app.links.capabilities, parsed.links.capabilities);
    }

    #[test]
    fn test_declared_capability_ids_deduplicates() {
        let mut app = ProprietaryApp::new("Slack".to_string(), "test".to_string());
        let cap = EntityId::new(EntityPrefix::Cap);
        app.links.capabilities.push(cap.clone());
        app.links.capabilities.push(cap);

        assert_eq!(app.declared_capability_ids().len(), 1);
    }
}
