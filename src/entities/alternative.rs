//! Open-source alternative entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{AltStatus, Complexity, Entity};
use crate::core::identity::EntityId;
use crate::core::slug::slugify;

/// The fact (plus metadata) that this alternative implements a capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityImplementation {
    /// The implemented capability
    pub capability: EntityId,

    /// How this alternative implements the capability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_notes: Option<String>,

    /// Path into the source repository where the implementation lives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_path: Option<String>,

    /// Documentation for this implementation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,

    /// How hard it is to adapt this implementation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_complexity: Option<Complexity>,

    /// Inactive implementations are excluded from compatibility and pinning
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl CapabilityImplementation {
    pub fn new(capability: EntityId) -> Self {
        Self {
            capability,
            implementation_notes: None,
            github_path: None,
            documentation_url: None,
            implementation_complexity: None,
            is_active: true,
        }
    }
}

/// Links to other entities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Links {
    /// Proprietary applications this alternative replaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_to: Vec<EntityId>,
}

/// An open-source application offered as an alternative to proprietary products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternative {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// URL slug (lowercase, hyphen-separated)
    pub slug: String,

    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Source repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,

    /// Project website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    /// Simple-icons slug for the project logo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_icon_slug: Option<String>,

    /// Brand color as a hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_icon_color: Option<String>,

    /// Software license (e.g., "MIT", "AGPL-3.0")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// GitHub star count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_stars: Option<u64>,

    /// GitHub fork count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_forks: Option<u64>,

    /// Open issue count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_issues: Option<u64>,

    /// Timestamp of the last upstream commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_last_commit: Option<DateTime<Utc>>,

    /// Maintenance status
    #[serde(default)]
    pub status: AltStatus,

    /// Capabilities this alternative implements, with metadata
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implementations: Vec<CapabilityImplementation>,

    /// Links to other entities
    #[serde(default)]
    pub links: Links,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this entry)
    pub author: String,
}

impl Entity for Alternative {
    const PREFIX: &'static str = "OSS";

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

impl Alternative {
    /// Create a new alternative with a slug derived from the name
    pub fn new(name: String, author: String) -> Self {
        let slug = slugify(&name);
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Oss),
            name,
            slug,
            description: None,
            repository_url: None,
            website_url: None,
            simple_icon_slug: None,
            simple_icon_color: None,
            license: None,
            github_stars: None,
            github_forks: None,
            github_issues: None,
            github_last_commit: None,
            status: AltStatus::default(),
            implementations: Vec::new(),
            links: Links::default(),
            created: Utc::now(),
            author,
        }
    }

    /// Active implementations only (the set that counts for compatibility)
    pub fn active_implementations(&self) -> impl Iterator<Item = &CapabilityImplementation> {
        self.implementations.iter().filter(|i| i.is_active)
    }

    /// Find the implementation record for a capability, if any
    pub fn implementation_for(&self, capability: &EntityId) -> Option<&CapabilityImplementation> {
        self.implementations
            .iter()
            .find(|i| &i.capability == capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityPrefix;

    #[test]
    fn test_alternative_roundtrip() {
        let mut alt = Alternative::new("Medusa".to_string(), "test".to_string());
        alt.repository_url = Some("https://github.com/medusajs/medusa".to_string());
        alt.github_stars = Some(24000);
        alt.implementations
            .push(CapabilityImplementation::new(EntityId::new(EntityPrefix::Cap)));

        let yaml = serde_yml::to_string(&alt).unwrap();
        let parsed: Alternative = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(alt.id, parsed.id);
        assert_eq!(alt.github_stars, parsed.github_stars);
        assert_eq!(alt.implementations.len(), parsed.implementations.len());
        assert!(parsed.implementations[0].is_active);
    }

    #[test]
    fn test_is_active_defaults_to_true_when_absent() {
        let yaml = "capability: CAP-01HQ3K4N5M6P7R8S9T0VWXYZ01\n";
        let parsed: CapabilityImplementation = serde_yml::from_str(yaml).unwrap();
        assert!(parsed.is_active);
    }

    #[test]
    fn test_active_implementations_filters_inactive() {
        let mut alt = Alternative::new("Ghost".to_string(), "test".to_string());
        let cap_a = EntityId::new(EntityPrefix::Cap);
        let cap_b = EntityId::new(EntityPrefix::Cap);
        alt.implementations.push(CapabilityImplementation::new(cap_a));
        let mut inactive = CapabilityImplementation::new(cap_b);
        inactive.is_active = false;
        alt.implementations.push(inactive);

        assert_eq!(alt.active_implementations().count(), 1);
    }
}
