//! Short ID system for easier entity selection
//!
//! Provides numeric aliases like `APP@1`, `OSS@2` that map to full entity
//! IDs. Aliases are assigned as entities are listed and persist in
//! `.osb/shortids.json` (user-local, gitignored - entity files only ever
//! contain full ULIDs).

use std::collections::HashMap;
use std::fs;

use crate::core::identity::EntityId;
use crate::core::project::Project;

/// Index file location within a catalog
const INDEX_FILE: &str = ".osb/shortids.json";

/// A mapping of short aliases (PREFIX@N) to full entity IDs
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ShortIdIndex {
    /// Maps alias to full entity ID string
    entries: HashMap<String, String>,
    /// Next available number per prefix
    counters: HashMap<String, u32>,
    /// Maps full entity ID to alias (reverse lookup)
    #[serde(skip)]
    reverse: HashMap<String, String>,
}

impl ShortIdIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index from a catalog, or create empty if not found
    pub fn load(project: &Project) -> Self {
        let path = project.root().join(INDEX_FILE);
        if path.exists() {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(mut index) = serde_json::from_str::<ShortIdIndex>(&content) {
                    index.reverse = index
                        .entries
                        .iter()
                        .map(|(k, v)| (v.clone(), k.clone()))
                        .collect();
                    return index;
                }
            }
        }
        Self::new()
    }

    /// Save the index to a catalog
    pub fn save(&self, project: &Project) -> std::io::Result<()> {
        let path = project.root().join(INDEX_FILE);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
    }

    /// Add an entity ID and return its alias
    pub fn add(&mut self, entity_id: String) -> String {
        if let Some(alias) = self.reverse.get(&entity_id) {
            return alias.clone();
        }

        let prefix = entity_id
            .split_once('-')
            .map(|(p, _)| p.to_string())
            .unwrap_or_else(|| "ID".to_string());

        let counter = self.counters.entry(prefix.clone()).or_insert(1);
        let alias = format!("{}@{}", prefix, counter);
        *counter += 1;

        self.entries.insert(alias.clone(), entity_id.clone());
        self.reverse.insert(entity_id, alias.clone());
        alias
    }

    /// Make sure every ID in the iterator has an alias
    pub fn ensure_all(&mut self, entity_ids: impl IntoIterator<Item = String>) {
        for id in entity_ids {
            self.add(id);
        }
    }

    /// Resolve an alias reference to a full entity ID
    ///
    /// Accepts `PREFIX@N` aliases (e.g., `APP@1`); anything else passes
    /// through unchanged for partial/slug matching downstream.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        if reference.contains('@') {
            return self.entries.get(&reference.to_uppercase()).cloned();
        }
        Some(reference.to_string())
    }

    /// Get the alias for a full entity ID
    pub fn get_short_id(&self, entity_id: &str) -> Option<String> {
        self.reverse.get(entity_id).cloned()
    }

    /// Format an entity ID with its alias for display
    pub fn format_with_short_id(&self, entity_id: &EntityId) -> String {
        let id_str = entity_id.to_string();
        match self.reverse.get(&id_str) {
            Some(alias) => format!("{:<7} {}", alias, id_str),
            None => format!("        {}", id_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;
    use tempfile::tempdir;

    #[test]
    fn test_add_assigns_per_prefix_counters() {
        let mut index = ShortIdIndex::new();
        let app = EntityId::new(EntityPrefix::App).to_string();
        let oss = EntityId::new(EntityPrefix::Oss).to_string();
        let app2 = EntityId::new(EntityPrefix::App).to_string();

        assert_eq!(index.add(app), "APP@1");
        assert_eq!(index.add(oss), "OSS@1");
        assert_eq!(index.add(app2), "APP@2");
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut index = ShortIdIndex::new();
        let id = EntityId::new(EntityPrefix::Cap).to_string();
        let first = index.add(id.clone());
        let second = index.add(id);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_alias() {
        let mut index = ShortIdIndex::new();
        let id = EntityId::new(EntityPrefix::App).to_string();
        let alias = index.add(id.clone());

        assert_eq!(index.resolve(&alias), Some(id));
        assert_eq!(index.resolve("app@1").is_some(), true); // case-insensitive
    }

    #[test]
    fn test_resolve_passes_through_non_aliases() {
        let index = ShortIdIndex::new();
        assert_eq!(index.resolve("shopify"), Some("shopify".to_string()));
    }

    #[test]
    fn test_resolve_unknown_alias_is_none() {
        let index = ShortIdIndex::new();
        assert_eq!(index.resolve("APP@99"), None);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        let mut index = ShortIdIndex::new();
        let id = EntityId::new(EntityPrefix::Oss).to_string();
        let alias = index.add(id.clone());
        index.save(&project).unwrap();

        let reloaded = ShortIdIndex::load(&project);
        assert_eq!(reloaded.resolve(&alias), Some(id.clone()));
        assert_eq!(reloaded.get_short_id(&id), Some(alias));
    }
}
