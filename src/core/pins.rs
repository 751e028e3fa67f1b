//! Pinned capability store (the Build Drawer's working set)
//!
//! Pins are capability implementations a user selected for inclusion in the
//! generated build prompt. The store is a JSON array persisted under
//! `.osb/pinned_capabilities.json`; field names are stable across sessions
//! and are read back without migration logic. Every mutation rewrites the
//! whole file, and loading replaces in-memory state, so the persisted array
//! and the working set never drift.

use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

use crate::core::project::Project;
use crate::entities::{Alternative, Capability, CapabilityImplementation};

/// Store file location within a catalog
const STORE_FILE: &str = ".osb/pinned_capabilities.json";

/// A pinned capability with display fields denormalized at pin time.
///
/// Identified by the composite key `{toolId}-{capabilityId}`. The
/// denormalized fields are copies: editing the catalog later does not
/// rewrite existing pins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCapability {
    /// Composite key `{toolId}-{capabilityId}`
    pub id: String,

    /// The pinned capability's ID
    pub capability_id: String,

    /// The alternative the capability was pinned from
    pub tool_id: String,

    /// Capability display name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,

    /// Alternative display name
    pub tool_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_color: Option<String>,

    /// Alternative's repository URL, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_repo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
}

impl SelectedCapability {
    /// Build the canonical pin record for a capability implementation.
    ///
    /// This is the single normalizing constructor every pin entry point
    /// goes through, so the store only ever sees one shape.
    pub fn from_implementation(
        alt: &Alternative,
        implementation: &CapabilityImplementation,
        capability: &Capability,
    ) -> Self {
        Self {
            id: composite_id(&alt.id.to_string(), &capability.id.to_string()),
            capability_id: capability.id.to_string(),
            tool_id: alt.id.to_string(),
            name: capability.name.clone(),
            description: capability.description.clone(),
            category: capability.category.clone(),
            complexity: Some(
                implementation
                    .implementation_complexity
                    .unwrap_or(capability.complexity)
                    .to_string(),
            ),
            tool_name: alt.name.clone(),
            tool_icon: alt.simple_icon_slug.clone(),
            tool_color: alt.simple_icon_color.clone(),
            tool_repo: alt.repository_url.clone(),
            implementation_notes: implementation.implementation_notes.clone(),
            github_path: implementation.github_path.clone(),
            documentation_url: implementation.documentation_url.clone(),
        }
    }
}

/// Build the composite pin key `{toolId}-{capabilityId}`
pub fn composite_id(tool_id: &str, capability_id: &str) -> String {
    format!("{}-{}", tool_id, capability_id)
}

/// Outcome of a toggle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinToggle {
    Added,
    Removed,
}

/// The working set of pinned capabilities, in pin (insertion) order
#[derive(Debug, Default)]
pub struct PinStore {
    entries: Vec<SelectedCapability>,
    /// Set when loading fell back to an empty store
    degraded: Option<String>,
}

impl PinStore {
    /// Load the store from a catalog, falling back to empty on any failure.
    ///
    /// A missing file is a normal empty store; an unreadable or corrupt
    /// file degrades to empty and records why (callers surface the warning,
    /// the UI never crashes over it).
    pub fn load(project: &Project) -> Self {
        let path = project.root().join(STORE_FILE);
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<SelectedCapability>>(&content) {
                Ok(entries) => Self {
                    entries,
                    degraded: None,
                },
                Err(e) => Self {
                    entries: Vec::new(),
                    degraded: Some(format!("pin store is corrupt, starting empty: {}", e)),
                },
            },
            Err(e) => Self {
                entries: Vec::new(),
                degraded: Some(format!("pin store could not be read, starting empty: {}", e)),
            },
        }
    }

    /// Persist the full current list, replacing the file
    pub fn save(&self, project: &Project) -> Result<(), PinStoreError> {
        let path = project.root().join(STORE_FILE);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PinStoreError::Write(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| PinStoreError::Write(e.to_string()))?;
        fs::write(&path, content).map_err(|e| PinStoreError::Write(e.to_string()))
    }

    /// Why the last load fell back to an empty store, if it did
    pub fn degraded(&self) -> Option<&str> {
        self.degraded.as_deref()
    }

    /// Pin a capability, or unpin it when the same composite id is
    /// already present (toggle semantics - never a duplicate).
    pub fn toggle(&mut self, selected: SelectedCapability) -> PinToggle {
        if self.is_selected(&selected.id) {
            self.entries.retain(|e| e.id != selected.id);
            PinToggle::Removed
        } else {
            self.entries.push(selected);
            PinToggle::Added
        }
    }

    /// Remove a pin by composite id. Removing an absent id is a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Pure membership check against the current set
    pub fn is_selected(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Drop every pin
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pins in insertion order
    pub fn entries(&self) -> &[SelectedCapability] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Errors from pin store persistence
#[derive(Debug, Error)]
pub enum PinStoreError {
    #[error("failed to write pin store: {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn selected(tool: &str, cap: &str) -> SelectedCapability {
        SelectedCapability {
            id: composite_id(tool, cap),
            capability_id: cap.to_string(),
            tool_id: tool.to_string(),
            name: format!("capability {}", cap),
            description: None,
            category: Some("testing".to_string()),
            complexity: Some("basic".to_string()),
            tool_name: format!("tool {}", tool),
            tool_icon: None,
            tool_color: None,
            tool_repo: Some("https://github.com/example/tool".to_string()),
            implementation_notes: None,
            github_path: None,
            documentation_url: None,
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = PinStore::default();
        assert_eq!(store.toggle(selected("app1", "cap1")), PinToggle::Added);
        assert!(store.is_selected("app1-cap1"));

        // Same composite id toggles off - zero pins, not two
        assert_eq!(store.toggle(selected("app1", "cap1")), PinToggle::Removed);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_then_remove_restores_prior_state() {
        let mut store = PinStore::default();
        store.toggle(selected("app1", "cap1"));
        let before: Vec<String> = store.entries().iter().map(|e| e.id.clone()).collect();

        store.toggle(selected("app2", "cap2"));
        store.remove("app2-cap2");

        let after: Vec<String> = store.entries().iter().map(|e| e.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = PinStore::default();
        store.toggle(selected("app1", "cap1"));
        assert!(!store.remove("app9-cap9"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut store = PinStore::default();
        store.toggle(selected("a", "1"));
        store.toggle(selected("b", "2"));
        store.toggle(selected("c", "3"));
        store.remove("b-2");

        let ids: Vec<&str> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a-1", "c-3"]);
    }

    #[test]
    fn test_save_load_roundtrip_is_field_for_field() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        let mut store = PinStore::default();
        store.toggle(selected("app1", "cap1"));
        store.toggle(selected("app2", "cap2"));
        store.save(&project).unwrap();

        let reloaded = PinStore::load(&project);
        assert!(reloaded.degraded().is_none());
        assert_eq!(reloaded.entries(), store.entries());
    }

    #[test]
    fn test_corrupt_store_degrades_to_empty() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        std::fs::write(project.root().join(STORE_FILE), "not json at all").unwrap();

        let store = PinStore::load(&project);
        assert!(store.is_empty());
        assert!(store.degraded().is_some());
    }

    #[test]
    fn test_missing_store_is_clean_empty() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        let store = PinStore::load(&project);
        assert!(store.is_empty());
        assert!(store.degraded().is_none());
    }

    #[test]
    fn test_persisted_field_names_are_stable() {
        let json = serde_json::to_string(&selected("app1", "cap1")).unwrap();
        assert!(json.contains("\"capabilityId\""));
        assert!(json.contains("\"toolId\""));
        assert!(json.contains("\"toolName\""));
        assert!(json.contains("\"toolRepo\""));
    }
}
