//! Link type inference and reciprocal link handling
//!
//! Links between catalog entities live under each entity's `links:` mapping
//! as arrays of entity IDs. Capability implementations are NOT plain links -
//! they carry metadata and are managed through `osb alt implement`.

use crate::core::identity::EntityPrefix;

/// Infer the appropriate link type when linking from source to target entity.
///
/// Returns the field name on the source entity that should contain the link,
/// or None if no automatic inference is possible for this entity combination.
///
/// # Examples
/// ```
/// use osb::core::links::infer_link_type;
/// use osb::core::identity::EntityPrefix;
///
/// // APP linking to CAP -> capabilities
/// assert_eq!(
///     infer_link_type(EntityPrefix::App, EntityPrefix::Cap),
///     Some("capabilities".to_string())
/// );
///
/// // OSS linking to APP -> alternative_to
/// assert_eq!(
///     infer_link_type(EntityPrefix::Oss, EntityPrefix::App),
///     Some("alternative_to".to_string())
/// );
/// ```
pub fn infer_link_type(source_prefix: EntityPrefix, target_prefix: EntityPrefix) -> Option<String> {
    match (source_prefix, target_prefix) {
        // Proprietary app declares a capability
        (EntityPrefix::App, EntityPrefix::Cap) => Some("capabilities".to_string()),

        // Proprietary app lists an open-source alternative
        (EntityPrefix::App, EntityPrefix::Oss) => Some("alternatives".to_string()),

        // Alternative points back at the proprietary apps it replaces
        (EntityPrefix::Oss, EntityPrefix::App) => Some("alternative_to".to_string()),

        // OSS -> CAP is a capability implementation with metadata, not a
        // plain link; `osb alt implement` owns that relationship.
        (EntityPrefix::Oss, EntityPrefix::Cap) => None,

        // No inference available for other combinations
        _ => None,
    }
}

/// Get the reciprocal link type for a given forward link type and target entity prefix.
///
/// When entity A links to entity B, this function returns what field on B
/// should link back to A (if any).
///
/// Returns None if no reciprocal link should be created.
pub fn get_reciprocal_link_type(link_type: &str, target_prefix: EntityPrefix) -> Option<String> {
    match (link_type, target_prefix) {
        // APP.alternatives -> OSS means OSS.alternative_to -> APP
        ("alternatives", EntityPrefix::Oss) => Some("alternative_to".to_string()),

        // OSS.alternative_to -> APP means APP.alternatives -> OSS
        ("alternative_to", EntityPrefix::App) => Some("alternatives".to_string()),

        // APP.capabilities -> CAP has no back-link; capabilities are
        // referenced, never referencing.
        ("capabilities", EntityPrefix::Cap) => None,

        (_, _) => None,
    }
}

/// Add a link to an entity file using automatic type inference.
///
/// Reads the entity file, determines the link type from the entity prefixes,
/// adds the link, and writes the file back.
///
/// Returns the link type that was added.
pub fn add_inferred_link(
    source_path: &std::path::Path,
    source_prefix: EntityPrefix,
    target_id: &str,
    target_prefix: EntityPrefix,
) -> Result<String, String> {
    let link_type = infer_link_type(source_prefix, target_prefix).ok_or_else(|| {
        format!(
            "Cannot infer link type for {} -> {}",
            source_prefix, target_prefix
        )
    })?;

    let content =
        std::fs::read_to_string(source_path).map_err(|e| format!("Failed to read file: {}", e))?;

    let updated_content = add_link_to_yaml(&content, &link_type, target_id)?;

    std::fs::write(source_path, &updated_content)
        .map_err(|e| format!("Failed to write file: {}", e))?;

    Ok(link_type)
}

/// Add a link to YAML content.
///
/// Parses the YAML, appends the target to the named array in the links
/// section (creating the section and array as needed), and returns the
/// updated YAML string. Already-present targets are left alone.
pub fn add_link_to_yaml(content: &str, link_type: &str, target_id: &str) -> Result<String, String> {
    let mut value: serde_yml::Value =
        serde_yml::from_str(content).map_err(|e| format!("Failed to parse YAML: {}", e))?;

    if value.get("links").is_none() {
        if let Some(map) = value.as_mapping_mut() {
            map.insert(
                "links".to_string(),
                serde_yml::Value::Mapping(serde_yml::Mapping::new()),
            );
        }
    }

    let links = value
        .get_mut("links")
        .ok_or_else(|| "No 'links' section found in file".to_string())?;

    if links.get(link_type).is_none() {
        let links_map = links
            .as_mapping_mut()
            .ok_or_else(|| "Links section is not a mapping".to_string())?;
        links_map.insert(
            link_type.to_string(),
            serde_yml::Value::Sequence(vec![]),
        );
    }

    let arr = links
        .get_mut(link_type)
        .and_then(|v| v.as_sequence_mut())
        .ok_or_else(|| format!("Link type '{}' is not an array", link_type))?;

    let new_value = serde_yml::Value::String(target_id.to_string());
    if !arr.contains(&new_value) {
        arr.push(new_value);
    }

    serde_yml::to_string(&value).map_err(|e| format!("Failed to serialize YAML: {}", e))
}

/// Remove a link from YAML content.
///
/// Removing a link that is not present is a no-op, not an error.
pub fn remove_link_from_yaml(
    content: &str,
    link_type: &str,
    target_id: &str,
) -> Result<String, String> {
    let mut value: serde_yml::Value =
        serde_yml::from_str(content).map_err(|e| format!("Failed to parse YAML: {}", e))?;

    if let Some(links) = value.get_mut("links") {
        if let Some(entry) = links.get_mut(link_type) {
            if let Some(arr) = entry.as_sequence_mut() {
                arr.retain(|v| v.as_str() != Some(target_id));
            }
        }
    }

    serde_yml::to_string(&value).map_err(|e| format!("Failed to serialize YAML: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_to_cap_infers_capabilities() {
        assert_eq!(
            infer_link_type(EntityPrefix::App, EntityPrefix::Cap),
            Some("capabilities".to_string())
        );
    }

    #[test]
    fn test_app_to_oss_infers_alternatives() {
        assert_eq!(
            infer_link_type(EntityPrefix::App, EntityPrefix::Oss),
            Some("alternatives".to_string())
        );
    }

    #[test]
    fn test_oss_to_cap_has_no_plain_link() {
        assert_eq!(infer_link_type(EntityPrefix::Oss, EntityPrefix::Cap), None);
    }

    #[test]
    fn test_reciprocal_alternatives() {
        assert_eq!(
            get_reciprocal_link_type("alternatives", EntityPrefix::Oss),
            Some("alternative_to".to_string())
        );
    }

    #[test]
    fn test_reciprocal_capabilities_is_none() {
        assert_eq!(
            get_reciprocal_link_type("capabilities", EntityPrefix::Cap),
            None
        );
    }

    #[test]
    fn test_add_link_to_yaml_creates_section() {
        let content = "id: APP-01JTEST\nname: Test\n";
        let updated = add_link_to_yaml(content, "capabilities", "CAP-01JTEST").unwrap();
        assert!(updated.contains("links:"));
        assert!(updated.contains("CAP-01JTEST"));
    }

    #[test]
    fn test_add_link_to_yaml_is_idempotent() {
        let content = "id: APP-01JTEST\nname: Test\n";
        let once = add_link_to_yaml(content, "capabilities", "CAP-01JTEST").unwrap();
        let twice = add_link_to_yaml(&once, "capabilities", "CAP-01JTEST").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_link_from_yaml() {
        let content = "id: APP-01JTEST\nname: Test\n";
        let added = add_link_to_yaml(content, "capabilities", "CAP-01JTEST").unwrap();
        let removed = remove_link_from_yaml(&added, "capabilities", "CAP-01JTEST").unwrap();
        assert!(!removed.contains("CAP-01JTEST"));
    }

    #[test]
    fn test_remove_missing_link_is_noop() {
        let content = "id: APP-01JTEST\nname: Test\n";
        let removed = remove_link_from_yaml(content, "capabilities", "CAP-01JNOPE").unwrap();
        assert!(removed.contains("APP-01JTEST"));
    }
}
