//! Shared utilities for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::cache::EntityCache;
use crate::core::entity::Entity;
use crate::core::identity::EntityPrefix;
use crate::core::loader;
use crate::core::project::Project;
use crate::core::shortid::ShortIdIndex;

/// Open the catalog, honoring the global --project flag
pub fn open_project(global: &GlobalOpts) -> Result<Project> {
    match &global.project {
        Some(path) => Project::discover_from(path).map_err(|e| miette::miette!("{}", e)),
        None => Project::discover().map_err(|e| miette::miette!("{}", e)),
    }
}

/// Resolve a user-supplied reference (alias, ID fragment, or slug) and load
/// the entity, or fail with a not-found diagnostic.
pub fn resolve_entity<T: Entity + 'static>(
    project: &Project,
    prefix: EntityPrefix,
    reference: &str,
    kind: &str,
) -> Result<(PathBuf, T)> {
    let short_ids = ShortIdIndex::load(project);
    let resolved = short_ids
        .resolve(reference)
        .ok_or_else(|| miette::miette!("Unknown short ID '{}'", reference))?;

    loader::load_by_ref::<T>(&project.entity_dir(prefix), &resolved)?
        .ok_or_else(|| miette::miette!("No {} found matching '{}'", kind, reference))
}

/// Save the short ID index, warning instead of failing on error
pub fn save_short_ids(short_ids: &mut ShortIdIndex, project: &Project) {
    if let Err(e) = short_ids.save(project) {
        eprintln!(
            "{} Could not save short ID index: {}",
            style("!").yellow(),
            e
        );
    }
}

/// Delete an entity file after checking for incoming links.
///
/// Entries referenced by other entries are protected unless `force` is
/// set. Returns the path of the deleted file.
pub fn delete_entity_file(
    project: &Project,
    entity_id: &str,
    file_path: &PathBuf,
    force: bool,
) -> Result<PathBuf> {
    if !force {
        if let Ok(cache) = EntityCache::open(project) {
            let incoming = cache.get_links_to(entity_id);
            if !incoming.is_empty() {
                let linked_ids: Vec<String> =
                    incoming.iter().map(|l| l.source_id.clone()).collect();
                return Err(miette::miette!(
                    "Entry '{}' is referenced by {} other entries: {}\nUse --force to delete anyway, or remove the links first.",
                    entity_id,
                    incoming.len(),
                    linked_ids.join(", ")
                ));
            }
        }
    }

    fs::remove_file(file_path).into_diagnostic()?;
    Ok(file_path.clone())
}
