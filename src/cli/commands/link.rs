//! `osb link` command - Manage links between catalog entries

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::commands::utils::save_short_ids;
use crate::core::cache::EntityCache;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::links::{
    add_inferred_link, add_link_to_yaml, get_reciprocal_link_type, infer_link_type,
    remove_link_from_yaml,
};
use crate::core::loader;
use crate::core::project::Project;
use crate::core::shortid::ShortIdIndex;
use crate::entities::{Alternative, Capability, ProprietaryApp};

#[derive(Subcommand, Debug)]
pub enum LinkCommands {
    /// Link two entries (link type is inferred from the entity types)
    Add(AddArgs),

    /// Remove a link between two entries
    Rm(RmArgs),

    /// List an entry's links
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Source entry (ID, short ID, or slug)
    pub source: String,

    /// Target entry (ID, short ID, or slug)
    pub target: String,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Source entry (ID, short ID, or slug)
    pub source: String,

    /// Target entry (ID, short ID, or slug)
    pub target: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Entry to list links for (ID, short ID, or slug)
    pub id: String,
}

/// A resolved entry: file path, prefix, full ID, and display name
struct Resolved {
    path: PathBuf,
    prefix: EntityPrefix,
    id: EntityId,
    name: String,
}

/// Resolve a reference against all three entity types
fn resolve_any(project: &Project, reference: &str) -> Result<Resolved> {
    let short_ids = ShortIdIndex::load(project);
    let resolved = short_ids
        .resolve(reference)
        .ok_or_else(|| miette::miette!("Unknown short ID '{}'", reference))?;

    if let Some((path, app)) =
        loader::load_by_ref::<ProprietaryApp>(&project.entity_dir(EntityPrefix::App), &resolved)?
    {
        return Ok(Resolved {
            path,
            prefix: EntityPrefix::App,
            id: app.id,
            name: app.name,
        });
    }
    if let Some((path, alt)) =
        loader::load_by_ref::<Alternative>(&project.entity_dir(EntityPrefix::Oss), &resolved)?
    {
        return Ok(Resolved {
            path,
            prefix: EntityPrefix::Oss,
            id: alt.id,
            name: alt.name,
        });
    }
    if let Some((path, cap)) =
        loader::load_by_ref::<Capability>(&project.entity_dir(EntityPrefix::Cap), &resolved)?
    {
        return Ok(Resolved {
            path,
            prefix: EntityPrefix::Cap,
            id: cap.id,
            name: cap.name,
        });
    }

    Err(miette::miette!("No entry found matching '{}'", reference))
}

/// Run a link subcommand
pub fn run(cmd: LinkCommands) -> Result<()> {
    match cmd {
        LinkCommands::Add(args) => run_add(args),
        LinkCommands::Rm(args) => run_rm(args),
        LinkCommands::List(args) => run_list(args),
    }
}

fn run_add(args: AddArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let source = resolve_any(&project, &args.source)?;
    let target = resolve_any(&project, &args.target)?;

    let link_type = match infer_link_type(source.prefix, target.prefix) {
        Some(t) => t,
        None if source.prefix == EntityPrefix::Oss && target.prefix == EntityPrefix::Cap => {
            return Err(miette::miette!(
                "Capability implementations carry metadata - use 'osb alt implement {} {}' instead",
                args.source,
                args.target
            ));
        }
        None => {
            return Err(miette::miette!(
                "Cannot link {} to {} - no link type exists for this combination",
                source.prefix,
                target.prefix
            ));
        }
    };

    add_inferred_link(
        &source.path,
        source.prefix,
        &target.id.to_string(),
        target.prefix,
    )
    .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} {} --[{}]--> {}",
        style("✓").green(),
        style(&source.name).cyan(),
        style(&link_type).yellow(),
        style(&target.name).cyan()
    );

    // Write the reciprocal where one exists
    if let Some(reciprocal) = get_reciprocal_link_type(&link_type, target.prefix) {
        let target_content = fs::read_to_string(&target.path).into_diagnostic()?;
        let target_updated =
            add_link_to_yaml(&target_content, &reciprocal, &source.id.to_string())
                .map_err(|e| miette::miette!("{}", e))?;
        fs::write(&target.path, target_updated).into_diagnostic()?;

        println!(
            "{} {} --[{}]--> {}",
            style("✓").green(),
            style(&target.name).cyan(),
            style(&reciprocal).yellow(),
            style(&source.name).cyan()
        );
    }

    let mut short_ids = ShortIdIndex::load(&project);
    short_ids.ensure_all([source.id.to_string(), target.id.to_string()]);
    save_short_ids(&mut short_ids, &project);

    Ok(())
}

fn run_rm(args: RmArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let source = resolve_any(&project, &args.source)?;
    let target = resolve_any(&project, &args.target)?;

    let link_type = infer_link_type(source.prefix, target.prefix).ok_or_else(|| {
        miette::miette!(
            "No link type exists between {} and {}",
            source.prefix,
            target.prefix
        )
    })?;

    let content = fs::read_to_string(&source.path).into_diagnostic()?;
    let updated = remove_link_from_yaml(&content, &link_type, &target.id.to_string())
        .map_err(|e| miette::miette!("{}", e))?;
    fs::write(&source.path, updated).into_diagnostic()?;

    // Drop the reciprocal too
    if let Some(reciprocal) = get_reciprocal_link_type(&link_type, target.prefix) {
        let target_content = fs::read_to_string(&target.path).into_diagnostic()?;
        let target_updated =
            remove_link_from_yaml(&target_content, &reciprocal, &source.id.to_string())
                .map_err(|e| miette::miette!("{}", e))?;
        fs::write(&target.path, target_updated).into_diagnostic()?;
    }

    println!(
        "{} Unlinked {} from {}",
        style("✓").green(),
        style(&source.name).cyan(),
        style(&target.name).cyan()
    );

    Ok(())
}

fn run_list(args: ListArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let entry = resolve_any(&project, &args.id)?;

    let content = fs::read_to_string(&entry.path).into_diagnostic()?;
    let value: serde_yml::Value = serde_yml::from_str(&content).into_diagnostic()?;

    let cache = EntityCache::open(&project).ok();

    println!(
        "Links for {} ({})",
        style(&entry.name).cyan(),
        style(entry.id.to_string()).dim()
    );
    println!();

    let mut printed_any = false;

    if let Some(links) = value.get("links").and_then(|v| v.as_mapping()) {
        for (link_type, targets) in links {
            let Some(targets) = targets.as_sequence() else {
                continue;
            };
            let link_type = link_type.as_str();
            if targets.is_empty() {
                continue;
            }

            println!("  {}:", style(link_type).yellow());
            for target in targets.iter().filter_map(|t| t.as_str()) {
                let title = cache
                    .as_ref()
                    .and_then(|c| c.get_entity(target))
                    .map(|e| format!(" ({})", e.name))
                    .unwrap_or_default();
                println!("    {}{}", target, title);
            }
            printed_any = true;
        }
    }

    // Implementations are links in spirit - show them too
    if let Some(impls) = value.get("implementations").and_then(|v| v.as_sequence()) {
        if !impls.is_empty() {
            println!("  {}:", style("implements").yellow());
            for imp in impls {
                let Some(cap_id) = imp.get("capability").and_then(|v| v.as_str()) else {
                    continue;
                };
                let title = cache
                    .as_ref()
                    .and_then(|c| c.get_entity(cap_id))
                    .map(|e| format!(" ({})", e.name))
                    .unwrap_or_default();
                let inactive = imp
                    .get("is_active")
                    .and_then(|v| v.as_bool())
                    .is_some_and(|a| !a);
                let marker = if inactive { " [inactive]" } else { "" };
                println!("    {}{}{}", cap_id, title, style(marker).dim());
            }
            printed_any = true;
        }
    }

    if !printed_any {
        println!("  {}", style("(no links)").dim());
    }

    Ok(())
}
