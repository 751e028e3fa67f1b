//! `osb cache` command - Entity cache management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;

use crate::core::cache::{cache_path, EntityCache};
use crate::core::identity::EntityPrefix;
use crate::core::project::Project;

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache status
    Status,

    /// Rebuild the cache from catalog files
    Rebuild,

    /// Delete the cache file (it is recreated on next use)
    Clear,
}

pub fn run(cmd: CacheCommands) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;

    match cmd {
        CacheCommands::Status => {
            let cache = EntityCache::open(&project)?;
            let path = cache_path(&project);
            let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

            println!("{}", style("Cache status").bold());
            println!("  Path:          {}", style(path.display()).dim());
            println!("  Size:          {} bytes", size);
            println!("  Entities:      {}", cache.total_entities());
            println!(
                "  Applications:  {}",
                cache.count_by_prefix(EntityPrefix::App)
            );
            println!(
                "  Alternatives:  {}",
                cache.count_by_prefix(EntityPrefix::Oss)
            );
            println!(
                "  Capabilities:  {}",
                cache.count_by_prefix(EntityPrefix::Cap)
            );
        }
        CacheCommands::Rebuild => {
            let mut cache = EntityCache::open(&project)?;
            cache.clear()?;
            let stats = cache.sync(&project)?;
            println!(
                "{} Rebuilt cache: {} added, {} removed",
                style("✓").green(),
                stats.added,
                stats.removed
            );
        }
        CacheCommands::Clear => {
            let path = cache_path(&project);
            if path.exists() {
                fs::remove_file(&path).into_diagnostic()?;
                println!("{} Deleted {}", style("✓").green(), style(path.display()).dim());
            } else {
                println!("No cache file to delete.");
            }
        }
    }

    Ok(())
}
