//! `osb status` command - Catalog status dashboard
//!
//! Entity counts, the most-covered proprietary apps (the landing page's
//! "popular" ordering), the most-starred alternatives, and the pin count.

use console::style;
use miette::Result;

use crate::cli::commands::utils::open_project;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::cache::EntityCache;
use crate::core::identity::EntityPrefix;
use crate::core::pins::PinStore;

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// How many entries to show per ranking
    #[arg(long, short = 'n', default_value = "5")]
    pub top: usize,
}

pub fn run(args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let cache = EntityCache::open(&project)?;
    let store = PinStore::load(&project);

    let app_count = cache.count_by_prefix(EntityPrefix::App);
    let alt_count = cache.count_by_prefix(EntityPrefix::Oss);
    let cap_count = cache.count_by_prefix(EntityPrefix::Cap);

    if global.format == OutputFormat::Json {
        let json = serde_json::json!({
            "proprietary_applications": app_count,
            "alternatives": alt_count,
            "capabilities": cap_count,
            "pinned_capabilities": store.len(),
        });
        println!("{}", serde_json::to_string_pretty(&json).unwrap());
        return Ok(());
    }

    println!("{}", style("Catalog status").bold());
    println!("{}", style(project.root().display()).dim());
    println!();
    println!(
        "  {:<26} {}",
        "Proprietary applications:",
        style(app_count).cyan()
    );
    println!(
        "  {:<26} {}",
        "Open-source alternatives:",
        style(alt_count).cyan()
    );
    println!("  {:<26} {}", "Capabilities:", style(cap_count).cyan());
    println!(
        "  {:<26} {}",
        "Pinned for build:",
        style(store.len()).cyan()
    );

    // Popular apps: most alternatives first
    let mut apps = cache.list_by_prefix(EntityPrefix::App);
    if !apps.is_empty() {
        apps.sort_by_key(|a| std::cmp::Reverse(cache.alternatives_count(&a.id)));
        println!();
        println!("{}", style("Most alternatives").bold());
        for app in apps.iter().take(args.top) {
            let count = cache.alternatives_count(&app.id);
            if count == 0 {
                continue;
            }
            println!(
                "  {:<28} {} alternative{}",
                app.name,
                style(count).cyan(),
                if count == 1 { "" } else { "s" }
            );
        }
    }

    // Top alternatives by stars
    let mut alts = cache.list_by_prefix(EntityPrefix::Oss);
    alts.retain(|a| a.stars.is_some());
    if !alts.is_empty() {
        alts.sort_by_key(|a| std::cmp::Reverse(a.stars.unwrap_or(0)));
        println!();
        println!("{}", style("Most starred").bold());
        for alt in alts.iter().take(args.top) {
            println!(
                "  {:<28} {} {}",
                alt.name,
                style(alt.stars.unwrap_or(0)).cyan(),
                style("stars").dim()
            );
        }
    }

    if app_count + alt_count + cap_count == 0 {
        println!();
        println!(
            "Empty catalog. Add your first entry with {}.",
            style("osb app new").yellow()
        );
    }

    Ok(())
}
