//! `osb search` command - Search across all entity types
//!
//! Unified substring search over applications, alternatives, and
//! capabilities, served from the entity cache.

use clap::ValueEnum;
use console::style;
use miette::Result;

use crate::cli::commands::utils::{open_project, save_short_ids};
use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::cache::EntityCache;
use crate::core::shortid::ShortIdIndex;

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Search term (matches name, slug, and description)
    pub query: String,

    /// Filter by entity type(s)
    #[arg(long, short = 't', value_delimiter = ',')]
    pub entity_type: Option<Vec<EntityTypeFilter>>,

    /// Filter by capability category
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by author
    #[arg(long, short = 'a')]
    pub author: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'n', default_value = "50")]
    pub limit: usize,

    /// Show only count
    #[arg(long)]
    pub count: bool,

    /// Case-sensitive search
    #[arg(long, short = 'c')]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum EntityTypeFilter {
    App,
    Alt,
    Cap,
}

impl EntityTypeFilter {
    fn as_prefix(&self) -> &'static str {
        match self {
            EntityTypeFilter::App => "APP",
            EntityTypeFilter::Alt => "OSS",
            EntityTypeFilter::Cap => "CAP",
        }
    }
}

/// Run the search command
pub fn run(args: SearchArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;

    let cache = EntityCache::open(&project)?;

    let type_prefixes: Option<Vec<&str>> = args
        .entity_type
        .as_ref()
        .map(|types| types.iter().map(|t| t.as_prefix()).collect());

    let results = cache.search_all(
        &args.query,
        type_prefixes.as_deref(),
        args.category.as_deref(),
        args.author.as_deref(),
        args.case_sensitive,
        args.limit,
    );

    if args.count {
        println!("{}", results.len());
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for '{}'.", style(&args.query).yellow());
        return Ok(());
    }

    let mut short_ids = ShortIdIndex::load(&project);
    short_ids.ensure_all(results.iter().map(|r| r.id.clone()));
    save_short_ids(&mut short_ids, &project);

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json_results: Vec<serde_json::Value> = results
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id,
                        "entity_type": r.prefix,
                        "name": r.name,
                        "slug": r.slug,
                        "author": r.author,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json_results).unwrap());
        }
        OutputFormat::Yaml => {
            let yaml_results: Vec<serde_json::Value> = results
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id,
                        "entity_type": r.prefix,
                        "name": r.name,
                        "slug": r.slug,
                        "author": r.author,
                    })
                })
                .collect();
            println!("{}", serde_yml::to_string(&yaml_results).unwrap());
        }
        OutputFormat::Csv => {
            println!("short_id,id,type,name,slug");
            for result in &results {
                let short_id = short_ids.get_short_id(&result.id).unwrap_or_default();
                println!(
                    "{},{},{},{},{}",
                    short_id,
                    result.id,
                    result.prefix,
                    escape_csv(&result.name),
                    result.slug
                );
            }
        }
        OutputFormat::Md => {
            println!("| Short | ID | Type | Name | Slug |");
            println!("|---|---|---|---|---|");
            for result in &results {
                let short_id = short_ids.get_short_id(&result.id).unwrap_or_default();
                println!(
                    "| {} | {} | {} | {} | {} |",
                    short_id,
                    truncate_str(&result.id, 15),
                    result.prefix,
                    result.name,
                    result.slug
                );
            }
        }
        OutputFormat::Id => {
            for result in &results {
                println!("{}", result.id);
            }
        }
        OutputFormat::ShortId => {
            for result in &results {
                let short_id = short_ids.get_short_id(&result.id).unwrap_or_default();
                println!("{}", short_id);
            }
        }
        OutputFormat::Path => {
            for result in &results {
                println!("{}", result.file_path);
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{} results for '{}':",
                style(results.len()).cyan(),
                style(&args.query).yellow()
            );
            println!();

            // Header
            println!(
                "{:<8} {:<17} {:<5} {:<30} {:<26}",
                style("SHORT").bold().dim(),
                style("ID").bold(),
                style("TYPE").bold(),
                style("NAME").bold(),
                style("SLUG").bold()
            );
            println!("{}", "-".repeat(90));

            for result in &results {
                let short_id = short_ids.get_short_id(&result.id).unwrap_or_default();
                let type_styled = match result.prefix.as_str() {
                    "APP" => style(&result.prefix).blue(),
                    "OSS" => style(&result.prefix).green(),
                    "CAP" => style(&result.prefix).yellow(),
                    _ => style(&result.prefix).white(),
                };

                println!(
                    "{:<8} {:<17} {:<5} {:<30} {:<26}",
                    style(&short_id).cyan(),
                    truncate_str(&result.id, 15),
                    type_styled,
                    truncate_str(&result.name, 28),
                    truncate_str(&result.slug, 24)
                );
            }

            println!();
            println!(
                "Use {} to show entry details.",
                style("osb <app|alt|cap> show <SHORT>").cyan()
            );
        }
    }

    Ok(())
}
