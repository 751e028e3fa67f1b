//! `osb import` command - Bulk-import catalog entries from CSV

use clap::ValueEnum;
use console::style;
use csv::{ReaderBuilder, StringRecord};
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use crate::core::entity::{AltStatus, Complexity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::project::Project;
use crate::core::Config;
use crate::entities::{Alternative, Capability, ProprietaryApp};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Entity type to import
    #[arg(value_enum)]
    pub entity_type: ImportType,

    /// CSV file to import (omit with --template)
    #[arg(long, short = 'c')]
    pub csv: Option<PathBuf>,

    /// Print a CSV template for the entity type and exit
    #[arg(long)]
    pub template: bool,

    /// Parse and report without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Continue past rows that fail to parse
    #[arg(long)]
    pub skip_errors: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ImportType {
    App,
    Alt,
    Cap,
}

/// Import statistics
#[derive(Default)]
struct ImportStats {
    rows_processed: usize,
    entities_created: usize,
    errors: usize,
    skipped: usize,
}

pub fn run(args: ImportArgs) -> Result<()> {
    if args.template {
        let (headers, example) = csv_template(args.entity_type);
        println!("{}", headers.join(","));
        println!("{}", example.join(","));
        return Ok(());
    }

    let csv_path = args
        .csv
        .as_ref()
        .ok_or_else(|| miette::miette!("--csv <file> is required (or use --template)"))?;

    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let author = config.author();

    let file = File::open(csv_path).into_diagnostic()?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = rdr.headers().into_diagnostic()?.clone();
    let header_map = build_header_map(&headers);

    let mut stats = ImportStats::default();

    for (row_idx, result) in rdr.records().enumerate() {
        let row_num = row_idx + 2;
        stats.rows_processed += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!(
                    "{} Row {}: CSV parse error: {}",
                    style("✗").red(),
                    row_num,
                    e
                );
                stats.errors += 1;
                if !args.skip_errors {
                    return Err(miette::miette!("CSV parse error at row {}: {}", row_num, e));
                }
                continue;
            }
        };

        let Some(name) = get_field(&record, &header_map, "name") else {
            eprintln!(
                "{} Row {}: missing 'name', skipped",
                style("!").yellow(),
                row_num
            );
            stats.skipped += 1;
            continue;
        };

        let import_result = match args.entity_type {
            ImportType::App => import_app(&project, &record, &header_map, &name, &author, args.dry_run),
            ImportType::Alt => import_alt(&project, &record, &header_map, &name, &author, args.dry_run),
            ImportType::Cap => import_cap(&project, &record, &header_map, &name, &author, args.dry_run),
        };

        match import_result {
            Ok(()) => stats.entities_created += 1,
            Err(e) => {
                eprintln!("{} Row {} ({}): {}", style("✗").red(), row_num, name, e);
                stats.errors += 1;
                if !args.skip_errors {
                    return Err(miette::miette!("import failed at row {}: {}", row_num, e));
                }
            }
        }
    }

    let verb = if args.dry_run { "Would import" } else { "Imported" };
    println!(
        "{} {} {} of {} row(s) ({} skipped, {} error(s))",
        style("✓").green(),
        verb,
        stats.entities_created,
        stats.rows_processed,
        stats.skipped,
        stats.errors
    );

    Ok(())
}

fn import_app(
    project: &Project,
    record: &StringRecord,
    headers: &HashMap<String, usize>,
    name: &str,
    author: &str,
    dry_run: bool,
) -> Result<()> {
    let mut app = ProprietaryApp::new(name.to_string(), author.to_string());
    app.description = get_field(record, headers, "description");
    app.website_url = get_field(record, headers, "website_url");
    app.simple_icon_slug = get_field(record, headers, "icon_slug");
    app.simple_icon_color = get_field(record, headers, "icon_color");

    write_entry(project, EntityPrefix::App, &app.id, &app, name, dry_run)
}

fn import_alt(
    project: &Project,
    record: &StringRecord,
    headers: &HashMap<String, usize>,
    name: &str,
    author: &str,
    dry_run: bool,
) -> Result<()> {
    let mut alt = Alternative::new(name.to_string(), author.to_string());
    alt.description = get_field(record, headers, "description");
    alt.repository_url = get_field(record, headers, "repository_url");
    alt.website_url = get_field(record, headers, "website_url");
    alt.license = get_field(record, headers, "license");
    alt.simple_icon_slug = get_field(record, headers, "icon_slug");
    alt.simple_icon_color = get_field(record, headers, "icon_color");

    if let Some(stars) = get_field(record, headers, "stars") {
        alt.github_stars = Some(stars.parse().map_err(|_| {
            miette::miette!("invalid stars value '{}'", stars)
        })?);
    }
    if let Some(forks) = get_field(record, headers, "forks") {
        alt.github_forks = Some(forks.parse().map_err(|_| {
            miette::miette!("invalid forks value '{}'", forks)
        })?);
    }
    if let Some(status) = get_field(record, headers, "status") {
        alt.status = status
            .parse::<AltStatus>()
            .map_err(|e| miette::miette!("{}", e))?;
    }

    write_entry(project, EntityPrefix::Oss, &alt.id, &alt, name, dry_run)
}

fn import_cap(
    project: &Project,
    record: &StringRecord,
    headers: &HashMap<String, usize>,
    name: &str,
    author: &str,
    dry_run: bool,
) -> Result<()> {
    let mut cap = Capability::new(name.to_string(), author.to_string());
    cap.description = get_field(record, headers, "description");
    cap.category = get_field(record, headers, "category");

    if let Some(complexity) = get_field(record, headers, "complexity") {
        cap.complexity = complexity
            .parse::<Complexity>()
            .map_err(|e| miette::miette!("{}", e))?;
    }

    write_entry(project, EntityPrefix::Cap, &cap.id, &cap, name, dry_run)
}

fn write_entry<T: serde::Serialize>(
    project: &Project,
    prefix: EntityPrefix,
    id: &EntityId,
    entity: &T,
    name: &str,
    dry_run: bool,
) -> Result<()> {
    let path = project.entity_path(prefix, id);

    if dry_run {
        println!(
            "{} {} -> {}",
            style("→").blue(),
            name,
            style(path.display()).dim()
        );
        return Ok(());
    }

    let yaml = serde_yml::to_string(entity).into_diagnostic()?;
    fs::write(&path, yaml).into_diagnostic()?;
    Ok(())
}

/// Build a map from header name to column index
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase().trim().to_string(), i))
        .collect()
}

/// Get a field value from a CSV record
fn get_field(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<String> {
    header_map
        .get(field)
        .and_then(|&idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn csv_template(entity_type: ImportType) -> (Vec<&'static str>, Vec<&'static str>) {
    match entity_type {
        ImportType::App => (
            vec!["name", "description", "website_url", "icon_slug", "icon_color"],
            vec![
                "Shopify",
                "E-commerce platform",
                "https://shopify.com",
                "shopify",
                "#95BF47",
            ],
        ),
        ImportType::Alt => (
            vec![
                "name",
                "description",
                "repository_url",
                "website_url",
                "license",
                "stars",
                "forks",
                "status",
            ],
            vec![
                "Medusa",
                "Open source commerce",
                "https://github.com/medusajs/medusa",
                "https://medusajs.com",
                "MIT",
                "24000",
                "2400",
                "active",
            ],
        ),
        ImportType::Cap => (
            vec!["name", "description", "category", "complexity"],
            vec![
                "Product Management",
                "Catalog and product CRUD",
                "e_commerce",
                "intermediate",
            ],
        ),
    }
}
