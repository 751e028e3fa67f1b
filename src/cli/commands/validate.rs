//! `osb validate` command - Validate catalog files and referential integrity

use console::style;
use miette::Result;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

use crate::core::identity::EntityPrefix;
use crate::core::project::Project;
use crate::core::slug::is_valid_slug;
use crate::entities::{Alternative, Capability, ProprietaryApp};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Strict mode - warnings become errors
    #[arg(long)]
    pub strict: bool,

    /// Show summary only, don't show individual findings
    #[arg(long)]
    pub summary: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_failed: usize,
    total_errors: usize,
    total_warnings: usize,
}

/// A finding for one file
struct Finding {
    path: PathBuf,
    message: String,
    is_error: bool,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;

    let mut stats = ValidationStats::default();
    let mut findings: Vec<Finding> = Vec::new();

    // First pass: parse everything and collect the ID universe
    let mut known_ids: HashMap<String, EntityPrefix> = HashMap::new();
    let mut slugs_seen: HashMap<(EntityPrefix, String), PathBuf> = HashMap::new();

    let mut apps: Vec<(PathBuf, ProprietaryApp)> = Vec::new();
    let mut alts: Vec<(PathBuf, Alternative)> = Vec::new();
    let mut caps: Vec<(PathBuf, Capability)> = Vec::new();

    for prefix in EntityPrefix::all() {
        for path in project.iter_entity_files(*prefix) {
            stats.files_checked += 1;
            let content = match fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    findings.push(Finding {
                        path: path.clone(),
                        message: format!("unreadable file: {}", e),
                        is_error: true,
                    });
                    stats.files_failed += 1;
                    continue;
                }
            };

            let parse_error = |e: String| Finding {
                path: path.clone(),
                message: format!("does not parse: {}", e),
                is_error: true,
            };

            match prefix {
                EntityPrefix::App => match serde_yml::from_str::<ProprietaryApp>(&content) {
                    Ok(app) => {
                        known_ids.insert(app.id.to_string(), *prefix);
                        apps.push((path, app));
                    }
                    Err(e) => {
                        findings.push(parse_error(e.to_string()));
                        stats.files_failed += 1;
                    }
                },
                EntityPrefix::Oss => match serde_yml::from_str::<Alternative>(&content) {
                    Ok(alt) => {
                        known_ids.insert(alt.id.to_string(), *prefix);
                        alts.push((path, alt));
                    }
                    Err(e) => {
                        findings.push(parse_error(e.to_string()));
                        stats.files_failed += 1;
                    }
                },
                EntityPrefix::Cap => match serde_yml::from_str::<Capability>(&content) {
                    Ok(cap) => {
                        known_ids.insert(cap.id.to_string(), *prefix);
                        caps.push((path, cap));
                    }
                    Err(e) => {
                        findings.push(parse_error(e.to_string()));
                        stats.files_failed += 1;
                    }
                },
            }
        }
    }

    // Slug checks: well-formed and unique per entity type
    for (path, app) in &apps {
        check_slug(&mut findings, &mut slugs_seen, EntityPrefix::App, &app.slug, path);
    }
    for (path, alt) in &alts {
        check_slug(&mut findings, &mut slugs_seen, EntityPrefix::Oss, &alt.slug, path);
    }
    for (path, cap) in &caps {
        check_slug(&mut findings, &mut slugs_seen, EntityPrefix::Cap, &cap.slug, path);
    }

    // Referential integrity: links point at existing entities of the right type
    for (path, app) in &apps {
        for cap_id in &app.links.capabilities {
            check_ref(
                &mut findings,
                &known_ids,
                path,
                "links.capabilities",
                &cap_id.to_string(),
                EntityPrefix::Cap,
            );
        }
        for alt_id in &app.links.alternatives {
            check_ref(
                &mut findings,
                &known_ids,
                path,
                "links.alternatives",
                &alt_id.to_string(),
                EntityPrefix::Oss,
            );
        }
    }

    for (path, alt) in &alts {
        for app_id in &alt.links.alternative_to {
            check_ref(
                &mut findings,
                &known_ids,
                path,
                "links.alternative_to",
                &app_id.to_string(),
                EntityPrefix::App,
            );
        }

        let mut seen_caps: HashSet<String> = HashSet::new();
        for implementation in &alt.implementations {
            let cap_id = implementation.capability.to_string();
            check_ref(
                &mut findings,
                &known_ids,
                path,
                "implementations.capability",
                &cap_id,
                EntityPrefix::Cap,
            );
            if !seen_caps.insert(cap_id.clone()) {
                findings.push(Finding {
                    path: path.clone(),
                    message: format!("capability {} implemented more than once", cap_id),
                    is_error: true,
                });
            }
        }

        if alt.repository_url.is_none() {
            findings.push(Finding {
                path: path.clone(),
                message: "no repository_url - prompt generation will fall back to a search URL"
                    .to_string(),
                is_error: false,
            });
        }
    }

    // Count and report
    for finding in &findings {
        if finding.is_error {
            stats.total_errors += 1;
        } else {
            stats.total_warnings += 1;
        }
    }

    if !args.summary {
        for finding in &findings {
            let marker = if finding.is_error {
                style("✗").red()
            } else {
                style("!").yellow()
            };
            println!(
                "{} {}: {}",
                marker,
                style(finding.path.display()).dim(),
                finding.message
            );
        }
        if !findings.is_empty() {
            println!();
        }
    }

    println!(
        "Checked {} file(s) ({} unparseable): {} error(s), {} warning(s)",
        stats.files_checked, stats.files_failed, stats.total_errors, stats.total_warnings
    );

    let failed = stats.total_errors > 0 || (args.strict && stats.total_warnings > 0);
    if failed {
        Err(miette::miette!("validation failed"))
    } else {
        println!("{} Catalog is valid", style("✓").green());
        Ok(())
    }
}

fn check_slug(
    findings: &mut Vec<Finding>,
    slugs_seen: &mut HashMap<(EntityPrefix, String), PathBuf>,
    prefix: EntityPrefix,
    slug: &str,
    path: &PathBuf,
) {
    if !is_valid_slug(slug) {
        findings.push(Finding {
            path: path.clone(),
            message: format!(
                "slug '{}' is not lowercase-hyphenated (expected '{}')",
                slug,
                crate::core::slug::slugify(slug)
            ),
            is_error: true,
        });
    }
    if let Some(existing) = slugs_seen.insert((prefix, slug.to_string()), path.clone()) {
        findings.push(Finding {
            path: path.clone(),
            message: format!(
                "duplicate slug '{}' (also used by {})",
                slug,
                existing.display()
            ),
            is_error: true,
        });
    }
}

fn check_ref(
    findings: &mut Vec<Finding>,
    known_ids: &HashMap<String, EntityPrefix>,
    path: &PathBuf,
    field: &str,
    target: &str,
    expected: EntityPrefix,
) {
    match known_ids.get(target) {
        Some(prefix) if *prefix == expected => {}
        Some(prefix) => findings.push(Finding {
            path: path.clone(),
            message: format!(
                "{} references {} which is a {} (expected {})",
                field, target, prefix, expected
            ),
            is_error: true,
        }),
        None => findings.push(Finding {
            path: path.clone(),
            message: format!("{} references missing entry {}", field, target),
            is_error: true,
        }),
    }
}
