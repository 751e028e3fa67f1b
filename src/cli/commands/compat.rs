//! `osb compat` command - Compatibility report for a proprietary app
//!
//! For each open-source alternative of a proprietary application, shows
//! which declared capabilities the alternative implements and the
//! percentage score.

use console::style;
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::{open_project, resolve_entity};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::compat::CompatReport;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::loader;
use crate::entities::{Alternative, Capability, ProprietaryApp};

#[derive(clap::Args, Debug)]
pub struct CompatArgs {
    /// Proprietary application (ID, short ID, or slug)
    pub app: String,

    /// Narrow the report to one alternative (ID, short ID, or slug)
    #[arg(long, short = 'a')]
    pub alternative: Option<String>,

    /// List the missing capabilities per alternative
    #[arg(long)]
    pub missing: bool,

    /// Order alternatives by score, then stars (default: link order)
    #[arg(long)]
    pub rank: bool,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

struct ScoredAlternative {
    alt: Alternative,
    report: CompatReport,
}

pub fn run(args: CompatArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (_, app) =
        resolve_entity::<ProprietaryApp>(&project, EntityPrefix::App, &args.app, "application")?;

    // Resolve the app's alternatives in link order
    let alt_dir = project.entity_dir(EntityPrefix::Oss);
    let mut alternatives: Vec<Alternative> = Vec::new();

    if let Some(ref reference) = args.alternative {
        let (_, alt) =
            resolve_entity::<Alternative>(&project, EntityPrefix::Oss, reference, "alternative")?;
        alternatives.push(alt);
    } else {
        for alt_id in &app.links.alternatives {
            if let Some((_, alt)) =
                loader::load_entity::<Alternative>(&alt_dir, &alt_id.to_string())?
            {
                alternatives.push(alt);
            }
        }
    }

    if alternatives.is_empty() {
        println!(
            "No alternatives linked to {}. Link one with {}.",
            style(&app.name).cyan(),
            style(format!("osb link <alt> {}", app.slug)).yellow()
        );
        return Ok(());
    }

    // Capability names for the missing/matched listings
    let caps: Vec<Capability> = loader::load_all(&project.entity_dir(EntityPrefix::Cap))?;
    let cap_names: HashMap<EntityId, String> =
        caps.into_iter().map(|c| (c.id, c.name)).collect();

    let mut scored: Vec<ScoredAlternative> = alternatives
        .into_iter()
        .map(|alt| {
            let report = CompatReport::compute(&app, &alt);
            ScoredAlternative { alt, report }
        })
        .collect();

    if args.rank {
        scored.sort_by(|a, b| {
            b.report
                .score
                .cmp(&a.report.score)
                .then(b.alt.github_stars.cmp(&a.alt.github_stars))
        });
    }

    if global.format == OutputFormat::Json {
        let json: Vec<serde_json::Value> = scored
            .iter()
            .map(|s| {
                serde_json::json!({
                    "alternative": s.alt.name,
                    "slug": s.alt.slug,
                    "score": s.report.score,
                    "matched": s.report.matched.len(),
                    "total": s.report.total,
                    "missing": s.report.missing.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        return Ok(());
    }

    // Build the report
    let mut output = String::new();
    output.push_str(&format!(
        "# Compatibility: {} ({} declared capabilities)\n\n",
        app.name,
        app.declared_capability_ids().len()
    ));

    let mut builder = Builder::default();
    builder.push_record(["ALTERNATIVE", "STARS", "LICENSE", "MATCHED", "SCORE"]);

    for s in &scored {
        builder.push_record([
            s.alt.name.clone(),
            s.alt
                .github_stars
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            s.alt.license.clone().unwrap_or_else(|| "-".to_string()),
            format!("{}/{}", s.report.matched.len(), s.report.total),
            format!("{}%", s.report.score),
        ]);
    }
    output.push_str(&builder.build().with(Style::markdown()).to_string());
    output.push('\n');

    if args.missing {
        for s in &scored {
            if s.report.missing.is_empty() {
                continue;
            }
            output.push_str(&format!("\n## Missing in {}\n\n", s.alt.name));
            for id in &s.report.missing {
                let name = cap_names
                    .get(id)
                    .map(String::as_str)
                    .unwrap_or("(unknown capability)");
                output.push_str(&format!("- {} ({})\n", name, id));
            }
        }
    }

    // Summary
    let full = scored.iter().filter(|s| s.report.is_full_match()).count();
    output.push_str(&format!(
        "\n## Summary\n\n- **Alternatives compared:** {}\n- **Full matches (100%):** {}\n",
        scored.len(),
        full
    ));
    if let Some(best) = scored.iter().max_by_key(|s| s.report.score) {
        output.push_str(&format!(
            "- **Best match:** {} ({}%)\n",
            best.alt.name, best.report.score
        ));
    }

    match args.output {
        Some(path) => {
            std::fs::write(&path, &output).into_diagnostic()?;
            println!(
                "{} Wrote compatibility report to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => print!("{}", output),
    }

    Ok(())
}
