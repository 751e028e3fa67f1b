//! `osb prompt` command - Generate the AI build prompt
//!
//! Serializes the chosen starter template plus the pinned capabilities
//! into a copy-ready prompt. Writing it to the clipboard is the user's
//! composition (`osb prompt | pbcopy`).

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::utils::open_project;
use crate::cli::GlobalOpts;
use crate::core::pins::PinStore;
use crate::core::prompt::{generate_prompt, StarterTemplate};

#[derive(clap::Args, Debug)]
pub struct PromptArgs {
    /// Starter template (full-stack, openfront, openship, byos)
    #[arg(long, short = 't', default_value = "full-stack")]
    pub template: String,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// List the available starter templates
    #[arg(long)]
    pub list_templates: bool,

    /// Print the starter's git clone command instead of the prompt
    #[arg(long)]
    pub starter_clone: bool,
}

pub fn run(args: PromptArgs, global: &GlobalOpts) -> Result<()> {
    if args.list_templates {
        for template in StarterTemplate::all() {
            println!(
                "{:<12} {} - {}",
                style(template.id()).cyan(),
                style(template.display_name()).white(),
                style(template.blurb()).dim()
            );
        }
        return Ok(());
    }

    let template: StarterTemplate = args
        .template
        .parse()
        .map_err(|e: String| miette::miette!("{}", e))?;

    if args.starter_clone {
        match template.source_repo() {
            Some(repo) => {
                println!("git clone {}.git", repo);
                return Ok(());
            }
            None => {
                return Err(miette::miette!(
                    "'{}' has no starter repository to clone",
                    template.id()
                ));
            }
        }
    }

    let project = open_project(global)?;
    let store = PinStore::load(&project);
    if let Some(reason) = store.degraded() {
        eprintln!("{} {}", style("!").yellow(), style(reason).dim());
    }

    if store.is_empty() && !global.quiet {
        eprintln!(
            "{} No pinned capabilities - pin some with {} first",
            style("!").yellow(),
            style("osb pin add").cyan()
        );
    }

    let prompt = generate_prompt(template, store.entries());

    if prompt.is_empty() {
        // "Bring your own starter" with nothing pinned has nothing to say
        return Ok(());
    }

    match args.output {
        Some(path) => {
            std::fs::write(&path, &prompt).into_diagnostic()?;
            if !global.quiet {
                println!(
                    "{} Wrote prompt ({} capabilities) to {}",
                    style("✓").green(),
                    store.len(),
                    style(path.display()).cyan()
                );
            }
        }
        None => println!("{}", prompt),
    }

    Ok(())
}
