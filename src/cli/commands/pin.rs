//! `osb pin` command - Pin capabilities for the build prompt
//!
//! Pins are the working set behind `osb prompt`. Pinning an
//! already-pinned capability unpins it (toggle), and the set persists in
//! `.osb/pinned_capabilities.json` across invocations.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::{open_project, resolve_entity};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::EntityPrefix;
use crate::core::pins::{composite_id, PinStore, PinToggle, SelectedCapability};
use crate::core::project::Project;
use crate::entities::{Alternative, Capability};

#[derive(Subcommand, Debug)]
pub enum PinCommands {
    /// Pin a capability from an alternative (pins toggle: repeat to unpin)
    Add(AddArgs),

    /// Unpin a capability (no-op if it isn't pinned)
    Rm(RmArgs),

    /// List pinned capabilities in pin order
    List(ListArgs),

    /// Remove every pin
    Clear(ClearArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Alternative ID, short ID (OSS@N), or slug
    pub alt: String,

    /// Capability ID, short ID (CAP@N), or slug (omit with --all)
    pub cap: Option<String>,

    /// Pin every active capability implementation of the alternative
    #[arg(long)]
    pub all: bool,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Alternative ID, short ID (OSS@N), or slug
    pub alt: String,

    /// Capability ID, short ID (CAP@N), or slug
    pub cap: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Suppress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Run a pin subcommand
pub fn run(cmd: PinCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PinCommands::Add(args) => run_add(args, global),
        PinCommands::Rm(args) => run_rm(args, global),
        PinCommands::List(args) => run_list(args, global),
        PinCommands::Clear(args) => run_clear(args, global),
    }
}

/// Load the store, surfacing the degraded-load warning once
fn load_store(project: &Project) -> PinStore {
    let store = PinStore::load(project);
    if let Some(reason) = store.degraded() {
        eprintln!("{} {}", style("!").yellow(), style(reason).dim());
    }
    store
}

/// Persist the store; persistence failure degrades with a warning, the
/// in-memory result of the command still stands
fn save_store(store: &PinStore, project: &Project) {
    if let Err(e) = store.save(project) {
        eprintln!(
            "{} {} (pins will not survive this session)",
            style("!").yellow(),
            style(e.to_string()).dim()
        );
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (_, alt) =
        resolve_entity::<Alternative>(&project, EntityPrefix::Oss, &args.alt, "alternative")?;

    let mut store = load_store(&project);

    if args.all {
        let cap_dir = project.entity_dir(EntityPrefix::Cap);
        let mut pinned = 0;
        for implementation in alt.active_implementations() {
            let Some((_, cap)) = crate::core::loader::load_entity::<Capability>(
                &cap_dir,
                &implementation.capability.to_string(),
            )?
            else {
                continue;
            };

            let selected = SelectedCapability::from_implementation(&alt, implementation, &cap);
            if !store.is_selected(&selected.id) {
                store.toggle(selected);
                pinned += 1;
            }
        }
        save_store(&store, &project);

        println!(
            "{} Pinned {} capabilities from {} ({} total)",
            style("✓").green(),
            pinned,
            style(&alt.name).cyan(),
            store.len()
        );
        return Ok(());
    }

    let cap_ref = args
        .cap
        .ok_or_else(|| miette::miette!("Capability argument is required (or use --all)"))?;
    let (_, cap) = resolve_entity::<Capability>(&project, EntityPrefix::Cap, &cap_ref, "capability")?;

    let implementation = alt.implementation_for(&cap.id).ok_or_else(|| {
        miette::miette!(
            "{} does not implement {}. Record it first with 'osb alt implement {} {}'.",
            alt.name,
            cap.name,
            alt.slug,
            cap.slug
        )
    })?;

    if !implementation.is_active {
        return Err(miette::miette!(
            "{}'s {} implementation is inactive and cannot be pinned",
            alt.name,
            cap.name
        ));
    }

    let selected = SelectedCapability::from_implementation(&alt, implementation, &cap);
    let toggled = store.toggle(selected);
    save_store(&store, &project);

    match toggled {
        PinToggle::Added => println!(
            "{} Pinned {} from {} ({} pinned)",
            style("✓").green(),
            style(&cap.name).yellow(),
            style(&alt.name).cyan(),
            store.len()
        ),
        PinToggle::Removed => println!(
            "{} Unpinned {} from {} ({} pinned)",
            style("✓").green(),
            style(&cap.name).yellow(),
            style(&alt.name).cyan(),
            store.len()
        ),
    }

    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (_, alt) =
        resolve_entity::<Alternative>(&project, EntityPrefix::Oss, &args.alt, "alternative")?;
    let (_, cap) =
        resolve_entity::<Capability>(&project, EntityPrefix::Cap, &args.cap, "capability")?;

    let mut store = load_store(&project);
    let id = composite_id(&alt.id.to_string(), &cap.id.to_string());

    if store.remove(&id) {
        save_store(&store, &project);
        println!(
            "{} Unpinned {} from {} ({} pinned)",
            style("✓").green(),
            style(&cap.name).yellow(),
            style(&alt.name).cyan(),
            store.len()
        );
    } else {
        println!(
            "{} {} from {} was not pinned",
            style("!").yellow(),
            style(&cap.name).yellow(),
            style(&alt.name).cyan()
        );
    }

    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let store = load_store(&project);

    if args.count {
        println!("{}", store.len());
        return Ok(());
    }

    if store.is_empty() {
        println!(
            "No pinned capabilities. Pin one with {}.",
            style("osb pin add <alt> <capability>").yellow()
        );
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(store.entries()).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!(
                "{}",
                serde_yml::to_string(&store.entries()).into_diagnostic()?
            );
        }
        OutputFormat::Id => {
            for pin in store.entries() {
                println!("{}", pin.id);
            }
        }
        _ => {
            println!(
                "{} pinned capabilit{}:",
                style(store.len()).cyan(),
                if store.len() == 1 { "y" } else { "ies" }
            );
            println!();
            for (index, pin) in store.entries().iter().enumerate() {
                println!(
                    "  {}. {} {} {}",
                    index + 1,
                    style(&pin.name).yellow(),
                    style("from").dim(),
                    style(&pin.tool_name).cyan()
                );
                if let Some(ref category) = pin.category {
                    println!("     {}", style(category.replace('_', " ")).dim());
                }
            }
            println!();
            println!(
                "Generate the build prompt with {}.",
                style("osb prompt").yellow()
            );
        }
    }

    Ok(())
}

fn run_clear(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let mut store = load_store(&project);
    let removed = store.len();
    store.clear();
    save_store(&store, &project);

    if !args.quiet {
        println!(
            "{} Cleared {} pinned capabilit{}",
            style("✓").green(),
            removed,
            if removed == 1 { "y" } else { "ies" }
        );
    }

    Ok(())
}
