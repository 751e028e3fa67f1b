//! `osb alt` command - Open-source alternative management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;

use crate::cli::commands::utils::{
    delete_entity_file, open_project, resolve_entity, save_short_ids,
};
use crate::cli::helpers::format_short_id;
use crate::cli::table::{ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::{AltStatus, Complexity};
use crate::core::filter::filter_by_query;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::loader;
use crate::core::shortid::ShortIdIndex;
use crate::core::Config;
use crate::entities::{Alternative, Capability, CapabilityImplementation};
use crate::schema::template::{TemplateContext, TemplateGenerator};

#[derive(Subcommand, Debug)]
pub enum AltCommands {
    /// List open-source alternatives
    List(ListArgs),

    /// Create a new alternative entry
    New(NewArgs),

    /// Show an alternative's details
    Show(ShowArgs),

    /// Edit an alternative in your editor
    Edit(EditArgs),

    /// Delete an alternative entry
    Delete(DeleteArgs),

    /// Record that an alternative implements a capability
    Implement(ImplementArgs),

    /// Remove a capability implementation record
    Unimplement(UnimplementArgs),
}

/// List column selection
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListColumn {
    Id,
    Name,
    Slug,
    Stars,
    License,
    Implementations,
    Status,
    Created,
}

impl std::fmt::Display for ListColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListColumn::Id => write!(f, "id"),
            ListColumn::Name => write!(f, "name"),
            ListColumn::Slug => write!(f, "slug"),
            ListColumn::Stars => write!(f, "stars"),
            ListColumn::License => write!(f, "license"),
            ListColumn::Implementations => write!(f, "implementations"),
            ListColumn::Status => write!(f, "status"),
            ListColumn::Created => write!(f, "created"),
        }
    }
}

/// Column definitions for alternative list output
const ALT_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 17),
    ColumnDef::new("name", "NAME", 22),
    ColumnDef::new("slug", "SLUG", 22),
    ColumnDef::new("stars", "STARS", 8),
    ColumnDef::new("license", "LICENSE", 12),
    ColumnDef::new("implementations", "IMPLS", 6),
    ColumnDef::new("status", "STATUS", 12),
    ColumnDef::new("created", "CREATED", 20),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by substring match on name, slug, and description
    #[arg(long, short = 'F')]
    pub filter: Option<String>,

    /// Filter by maintenance status
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Columns to display
    #[arg(long, value_delimiter = ',', default_values_t = vec![
        ListColumn::Id,
        ListColumn::Name,
        ListColumn::Stars,
        ListColumn::Implementations,
        ListColumn::Status,
    ])]
    pub columns: Vec<ListColumn>,

    /// Sort by field
    #[arg(long, default_value = "name")]
    pub sort: ListColumn,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Project name (required unless --interactive)
    #[arg(long, short = 'N')]
    pub name: Option<String>,

    /// Short description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Source repository URL
    #[arg(long)]
    pub repo: Option<String>,

    /// Project website URL
    #[arg(long)]
    pub website: Option<String>,

    /// Software license (e.g., "MIT")
    #[arg(long)]
    pub license: Option<String>,

    /// Maintenance status
    #[arg(long, default_value = "active")]
    pub status: String,

    /// Simple-icons slug for the logo
    #[arg(long)]
    pub icon: Option<String>,

    /// Brand color hex
    #[arg(long)]
    pub color: Option<String>,

    /// Interactive mode (prompt for fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Open in editor after creation
    #[arg(long, short = 'e')]
    pub edit: bool,

    /// Skip opening in editor
    #[arg(long)]
    pub no_edit: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Alternative ID, short ID (OSS@N), or slug
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Alternative ID, short ID (OSS@N), or slug
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Alternative ID, short ID (OSS@N), or slug
    pub id: String,

    /// Force deletion even if other entries reference this one
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct ImplementArgs {
    /// Alternative ID, short ID (OSS@N), or slug
    pub alt: String,

    /// Capability ID, short ID (CAP@N), or slug
    pub cap: String,

    /// Implementation notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Path into the repository where the implementation lives
    #[arg(long)]
    pub path: Option<String>,

    /// Documentation URL
    #[arg(long)]
    pub docs: Option<String>,

    /// Implementation complexity (basic/intermediate/advanced)
    #[arg(long)]
    pub complexity: Option<String>,

    /// Record the implementation as inactive
    #[arg(long)]
    pub inactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnimplementArgs {
    /// Alternative ID, short ID (OSS@N), or slug
    pub alt: String,

    /// Capability ID, short ID (CAP@N), or slug
    pub cap: String,
}

/// Run an alternative subcommand
pub fn run(cmd: AltCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        AltCommands::List(args) => run_list(args, global),
        AltCommands::New(args) => run_new(args, global),
        AltCommands::Show(args) => run_show(args, global),
        AltCommands::Edit(args) => run_edit(args, global),
        AltCommands::Delete(args) => run_delete(args, global),
        AltCommands::Implement(args) => run_implement(args, global),
        AltCommands::Unimplement(args) => run_unimplement(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let mut alts: Vec<Alternative> = loader::load_all(&project.entity_dir(EntityPrefix::Oss))?;

    if let Some(ref query) = args.filter {
        let filtered = filter_by_query(&alts, query, |a| {
            vec![Some(a.name.as_str()), Some(a.slug.as_str()), a.description.as_deref()]
        });
        alts = filtered.into_iter().cloned().collect();
    }

    if let Some(ref status) = args.status {
        let wanted: AltStatus = status.parse().map_err(|e| miette::miette!("{}", e))?;
        alts.retain(|a| a.status == wanted);
    }

    match args.sort {
        ListColumn::Id => alts.sort_by(|a, b| a.id.to_string().cmp(&b.id.to_string())),
        ListColumn::Name => alts.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        ListColumn::Slug => alts.sort_by(|a, b| a.slug.cmp(&b.slug)),
        ListColumn::Stars => alts.sort_by_key(|a| std::cmp::Reverse(a.github_stars.unwrap_or(0))),
        ListColumn::License => alts.sort_by(|a, b| a.license.cmp(&b.license)),
        ListColumn::Implementations => {
            alts.sort_by_key(|a| std::cmp::Reverse(a.active_implementations().count()))
        }
        ListColumn::Status => alts.sort_by(|a, b| a.status.cmp(&b.status)),
        ListColumn::Created => alts.sort_by(|a, b| a.created.cmp(&b.created)),
    }

    if args.reverse {
        alts.reverse();
    }

    if let Some(limit) = args.limit {
        alts.truncate(limit);
    }

    if args.count {
        println!("{}", alts.len());
        return Ok(());
    }

    if alts.is_empty() {
        match args.filter {
            Some(ref query) => println!("No results found for '{}'.", style(query).yellow()),
            None => println!("No alternatives found."),
        }
        return Ok(());
    }

    let mut short_ids = ShortIdIndex::load(&project);
    short_ids.ensure_all(alts.iter().map(|a| a.id.to_string()));
    save_short_ids(&mut short_ids, &project);

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&alts).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&alts).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for alt in &alts {
                println!("{}", alt.id);
            }
        }
        OutputFormat::ShortId => {
            for alt in &alts {
                println!(
                    "{}",
                    short_ids
                        .get_short_id(&alt.id.to_string())
                        .unwrap_or_default()
                );
            }
        }
        OutputFormat::Path => {
            for alt in &alts {
                println!("{}", project.entity_path(EntityPrefix::Oss, &alt.id).display());
            }
        }
        _ => {
            let columns: Vec<String> = args.columns.iter().map(|c| c.to_string()).collect();
            let column_refs: Vec<&str> = columns.iter().map(|s| s.as_str()).collect();

            let rows: Vec<TableRow> = alts
                .iter()
                .map(|a| {
                    TableRow::new()
                        .set(
                            "id",
                            short_ids
                                .get_short_id(&a.id.to_string())
                                .unwrap_or_else(|| format_short_id(&a.id)),
                        )
                        .set("name", &a.name)
                        .set("slug", &a.slug)
                        .set(
                            "stars",
                            a.github_stars
                                .map(|s| s.to_string())
                                .unwrap_or_else(|| "-".to_string()),
                        )
                        .set("license", a.license.as_deref().unwrap_or("-"))
                        .set(
                            "implementations",
                            a.active_implementations().count().to_string(),
                        )
                        .set("status", a.status.to_string())
                        .set("created", a.created.format("%Y-%m-%d").to_string())
                })
                .collect();

            TableFormatter::new(ALT_COLUMNS, "alternative(s)").output(rows, format, &column_refs);
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let config = Config::load();

    let (name, description, repo, license, status) = if args.interactive {
        use dialoguer::{theme::ColorfulTheme, Input, Select};
        let theme = ColorfulTheme::default();

        let name: String = Input::with_theme(&theme)
            .with_prompt("Project name")
            .interact_text()
            .into_diagnostic()?;
        let description: String = Input::with_theme(&theme)
            .with_prompt("Description")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        let repo: String = Input::with_theme(&theme)
            .with_prompt("Repository URL")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        let license: String = Input::with_theme(&theme)
            .with_prompt("License")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        let status_options = ["active", "maintenance", "deprecated", "beta"];
        let selection = Select::with_theme(&theme)
            .with_prompt("Status")
            .items(&status_options)
            .default(0)
            .interact()
            .into_diagnostic()?;

        (
            name,
            (!description.is_empty()).then_some(description),
            (!repo.is_empty()).then_some(repo),
            (!license.is_empty()).then_some(license),
            status_options[selection].to_string(),
        )
    } else {
        let name = args
            .name
            .ok_or_else(|| miette::miette!("--name is required (or use --interactive)"))?;
        (name, args.description, args.repo, args.license, args.status)
    };

    let status: AltStatus = status.parse().map_err(|e| miette::miette!("{}", e))?;

    let id = EntityId::new(EntityPrefix::Oss);

    let generator = TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))?;
    let ctx = TemplateContext::new(id.clone(), &name, config.author())
        .with_description(description)
        .with_repository(repo)
        .with_website(args.website)
        .with_license(license)
        .with_status(status)
        .with_icon(args.icon, args.color);

    let yaml_content = generator
        .generate_alternative(&ctx)
        .map_err(|e| miette::miette!("{}", e))?;

    let file_path = project.entity_path(EntityPrefix::Oss, &id);
    fs::write(&file_path, &yaml_content).into_diagnostic()?;

    let mut short_ids = ShortIdIndex::load(&project);
    let alias = short_ids.add(id.to_string());
    save_short_ids(&mut short_ids, &project);

    match global.format {
        OutputFormat::Id => println!("{}", id),
        OutputFormat::ShortId => println!("{}", alias),
        OutputFormat::Path => println!("{}", file_path.display()),
        _ => {
            println!(
                "{} Created alternative {}",
                style("✓").green(),
                style(&alias).cyan()
            );
            println!("   {}", style(file_path.display()).dim());
            println!(
                "   {} | {}",
                style(status.to_string()).yellow(),
                style(&name).white()
            );
        }
    }

    if args.edit || (!args.no_edit && !args.interactive) {
        println!();
        println!("Opening in {}...", style(config.editor()).yellow());
        config.run_editor(&file_path).into_diagnostic()?;
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (path, alt) =
        resolve_entity::<Alternative>(&project, EntityPrefix::Oss, &args.id, "alternative")?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&alt).into_diagnostic()?);
        }
        OutputFormat::Id => println!("{}", alt.id),
        OutputFormat::Path => println!("{}", path.display()),
        _ => {
            print!("{}", fs::read_to_string(&path).into_diagnostic()?);
        }
    }

    Ok(())
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let config = Config::load();
    let (path, _) =
        resolve_entity::<Alternative>(&project, EntityPrefix::Oss, &args.id, "alternative")?;

    config.run_editor(&path).into_diagnostic()?;
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (path, alt) =
        resolve_entity::<Alternative>(&project, EntityPrefix::Oss, &args.id, "alternative")?;

    let deleted = delete_entity_file(&project, &alt.id.to_string(), &path, args.force)?;

    if !global.quiet {
        println!(
            "{} Deleted alternative {} ({})",
            style("✓").green(),
            style(&alt.name).cyan(),
            style(deleted.display()).dim()
        );
    }

    Ok(())
}

fn run_implement(args: ImplementArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (alt_path, mut alt) =
        resolve_entity::<Alternative>(&project, EntityPrefix::Oss, &args.alt, "alternative")?;
    let (_, cap) = resolve_entity::<Capability>(&project, EntityPrefix::Cap, &args.cap, "capability")?;

    let complexity: Option<Complexity> = match args.complexity {
        Some(ref c) => Some(c.parse().map_err(|e| miette::miette!("{}", e))?),
        None => None,
    };

    let updating = alt.implementation_for(&cap.id).is_some();

    // Implementing an already-implemented capability updates the metadata
    alt.implementations.retain(|i| i.capability != cap.id);

    let mut implementation = CapabilityImplementation::new(cap.id.clone());
    implementation.implementation_notes = args.notes;
    implementation.github_path = args.path;
    implementation.documentation_url = args.docs;
    implementation.implementation_complexity = complexity;
    implementation.is_active = !args.inactive;
    alt.implementations.push(implementation);

    fs::write(
        &alt_path,
        serde_yml::to_string(&alt).into_diagnostic()?,
    )
    .into_diagnostic()?;

    if !global.quiet {
        let verb = if updating { "Updated" } else { "Recorded" };
        println!(
            "{} {} implementation: {} implements {}",
            style("✓").green(),
            verb,
            style(&alt.name).cyan(),
            style(&cap.name).yellow()
        );
    }

    Ok(())
}

fn run_unimplement(args: UnimplementArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (alt_path, mut alt) =
        resolve_entity::<Alternative>(&project, EntityPrefix::Oss, &args.alt, "alternative")?;
    let (_, cap) = resolve_entity::<Capability>(&project, EntityPrefix::Cap, &args.cap, "capability")?;

    let before = alt.implementations.len();
    alt.implementations.retain(|i| i.capability != cap.id);

    if alt.implementations.len() == before {
        println!(
            "{} {} does not implement {} - nothing to remove",
            style("!").yellow(),
            style(&alt.name).cyan(),
            style(&cap.name).yellow()
        );
        return Ok(());
    }

    fs::write(
        &alt_path,
        serde_yml::to_string(&alt).into_diagnostic()?,
    )
    .into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Removed implementation: {} no longer implements {}",
            style("✓").green(),
            style(&alt.name).cyan(),
            style(&cap.name).yellow()
        );
    }

    Ok(())
}
