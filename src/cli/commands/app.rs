//! `osb app` command - Proprietary application management

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
use crate::core::filter::filter_by_query;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::loader;
use crate::core::shortid::ShortIdIndex;
use crate::core::Config;
use crate::entities::ProprietaryApp;
use crate::schema::template::{TemplateContext, TemplateGenerator};

#[derive(Subcommand, Debug)]
pub enum AppCommands {
    /// List proprietary applications
    List(ListArgs),

    /// Create a new proprietary application entry
    New(NewArgs),

    /// Show an application's details
    Show(ShowArgs),

    /// Edit an application in your editor
    Edit(EditArgs),

    /// Delete an application entry
    Delete(DeleteArgs),
}

/// List column selection
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListColumn {
    Id,
    Name,
    Slug,
    Alternatives,
    Capabilities,
    Author,
    Created,
}

impl std::fmt::Display for ListColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListColumn::Id => write!(f, "id"),
            ListColumn::Name => write!(f, "name"),
            ListColumn::Slug => write!(f, "slug"),
            ListColumn::Alternatives => write!(f, "alternatives"),
            ListColumn::Capabilities => write!(f, "capabilities"),
            ListColumn::Author => write!(f, "author"),
            ListColumn::Created => write!(f, "created"),
        }
    }
}

/// Column definitions for application list output
const APP_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 17),
    ColumnDef::new("name", "NAME", 24),
    ColumnDef::new("slug", "SLUG", 24),
    ColumnDef::new("alternatives", "ALTS", 5),
    ColumnDef::new("capabilities", "CAPS", 5),
    ColumnDef::new("author", "AUTHOR", 16),
    ColumnDef::new("created", "CREATED", 20),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by substring match on name, slug, and description
    #[arg(long, short = 'F')]
    pub filter: Option<String>,

    /// Columns to display
    #[arg(long, value_delimiter = ',', default_values_t = vec![
        ListColumn::Id,
        ListColumn::Name,
        ListColumn::Alternatives,
        ListColumn::Capabilities,
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
    /// Application name (required unless --interactive)
    #[arg(long, short = 'N')]
    pub name: Option<String>,

    /// Short description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Product website URL
    #[arg(long)]
    pub website: Option<String>,

    /// Simple-icons slug for the logo
    #[arg(long)]
    pub icon: Option<String>,

    /// Brand color hex (e.g., "#95BF47")
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
    /// Application ID, short ID (APP@N), or slug
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Application ID, short ID (APP@N), or slug
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Application ID, short ID (APP@N), or slug
    pub id: String,

    /// Force deletion even if other entries reference this one
    #[arg(long)]
    pub force: bool,
}

/// Run an app subcommand
pub fn run(cmd: AppCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        AppCommands::List(args) => run_list(args, global),
        AppCommands::New(args) => run_new(args, global),
        AppCommands::Show(args) => run_show(args, global),
        AppCommands::Edit(args) => run_edit(args, global),
        AppCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let mut apps: Vec<ProprietaryApp> =
        loader::load_all(&project.entity_dir(EntityPrefix::App))?;

    // Shared substring filter; empty query keeps the full list
    if let Some(ref query) = args.filter {
        let filtered = filter_by_query(&apps, query, |a| {
            vec![Some(a.name.as_str()), Some(a.slug.as_str()), a.description.as_deref()]
        });
        apps = filtered.into_iter().cloned().collect();
    }

    match args.sort {
        ListColumn::Id => apps.sort_by(|a, b| a.id.to_string().cmp(&b.id.to_string())),
        ListColumn::Name => apps.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        ListColumn::Slug => apps.sort_by(|a, b| a.slug.cmp(&b.slug)),
        ListColumn::Alternatives => {
            apps.sort_by_key(|a| std::cmp::Reverse(a.links.alternatives.len()))
        }
        ListColumn::Capabilities => {
            apps.sort_by_key(|a| std::cmp::Reverse(a.links.capabilities.len()))
        }
        ListColumn::Author => apps.sort_by(|a, b| a.author.cmp(&b.author)),
        ListColumn::Created => apps.sort_by(|a, b| a.created.cmp(&b.created)),
    }

    if args.reverse {
        apps.reverse();
    }

    if let Some(limit) = args.limit {
        apps.truncate(limit);
    }

    if args.count {
        println!("{}", apps.len());
        return Ok(());
    }

    if apps.is_empty() {
        match args.filter {
            Some(ref query) => println!(
                "No results found for '{}'.",
                style(query).yellow()
            ),
            None => println!("No applications found."),
        }
        return Ok(());
    }

    let mut short_ids = ShortIdIndex::load(&project);
    short_ids.ensure_all(apps.iter().map(|a| a.id.to_string()));
    save_short_ids(&mut short_ids, &project);

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&apps).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&apps).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for app in &apps {
                println!("{}", app.id);
            }
        }
        OutputFormat::ShortId => {
            for app in &apps {
                println!(
                    "{}",
                    short_ids
                        .get_short_id(&app.id.to_string())
                        .unwrap_or_default()
                );
            }
        }
        OutputFormat::Path => {
            for app in &apps {
                println!("{}", project.entity_path(EntityPrefix::App, &app.id).display());
            }
        }
        _ => {
            let columns: Vec<String> = args.columns.iter().map(|c| c.to_string()).collect();
            let column_refs: Vec<&str> = columns.iter().map(|s| s.as_str()).collect();

            let rows: Vec<TableRow> = apps
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
                        .set("alternatives", a.links.alternatives.len().to_string())
                        .set("capabilities", a.links.capabilities.len().to_string())
                        .set("author", &a.author)
                        .set("created", a.created.format("%Y-%m-%d").to_string())
                })
                .collect();

            TableFormatter::new(APP_COLUMNS, "application(s)").output(rows, format, &column_refs);
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let config = Config::load();

    let (name, description, website) = if args.interactive {
        use dialoguer::{theme::ColorfulTheme, Input};
        let theme = ColorfulTheme::default();

        let name: String = Input::with_theme(&theme)
            .with_prompt("Application name")
            .interact_text()
            .into_diagnostic()?;
        let description: String = Input::with_theme(&theme)
            .with_prompt("Description")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        let website: String = Input::with_theme(&theme)
            .with_prompt("Website URL")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        (
            name,
            (!description.is_empty()).then_some(description),
            (!website.is_empty()).then_some(website),
        )
    } else {
        let name = args
            .name
            .ok_or_else(|| miette::miette!("--name is required (or use --interactive)"))?;
        (name, args.description, args.website)
    };

    let id = EntityId::new(EntityPrefix::App);

    let generator = TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))?;
    let ctx = TemplateContext::new(id.clone(), &name, config.author())
        .with_description(description)
        .with_website(website)
        .with_icon(args.icon, args.color);

    let yaml_content = generator
        .generate_proprietary(&ctx)
        .map_err(|e| miette::miette!("{}", e))?;

    let file_path = project.entity_path(EntityPrefix::App, &id);
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
                "{} Created application {}",
                style("✓").green(),
                style(&alias).cyan()
            );
            println!("   {}", style(file_path.display()).dim());
            println!("   {}", style(&name).white());
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
    let (path, app) =
        resolve_entity::<ProprietaryApp>(&project, EntityPrefix::App, &args.id, "application")?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&app).into_diagnostic()?);
        }
        OutputFormat::Id => println!("{}", app.id),
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
        resolve_entity::<ProprietaryApp>(&project, EntityPrefix::App, &args.id, "application")?;

    config.run_editor(&path).into_diagnostic()?;
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (path, app) =
        resolve_entity::<ProprietaryApp>(&project, EntityPrefix::App, &args.id, "application")?;

    let deleted = delete_entity_file(&project, &app.id.to_string(), &path, args.force)?;

    if !global.quiet {
        println!(
            "{} Deleted application {} ({})",
            style("✓").green(),
            style(&app.name).cyan(),
            style(deleted.display()).dim()
        );
    }

    Ok(())
}
