//! `osb cap` command - Capability management

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
use crate::core::entity::Complexity;
use crate::core::filter::filter_by_query;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::loader;
use crate::core::shortid::ShortIdIndex;
use crate::core::Config;
use crate::entities::Capability;
use crate::schema::template::{TemplateContext, TemplateGenerator};

#[derive(Subcommand, Debug)]
pub enum CapCommands {
    /// List capabilities
    List(ListArgs),

    /// Create a new capability
    New(NewArgs),

    /// Show a capability's details
    Show(ShowArgs),

    /// Edit a capability in your editor
    Edit(EditArgs),

    /// Delete a capability
    Delete(DeleteArgs),
}

/// List column selection
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListColumn {
    Id,
    Name,
    Slug,
    Category,
    Complexity,
    Created,
}

impl std::fmt::Display for ListColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListColumn::Id => write!(f, "id"),
            ListColumn::Name => write!(f, "name"),
            ListColumn::Slug => write!(f, "slug"),
            ListColumn::Category => write!(f, "category"),
            ListColumn::Complexity => write!(f, "complexity"),
            ListColumn::Created => write!(f, "created"),
        }
    }
}

/// Column definitions for capability list output
const CAP_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 17),
    ColumnDef::new("name", "NAME", 28),
    ColumnDef::new("slug", "SLUG", 28),
    ColumnDef::new("category", "CATEGORY", 16),
    ColumnDef::new("complexity", "COMPLEXITY", 12),
    ColumnDef::new("created", "CREATED", 20),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by substring match on name, slug, and description
    #[arg(long, short = 'F')]
    pub filter: Option<String>,

    /// Filter by category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Columns to display
    #[arg(long, value_delimiter = ',', default_values_t = vec![
        ListColumn::Id,
        ListColumn::Name,
        ListColumn::Category,
        ListColumn::Complexity,
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
    /// Capability name (required unless --interactive)
    #[arg(long, short = 'N')]
    pub name: Option<String>,

    /// Short description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Category (e.g., "collaboration", "e_commerce")
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Complexity tier
    #[arg(long, default_value = "basic")]
    pub complexity: String,

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
    /// Capability ID, short ID (CAP@N), or slug
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Capability ID, short ID (CAP@N), or slug
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Capability ID, short ID (CAP@N), or slug
    pub id: String,

    /// Force deletion even if other entries reference this one
    #[arg(long)]
    pub force: bool,
}

/// Run a capability subcommand
pub fn run(cmd: CapCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CapCommands::List(args) => run_list(args, global),
        CapCommands::New(args) => run_new(args, global),
        CapCommands::Show(args) => run_show(args, global),
        CapCommands::Edit(args) => run_edit(args, global),
        CapCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let mut caps: Vec<Capability> = loader::load_all(&project.entity_dir(EntityPrefix::Cap))?;

    if let Some(ref query) = args.filter {
        let filtered = filter_by_query(&caps, query, |c| {
            vec![Some(c.name.as_str()), Some(c.slug.as_str()), c.description.as_deref()]
        });
        caps = filtered.into_iter().cloned().collect();
    }

    if let Some(ref category) = args.category {
        caps.retain(|c| {
            c.category
                .as_deref()
                .is_some_and(|cc| cc.eq_ignore_ascii_case(category))
        });
    }

    match args.sort {
        ListColumn::Id => caps.sort_by(|a, b| a.id.to_string().cmp(&b.id.to_string())),
        ListColumn::Name => caps.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        ListColumn::Slug => caps.sort_by(|a, b| a.slug.cmp(&b.slug)),
        ListColumn::Category => caps.sort_by(|a, b| a.category.cmp(&b.category)),
        ListColumn::Complexity => caps.sort_by(|a, b| a.complexity.cmp(&b.complexity)),
        ListColumn::Created => caps.sort_by(|a, b| a.created.cmp(&b.created)),
    }

    if args.reverse {
        caps.reverse();
    }

    if let Some(limit) = args.limit {
        caps.truncate(limit);
    }

    if args.count {
        println!("{}", caps.len());
        return Ok(());
    }

    if caps.is_empty() {
        match args.filter {
            Some(ref query) => println!("No results found for '{}'.", style(query).yellow()),
            None => println!("No capabilities found."),
        }
        return Ok(());
    }

    let mut short_ids = ShortIdIndex::load(&project);
    short_ids.ensure_all(caps.iter().map(|c| c.id.to_string()));
    save_short_ids(&mut short_ids, &project);

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&caps).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&caps).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for cap in &caps {
                println!("{}", cap.id);
            }
        }
        OutputFormat::ShortId => {
            for cap in &caps {
                println!(
                    "{}",
                    short_ids
                        .get_short_id(&cap.id.to_string())
                        .unwrap_or_default()
                );
            }
        }
        OutputFormat::Path => {
            for cap in &caps {
                println!("{}", project.entity_path(EntityPrefix::Cap, &cap.id).display());
            }
        }
        _ => {
            let columns: Vec<String> = args.columns.iter().map(|c| c.to_string()).collect();
            let column_refs: Vec<&str> = columns.iter().map(|s| s.as_str()).collect();

            let rows: Vec<TableRow> = caps
                .iter()
                .map(|c| {
                    TableRow::new()
                        .set(
                            "id",
                            short_ids
                                .get_short_id(&c.id.to_string())
                                .unwrap_or_else(|| format_short_id(&c.id)),
                        )
                        .set("name", &c.name)
                        .set("slug", &c.slug)
                        .set("category", c.category.as_deref().unwrap_or("-"))
                        .set("complexity", c.complexity.to_string())
                        .set("created", c.created.format("%Y-%m-%d").to_string())
                })
                .collect();

            TableFormatter::new(CAP_COLUMNS, "capability(ies)").output(rows, format, &column_refs);
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let config = Config::load();

    let (name, description, category, complexity) = if args.interactive {
        use dialoguer::{theme::ColorfulTheme, Input, Select};
        let theme = ColorfulTheme::default();

        let name: String = Input::with_theme(&theme)
            .with_prompt("Capability name")
            .interact_text()
            .into_diagnostic()?;
        let description: String = Input::with_theme(&theme)
            .with_prompt("Description")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        let category: String = Input::with_theme(&theme)
            .with_prompt("Category")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        let complexity_options = ["basic", "intermediate", "advanced"];
        let selection = Select::with_theme(&theme)
            .with_prompt("Complexity")
            .items(&complexity_options)
            .default(0)
            .interact()
            .into_diagnostic()?;

        (
            name,
            (!description.is_empty()).then_some(description),
            (!category.is_empty()).then_some(category),
            complexity_options[selection].to_string(),
        )
    } else {
        let name = args
            .name
            .ok_or_else(|| miette::miette!("--name is required (or use --interactive)"))?;
        (name, args.description, args.category, args.complexity)
    };

    let complexity: Complexity = complexity.parse().map_err(|e| miette::miette!("{}", e))?;

    let id = EntityId::new(EntityPrefix::Cap);

    let generator = TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))?;
    let ctx = TemplateContext::new(id.clone(), &name, config.author())
        .with_description(description)
        .with_category(category)
        .with_complexity(complexity);

    let yaml_content = generator
        .generate_capability(&ctx)
        .map_err(|e| miette::miette!("{}", e))?;

    let file_path = project.entity_path(EntityPrefix::Cap, &id);
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
                "{} Created capability {}",
                style("✓").green(),
                style(&alias).cyan()
            );
            println!("   {}", style(file_path.display()).dim());
            println!(
                "   {} | {}",
                style(complexity.to_string()).yellow(),
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
    let (path, cap) =
        resolve_entity::<Capability>(&project, EntityPrefix::Cap, &args.id, "capability")?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cap).into_diagnostic()?);
        }
        OutputFormat::Id => println!("{}", cap.id),
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
        resolve_entity::<Capability>(&project, EntityPrefix::Cap, &args.id, "capability")?;

    config.run_editor(&path).into_diagnostic()?;
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (path, cap) =
        resolve_entity::<Capability>(&project, EntityPrefix::Cap, &args.id, "capability")?;

    // Implementations reference capabilities outside the links section
    if !args.force {
        if let Ok(cache) = crate::core::cache::EntityCache::open(&project) {
            let implementers = cache.implementers_of(&cap.id.to_string());
            if !implementers.is_empty() {
                return Err(miette::miette!(
                    "Capability '{}' is implemented by {} alternative(s): {}\nUse --force to delete anyway.",
                    cap.name,
                    implementers.len(),
                    implementers.join(", ")
                ));
            }
        }
    }

    let deleted = delete_entity_file(&project, &cap.id.to_string(), &path, args.force)?;

    if !global.quiet {
        println!(
            "{} Deleted capability {} ({})",
            style("✓").green(),
            style(&cap.name).cyan(),
            style(deleted.display()).dim()
        );
    }

    Ok(())
}
