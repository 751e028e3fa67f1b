//! `osb init` command - Initialize a new OSB catalog

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::Path;

use crate::core::project::{Project, ProjectError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Also initialize a git repository
    #[arg(long)]
    pub git: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    if args.git {
        init_git(&path)?;
    }

    match Project::init(&path) {
        Ok(project) => {
            println!(
                "{} Initialized OSB catalog at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!();
            println!("Created catalog structure:");
            print_structure(project.root());
            println!();
            println!("Next steps:");
            println!(
                "  {} Add a proprietary application",
                style("osb app new --name Shopify").yellow()
            );
            println!(
                "  {} Add an open-source alternative",
                style("osb alt new --name Medusa").yellow()
            );
            println!(
                "  {} Validate catalog files",
                style("osb validate").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} OSB catalog already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}

fn init_git(path: &Path) -> Result<()> {
    let git_dir = path.join(".git");
    if git_dir.exists() {
        println!("{} Git repository already exists", style("✓").green());
        return Ok(());
    }

    let output = std::process::Command::new("git")
        .arg("init")
        .current_dir(path)
        .output()
        .into_diagnostic()?;

    if output.status.success() {
        println!("{} Initialized git repository", style("✓").green());

        let gitignore_path = path.join(".gitignore");
        if !gitignore_path.exists() {
            std::fs::write(
                &gitignore_path,
                "# OSB user-local state\n/.osb/cache.db\n/.osb/shortids.json\n\n# Editor backups\n*.swp\n*~\n",
            )
            .into_diagnostic()?;
        }
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(miette::miette!("Failed to initialize git: {}", stderr))
    }
}

fn print_structure(root: &Path) {
    let dirs = [
        ".osb/",
        ".osb/config.yaml",
        "catalog/proprietary/",
        "catalog/alternatives/",
        "catalog/capabilities/",
    ];

    for dir in dirs {
        if root.join(dir).exists() {
            println!("  {}", style(dir).dim());
        }
    }
}
