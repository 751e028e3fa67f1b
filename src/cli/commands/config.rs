//! `osb config` command - Show resolved configuration

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::project::Project;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration (defaults + global + catalog + env)
    Show,

    /// Show configuration file paths
    Path,
}

pub fn run(cmd: ConfigCommands, _global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load();

            println!("{}", style("Resolved configuration").bold());
            println!("  author:         {}", config.author());
            println!("  editor:         {}", config.editor());
            println!(
                "  pager:          {}",
                config.pager.as_deref().unwrap_or("(unset)")
            );
            println!(
                "  default_format: {}",
                config.default_format.as_deref().unwrap_or("auto")
            );
        }
        ConfigCommands::Path => {
            if let Some(dirs) = directories::ProjectDirs::from("", "", "osb") {
                println!(
                    "global:  {}",
                    dirs.config_dir().join("config.yaml").display()
                );
            }
            if let Ok(project) = Project::discover() {
                println!(
                    "catalog: {}",
                    project.osb_dir().join("config.yaml").display()
                );
            }
        }
    }

    Ok(())
}
