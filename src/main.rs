use clap::Parser;
use miette::Result;
use osb::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => osb::cli::commands::init::run(args),
        Commands::App(cmd) => osb::cli::commands::app::run(cmd, &global),
        Commands::Alt(cmd) => osb::cli::commands::alt::run(cmd, &global),
        Commands::Cap(cmd) => osb::cli::commands::cap::run(cmd, &global),
        Commands::Link(cmd) => osb::cli::commands::link::run(cmd),
        Commands::Compat(args) => osb::cli::commands::compat::run(args, &global),
        Commands::Pin(cmd) => osb::cli::commands::pin::run(cmd, &global),
        Commands::Prompt(args) => osb::cli::commands::prompt::run(args, &global),
        Commands::Search(args) => osb::cli::commands::search::run(args, &global),
        Commands::Status(args) => osb::cli::commands::status::run(args, &global),
        Commands::Validate(args) => osb::cli::commands::validate::run(args),
        Commands::Import(args) => osb::cli::commands::import::run(args),
        Commands::Cache(cmd) => osb::cli::commands::cache::run(cmd),
        Commands::Config(cmd) => osb::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => osb::cli::commands::completions::run(args),
    }
}
