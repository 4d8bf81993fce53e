use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rl_cli::commands::{bests, categorize, milestones, normalize, summary};
use rl_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout().lock();
    match command {
        Commands::Normalize(args) => normalize::run(&mut stdout, args, &config)?,
        Commands::Categorize(args) => categorize::run(&mut stdout, args, &config)?,
        Commands::Summary(args) => summary::run(&mut stdout, args, &config)?,
        Commands::Bests(args) => bests::run(&mut stdout, args, &config)?,
        Commands::Milestones(args) => milestones::run(&mut stdout, args, &config)?,
    }

    Ok(())
}
