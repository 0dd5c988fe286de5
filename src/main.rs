use anyhow::{Context, Result};
use clap::Parser;

use lanes::cli::handlers::{
    CommandContext, handle_create, handle_history, handle_init, handle_move, handle_show,
};
use lanes::cli::{Cli, Commands};
use lanes::config::LanesConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    lanes::logging::init(cli.verbose, cli.log_file.clone());

    let config = load_config(&cli)?;
    let mut ctx = CommandContext::new(config)?;

    match cli.command {
        Commands::Init { file, name, force } => handle_init(&mut ctx, &file, name, force),
        Commands::Create {
            file,
            title,
            description,
            assignees,
            due,
            json,
        } => handle_create(&mut ctx, &file, title, description, assignees, due, json),
        Commands::Move { file, id, from, to } => handle_move(&mut ctx, &file, id, from, to),
        Commands::Show { file, json } => handle_show(&mut ctx, &file, json),
        Commands::History { file, id, json } => handle_history(&mut ctx, &file, id, json),
    }
}

fn load_config(cli: &Cli) -> Result<LanesConfig> {
    if let Some(path) = &cli.config {
        return LanesConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let (config, path) = LanesConfig::discover(&cwd).context("Failed to load config")?;
    match path {
        Some(path) => tracing::debug!(path = %path.display(), "Using config file"),
        None => tracing::debug!("No config file found, using defaults"),
    }
    Ok(config)
}
