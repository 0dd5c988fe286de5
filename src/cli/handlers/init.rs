use anyhow::{Result, bail};
use colored::Colorize;
use std::path::Path;

use super::CommandContext;

pub fn handle_init(
    ctx: &mut CommandContext,
    file: &Path,
    name: Option<String>,
    force: bool,
) -> Result<()> {
    if file.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            file.display()
        );
    }

    let name = name.unwrap_or_else(|| ctx.config.board.default_project_name.clone());
    let project = ctx.board.create_project(name);
    project.save_to_xml(file)?;

    let columns: Vec<&str> = project.columns().iter().map(|c| c.name()).collect();
    println!(
        "{} project {} in {}",
        "Initialized".green(),
        project.name().bold(),
        file.display()
    );
    println!("Columns: {}", columns.join(" | "));
    Ok(())
}
