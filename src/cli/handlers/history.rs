use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::CommandContext;
use super::utils::{print_movement, require_task};

pub fn handle_history(ctx: &mut CommandContext, file: &Path, id: String, json: bool) -> Result<()> {
    let project = ctx.open(file)?;
    let task = require_task(project, &id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(task.history())?);
        return Ok(());
    }

    println!("{} {}", task.id().as_str().cyan().bold(), task.title().bold());
    println!(
        "Created:  {}",
        task.created_at().format("%Y-%m-%d %H:%M").to_string()
    );
    if task.history().is_empty() {
        println!("{}", "No moves yet".dimmed());
    }
    for movement in task.history() {
        print_movement(movement);
    }
    Ok(())
}
