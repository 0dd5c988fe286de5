use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::CommandContext;
use super::utils::{format_occupancy, print_task_line};

pub fn handle_show(ctx: &mut CommandContext, file: &Path, json: bool) -> Result<()> {
    let project = ctx.open(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&*project)?);
        return Ok(());
    }

    println!("{} ({})", project.name().bold(), file.display());
    for (index, column) in project.columns().iter().enumerate() {
        println!(
            "\n{} {} {}",
            format!("{}.", index).dimmed(),
            column.name().bold(),
            format_occupancy(column)
        );
        for task in project.tasks_in(index)? {
            print_task_line(task);
        }
    }

    let orphans = project.orphaned_tasks();
    if !orphans.is_empty() {
        println!(
            "\n{} {}",
            "Orphaned".yellow().bold(),
            "(last column no longer exists)".dimmed()
        );
        for task in orphans {
            print_task_line(task);
        }
    }
    Ok(())
}
