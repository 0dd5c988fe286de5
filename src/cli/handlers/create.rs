use crate::model::TaskDraft;
use crate::storage::parse_timestamp;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::CommandContext;

pub fn handle_create(
    ctx: &mut CommandContext,
    file: &Path,
    title: String,
    description: Option<String>,
    assignees: Vec<String>,
    due: Option<String>,
    json: bool,
) -> Result<()> {
    let due_date = due
        .as_deref()
        .map(parse_timestamp)
        .transpose()
        .context("Invalid --due value")?;

    let draft = TaskDraft::new(title)
        .description(description.unwrap_or_default())
        .assignees(assignees)
        .due_date(due_date);

    let project = ctx.open(file)?;
    let id = project.create_task(draft).id().clone();
    // Creation is not a history change, so auto-save does not cover it
    project.save_to_xml(file)?;

    let column = project.columns()[0].name();
    let task = project
        .task(&id)
        .context("Created task missing from project")?;

    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        println!(
            "{} {} {} in {}",
            "Created".green(),
            id.as_str().cyan(),
            task.title(),
            column.bold()
        );
    }
    Ok(())
}
