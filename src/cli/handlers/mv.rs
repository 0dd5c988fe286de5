use crate::model::{MoveOutcome, TaskId};
use anyhow::{Result, bail};
use colored::Colorize;
use std::path::Path;

use super::CommandContext;
use super::utils::{require_task, resolve_column};

pub fn handle_move(
    ctx: &mut CommandContext,
    file: &Path,
    id: String,
    from: String,
    to: String,
) -> Result<()> {
    let project = ctx.open(file)?;
    require_task(project, &id)?;
    let from_index = resolve_column(project, &from)?;
    let to_index = resolve_column(project, &to)?;

    let from_name = project.columns()[from_index].name().to_string();
    let to_name = project.columns()[to_index].name().to_string();

    // The project is bound to `file`, so a successful move is already saved
    match project.move_task(&TaskId::from(id.as_str()), from_index, to_index)? {
        MoveOutcome::Moved => {
            println!(
                "{} {} {} → {}",
                "Moved".green(),
                id.cyan(),
                from_name,
                to_name.bold()
            );
            Ok(())
        }
        MoveOutcome::NotInSource => {
            let actual = project
                .column_of(&TaskId::from(id.as_str()))
                .map(|i| project.columns()[i].name().to_string())
                .unwrap_or_else(|| "no column".to_string());
            bail!("Task {} is not in '{}' (it is in {})", id, from_name, actual);
        }
        MoveOutcome::ColumnFull => {
            let limit = project.columns()[to_index].wip_limit();
            bail!(
                "Cannot move {}: '{}' is at its WIP limit of {}",
                id,
                to_name,
                limit
            );
        }
    }
}
