use crate::model::{Column, Movement, Project, Task, TaskId};
use anyhow::{Result, bail};
use colored::Colorize;

/// Resolve a column argument: an exact column name, or else a zero-based index
pub fn resolve_column(project: &Project, arg: &str) -> Result<usize> {
    if let Some(index) = project.column_index(arg) {
        return Ok(index);
    }
    match arg.parse::<usize>() {
        Ok(index) if index < project.columns().len() => return Ok(index),
        _ => {}
    }

    let available: Vec<String> = project
        .columns()
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}: {}", i, c.name()))
        .collect();
    bail!(
        "No column '{}' in project '{}'. Available: {}",
        arg,
        project.name(),
        available.join(", ")
    );
}

/// Look up a task by id, with a friendly error
pub fn require_task<'a>(project: &'a Project, id: &str) -> Result<&'a Task> {
    match project.task(&TaskId::from(id)) {
        Some(task) => Ok(task),
        None => bail!("Task not found: {}", id),
    }
}

/// `[n]` for unlimited columns, `[n/limit]` otherwise; red when full
pub fn format_occupancy(column: &Column) -> String {
    if column.wip_limit() == 0 {
        return format!("[{}]", column.len()).dimmed().to_string();
    }
    let text = format!("[{}/{}]", column.len(), column.wip_limit());
    if column.is_full() {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

pub fn print_task_line(task: &Task) {
    let mut line = format!("  {}  {}", task.id().as_str().cyan(), task.title());
    if !task.assignees().is_empty() {
        let names: Vec<String> = task.assignees().iter().map(|a| format!("@{}", a)).collect();
        line.push_str(&format!("  {}", names.join(" ").magenta()));
    }
    if let Some(due) = task.due_date() {
        line.push_str(&format!("  {}", format!("due {}", due.format("%Y-%m-%d")).yellow()));
    }
    println!("{}", line);
}

pub fn print_movement(movement: &Movement) {
    println!(
        "  {}  {} → {}",
        movement.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
        movement.from,
        movement.to.bold()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnSpec;

    fn project() -> Project {
        let columns = [
            ColumnSpec::new("Todo", 0),
            ColumnSpec::new("Doing", 0),
            ColumnSpec::new("0", 0),
        ];
        Project::with_columns("Numbers", &columns).unwrap()
    }

    #[test]
    fn test_resolve_column_prefers_name() {
        let project = project();
        assert_eq!(resolve_column(&project, "0").unwrap(), 2);
        assert_eq!(resolve_column(&project, "Doing").unwrap(), 1);
    }

    #[test]
    fn test_resolve_column_falls_back_to_index() {
        let project = project();
        assert_eq!(resolve_column(&project, "1").unwrap(), 1);
    }

    #[test]
    fn test_resolve_column_unknown() {
        let project = project();
        let err = resolve_column(&project, "9").unwrap_err();
        assert!(err.to_string().contains("No column '9'"));
    }
}
