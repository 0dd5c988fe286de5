use super::timestamp::{format_timestamp, parse_timestamp};
use crate::error::{LanesError, Result};
use crate::model::{ColumnSpec, Movement, Project, Task, TaskId};
use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::Event;
use quick_xml::se::Serializer;
use serde::{Deserialize, Serialize};
use std::path::Path;

const ROOT: &str = "KanbanProject";
const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// A project as read from disk, before tasks are wired into columns.
#[derive(Debug)]
pub struct LoadedProject {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    pub tasks: Vec<Task>,
}

// On-disk shape of the project document. Everything the reader requires is
// still optional here so that a missing piece gets a precise load error.

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "KanbanProject")]
struct ProjectDocument {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "Columns", default)]
    columns: Option<ColumnsSection>,
    #[serde(rename = "Tasks", default)]
    tasks: Option<TasksSection>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ColumnsSection {
    #[serde(rename = "Column", default)]
    columns: Vec<ColumnElement>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ColumnElement {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    /// Kept as text so a bad value can be reported with its column.
    #[serde(rename = "@wip_limit", default)]
    wip_limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TasksSection {
    #[serde(rename = "Task", default)]
    tasks: Vec<TaskElement>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TaskElement {
    #[serde(rename = "@id", default)]
    id: Option<String>,
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
    #[serde(rename = "CreatedAt", default)]
    created_at: Option<String>,
    #[serde(rename = "DueDate", default, skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
    #[serde(rename = "Assignees", default)]
    assignees: Option<AssigneesSection>,
    #[serde(rename = "History", default)]
    history: Option<HistorySection>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AssigneesSection {
    #[serde(rename = "Assignee", default)]
    assignees: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct HistorySection {
    #[serde(rename = "Entry", default)]
    entries: Vec<EntryElement>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EntryElement {
    #[serde(rename = "Timestamp", default)]
    timestamp: Option<String>,
    #[serde(rename = "From", default)]
    from: Option<String>,
    #[serde(rename = "To", default)]
    to: Option<String>,
}

impl From<&Task> for TaskElement {
    fn from(task: &Task) -> Self {
        Self {
            id: Some(task.id().to_string()),
            title: Some(task.title().to_string()),
            description: Some(task.description().to_string()),
            created_at: Some(format_timestamp(task.created_at())),
            due_date: task.due_date().map(format_timestamp),
            assignees: Some(AssigneesSection {
                assignees: task.assignees().to_vec(),
            }),
            history: Some(HistorySection {
                entries: task
                    .history()
                    .iter()
                    .map(|m| EntryElement {
                        timestamp: Some(format_timestamp(m.timestamp)),
                        from: Some(m.from.clone()),
                        to: Some(m.to.clone()),
                    })
                    .collect(),
            }),
        }
    }
}

pub fn render_project(project: &Project) -> Result<String> {
    let document = ProjectDocument {
        name: Some(project.name().to_string()),
        columns: Some(ColumnsSection {
            columns: project
                .columns()
                .iter()
                .map(|c| ColumnElement {
                    name: Some(c.name().to_string()),
                    wip_limit: Some(c.wip_limit().to_string()),
                })
                .collect(),
        }),
        tasks: Some(TasksSection {
            tasks: project.tasks().iter().map(TaskElement::from).collect(),
        }),
    };

    let mut xml = String::from(DECLARATION);
    xml.push('\n');
    let mut serializer = Serializer::new(&mut xml);
    serializer.indent(' ', 2);
    document.serialize(serializer)?;
    xml.push('\n');
    Ok(xml)
}

/// Parses a project document. Any structural problem fails the whole load;
/// `path` is only used to label the error.
pub fn parse_project(content: &str, path: &Path) -> Result<LoadedProject> {
    read_document(content).map_err(|reason| LanesError::load(path, reason))
}

fn read_document(content: &str) -> std::result::Result<LoadedProject, String> {
    match root_name(content)? {
        Some(name) if name == ROOT => {}
        Some(name) => {
            return Err(format!(
                "expected <{}> root element, found <{}>",
                ROOT, name
            ));
        }
        None => return Err("document has no root element".to_string()),
    }

    let document: ProjectDocument =
        quick_xml::de::from_str(content).map_err(|e| format!("malformed XML: {}", e))?;

    let name = document.name.ok_or("project has no name attribute")?;
    let columns = document
        .columns
        .ok_or("missing <Columns> section")?
        .columns
        .into_iter()
        .map(read_column)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if columns.is_empty() {
        return Err("project has no columns".to_string());
    }

    let tasks = document
        .tasks
        .ok_or("missing <Tasks> section")?
        .tasks
        .into_iter()
        .map(read_task)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(LoadedProject {
        name,
        columns,
        tasks,
    })
}

/// The deserializer accepts any root tag, so check it up front.
fn root_name(content: &str) -> std::result::Result<Option<String>, String> {
    let mut reader = Reader::from_str(content);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) | Ok(Event::Empty(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                return Ok(Some(name));
            }
            Ok(Event::Eof) => return Ok(None),
            Ok(_) => {}
            Err(e) => return Err(format!("malformed XML: {}", e)),
        }
    }
}

fn read_column(element: ColumnElement) -> std::result::Result<ColumnSpec, String> {
    let name = element.name.ok_or("column has no name attribute")?;
    let wip_limit = match element.wip_limit {
        None => 0,
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("column '{}' has invalid wip_limit '{}'", name, raw))?,
    };
    Ok(ColumnSpec::new(name, wip_limit))
}

fn read_task(element: TaskElement) -> std::result::Result<Task, String> {
    let id = element.id.ok_or("task has no id attribute")?;
    let title = element
        .title
        .ok_or_else(|| format!("task '{}' has no <Title>", id))?;
    let created_at = element
        .created_at
        .ok_or_else(|| format!("task '{}' has no <CreatedAt>", id))
        .and_then(|raw| timestamp(&id, &raw))?;
    let due_date = match element.due_date {
        Some(raw) if !raw.trim().is_empty() => Some(timestamp(&id, &raw)?),
        _ => None,
    };

    let assignees = element.assignees.map(|s| s.assignees).unwrap_or_default();
    let history = element
        .history
        .map(|s| s.entries)
        .unwrap_or_default()
        .into_iter()
        .map(|entry| read_movement(&id, entry))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Task::from_parts(
        TaskId::from(id),
        title,
        element.description.unwrap_or_default(),
        created_at,
    )
    .with_assignees(assignees)
    .with_due_date(due_date)
    .with_history(history))
}

fn read_movement(id: &str, entry: EntryElement) -> std::result::Result<Movement, String> {
    let missing = |name: &str| format!("history entry of task '{}' has no <{}>", id, name);
    let raw_timestamp = entry.timestamp.ok_or_else(|| missing("Timestamp"))?;
    Ok(Movement {
        timestamp: timestamp(id, &raw_timestamp)?,
        from: entry.from.ok_or_else(|| missing("From"))?,
        to: entry.to.ok_or_else(|| missing("To"))?,
    })
}

fn timestamp(id: &str, raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    parse_timestamp(raw).map_err(|e| format!("task '{}': {}", id, e))
}
