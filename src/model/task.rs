use super::types::{Movement, TaskEvent, TaskId};
use crate::notify::{Notifier, SubscriptionId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything a caller supplies when creating a task. The project fills in
/// the id and creation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub assignees: Vec<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignees.push(assignee.into());
        self
    }

    pub fn assignees(mut self, assignees: Vec<String>) -> Self {
        self.assignees = assignees;
        self
    }

    pub fn due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }
}

#[derive(Debug, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    assignees: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,

    created_at: DateTime<Utc>,
    history: Vec<Movement>,

    #[serde(skip)]
    notifier: Notifier<TaskEvent>,
}

impl Task {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::from_parts(TaskId::generate(), title, description, Utc::now())
    }

    /// Rebuilds a task that already has an identity, e.g. when loading.
    pub(crate) fn from_parts(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            assignees: Vec::new(),
            due_date: None,
            created_at,
            history: Vec::new(),
            notifier: Notifier::new(),
        }
    }

    pub fn from_draft(draft: TaskDraft) -> Self {
        Self::new(draft.title, draft.description)
            .with_assignees(draft.assignees)
            .with_due_date(draft.due_date)
    }

    pub fn with_assignees(mut self, assignees: Vec<String>) -> Self {
        self.assignees = assignees;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }

    pub(crate) fn with_history(mut self, history: Vec<Movement>) -> Self {
        self.history = history;
        self
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn assignees(&self) -> &[String] {
        &self.assignees
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn history(&self) -> &[Movement] {
        &self.history
    }

    /// Column name this task was last moved into, if it ever moved.
    pub fn current_column(&self) -> Option<&str> {
        self.history.last().map(|m| m.to.as_str())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_assignees(&mut self, assignees: Vec<String>) {
        self.assignees = assignees;
    }

    pub fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>) {
        self.due_date = due_date;
    }

    /// Appends a movement record and notifies subscribers.
    ///
    /// The names are not checked against any column.
    pub fn add_movement(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let movement = Movement::now(from, to);
        tracing::debug!(id = %self.id, from = %movement.from, to = %movement.to, "Task moved");
        self.history.push(movement.clone());
        self.notifier.emit(&TaskEvent::Moved {
            task_id: self.id.clone(),
            movement,
        });
    }

    pub fn on_changed(&mut self, handler: impl FnMut(&TaskEvent) + 'static) -> SubscriptionId {
        self.notifier.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}
