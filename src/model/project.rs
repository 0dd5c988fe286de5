use super::column::Column;
use super::task::{Task, TaskDraft};
use super::types::{ColumnSpec, MoveOutcome, ProjectEvent, TaskId};
use crate::error::{LanesError, Result};
use crate::notify::{Notifier, SubscriptionId};
use crate::storage::{self, LoadedProject};
use serde::Serialize;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A named set of columns plus the tasks distributed across them.
///
/// `tasks` is the authoritative list; columns only hold ids. Once a file path
/// is bound (by [`save_to_xml`](Self::save_to_xml) or
/// [`load_from_xml`](Self::load_from_xml)), every change to a task's history
/// rewrites the whole file before the mutating call returns.
#[derive(Debug, Serialize)]
pub struct Project {
    name: String,
    columns: Vec<Column>,
    tasks: Vec<Task>,

    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<PathBuf>,

    /// Set by task subscriptions, cleared by the next auto-save.
    #[serde(skip)]
    dirty: Rc<Cell<bool>>,

    #[serde(skip)]
    notifier: Notifier<ProjectEvent>,
}

impl Project {
    /// A project with the default Backlog / In Progress / Review / Done columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self::build(name.into(), &ColumnSpec::defaults())
    }

    /// A project with custom initial columns. The first one receives new tasks.
    pub fn with_columns(name: impl Into<String>, columns: &[ColumnSpec]) -> Result<Self> {
        if columns.is_empty() {
            return Err(LanesError::NoColumns);
        }
        Ok(Self::build(name.into(), columns))
    }

    /// `columns` must not be empty.
    pub(crate) fn build(name: String, columns: &[ColumnSpec]) -> Self {
        Self {
            name,
            columns: columns.iter().map(Column::from).collect(),
            tasks: Vec::new(),
            file_path: None,
            dirty: Rc::new(Cell::new(false)),
            notifier: Notifier::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Result<&Column> {
        self.columns.get(index).ok_or(LanesError::ColumnIndex {
            index,
            len: self.columns.len(),
        })
    }

    /// Index of the first column with this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Index of the column currently holding the task.
    pub fn column_of(&self, id: &TaskId) -> Option<usize> {
        self.columns.iter().position(|c| c.contains(id))
    }

    /// Tasks of one column, in column order.
    pub fn tasks_in(&self, index: usize) -> Result<Vec<&Task>> {
        let column = self.column(index)?;
        Ok(column
            .task_ids()
            .iter()
            .filter_map(|id| self.task(id))
            .collect())
    }

    /// Tasks that belong to the project but sit in no column. This only
    /// happens after loading a file whose history points at a column that no
    /// longer exists.
    pub fn orphaned_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.column_of(t.id()).is_none())
            .collect()
    }

    /// Creates a task in the first column.
    ///
    /// The first column's WIP limit is not enforced here: new work always
    /// lands, even in a full intake column.
    pub fn create_task(&mut self, draft: TaskDraft) -> &Task {
        let mut task = Task::from_draft(draft);
        self.watch(&mut task);

        let id = task.id().clone();
        tracing::info!(project = %self.name, id = %id, title = %task.title(), "Creating task");

        self.columns[0].push_unchecked(&id);
        self.tasks.push(task);
        self.notifier.emit(&ProjectEvent::TaskCreated { task_id: id });

        &self.tasks[self.tasks.len() - 1]
    }

    /// Moves a task between two columns by index.
    ///
    /// Invalid indices are an error. A task missing from the source column or
    /// a full destination column are ordinary outcomes; in both cases the
    /// columns end up as they started and no history is recorded.
    ///
    /// A failed auto-save returns [`LanesError::AutoSave`] after the move has
    /// been committed in memory. The save stays pending and is retried by the
    /// next mutating call.
    pub fn move_task(&mut self, id: &TaskId, from: usize, to: usize) -> Result<MoveOutcome> {
        self.column(from)?;
        self.column(to)?;

        let Some(task_index) = self.tasks.iter().position(|t| t.id() == id) else {
            return Ok(MoveOutcome::NotInSource);
        };
        let Some(source_position) = self.columns[from].position(id) else {
            return Ok(MoveOutcome::NotInSource);
        };

        self.columns[from].remove_task(id);
        if !self.columns[to].add_task(id) {
            self.columns[from].insert_unchecked(source_position, id);
            tracing::info!(
                project = %self.name,
                id = %id,
                column = %self.columns[to].name(),
                "Move rejected by WIP limit"
            );
            return Ok(MoveOutcome::ColumnFull);
        }

        let from_name = self.columns[from].name().to_string();
        let to_name = self.columns[to].name().to_string();
        tracing::info!(project = %self.name, id = %id, from = %from_name, to = %to_name, "Moving task");

        self.tasks[task_index].add_movement(from_name, to_name);
        // The file is current before project subscribers hear about the move
        let saved = self.auto_save();
        self.notifier.emit(&ProjectEvent::TaskMoved {
            task_id: id.clone(),
            from,
            to,
        });
        saved?;

        Ok(MoveOutcome::Moved)
    }

    /// Runs `f` against a task and then flushes any pending auto-save.
    ///
    /// This is the way for a host to edit a task in place; history changes
    /// made inside `f` are persisted before this returns.
    pub fn update_task<R>(&mut self, id: &TaskId, f: impl FnOnce(&mut Task) -> R) -> Result<R> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| LanesError::TaskNotFound(id.to_string()))?;
        let result = f(task);
        self.auto_save()?;
        Ok(result)
    }

    /// Writes the whole project to `path` and binds it for auto-save.
    pub fn save_to_xml(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tracing::info!(project = %self.name, path = %path.display(), "Saving project");

        self.write_to(path)?;
        self.file_path = Some(path.to_path_buf());
        self.dirty.set(false);
        self.notifier.emit(&ProjectEvent::Saved {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    /// Reads a project file and binds it for auto-save.
    ///
    /// Each task goes back into the column named by its last movement, or the
    /// first column if it never moved. A task whose last column no longer
    /// exists stays in the project but in no column; see
    /// [`orphaned_tasks`](Self::orphaned_tasks).
    pub fn load_from_xml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading project");

        let content = std::fs::read_to_string(path)?;
        let loaded = storage::parse_project(&content, path)?;
        Ok(Self::from_loaded(loaded, path))
    }

    fn from_loaded(loaded: LoadedProject, path: &Path) -> Self {
        let LoadedProject {
            name,
            columns,
            tasks,
        } = loaded;

        let mut project = Self::build(name, &columns);
        project.file_path = Some(path.to_path_buf());

        for mut task in tasks {
            project.watch(&mut task);
            project.place_loaded(&task);
            project.tasks.push(task);
        }
        project
    }

    fn place_loaded(&mut self, task: &Task) {
        match task.current_column() {
            None => self.columns[0].push_unchecked(task.id()),
            Some(name) => match self.column_index(name) {
                Some(index) => self.columns[index].push_unchecked(task.id()),
                None => tracing::warn!(
                    project = %self.name,
                    id = %task.id(),
                    column = %name,
                    "Task's last column no longer exists; leaving it out of every column"
                ),
            },
        }
    }

    /// Routes the task's change notifications into this project's auto-save.
    fn watch(&self, task: &mut Task) {
        let dirty = Rc::clone(&self.dirty);
        task.on_changed(move |_| dirty.set(true));
    }

    /// True when a history change has not reached the bound file yet.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty.get() && self.file_path.is_some()
    }

    /// Leaves the dirty flag set when the write fails.
    fn auto_save(&mut self) -> Result<()> {
        if !self.dirty.get() {
            return Ok(());
        }
        let Some(path) = self.file_path.clone() else {
            self.dirty.set(false);
            return Ok(());
        };

        tracing::debug!(project = %self.name, path = %path.display(), "Auto-saving project");
        match self.write_to(&path) {
            Ok(()) => {
                self.dirty.set(false);
                Ok(())
            }
            Err(source) => {
                tracing::error!(project = %self.name, path = %path.display(), error = %source, "Auto-save failed");
                Err(LanesError::AutoSave {
                    path,
                    source: Box::new(source),
                })
            }
        }
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        let content = storage::render_project(self)?;
        storage::atomic_write(path, &content)
    }

    pub fn on_changed(&mut self, handler: impl FnMut(&ProjectEvent) + 'static) -> SubscriptionId {
        self.notifier.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    fn limited(limits: &[(&str, usize)]) -> Project {
        let specs: Vec<_> = limits
            .iter()
            .map(|(name, limit)| ColumnSpec::new(*name, *limit))
            .collect();
        Project::with_columns("Limited", &specs).unwrap()
    }

    #[test]
    fn test_new_project_has_default_columns() {
        let project = Project::new("P");
        let names: Vec<_> = project.columns().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Backlog", "In Progress", "Review", "Done"]);
        assert!(project.tasks().is_empty());
        assert!(project.file_path().is_none());
    }

    #[test]
    fn test_with_columns_rejects_empty() {
        assert!(matches!(
            Project::with_columns("Empty", &[]),
            Err(LanesError::NoColumns)
        ));
    }

    #[test]
    fn test_create_task_lands_in_first_column() {
        let mut project = Project::new("P");
        let id = project.create_task(TaskDraft::new("Write spec")).id().clone();

        assert_eq!(project.column_of(&id), Some(0));
        assert_eq!(project.tasks().len(), 1);
        assert!(project.task(&id).unwrap().history().is_empty());
    }

    #[test]
    fn test_create_task_ignores_first_column_limit() {
        let mut project = limited(&[("Intake", 1), ("Done", 0)]);
        project.create_task(TaskDraft::new("one"));
        project.create_task(TaskDraft::new("two"));
        project.create_task(TaskDraft::new("three"));

        assert_eq!(project.columns()[0].len(), 3);
    }

    #[test]
    fn test_move_task_records_history() {
        let mut project = Project::new("P");
        let id = project.create_task(TaskDraft::new("Move")).id().clone();

        let outcome = project.move_task(&id, 0, 1).unwrap();

        assert_eq!(outcome, MoveOutcome::Moved);
        assert!(!project.columns()[0].contains(&id));
        assert!(project.columns()[1].contains(&id));
        let history = project.task(&id).unwrap().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].from, "Backlog");
        assert_eq!(history[0].to, "In Progress");
    }

    #[test]
    fn test_move_into_full_column_is_rolled_back() {
        let mut project = limited(&[("Todo", 0), ("Doing", 1)]);
        let a = project.create_task(TaskDraft::new("a")).id().clone();
        let b = project.create_task(TaskDraft::new("b")).id().clone();
        let c = project.create_task(TaskDraft::new("c")).id().clone();
        assert!(project.move_task(&a, 0, 1).unwrap().is_moved());

        let outcome = project.move_task(&b, 0, 1).unwrap();

        assert_eq!(outcome, MoveOutcome::ColumnFull);
        assert_eq!(project.columns()[0].task_ids(), [b.clone(), c]);
        assert_eq!(project.columns()[1].task_ids(), [a]);
        assert!(project.task(&b).unwrap().history().is_empty());
    }

    #[test]
    fn test_move_task_not_in_source() {
        let mut project = Project::new("P");
        let id = project.create_task(TaskDraft::new("Stay")).id().clone();

        assert_eq!(
            project.move_task(&id, 2, 3).unwrap(),
            MoveOutcome::NotInSource
        );
        assert_eq!(
            project.move_task(&TaskId::from("nope"), 0, 1).unwrap(),
            MoveOutcome::NotInSource
        );
        assert_eq!(project.column_of(&id), Some(0));
    }

    #[test]
    fn test_move_task_invalid_index() {
        let mut project = Project::new("P");
        let id = project.create_task(TaskDraft::new("x")).id().clone();

        let err = project.move_task(&id, 0, 9).unwrap_err();
        assert!(matches!(err, LanesError::ColumnIndex { index: 9, len: 4 }));
        assert_eq!(project.column_of(&id), Some(0));
    }

    #[test]
    fn test_project_events() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut project = Project::new("P");
        let sink = Rc::clone(&events);
        project.on_changed(move |e| sink.borrow_mut().push(e.clone()));

        let id = project.create_task(TaskDraft::new("x")).id().clone();
        project.move_task(&id, 0, 1).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                ProjectEvent::TaskCreated {
                    task_id: id.clone()
                },
                ProjectEvent::TaskMoved {
                    task_id: id,
                    from: 0,
                    to: 1
                },
            ]
        );
    }

    #[test]
    fn test_no_auto_save_without_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut project = Project::new("P");
        let id = project.create_task(TaskDraft::new("x")).id().clone();
        project.move_task(&id, 0, 1).unwrap();

        assert!(std::fs::read_dir(temp_dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_auto_save_after_move() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("p.xml");
        let mut project = Project::new("P");
        let id = project.create_task(TaskDraft::new("x")).id().clone();
        project.save_to_xml(&path).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();
        assert!(!before.contains("<Entry>"));

        project.move_task(&id, 0, 1).unwrap();

        let after = std::fs::read_to_string(&path).unwrap();
        assert!(after.contains("<To>In Progress</To>"));
    }

    #[test]
    fn test_file_is_saved_before_project_subscribers_run() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("p.xml");
        let mut project = Project::new("P");
        let id = project.create_task(TaskDraft::new("x")).id().clone();
        project.save_to_xml(&path).unwrap();

        let seen_on_disk = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen_on_disk);
        let file = path.clone();
        project.on_changed(move |event| {
            if let ProjectEvent::TaskMoved { .. } = event {
                let content = std::fs::read_to_string(&file).unwrap();
                sink.set(Some(content.contains("<To>In Progress</To>")));
            }
        });

        project.move_task(&id, 0, 1).unwrap();

        assert_eq!(seen_on_disk.get(), Some(true));
    }

    #[test]
    fn test_failed_auto_save_keeps_move_and_retries() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("sub");
        let path = dir.join("p.xml");
        let mut project = Project::new("P");
        let id = project.create_task(TaskDraft::new("x")).id().clone();
        project.save_to_xml(&path).unwrap();

        // A plain file where the directory was makes every write fail
        std::fs::remove_dir_all(&dir).unwrap();
        std::fs::write(&dir, "not a directory").unwrap();

        let err = project.move_task(&id, 0, 1).unwrap_err();
        assert!(matches!(&err, LanesError::AutoSave { path: p, .. } if *p == path));
        assert_eq!(project.column_of(&id), Some(1));
        assert_eq!(project.task(&id).unwrap().history().len(), 1);
        assert!(project.has_unsaved_changes());

        std::fs::remove_file(&dir).unwrap();
        project.update_task(&id, |_| ()).unwrap();

        assert!(!project.has_unsaved_changes());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<To>In Progress</To>"));
    }

    #[test]
    fn test_update_task_flushes_history_changes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("p.xml");
        let mut project = Project::new("P");
        let id = project.create_task(TaskDraft::new("x")).id().clone();
        project.save_to_xml(&path).unwrap();

        project
            .update_task(&id, |task| task.add_movement("Backlog", "Somewhere"))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<To>Somewhere</To>"));
    }

    #[test]
    fn test_update_task_unknown_id() {
        let mut project = Project::new("P");
        let err = project
            .update_task(&TaskId::from("missing"), |_| ())
            .unwrap_err();
        assert!(matches!(err, LanesError::TaskNotFound(id) if id == "missing"));
    }

    #[test]
    fn test_tasks_in_follows_column_order() {
        let mut project = Project::new("P");
        project.create_task(TaskDraft::new("first"));
        project.create_task(TaskDraft::new("second"));

        let titles: Vec<_> = project
            .tasks_in(0)
            .unwrap()
            .iter()
            .map(|t| t.title())
            .collect();
        assert_eq!(titles, ["first", "second"]);
        assert!(project.tasks_in(4).is_err());
    }
}
