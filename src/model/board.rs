use super::project::Project;
use super::types::{BoardEvent, ColumnSpec};
use crate::error::{LanesError, Result};
use crate::notify::{Notifier, SubscriptionId};
use std::path::Path;

/// The set of open projects and which one is active.
///
/// There is no global board: construct one and keep it wherever the host
/// keeps its state.
#[derive(Debug)]
pub struct Board {
    projects: Vec<Project>,
    current: Option<usize>,
    columns: Vec<ColumnSpec>,
    notifier: Notifier<BoardEvent>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            current: None,
            columns: ColumnSpec::defaults(),
            notifier: Notifier::new(),
        }
    }

    /// A board whose new projects start with `columns` instead of the defaults.
    pub fn with_columns(columns: Vec<ColumnSpec>) -> Result<Self> {
        if columns.is_empty() {
            return Err(LanesError::NoColumns);
        }
        Ok(Self {
            columns,
            ..Self::new()
        })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.current.and_then(|i| self.projects.get(i))
    }

    pub fn current_project_mut(&mut self) -> Option<&mut Project> {
        self.current.and_then(|i| self.projects.get_mut(i))
    }

    pub fn create_project(&mut self, name: impl Into<String>) -> &mut Project {
        let name = name.into();
        tracing::info!(project = %name, "Creating project");
        let project = Project::build(name, &self.columns);
        self.push_current(project)
    }

    pub fn open_project(&mut self, path: impl AsRef<Path>) -> Result<&mut Project> {
        let project = Project::load_from_xml(path)?;
        Ok(self.push_current(project))
    }

    pub fn set_current(&mut self, index: usize) -> Result<&mut Project> {
        if index >= self.projects.len() {
            return Err(LanesError::ProjectIndex {
                index,
                len: self.projects.len(),
            });
        }
        self.current = Some(index);
        self.notifier
            .emit(&BoardEvent::CurrentProjectChanged { index });
        Ok(&mut self.projects[index])
    }

    fn push_current(&mut self, project: Project) -> &mut Project {
        let index = self.projects.len();
        self.projects.push(project);
        self.current = Some(index);
        self.notifier
            .emit(&BoardEvent::CurrentProjectChanged { index });
        &mut self.projects[index]
    }

    pub fn on_changed(&mut self, handler: impl FnMut(&BoardEvent) + 'static) -> SubscriptionId {
        self.notifier.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
