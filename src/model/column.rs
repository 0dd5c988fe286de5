use super::types::{ColumnEvent, ColumnSpec, TaskId};
use crate::notify::{Notifier, SubscriptionId};
use serde::Serialize;

/// An ordered, optionally capacity-limited list of task ids.
#[derive(Debug, Serialize)]
pub struct Column {
    name: String,
    wip_limit: usize,
    tasks: Vec<TaskId>,

    #[serde(skip)]
    notifier: Notifier<ColumnEvent>,
}

impl Column {
    pub fn new(name: impl Into<String>, wip_limit: usize) -> Self {
        Self {
            name: name.into(),
            wip_limit,
            tasks: Vec::new(),
            notifier: Notifier::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wip_limit(&self) -> usize {
        self.wip_limit
    }

    pub fn task_ids(&self) -> &[TaskId] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// True when a WIP limit is set and reached (or exceeded).
    pub fn is_full(&self) -> bool {
        self.wip_limit > 0 && self.tasks.len() >= self.wip_limit
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.tasks.contains(id)
    }

    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t == id)
    }

    /// Appends the task unless the column is at its WIP limit.
    ///
    /// A rejected add changes nothing and notifies no one. Adding the same id
    /// twice stores it twice.
    pub fn add_task(&mut self, id: &TaskId) -> bool {
        if self.is_full() {
            tracing::debug!(column = %self.name, id = %id, limit = self.wip_limit, "WIP limit reached");
            return false;
        }
        self.insert_unchecked(self.tasks.len(), id);
        true
    }

    /// Removes the first occurrence of the task. Absence is not an error.
    pub fn remove_task(&mut self, id: &TaskId) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.tasks.remove(pos);
        self.notifier.emit(&ColumnEvent::TaskRemoved {
            column: self.name.clone(),
            task_id: id.clone(),
        });
        true
    }

    /// Places a task ignoring the WIP limit. Used for the landing column,
    /// for rebuilding membership on load, and to undo a failed move.
    pub(crate) fn insert_unchecked(&mut self, index: usize, id: &TaskId) {
        let index = index.min(self.tasks.len());
        self.tasks.insert(index, id.clone());
        self.notifier.emit(&ColumnEvent::TaskAdded {
            column: self.name.clone(),
            task_id: id.clone(),
        });
    }

    pub(crate) fn push_unchecked(&mut self, id: &TaskId) {
        self.insert_unchecked(self.tasks.len(), id);
    }

    pub fn spec(&self) -> ColumnSpec {
        ColumnSpec::new(self.name.clone(), self.wip_limit)
    }

    pub fn on_changed(&mut self, handler: impl FnMut(&ColumnEvent) + 'static) -> SubscriptionId {
        self.notifier.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

impl From<&ColumnSpec> for Column {
    fn from(spec: &ColumnSpec) -> Self {
        Column::new(spec.name.clone(), spec.wip_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ids(n: usize) -> Vec<TaskId> {
        (0..n).map(|i| TaskId::from(format!("t{}", i))).collect()
    }

    #[test]
    fn test_unlimited_column_always_accepts() {
        let mut column = Column::new("Backlog", 0);
        for id in ids(100) {
            assert!(column.add_task(&id));
        }
        assert_eq!(column.len(), 100);
        assert!(!column.is_full());
    }

    #[test]
    fn test_wip_limit_rejects_overflow() {
        let mut column = Column::new("Review", 2);
        let ids = ids(3);
        assert!(column.add_task(&ids[0]));
        assert!(column.add_task(&ids[1]));
        assert!(!column.add_task(&ids[2]));
        assert_eq!(column.task_ids(), &ids[..2]);
    }

    #[test]
    fn test_rejected_add_does_not_notify() {
        let count = Rc::new(RefCell::new(0));
        let mut column = Column::new("Tiny", 1);
        let c = Rc::clone(&count);
        column.on_changed(move |_| *c.borrow_mut() += 1);

        let ids = ids(2);
        assert!(column.add_task(&ids[0]));
        assert!(!column.add_task(&ids[1]));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_remove_missing_task_is_quiet() {
        let count = Rc::new(RefCell::new(0));
        let mut column = Column::new("Done", 0);
        let c = Rc::clone(&count);
        column.on_changed(move |_| *c.borrow_mut() += 1);

        assert!(!column.remove_task(&TaskId::from("ghost")));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_remove_then_add_restores_sequence() {
        let mut column = Column::new("Backlog", 0);
        let ids = ids(3);
        for id in &ids {
            column.add_task(id);
        }
        let before = column.task_ids().to_vec();

        assert!(column.remove_task(&ids[2]));
        assert!(column.add_task(&ids[2]));

        assert_eq!(column.task_ids(), before.as_slice());
    }

    #[test]
    fn test_duplicate_add_is_not_prevented() {
        let mut column = Column::new("Backlog", 0);
        let id = TaskId::from("dup");
        column.add_task(&id);
        column.add_task(&id);
        assert_eq!(column.len(), 2);

        assert!(column.remove_task(&id));
        assert_eq!(column.len(), 1);
    }

    #[test]
    fn test_insert_unchecked_ignores_limit() {
        let mut column = Column::new("Intake", 1);
        let ids = ids(2);
        column.push_unchecked(&ids[0]);
        column.push_unchecked(&ids[1]);
        assert_eq!(column.len(), 2);
        assert!(column.is_full());
    }

    #[test]
    fn test_events_carry_column_name() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut column = Column::new("In Progress", 0);
        let sink = Rc::clone(&events);
        column.on_changed(move |e| sink.borrow_mut().push(e.clone()));

        let id = TaskId::from("a");
        column.add_task(&id);
        column.remove_task(&id);

        assert_eq!(
            *events.borrow(),
            vec![
                ColumnEvent::TaskAdded {
                    column: "In Progress".to_string(),
                    task_id: id.clone()
                },
                ColumnEvent::TaskRemoved {
                    column: "In Progress".to_string(),
                    task_id: id
                },
            ]
        );
    }
}
