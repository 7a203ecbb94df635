//! Plan authoring session state.
//!
//! A plan is authored against a [`PendingTasks`] list; saving it freezes the
//! list into the plan. [`EditingContext`] says whether the save creates a new
//! plan or rewrites an existing one, and for which equipment.

use crate::{
    error::{EntityKind, Result, UpkeepError},
    models::{MaintenancePlan, Task},
    validators::parse_task_lines,
};

/// Which plan and equipment an authoring session is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingContext {
    /// Plan being edited, `None` when authoring a new plan
    pub plan_key: Option<String>,
    pub equipment_key: String,
}

impl EditingContext {
    /// Session for a new plan on the given equipment.
    pub fn new_plan(equipment_key: impl Into<String>) -> Self {
        Self {
            plan_key: None,
            equipment_key: equipment_key.into(),
        }
    }

    /// Session editing an existing plan, opened from one of its equipment.
    pub fn editing(plan_key: impl Into<String>, equipment_key: impl Into<String>) -> Self {
        Self {
            plan_key: Some(plan_key.into()),
            equipment_key: equipment_key.into(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.plan_key.is_some()
    }
}

/// Ordered, transient task list with unique task keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingTasks {
    tasks: Vec<Task>,
}

impl PendingTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session from an existing plan's frozen tasks.
    pub fn from_plan(plan: &MaintenancePlan) -> Self {
        Self {
            tasks: plan.tasks.clone(),
        }
    }

    /// Appends a task, rejecting a key that is already pending.
    pub fn add(&mut self, task: Task) -> Result<()> {
        if self.contains(&task.task_key) {
            return Err(UpkeepError::duplicate(EntityKind::Task, task.task_key));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Parses tab-separated task lines and appends them all, or none.
    pub fn extend_from_lines(&mut self, text: &str) -> Result<usize> {
        let parsed = parse_task_lines(text)?;
        let mut staged = self.clone();
        for task in parsed {
            staged.add(task)?;
        }
        let added = staged.len() - self.len();
        *self = staged;
        Ok(added)
    }

    /// Removes a pending task by key.
    pub fn remove(&mut self, task_key: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.task_key == task_key)?;
        Some(self.tasks.remove(index))
    }

    pub fn contains(&self, task_key: &str) -> bool {
        self.tasks.iter().any(|t| t.task_key == task_key)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

impl TryFrom<Vec<Task>> for PendingTasks {
    type Error = UpkeepError;

    fn try_from(tasks: Vec<Task>) -> Result<Self> {
        let mut pending = Self::new();
        for task in tasks {
            pending.add(task)?;
        }
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_rejects_duplicate_task_key() {
        let mut pending = PendingTasks::new();
        pending
            .add(Task::new("T1", "Lubricate", "0:30:00").unwrap())
            .unwrap();
        let err = pending
            .add(Task::new("T1", "Inspect", "0:10:00").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            UpkeepError::DuplicateKey { entity: EntityKind::Task, .. }
        ));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_extend_from_lines_is_all_or_nothing() {
        let mut pending = PendingTasks::new();
        pending.extend_from_lines("T1\tLubricate\t0:30:00").unwrap();

        let err = pending
            .extend_from_lines("T2\tInspect\t0:10:00\nT1\tAgain\t0:05:00")
            .unwrap_err();
        assert!(matches!(err, UpkeepError::DuplicateKey { .. }));
        assert_eq!(pending.len(), 1);

        assert_eq!(pending.extend_from_lines("T2\tInspect\t0:10:00").unwrap(), 1);
        let keys: Vec<_> = pending.iter().map(|t| t.task_key.as_str()).collect();
        assert_eq!(keys, vec!["T1", "T2"]);
    }

    #[test]
    fn test_remove_pending_task() {
        let mut pending = PendingTasks::try_from(vec![
            Task::new("T1", "Lubricate", "0:30:00").unwrap(),
            Task::new("T2", "Inspect", "0:10:00").unwrap(),
        ])
        .unwrap();
        assert_eq!(pending.remove("T1").map(|t| t.task_key), Some("T1".to_string()));
        assert!(pending.remove("T1").is_none());
        assert!(!pending.contains("T1"));
    }

    #[test]
    fn test_editing_context_modes() {
        assert!(!EditingContext::new_plan("PUMP-01").is_editing());
        let ctx = EditingContext::editing("PL1", "PUMP-01");
        assert!(ctx.is_editing());
        assert_eq!(ctx.plan_key.as_deref(), Some("PL1"));
    }
}
