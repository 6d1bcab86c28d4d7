//! Items already shown in the current session

use std::collections::HashSet;

use crate::content::TaskType;

/// Session-scoped record of used content ids and the last task type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionHistory {
    used_quiz_ids: HashSet<String>,
    used_tip_ids: HashSet<String>,
    previous_task_type: Option<TaskType>,
}

impl SessionHistory {
    /// Ids of the given type already shown this session
    pub fn used(&self, task_type: TaskType) -> &HashSet<String> {
        match task_type {
            TaskType::Quiz => &self.used_quiz_ids,
            TaskType::Tip => &self.used_tip_ids,
        }
    }

    fn used_mut(&mut self, task_type: TaskType) -> &mut HashSet<String> {
        match task_type {
            TaskType::Quiz => &mut self.used_quiz_ids,
            TaskType::Tip => &mut self.used_tip_ids,
        }
    }

    pub fn is_used(&self, task_type: TaskType, id: &str) -> bool {
        self.used(task_type).contains(id)
    }

    /// Add ids to the used set (union, so repeats are harmless)
    pub fn mark_used<'a>(&mut self, task_type: TaskType, ids: impl IntoIterator<Item = &'a str>) {
        self.used_mut(task_type).extend(ids.into_iter().map(str::to_string));
    }

    pub fn previous_task_type(&self) -> Option<TaskType> {
        self.previous_task_type
    }

    pub fn set_previous_task_type(&mut self, task_type: TaskType) {
        self.previous_task_type = Some(task_type);
    }

    /// Forget used ids of one type
    pub fn clear_type(&mut self, task_type: TaskType) {
        self.used_mut(task_type).clear();
    }

    /// Forget used ids of both types, keeping the previous task type
    pub fn clear_used(&mut self) {
        self.used_quiz_ids.clear();
        self.used_tip_ids.clear();
    }

    /// Start over completely
    pub fn clear(&mut self) {
        self.clear_used();
        self.previous_task_type = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_used_is_idempotent() {
        let mut history = SessionHistory::default();
        history.mark_used(TaskType::Tip, ["t1", "t2"]);
        history.mark_used(TaskType::Tip, ["t2"]);

        assert_eq!(history.used(TaskType::Tip).len(), 2);
        assert!(history.is_used(TaskType::Tip, "t1"));
        assert!(!history.is_used(TaskType::Quiz, "t1"));
    }

    #[test]
    fn clear_used_keeps_previous_type() {
        let mut history = SessionHistory::default();
        history.mark_used(TaskType::Quiz, ["q1"]);
        history.set_previous_task_type(TaskType::Quiz);

        history.clear_used();
        assert!(history.used(TaskType::Quiz).is_empty());
        assert_eq!(history.previous_task_type(), Some(TaskType::Quiz));

        history.clear();
        assert_eq!(history.previous_task_type(), None);
    }

    #[test]
    fn clear_type_only_touches_that_type() {
        let mut history = SessionHistory::default();
        history.mark_used(TaskType::Quiz, ["q1"]);
        history.mark_used(TaskType::Tip, ["t1"]);

        history.clear_type(TaskType::Quiz);
        assert!(history.used(TaskType::Quiz).is_empty());
        assert!(history.is_used(TaskType::Tip, "t1"));
    }
}
