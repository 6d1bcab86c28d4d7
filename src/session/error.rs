//! Error types for task generation

use std::fmt;

use thiserror::Error;

use crate::content::TaskType;

/// One pool that cannot fill a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolShortage {
    pub task_type: TaskType,
    pub available: usize,
    pub required: usize,
}

impl fmt::Display for PoolShortage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} of {} needed)", self.task_type, self.available, self.required)
    }
}

/// Not even the full catalog can fill a batch of any type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not enough content to build a task: {}", list_shortages(.short))]
pub struct InsufficientContentError {
    /// Every pool that fell short
    pub short: Vec<PoolShortage>,
}

fn list_shortages(short: &[PoolShortage]) -> String {
    short.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Errors that can occur while selecting a task
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error(transparent)]
    InsufficientContent(#[from] InsufficientContentError),

    /// The chosen pool shrank below a full batch while drawing
    #[error("only {available} {task_type} items left while drawing {required}")]
    Shortfall {
        task_type: TaskType,
        available: usize,
        required: usize,
    },
}

/// Errors surfaced by `generate_new_task`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The catalog failed to load; a reload is needed
    #[error("content is unavailable: {0}")]
    CatalogUnavailable(String),

    #[error(transparent)]
    InsufficientContent(#[from] InsufficientContentError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_content_names_short_pools() {
        let err = InsufficientContentError {
            short: vec![
                PoolShortage { task_type: TaskType::Quiz, available: 3, required: 5 },
                PoolShortage { task_type: TaskType::Tip, available: 1, required: 2 },
            ],
        };
        assert_eq!(
            err.to_string(),
            "not enough content to build a task: quiz (3 of 5 needed), tip (1 of 2 needed)"
        );
    }
}
