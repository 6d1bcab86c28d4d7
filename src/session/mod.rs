//! Adaptive daily-task sessions
//!
//! [`SessionSelector`] decides what the next task contains and
//! [`TaskSessionEngine`] drives the task lifecycle and lifetime stats.

pub mod engine;
pub mod error;
pub mod history;
pub mod selector;
pub mod task;

// Re-exports
pub use engine::{GenerateOutcome, TaskCompletion, TaskSessionEngine};
pub use error::{GenerateError, InsufficientContentError, PoolShortage, SelectionError};
pub use history::SessionHistory;
pub use selector::{Batch, Selection, SessionSelector};
pub use task::{AnswerOutcome, CurrentTask, IgnoredAnswer, QuizTask, TipTask};
