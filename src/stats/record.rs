//! Lifetime statistics and the completed-task log

use serde::{Deserialize, Serialize};

/// Aggregate stats across every completed task
///
/// Fields are only changed through the `record_*` methods so that
/// `accuracy` and `total_completed` always agree with the counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifetimeStats {
    total_completed: u32,
    quizzes_completed: u32,
    tips_completed: u32,
    correct_answers: u32,
    total_quiz_attempts: u32,
    /// Percentage of correct quiz answers (0-100)
    accuracy: f64,
    streak: u32,
}

impl LifetimeStats {
    /// Correct answers needed in one quiz task to keep the streak going
    pub const STREAK_THRESHOLD: u32 = 3;

    /// Record a completed quiz task
    pub fn record_quiz(&mut self, session_correct: u32, attempts: u32) {
        self.total_completed += 1;
        self.quizzes_completed += 1;
        self.correct_answers += session_correct;
        self.total_quiz_attempts += attempts;
        self.streak = if session_correct >= Self::STREAK_THRESHOLD { self.streak + 1 } else { 0 };
        self.recompute_accuracy();
    }

    /// Record a completed tip task
    pub fn record_tip(&mut self) {
        self.total_completed += 1;
        self.tips_completed += 1;
        self.recompute_accuracy();
    }

    /// Re-derive the dependent fields from the raw counters
    ///
    /// Applied to values read back from storage.
    pub fn normalized(mut self) -> Self {
        self.total_completed = self.quizzes_completed + self.tips_completed;
        self.recompute_accuracy();
        self
    }

    fn recompute_accuracy(&mut self) {
        self.accuracy = if self.total_quiz_attempts > 0 {
            f64::from(self.correct_answers) * 100.0 / f64::from(self.total_quiz_attempts)
        } else {
            0.0
        };
    }

    pub fn total_completed(&self) -> u32 {
        self.total_completed
    }

    pub fn quizzes_completed(&self) -> u32 {
        self.quizzes_completed
    }

    pub fn tips_completed(&self) -> u32 {
        self.tips_completed
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn total_quiz_attempts(&self) -> u32 {
        self.total_quiz_attempts
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }
}

/// Append-only log with one entry per completed task
///
/// Every entry carries the same constant id, so the log only yields a count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedTaskLog(Vec<String>);

impl CompletedTaskLog {
    /// Id written for every completed task
    pub const TASK_ID: &'static str = "daily-task";

    pub fn push(&mut self) {
        self.0.push(Self::TASK_ID.to_string());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
