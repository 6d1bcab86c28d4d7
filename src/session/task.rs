//! The task currently presented to the user

use std::collections::HashMap;

use super::selector::Batch;
use crate::content::{ContentItem, QuizItem, TaskType, TipItem};

/// Why an answer was not recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredAnswer {
    /// No quiz task is active
    NoQuizActive,
    /// The answer targets an item other than the one under the cursor
    NotCurrentItem,
    /// The option id does not belong to the item
    UnknownOption,
}

/// Outcome of submitting a quiz answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Recorded { correct: bool },
    Ignored(IgnoredAnswer),
}

/// Progress through an active quiz batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizTask {
    items: Vec<QuizItem>,
    cursor: usize,
    answers: HashMap<String, bool>,
    correct_count: u32,
}

impl QuizTask {
    pub fn new(items: Vec<QuizItem>) -> Self {
        Self { items, cursor: 0, answers: HashMap::new(), correct_count: 0 }
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    /// Index of the question being shown
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Item under the cursor, `None` once advanced past the last question
    pub fn current_item(&self) -> Option<&QuizItem> {
        self.items.get(self.cursor)
    }

    /// Correctness of the latest answer per item id
    pub fn answers(&self) -> &HashMap<String, bool> {
        &self.answers
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Record an answer for the item under the cursor
    ///
    /// Answering the same item again replaces the earlier judgment.
    pub fn answer(&mut self, item_id: &str, option_id: u32) -> AnswerOutcome {
        let Some(item) = self.current_item().filter(|item| item.id() == item_id) else {
            return AnswerOutcome::Ignored(IgnoredAnswer::NotCurrentItem);
        };
        let Some(option) = item.option(option_id) else {
            return AnswerOutcome::Ignored(IgnoredAnswer::UnknownOption);
        };

        let correct = option.is_correct;
        self.answers.insert(item_id.to_string(), correct);
        self.correct_count = self.answers.values().filter(|&&c| c).count() as u32;
        AnswerOutcome::Recorded { correct }
    }

    /// Move to the next question
    ///
    /// The cursor is not clamped; callers stop after the last question.
    pub fn advance(&mut self) {
        self.cursor += 1;
    }
}

/// An active tip batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipTask {
    items: Vec<TipItem>,
}

impl TipTask {
    pub fn new(items: Vec<TipItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[TipItem] {
        &self.items
    }
}

/// The single active task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentTask {
    Quiz(QuizTask),
    Tip(TipTask),
}

impl CurrentTask {
    pub fn task_type(&self) -> TaskType {
        match self {
            CurrentTask::Quiz(_) => TaskType::Quiz,
            CurrentTask::Tip(_) => TaskType::Tip,
        }
    }

    pub fn item_ids(&self) -> Vec<&str> {
        match self {
            CurrentTask::Quiz(quiz) => quiz.items.iter().map(ContentItem::id).collect(),
            CurrentTask::Tip(tips) => tips.items.iter().map(ContentItem::id).collect(),
        }
    }
}

impl From<Batch> for CurrentTask {
    fn from(batch: Batch) -> Self {
        match batch {
            Batch::Quiz(items) => CurrentTask::Quiz(QuizTask::new(items)),
            Batch::Tip(items) => CurrentTask::Tip(TipTask::new(items)),
        }
    }
}
