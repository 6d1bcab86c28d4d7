//! Choosing the type and items of the next task
//!
//! Selection prefers the opposite type of the previous task and never draws
//! an item twice within a session. When neither pool can fill a batch from
//! the unused items, the whole catalog becomes available again.

use rand::Rng;
use rand::seq::index;

use super::error::{InsufficientContentError, PoolShortage, SelectionError};
use super::history::SessionHistory;
use crate::content::{ContentCatalog, ContentItem, QuizItem, TaskType, TipItem};

/// Items drawn for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    Quiz(Vec<QuizItem>),
    Tip(Vec<TipItem>),
}

impl Batch {
    pub fn task_type(&self) -> TaskType {
        match self {
            Batch::Quiz(_) => TaskType::Quiz,
            Batch::Tip(_) => TaskType::Tip,
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        match self {
            Batch::Quiz(items) => items.iter().map(ContentItem::id).collect(),
            Batch::Tip(items) => items.iter().map(ContentItem::id).collect(),
        }
    }
}

/// Result of a successful selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub batch: Batch,
    /// Both pools were exhausted and the draw used the full catalog;
    /// the caller must clear the used ids of its history
    pub session_reset: bool,
}

impl Selection {
    pub fn task_type(&self) -> TaskType {
        self.batch.task_type()
    }
}

/// Selects tasks from a catalog
///
/// Selection is a pure function of the catalog, the history and the RNG;
/// applying the outcome to the history is left to the caller.
pub struct SessionSelector<'a> {
    catalog: &'a ContentCatalog,
}

impl<'a> SessionSelector<'a> {
    pub fn new(catalog: &'a ContentCatalog) -> Self {
        Self { catalog }
    }

    /// Pick the next task
    pub fn select<R: Rng + ?Sized>(
        &self,
        history: &SessionHistory,
        rng: &mut R,
    ) -> Result<Selection, SelectionError> {
        let quizzes = unused(self.catalog.quizzes(), history, TaskType::Quiz);
        let tips = unused(self.catalog.tips(), history, TaskType::Tip);
        let previous = history.previous_task_type();

        if let Some(task_type) = choose_type(previous, quizzes.len(), tips.len(), rng) {
            tracing::debug!(%task_type, quizzes = quizzes.len(), tips = tips.len(), "Selected task type");
            let batch = draw_batch(task_type, &quizzes, &tips, rng)?;
            return Ok(Selection { batch, session_reset: false });
        }

        // Both pools exhausted, fall back to the full catalog
        let quizzes: Vec<&QuizItem> = self.catalog.quizzes().iter().collect();
        let tips: Vec<&TipItem> = self.catalog.tips().iter().collect();

        let Some(task_type) = choose_type(previous, quizzes.len(), tips.len(), rng) else {
            return Err(InsufficientContentError {
                short: vec![
                    shortage(TaskType::Quiz, quizzes.len()),
                    shortage(TaskType::Tip, tips.len()),
                ],
            }
            .into());
        };

        tracing::debug!(%task_type, "Session pools exhausted, drawing from full catalog");
        let batch = draw_batch(task_type, &quizzes, &tips, rng)?;
        Ok(Selection { batch, session_reset: true })
    }
}

fn unused<'c, T: ContentItem>(
    pool: &'c [T],
    history: &SessionHistory,
    task_type: TaskType,
) -> Vec<&'c T> {
    pool.iter().filter(|item| !history.is_used(task_type, item.id())).collect()
}

fn shortage(task_type: TaskType, available: usize) -> PoolShortage {
    PoolShortage { task_type, available, required: task_type.batch_size() }
}

/// Apply the alternation policy; `None` means neither type can fill a batch
fn choose_type<R: Rng + ?Sized>(
    previous: Option<TaskType>,
    quizzes_available: usize,
    tips_available: usize,
    rng: &mut R,
) -> Option<TaskType> {
    let has_quizzes = quizzes_available >= TaskType::Quiz.batch_size();
    let has_tips = tips_available >= TaskType::Tip.batch_size();

    match (previous, has_quizzes, has_tips) {
        (Some(TaskType::Quiz), _, true) => Some(TaskType::Tip),
        (Some(TaskType::Tip), true, _) => Some(TaskType::Quiz),
        (_, true, true) => {
            Some(if rng.random_bool(0.5) { TaskType::Quiz } else { TaskType::Tip })
        }
        (_, true, false) => Some(TaskType::Quiz),
        (_, false, true) => Some(TaskType::Tip),
        (_, false, false) => None,
    }
}

fn draw_batch<R: Rng + ?Sized>(
    task_type: TaskType,
    quizzes: &[&QuizItem],
    tips: &[&TipItem],
    rng: &mut R,
) -> Result<Batch, SelectionError> {
    match task_type {
        TaskType::Quiz => draw(quizzes, task_type, rng).map(Batch::Quiz),
        TaskType::Tip => draw(tips, task_type, rng).map(Batch::Tip),
    }
}

/// Draw a full batch uniformly without replacement
fn draw<T: ContentItem, R: Rng + ?Sized>(
    pool: &[&T],
    task_type: TaskType,
    rng: &mut R,
) -> Result<Vec<T>, SelectionError> {
    let required = task_type.batch_size();
    if pool.len() < required {
        return Err(SelectionError::Shortfall { task_type, available: pool.len(), required });
    }

    Ok(index::sample(rng, pool.len(), required).into_iter().map(|i| pool[i].clone()).collect())
}
