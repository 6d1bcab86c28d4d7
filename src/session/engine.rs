//! The daily-task state machine
//!
//! The engine is either idle or has exactly one active task. Commands run to
//! completion one at a time; the catalog load is the only asynchronous step,
//! and while it is outstanding `generate_new_task` reports
//! [`GenerateOutcome::NotReady`].

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::error::{GenerateError, InsufficientContentError, PoolShortage, SelectionError};
use super::history::SessionHistory;
use super::selector::SessionSelector;
use super::task::{AnswerOutcome, CurrentTask, IgnoredAnswer};
use crate::content::{
    CatalogSlot, ContentCatalog, ContentProvider, LoadError, LoadTicket, QuizItem, TaskType,
};
use crate::notify::Notifier;
use crate::stats::{CompletedTaskLog, DurableStore, LifetimeStats, StatsRepository};

/// Result of asking for a new task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// A task is now active
    Generated {
        task_type: TaskType,
        /// The session started over because every item had been shown
        session_reset: bool,
    },
    /// The catalog has not finished loading
    NotReady,
}

/// Summary of a task that was just completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCompletion {
    pub task_type: TaskType,
    /// Correct answers in this task (always 0 for tips)
    pub session_correct: u32,
}

/// Drives task generation, quiz answering and lifetime stats
pub struct TaskSessionEngine {
    catalog: CatalogSlot,
    history: SessionHistory,
    current: Option<CurrentTask>,
    stats: LifetimeStats,
    log: CompletedTaskLog,
    repository: StatsRepository,
    notifier: Box<dyn Notifier>,
    rng: StdRng,
    error: Option<String>,
}

impl TaskSessionEngine {
    /// Create an engine, restoring any persisted stats
    pub fn new(store: Box<dyn DurableStore>, notifier: Box<dyn Notifier>) -> Self {
        Self::with_rng(store, notifier, StdRng::from_os_rng())
    }

    /// Create an engine with a specific RNG
    pub fn with_rng(store: Box<dyn DurableStore>, notifier: Box<dyn Notifier>, rng: StdRng) -> Self {
        let mut repository = StatsRepository::new(store);
        let stats = repository.load_stats();
        let log = repository.load_log();

        Self {
            catalog: CatalogSlot::default(),
            history: SessionHistory::default(),
            current: None,
            stats,
            log,
            repository,
            notifier,
            rng,
            error: None,
        }
    }

    // --- Catalog loading ---

    /// Start a catalog load; only the latest ticket can install its result
    pub fn begin_load(&mut self) -> Result<LoadTicket, LoadError> {
        let ticket = self.catalog.begin()?;
        self.error = None;
        Ok(ticket)
    }

    /// Deliver the result of a load, returns false if the ticket was superseded
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ContentCatalog, LoadError>,
    ) -> bool {
        match result {
            Ok(catalog) => self.catalog.install(ticket, catalog),
            Err(e) => self.record_load_failure(ticket, &e),
        }
    }

    /// Load the catalog from a provider and install it
    pub async fn load_catalog(&mut self, provider: &dyn ContentProvider) -> Result<(), LoadError> {
        let ticket = self.begin_load()?;
        match ContentCatalog::load(provider).await {
            Ok(catalog) => {
                self.catalog.install(ticket, catalog);
                Ok(())
            }
            Err(e) => {
                self.record_load_failure(ticket, &e);
                Err(e)
            }
        }
    }

    fn record_load_failure(&mut self, ticket: LoadTicket, error: &LoadError) -> bool {
        let message = error.to_string();
        if !self.catalog.fail(ticket, message.clone()) {
            return false;
        }
        self.notifier.error(&format!("Could not load content: {message}"));
        self.error = Some(message);
        true
    }

    // --- Commands ---

    /// Replace the current task with a freshly selected one
    pub fn generate_new_task(&mut self) -> Result<GenerateOutcome, GenerateError> {
        let Some(catalog) = self.catalog.catalog() else {
            if let Some(message) = self.catalog.failure() {
                return Err(GenerateError::CatalogUnavailable(message.to_string()));
            }
            return Ok(GenerateOutcome::NotReady);
        };

        let selector = SessionSelector::new(catalog);
        let result = match selector.select(&self.history, &mut self.rng) {
            Err(SelectionError::Shortfall { task_type, .. }) => {
                self.history.clear_type(task_type);
                selector.select(&self.history, &mut self.rng)
            }
            other => other,
        };

        let selection = match result {
            Ok(selection) => selection,
            Err(e) => {
                let error = match e {
                    SelectionError::InsufficientContent(e) => e,
                    SelectionError::Shortfall { task_type, available, required } => {
                        InsufficientContentError {
                            short: vec![PoolShortage { task_type, available, required }],
                        }
                    }
                };
                self.current = None;
                self.notifier.warn(&error.to_string());
                self.error = Some(error.to_string());
                return Err(error.into());
            }
        };

        let task_type = selection.task_type();
        let session_reset = selection.session_reset;
        if session_reset {
            self.history.clear_used();
            self.notifier.info("You've seen all the content, starting a fresh round");
        }
        self.history.mark_used(task_type, selection.batch.ids());
        self.history.set_previous_task_type(task_type);
        self.current = Some(CurrentTask::from(selection.batch));
        self.error = None;

        tracing::info!(%task_type, session_reset, "Generated new task");
        Ok(GenerateOutcome::Generated { task_type, session_reset })
    }

    /// Answer the quiz item under the cursor
    ///
    /// Answers for any other item, or while no quiz is active, are dropped.
    pub fn answer_quiz(&mut self, item_id: &str, option_id: u32) -> AnswerOutcome {
        let outcome = match &mut self.current {
            Some(CurrentTask::Quiz(quiz)) => quiz.answer(item_id, option_id),
            _ => AnswerOutcome::Ignored(IgnoredAnswer::NoQuizActive),
        };
        if let AnswerOutcome::Ignored(reason) = outcome {
            tracing::debug!(item_id, option_id, ?reason, "Ignoring quiz answer");
        }
        outcome
    }

    /// Move the quiz cursor forward, returns false if no quiz is active
    ///
    /// There is no upper bound; callers stop after the fifth question.
    pub fn advance_quiz(&mut self) -> bool {
        match &mut self.current {
            Some(CurrentTask::Quiz(quiz)) => {
                quiz.advance();
                true
            }
            _ => false,
        }
    }

    /// Finish the active quiz task and fold it into the lifetime stats
    pub fn complete_quiz_task(&mut self) -> Option<TaskCompletion> {
        if !matches!(self.current, Some(CurrentTask::Quiz(_))) {
            return None;
        }
        let Some(CurrentTask::Quiz(quiz)) = self.current.take() else {
            return None;
        };

        let session_correct = quiz.correct_count();
        self.stats.record_quiz(session_correct, TaskType::Quiz.batch_size() as u32);
        self.log.push();
        self.persist();

        tracing::info!(session_correct, streak = self.stats.streak(), "Completed quiz task");
        Some(TaskCompletion { task_type: TaskType::Quiz, session_correct })
    }

    /// Finish the active tip task
    pub fn complete_tip_task(&mut self) -> Option<TaskCompletion> {
        if !matches!(self.current, Some(CurrentTask::Tip(_))) {
            return None;
        }
        let Some(CurrentTask::Tip(tips)) = self.current.take() else {
            return None;
        };

        self.stats.record_tip();
        self.history.mark_used(TaskType::Tip, tips.items().iter().map(|t| t.id.as_str()));
        self.log.push();
        self.persist();

        tracing::info!(tips_completed = self.stats.tips_completed(), "Completed tip task");
        Some(TaskCompletion { task_type: TaskType::Tip, session_correct: 0 })
    }

    /// Drop the current task and its progress
    pub fn reset_task(&mut self) {
        if self.current.take().is_some() {
            tracing::info!("Discarded current task");
        }
    }

    /// Let previously shown content appear again
    pub fn reset_session(&mut self) {
        self.history.clear();
        tracing::info!("Session history cleared");
    }

    /// Zero the lifetime stats and start a new session
    ///
    /// The in-memory reset always happens; the error reports a failed save.
    pub fn reset_stats(&mut self) -> anyhow::Result<()> {
        self.stats = LifetimeStats::default();
        self.log = CompletedTaskLog::default();
        self.history.clear();
        if let Err(e) = self.save() {
            self.report_save_failure(&e);
            return Err(e);
        }
        tracing::info!("Lifetime stats reset");
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            self.report_save_failure(&e);
        }
    }

    fn report_save_failure(&self, error: &anyhow::Error) {
        tracing::error!("Failed to persist stats: {:#}", error);
        self.notifier.error("Could not save your progress");
    }

    fn save(&mut self) -> anyhow::Result<()> {
        self.repository.save_stats(&self.stats)?;
        self.repository.save_log(&self.log)
    }

    // --- Queries ---

    pub fn current_task(&self) -> Option<&CurrentTask> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.catalog.is_loading()
    }

    pub fn is_data_loaded(&self) -> bool {
        self.catalog.is_loaded()
    }

    /// Last load or generation error, cleared by the next success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> &LifetimeStats {
        &self.stats
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn catalog(&self) -> Option<&ContentCatalog> {
        self.catalog.catalog()
    }

    /// Quiz cursor, 0 when no quiz is active
    pub fn current_quiz_index(&self) -> usize {
        match &self.current {
            Some(CurrentTask::Quiz(quiz)) => quiz.cursor(),
            _ => 0,
        }
    }

    /// Quiz item under the cursor, None once the cursor has passed the last one
    pub fn current_quiz_item(&self) -> Option<&QuizItem> {
        match &self.current {
            Some(CurrentTask::Quiz(quiz)) => quiz.current_item(),
            _ => None,
        }
    }

    /// Latest correctness per answered quiz item
    pub fn quiz_results(&self) -> Option<&HashMap<String, bool>> {
        match &self.current {
            Some(CurrentTask::Quiz(quiz)) => Some(quiz.answers()),
            _ => None,
        }
    }

    /// Correct answers in the active quiz
    pub fn total_correct_answers(&self) -> u32 {
        match &self.current {
            Some(CurrentTask::Quiz(quiz)) => quiz.correct_count(),
            _ => 0,
        }
    }

    /// Entries in the legacy completed-task log
    pub fn completed_task_count(&self) -> usize {
        self.log.len()
    }
}
