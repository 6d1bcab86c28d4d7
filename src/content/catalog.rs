//! The immutable content catalog and its one-shot loading slot

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use super::model::{ContentItem, QuizItem, TaskType, TipItem};
use super::provider::{ContentProvider, ProviderError};

/// Which of the two pools an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Quizzes,
    Tips,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::Quizzes => write!(f, "quizzes"),
            Pool::Tips => write!(f, "tips"),
        }
    }
}

/// Errors that can occur while loading the catalog
#[derive(Debug, Error)]
pub enum LoadError {
    /// The provider failed to deliver a pool
    #[error("failed to fetch {pool}: {source}")]
    Fetch {
        /// Pool being fetched
        pool: Pool,
        /// Underlying provider error
        #[source]
        source: ProviderError,
    },

    /// A catalog is already installed for this process
    #[error("content catalog is already loaded")]
    AlreadyLoaded,
}

/// Both content pools, read-only once constructed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentCatalog {
    quizzes: Vec<QuizItem>,
    tips: Vec<TipItem>,
}

impl ContentCatalog {
    /// Build a catalog, keeping the first occurrence of any repeated id
    pub fn new(quizzes: Vec<QuizItem>, tips: Vec<TipItem>) -> Self {
        Self { quizzes: dedup_by_id(quizzes), tips: dedup_by_id(tips) }
    }

    /// Fetch both pools from the provider
    pub async fn load(provider: &dyn ContentProvider) -> Result<Self, LoadError> {
        let (quizzes, tips) =
            tokio::join!(provider.fetch_all_quizzes(), provider.fetch_all_tips());

        let quizzes = quizzes.map_err(|source| LoadError::Fetch { pool: Pool::Quizzes, source })?;
        let tips = tips.map_err(|source| LoadError::Fetch { pool: Pool::Tips, source })?;

        let catalog = Self::new(quizzes, tips);
        tracing::info!(
            quizzes = catalog.quizzes.len(),
            tips = catalog.tips.len(),
            "Content catalog loaded"
        );
        Ok(catalog)
    }

    pub fn quizzes(&self) -> &[QuizItem] {
        &self.quizzes
    }

    pub fn tips(&self) -> &[TipItem] {
        &self.tips
    }

    /// Number of items in the pool for a task type
    pub fn pool_size(&self, task_type: TaskType) -> usize {
        match task_type {
            TaskType::Quiz => self.quizzes.len(),
            TaskType::Tip => self.tips.len(),
        }
    }
}

fn dedup_by_id<T: ContentItem>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.id().to_string());
            if !fresh {
                tracing::warn!(id = item.id(), "Dropping duplicate content id");
            }
            fresh
        })
        .collect()
}

/// Identifies one load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
enum SlotState {
    #[default]
    Empty,
    Loading(LoadTicket),
    Ready(ContentCatalog),
    Failed(String),
}

/// Holds the catalog once a load attempt has finished
///
/// Only the most recently issued ticket may install a result; results
/// carried by older tickets are dropped.
#[derive(Debug, Default)]
pub struct CatalogSlot {
    state: SlotState,
    issued: u64,
}

impl CatalogSlot {
    /// Start a load attempt
    pub fn begin(&mut self) -> Result<LoadTicket, LoadError> {
        if matches!(self.state, SlotState::Ready(_)) {
            return Err(LoadError::AlreadyLoaded);
        }
        self.issued += 1;
        let ticket = LoadTicket(self.issued);
        self.state = SlotState::Loading(ticket);
        Ok(ticket)
    }

    /// Install a loaded catalog, returns false if the ticket is stale
    pub fn install(&mut self, ticket: LoadTicket, catalog: ContentCatalog) -> bool {
        self.settle(ticket, SlotState::Ready(catalog))
    }

    /// Record a failed load, returns false if the ticket is stale
    pub fn fail(&mut self, ticket: LoadTicket, message: impl Into<String>) -> bool {
        self.settle(ticket, SlotState::Failed(message.into()))
    }

    fn settle(&mut self, ticket: LoadTicket, state: SlotState) -> bool {
        if !matches!(self.state, SlotState::Loading(current) if current == ticket) {
            tracing::debug!(?ticket, "Ignoring superseded catalog load");
            return false;
        }
        self.state = state;
        true
    }

    pub fn catalog(&self) -> Option<&ContentCatalog> {
        match &self.state {
            SlotState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SlotState::Loading(_))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SlotState::Ready(_))
    }

    /// Message of the last failed load, if that is the current state
    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            SlotState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
