//! Content pools for daily challenges
//!
//! Quiz questions and educational tips are fetched once from a
//! [`ContentProvider`] and held in an immutable [`ContentCatalog`].

pub mod catalog;
pub mod model;
pub mod provider;

// Re-exports
pub use catalog::{CatalogSlot, ContentCatalog, LoadError, LoadTicket, Pool};
pub use model::{ContentItem, QuizItem, QuizOption, TaskType, TipItem};
pub use provider::{ContentProvider, DirectoryProvider, HttpProvider, ProviderError};
