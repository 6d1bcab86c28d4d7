//! Durable lifetime statistics
//!
//! Aggregate stats and the legacy completed-task log are persisted as JSON
//! strings under two keys of a [`DurableStore`].

pub mod record;
pub mod repository;
pub mod store;

// Re-exports
pub use record::{CompletedTaskLog, LifetimeStats};
pub use repository::StatsRepository;
pub use store::{DurableStore, FileStore, MemoryStore};
