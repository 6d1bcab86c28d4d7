//! Breathe - daily challenges for quitting smoking
//!
//! Each challenge is either a short quiz or a pair of tips drawn from a
//! shared content pool. Content is not repeated within a session, task
//! types alternate, and lifetime stats (accuracy, streak) persist across runs.

pub mod app;
pub mod config;
pub mod content;
pub mod notify;
pub mod session;
pub mod stats;

pub use app::App;
pub use config::Config;
pub use session::TaskSessionEngine;
