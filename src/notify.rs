//! User-facing notices
//!
//! Notices are informational only; nothing reads them back.

/// Receives notices raised by the engine
pub trait Notifier: Send {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sends notices to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Prints notices to stderr for the interactive session
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
        eprintln!("* {message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
        eprintln!("! {message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
        eprintln!("x {message}");
    }
}
