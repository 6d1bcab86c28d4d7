//! Interactive daily-challenge session

pub mod command;
pub mod view;

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::content::{ContentCatalog, ContentItem, ContentProvider, LoadError, LoadTicket};
use crate::session::{CurrentTask, GenerateOutcome, TaskSessionEngine};
use command::{Command, ParseResult, parse_command};

/// A finished catalog load
pub type LoadResult = (LoadTicket, Result<ContentCatalog, LoadError>);

/// What the loop should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    /// Print the text and keep reading
    Continue(String),
    /// Leave the session
    Quit,
}

/// The interactive application
pub struct App {
    /// Task engine
    engine: TaskSessionEngine,

    /// Content backend
    provider: Arc<dyn ContentProvider>,

    /// Delivers load results back to the loop
    loads: mpsc::Sender<LoadResult>,
}

impl App {
    /// Create a new application instance and its load channel
    pub fn new(
        engine: TaskSessionEngine,
        provider: Arc<dyn ContentProvider>,
    ) -> (Self, mpsc::Receiver<LoadResult>) {
        let (loads, rx) = mpsc::channel(4);
        (Self { engine, provider, loads }, rx)
    }

    pub fn engine(&self) -> &TaskSessionEngine {
        &self.engine
    }

    /// Run the read-eval loop until `quit` or end of input
    pub async fn run(mut self, mut loads: mpsc::Receiver<LoadResult>) -> Result<()> {
        println!("Welcome to your daily challenge. Type `help` for commands.");
        println!("{}", self.start_load());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                Some((ticket, result)) = loads.recv() => {
                    if self.engine.finish_load(ticket, result) && self.engine.is_data_loaded() {
                        println!("Content ready. Type `new` to start.");
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    match self.handle_line(&line) {
                        Flow::Continue(out) if out.is_empty() => {}
                        Flow::Continue(out) => println!("{out}"),
                        Flow::Quit => break,
                    }
                }
            }
        }

        Ok(())
    }

    /// Spawn a catalog load whose result arrives through the channel
    fn start_load(&mut self) -> String {
        let ticket = match self.engine.begin_load() {
            Ok(ticket) => ticket,
            Err(e) => return e.to_string(),
        };

        let provider = Arc::clone(&self.provider);
        let tx = self.loads.clone();
        tokio::spawn(async move {
            let result = ContentCatalog::load(provider.as_ref()).await;
            if tx.send((ticket, result)).await.is_err() {
                tracing::debug!("Session ended before content finished loading");
            }
        });

        "Loading content...".to_string()
    }

    /// Parse and execute one input line
    pub fn handle_line(&mut self, line: &str) -> Flow {
        match parse_command(line) {
            ParseResult::Ok(command) => self.execute(command),
            ParseResult::UnknownCommand(cmd) => {
                Flow::Continue(format!("Unknown command: {cmd}. Type `help` for commands."))
            }
            ParseResult::MissingArgument(cmd) => {
                Flow::Continue(format!("`{cmd}` needs an argument"))
            }
            ParseResult::InvalidArgument { command, value } => {
                Flow::Continue(format!("`{command}` expects a number, got `{value}`"))
            }
        }
    }

    fn execute(&mut self, command: Command) -> Flow {
        let out = match command {
            Command::New => self.new_task(),
            Command::Answer(option) => self.answer(option),
            Command::Next => {
                if self.engine.advance_quiz() {
                    self.show_current()
                } else {
                    "There is no quiz in progress.".to_string()
                }
            }
            Command::Done => self.complete(),
            Command::ResetTask => {
                self.engine.reset_task();
                "Challenge discarded.".to_string()
            }
            Command::ResetSession => {
                self.engine.reset_session();
                "Session cleared; earlier content may come up again.".to_string()
            }
            Command::ResetStats => match self.engine.reset_stats() {
                Ok(()) => "Lifetime stats cleared.".to_string(),
                Err(e) => format!("Lifetime stats cleared for this session but not saved: {e:#}"),
            },
            Command::Stats => view::stats(self.engine.stats()),
            Command::Reload => self.start_load(),
            Command::Help => view::HELP.to_string(),
            Command::Quit => return Flow::Quit,
            Command::Nop => String::new(),
        };
        Flow::Continue(out)
    }

    fn new_task(&mut self) -> String {
        match self.engine.generate_new_task() {
            Ok(GenerateOutcome::Generated { .. }) => self.show_current(),
            Ok(GenerateOutcome::NotReady) => "Content is still loading, try again shortly.".to_string(),
            Err(e) => format!("{e}. Type `reload` to retry."),
        }
    }

    fn answer(&mut self, option: u32) -> String {
        let Some(item_id) = self.current_quiz_item_id() else {
            return "There is no question to answer.".to_string();
        };
        let outcome = self.engine.answer_quiz(&item_id, option);
        view::answer(outcome)
    }

    fn current_quiz_item_id(&self) -> Option<String> {
        self.engine.current_quiz_item().map(|item| item.id().to_string())
    }

    fn complete(&mut self) -> String {
        let completion = match self.engine.current_task() {
            Some(CurrentTask::Quiz(_)) => self.engine.complete_quiz_task(),
            Some(CurrentTask::Tip(_)) => self.engine.complete_tip_task(),
            None => return "There is no challenge in progress.".to_string(),
        };
        match completion {
            Some(_) => format!("Challenge complete!\n{}", view::stats(self.engine.stats())),
            None => "There is no challenge in progress.".to_string(),
        }
    }

    fn show_current(&self) -> String {
        self.engine.current_task().map(view::task).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::content::{ProviderError, QuizItem, QuizOption, TipItem};
    use crate::notify::TracingNotifier;
    use crate::stats::MemoryStore;

    struct StaticProvider;

    fn quiz(i: usize) -> QuizItem {
        QuizItem {
            id: format!("q{i}"),
            prompt: format!("Question {i}?"),
            options: vec![
                QuizOption { option_id: 1, text: "yes".into(), is_correct: true },
                QuizOption { option_id: 2, text: "no".into(), is_correct: false },
            ],
            score_weight: 1,
        }
    }

    #[async_trait]
    impl ContentProvider for StaticProvider {
        async fn fetch_all_quizzes(&self) -> Result<Vec<QuizItem>, ProviderError> {
            Ok((1..=5).map(quiz).collect())
        }

        async fn fetch_all_tips(&self) -> Result<Vec<TipItem>, ProviderError> {
            Ok(Vec::new())
        }
    }

    fn app() -> (App, mpsc::Receiver<LoadResult>) {
        let engine = TaskSessionEngine::with_rng(
            Box::new(MemoryStore::default()),
            Box::new(TracingNotifier),
            StdRng::seed_from_u64(9),
        );
        App::new(engine, Arc::new(StaticProvider))
    }

    fn text(flow: Flow) -> String {
        match flow {
            Flow::Continue(out) => out,
            Flow::Quit => panic!("unexpected quit"),
        }
    }

    #[tokio::test]
    async fn new_while_loading_reports_not_ready() {
        let (mut app, mut loads) = app();
        assert_eq!(app.start_load(), "Loading content...");
        assert!(text(app.handle_line("new")).contains("still loading"));

        let (ticket, result) = loads.recv().await.unwrap();
        assert!(app.engine.finish_load(ticket, result));
        assert!(text(app.handle_line("new")).starts_with("Question 1/5"));
    }

    #[tokio::test]
    async fn full_quiz_through_commands() {
        let (mut app, mut loads) = app();
        app.start_load();
        let (ticket, result) = loads.recv().await.unwrap();
        app.engine.finish_load(ticket, result);

        app.handle_line("new");
        for _ in 0..5 {
            assert_eq!(text(app.handle_line("answer 1")), "Correct!");
            app.handle_line("next");
        }
        assert!(text(app.handle_line("answer 1")).contains("no question"));

        let out = text(app.handle_line("done"));
        assert!(out.contains("Challenge complete!"));
        assert_eq!(app.engine().stats().streak(), 1);
        assert_eq!(app.engine().stats().accuracy(), 100.0);
    }

    #[test]
    fn quit_and_unknown_commands() {
        let (mut app, _loads) = app();
        assert_eq!(app.handle_line("quit"), Flow::Quit);
        assert!(text(app.handle_line("dance")).contains("Unknown command"));
        assert!(text(app.handle_line("done")).contains("no challenge"));
    }
}
