//! Command parsing for the interactive session

/// Parsed command from an input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate a new daily task: new
    New,
    /// Answer the current quiz question: answer <option>
    Answer(u32),
    /// Move to the next quiz question: next
    Next,
    /// Mark the current task completed: done
    Done,
    /// Discard the current task: reset
    ResetTask,
    /// Allow already-seen content again: reset-session
    ResetSession,
    /// Clear lifetime stats: reset-stats
    ResetStats,
    /// Show lifetime stats: stats
    Stats,
    /// Retry loading content: reload
    Reload,
    /// Show help: help or h
    Help,
    /// Quit the session: q or quit
    Quit,
    /// Empty line
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
    /// Argument could not be parsed
    InvalidArgument { command: String, value: String },
}

/// Parse an input line
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    // Split into command and arguments
    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "new" | "n" => ParseResult::Ok(Command::New),
        "answer" | "a" => {
            if args.is_empty() {
                ParseResult::MissingArgument("answer".to_string())
            } else {
                match args.parse() {
                    Ok(option) => ParseResult::Ok(Command::Answer(option)),
                    Err(_) => ParseResult::InvalidArgument {
                        command: "answer".to_string(),
                        value: args.to_string(),
                    },
                }
            }
        }
        "next" => ParseResult::Ok(Command::Next),
        "done" | "d" => ParseResult::Ok(Command::Done),
        "reset" | "r" => ParseResult::Ok(Command::ResetTask),
        "reset-session" => ParseResult::Ok(Command::ResetSession),
        "reset-stats" => ParseResult::Ok(Command::ResetStats),
        "stats" | "s" => ParseResult::Ok(Command::Stats),
        "reload" => ParseResult::Ok(Command::Reload),
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}
