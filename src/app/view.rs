//! Plain-text rendering of engine state

use std::fmt::Write;

use crate::session::{AnswerOutcome, CurrentTask, IgnoredAnswer, QuizTask, TipTask};
use crate::stats::LifetimeStats;

/// Wrap width for prompts and tips
const WIDTH: usize = 72;

pub const HELP: &str = "\
Commands:
  new, n             start a new daily challenge
  answer, a <n>      answer the current question with option n
  next               go to the next question
  done, d            mark the current challenge completed
  reset, r           discard the current challenge
  reset-session      let already-seen content appear again
  reset-stats        clear all lifetime stats
  stats, s           show lifetime stats
  reload             retry loading content
  help, h            show this help
  quit, q            leave";

/// Render the active task
pub fn task(task: &CurrentTask) -> String {
    match task {
        CurrentTask::Quiz(quiz) => quiz_question(quiz),
        CurrentTask::Tip(tips) => tip_batch(tips),
    }
}

fn quiz_question(quiz: &QuizTask) -> String {
    let total = quiz.items().len();
    let Some(item) = quiz.current_item() else {
        return format!(
            "All {total} questions answered ({} correct). Type `done` to finish.",
            quiz.correct_count()
        );
    };

    let mut out = format!("Question {}/{}\n", quiz.cursor() + 1, total);
    out.push_str(&textwrap::fill(&item.prompt, WIDTH));
    for option in &item.options {
        let _ = write!(out, "\n  {}) {}", option.option_id, option.text);
    }
    if let Some(correct) = quiz.answers().get(&item.id) {
        let verdict = if *correct { "correct" } else { "not quite" };
        let _ = write!(out, "\nYour answer: {verdict}. Type `next` to continue.");
    }
    out
}

fn tip_batch(tips: &TipTask) -> String {
    let mut out = String::from("Today's tips");
    for (i, tip) in tips.items().iter().enumerate() {
        let options = textwrap::Options::new(WIDTH).subsequent_indent("   ");
        let _ = write!(out, "\n{}. {}", i + 1, textwrap::fill(&tip.body, options));
    }
    out.push_str("\nType `done` once you've read them.");
    out
}

/// Render the result of an answer
pub fn answer(outcome: AnswerOutcome) -> String {
    match outcome {
        AnswerOutcome::Recorded { correct: true } => "Correct!".to_string(),
        AnswerOutcome::Recorded { correct: false } => "Not quite.".to_string(),
        AnswerOutcome::Ignored(IgnoredAnswer::NoQuizActive) => {
            "There is no quiz in progress.".to_string()
        }
        AnswerOutcome::Ignored(IgnoredAnswer::NotCurrentItem) => {
            "No question to answer; type `done` to finish.".to_string()
        }
        AnswerOutcome::Ignored(IgnoredAnswer::UnknownOption) => {
            "That option doesn't exist for this question.".to_string()
        }
    }
}

/// Render lifetime stats
pub fn stats(stats: &LifetimeStats) -> String {
    format!(
        "Completed: {} ({} quizzes, {} tips)\n\
         Accuracy:  {:.0}% ({}/{} correct)\n\
         Streak:    {}",
        stats.total_completed(),
        stats.quizzes_completed(),
        stats.tips_completed(),
        stats.accuracy(),
        stats.correct_answers(),
        stats.total_quiz_attempts(),
        stats.streak(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{QuizItem, QuizOption, TipItem};

    fn quiz_task() -> QuizTask {
        QuizTask::new(vec![QuizItem {
            id: "q1".into(),
            prompt: "Which craving tactic works in under five minutes?".into(),
            options: vec![
                QuizOption { option_id: 1, text: "Deep breathing".into(), is_correct: true },
                QuizOption { option_id: 2, text: "Waiting a month".into(), is_correct: false },
            ],
            score_weight: 1,
        }])
    }

    #[test]
    fn quiz_view_lists_options() {
        let out = task(&CurrentTask::Quiz(quiz_task()));
        assert!(out.starts_with("Question 1/1"));
        assert!(out.contains("1) Deep breathing"));
        assert!(out.contains("2) Waiting a month"));
    }

    #[test]
    fn quiz_view_shows_verdict_after_answer() {
        let mut quiz = quiz_task();
        quiz.answer("q1", 2);
        let out = task(&CurrentTask::Quiz(quiz));
        assert!(out.contains("not quite"));
    }

    #[test]
    fn quiz_view_past_last_question_prompts_done() {
        let mut quiz = quiz_task();
        quiz.answer("q1", 1);
        quiz.advance();
        let out = task(&CurrentTask::Quiz(quiz));
        assert!(out.contains("All 1 questions answered (1 correct)"));
    }

    #[test]
    fn tip_view_numbers_tips() {
        let tips = TipTask::new(vec![
            TipItem { id: "t1".into(), body: "Drink a glass of water.".into() },
            TipItem { id: "t2".into(), body: "Take a short walk.".into() },
        ]);
        let out = task(&CurrentTask::Tip(tips));
        assert!(out.contains("1. Drink a glass of water."));
        assert!(out.contains("2. Take a short walk."));
    }

    #[test]
    fn stats_view_rounds_accuracy() {
        let mut s = LifetimeStats::default();
        s.record_quiz(2, 3);
        assert!(stats(&s).contains("Accuracy:  67% (2/3 correct)"));
    }
}
