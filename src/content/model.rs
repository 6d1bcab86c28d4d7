//! Content model for quiz and tip items

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of daily task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// A batch of quiz questions
    Quiz,
    /// A batch of educational tips
    Tip,
}

impl TaskType {
    /// Number of items in a task of this type
    pub const fn batch_size(self) -> usize {
        match self {
            TaskType::Quiz => 5,
            TaskType::Tip => 2,
        }
    }

    /// The other task type
    pub const fn other(self) -> Self {
        match self {
            TaskType::Quiz => TaskType::Tip,
            TaskType::Tip => TaskType::Quiz,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Quiz => write!(f, "quiz"),
            TaskType::Tip => write!(f, "tip"),
        }
    }
}

/// Anything drawn from a content pool
pub trait ContentItem: Clone {
    /// Pool-unique identifier
    fn id(&self) -> &str;
}

/// A single answer option of a quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    /// Option identifier, unique within its question
    pub option_id: u32,
    /// Display text
    pub text: String,
    /// Whether picking this option counts as correct
    #[serde(default)]
    pub is_correct: bool,
}

/// A multiple-choice quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    /// Unique identifier
    pub id: String,
    /// Question text
    pub prompt: String,
    /// Answer options in display order
    pub options: Vec<QuizOption>,
    /// Relative weight of this question
    #[serde(default = "default_score_weight")]
    pub score_weight: u32,
}

fn default_score_weight() -> u32 {
    1
}

impl QuizItem {
    /// Look up an option by its id
    pub fn option(&self, option_id: u32) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.option_id == option_id)
    }
}

impl ContentItem for QuizItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// An educational tip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipItem {
    /// Unique identifier
    pub id: String,
    /// Tip text
    pub body: String,
}

impl ContentItem for TipItem {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_sizes_are_fixed() {
        assert_eq!(TaskType::Quiz.batch_size(), 5);
        assert_eq!(TaskType::Tip.batch_size(), 2);
    }

    #[test]
    fn other_flips_type() {
        assert_eq!(TaskType::Quiz.other(), TaskType::Tip);
        assert_eq!(TaskType::Tip.other(), TaskType::Quiz);
    }

    #[test]
    fn quiz_item_deserializes_from_backend_json() {
        let json = r#"{
            "id": "q1",
            "prompt": "How long until carbon monoxide levels drop?",
            "options": [
                {"optionId": 1, "text": "12 hours", "isCorrect": true},
                {"optionId": 2, "text": "1 week"}
            ]
        }"#;

        let item: QuizItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id(), "q1");
        assert_eq!(item.score_weight, 1);
        assert!(item.option(1).unwrap().is_correct);
        assert!(!item.option(2).unwrap().is_correct);
        assert!(item.option(3).is_none());
    }

    #[test]
    fn task_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TaskType::Tip).unwrap(), "\"tip\"");
    }
}
