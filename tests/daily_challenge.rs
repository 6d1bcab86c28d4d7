use std::collections::HashSet;

use breathe::TaskSessionEngine;
use breathe::content::{DirectoryProvider, TaskType};
use breathe::notify::TracingNotifier;
use breathe::session::{AnswerOutcome, CurrentTask, GenerateOutcome};
use breathe::stats::FileStore;
use rand::SeedableRng;
use rand::rngs::StdRng;

const QUIZZES: &str = r#"[
    {"id":"q1","prompt":"One","options":[{"optionId":1,"text":"a","isCorrect":true},{"optionId":2,"text":"b"}]},
    {"id":"q2","prompt":"Two","options":[{"optionId":1,"text":"a","isCorrect":true},{"optionId":2,"text":"b"}]},
    {"id":"q3","prompt":"Three","options":[{"optionId":1,"text":"a","isCorrect":true},{"optionId":2,"text":"b"}]},
    {"id":"q4","prompt":"Four","options":[{"optionId":1,"text":"a","isCorrect":true},{"optionId":2,"text":"b"}]},
    {"id":"q5","prompt":"Five","options":[{"optionId":1,"text":"a","isCorrect":true},{"optionId":2,"text":"b"}]}
]"#;

const TIPS: &str = r#"[
    {"id":"t1","body":"Drink a glass of water when a craving hits."},
    {"id":"t2","body":"Tell a friend about your quit date."}
]"#;

fn open_engine(store_dir: &std::path::Path, seed: u64) -> TaskSessionEngine {
    TaskSessionEngine::with_rng(
        Box::new(FileStore::new(store_dir)),
        Box::new(TracingNotifier),
        StdRng::seed_from_u64(seed),
    )
}

fn current_ids(engine: &TaskSessionEngine) -> HashSet<String> {
    engine.current_task().unwrap().item_ids().into_iter().map(str::to_string).collect()
}

fn finish(engine: &mut TaskSessionEngine, correct: usize) {
    match engine.current_task().map(CurrentTask::task_type) {
        Some(TaskType::Quiz) => {
            for i in 0..5 {
                let id = match engine.current_task() {
                    Some(CurrentTask::Quiz(quiz)) => quiz.current_item().unwrap().id.clone(),
                    _ => unreachable!(),
                };
                let option = if i < correct { 1 } else { 2 };
                assert!(matches!(engine.answer_quiz(&id, option), AnswerOutcome::Recorded { .. }));
                engine.advance_quiz();
            }
            engine.complete_quiz_task().unwrap();
        }
        Some(TaskType::Tip) => {
            engine.complete_tip_task().unwrap();
        }
        None => panic!("no active task"),
    }
}

#[tokio::test]
async fn five_quizzes_two_tips_full_cycle() {
    let content = tempfile::tempdir().unwrap();
    std::fs::write(content.path().join(DirectoryProvider::QUIZZES_FILE), QUIZZES).unwrap();
    std::fs::write(content.path().join(DirectoryProvider::TIPS_FILE), TIPS).unwrap();
    let data = tempfile::tempdir().unwrap();

    let mut engine = open_engine(data.path(), 2024);
    engine.load_catalog(&DirectoryProvider::new(content.path())).await.unwrap();
    assert!(engine.is_data_loaded());

    let first = match engine.generate_new_task().unwrap() {
        GenerateOutcome::Generated { task_type, session_reset } => {
            assert!(!session_reset);
            task_type
        }
        GenerateOutcome::NotReady => panic!("catalog is loaded"),
    };
    let expected: HashSet<String> = match first {
        TaskType::Quiz => ["q1", "q2", "q3", "q4", "q5"].map(String::from).into(),
        TaskType::Tip => ["t1", "t2"].map(String::from).into(),
    };
    assert_eq!(current_ids(&engine), expected);
    finish(&mut engine, 3);

    let second = engine.generate_new_task().unwrap();
    assert_eq!(
        second,
        GenerateOutcome::Generated { task_type: first.other(), session_reset: false }
    );
    finish(&mut engine, 3);

    let stats = engine.stats();
    assert_eq!(stats.total_completed(), 2);
    assert_eq!(stats.quizzes_completed(), 1);
    assert_eq!(stats.tips_completed(), 1);
    assert_eq!(stats.correct_answers(), 3);
    assert_eq!(stats.total_quiz_attempts(), 5);
    assert_eq!(stats.accuracy(), 60.0);
    assert_eq!(stats.streak(), 1);

    let third = engine.generate_new_task().unwrap();
    assert!(matches!(third, GenerateOutcome::Generated { session_reset: true, .. }));

    // Stats come back from disk in a fresh process
    let restarted = open_engine(data.path(), 7);
    assert_eq!(restarted.stats(), engine.stats());
    assert_eq!(restarted.completed_task_count(), 2);
}

#[tokio::test]
async fn missing_content_directory_blocks_generation() {
    let content = tempfile::tempdir().unwrap();
    let data = tempfile::tempdir().unwrap();

    let mut engine = open_engine(data.path(), 1);
    assert!(engine.load_catalog(&DirectoryProvider::new(content.path())).await.is_err());
    assert!(!engine.is_data_loaded());
    assert!(engine.error().is_some());
    assert!(engine.generate_new_task().is_err());
}
