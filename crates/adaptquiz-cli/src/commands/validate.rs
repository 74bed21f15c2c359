//! The `adaptquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use adaptquiz_core::model::Difficulty;
use adaptquiz_core::parser;

pub fn execute(questions_path: PathBuf) -> Result<()> {
    let sets = parser::load_question_sets(&questions_path)?;

    let mut total_warnings = 0;

    for set in &sets {
        let count = |d: Difficulty| {
            set.questions
                .iter()
                .filter(|q| q.difficulty == d.as_str())
                .count()
        };
        println!(
            "Question set: {} ({} questions: {} easy, {} medium, {} hard)",
            set.name,
            set.questions.len(),
            count(Difficulty::Easy),
            count(Difficulty::Medium),
            count(Difficulty::Hard),
        );

        let warnings = parser::validate_question_set(set);
        for w in &warnings {
            let prefix = w
                .index
                .map(|i| format!("  [#{}]", i + 1))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
