//! Terminal presentation: progress output, stdin answers, result tables.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use adaptquiz_core::engine::{AnswerSource, ProgressReporter};
use adaptquiz_core::model::Question;
use adaptquiz_core::report::SessionSummary;
use adaptquiz_core::session::AnswerOutcome;
use adaptquiz_core::user::UserRecord;

/// Console progress reporter. Writes to stderr so stdout stays parseable.
pub struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_question(&self, number: usize, total: usize, question: &Question) {
        eprintln!(
            "\nQuestion {number}/{total} [{}]",
            question.difficulty()
        );
        eprintln!("{}", question.prompt());
        for (i, choice) in question.choices().iter().enumerate() {
            eprintln!("  {}. {}", i + 1, choice);
        }
    }

    fn on_answer(&self, outcome: &AnswerOutcome) {
        if outcome.correct {
            eprintln!("Correct! Score: {}", outcome.score);
        } else {
            eprintln!(
                "Wrong, the answer was: {}. Score: {}",
                outcome.correct_answer, outcome.score
            );
        }
    }

    fn on_session_end(&self, summary: &SessionSummary) {
        if summary.completed {
            eprintln!("\nQuiz ended! Your score: {}", summary.score);
        } else {
            eprintln!(
                "\nQuiz stopped after {} question(s).",
                summary.attempted
            );
        }
    }
}

/// Reads answers line by line. Text matching a choice exactly is submitted
/// as is; otherwise a number picks a choice by position and anything else is
/// submitted verbatim. An empty line or end of input quits.
pub struct LineAnswers<R> {
    reader: R,
}

impl<R: BufRead> LineAnswers<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> AnswerSource for LineAnswers<R> {
    fn next_answer(&mut self, question: &Question) -> Result<Option<String>> {
        eprint!("> ");
        std::io::stderr().flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("failed to read answer")?;
        if read == 0 {
            return Ok(None);
        }

        let answer = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(resolve_choice(answer, question.choices())))
    }
}

fn resolve_choice(input: &str, choices: &[String]) -> String {
    if choices.iter().any(|c| c == input) {
        return input.to_string();
    }
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=choices.len()).contains(&n) => choices[n - 1].clone(),
        _ => input.to_string(),
    }
}

/// Print the per-round table and the user's score history to stdout.
pub fn print_results(user: &UserRecord, summaries: &[SessionSummary]) {
    if let Some(last) = summaries.last() {
        if last.completed {
            println!("Final score: {}/{}", last.score, last.total);
        } else {
            println!("Quiz stopped early; score not recorded.");
        }
    }

    let mut table = Table::new();
    table.set_header(vec!["Round", "Score", "Answered", "Accuracy", "Status"]);
    for (i, s) in summaries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(s.score),
            Cell::new(format!("{}/{}", s.attempted, s.total)),
            Cell::new(format!("{:.1}%", s.accuracy() * 100.0)),
            Cell::new(if s.completed { "completed" } else { "quit" }),
        ]);
    }
    println!("{table}");

    let history = user.score_history();
    if history.is_empty() {
        println!("No previous quiz scores.");
        return;
    }
    let joined: Vec<String> = history.iter().map(u32::to_string).collect();
    println!(
        "Score history for {}: {}",
        user.display_name(),
        joined.join(", ")
    );
    if let Some(stats) = user.stats() {
        println!(
            "Best {}, mean {:.1} over {} session(s)",
            stats.best, stats.mean, stats.sessions
        );
    }
}
