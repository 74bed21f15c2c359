pub mod init;
pub mod play;
pub mod simulate;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use adaptquiz_core::config::load_config_from;
use adaptquiz_core::engine::{run_session, AnswerSource, NoopReporter, ProgressReporter};
use adaptquiz_core::model::QuestionRecord;
use adaptquiz_core::parser;
use adaptquiz_core::pool::QuestionPool;
use adaptquiz_core::report::SessionSummary;
use adaptquiz_core::session::QuizSession;
use adaptquiz_core::statistics::ScoreStats;
use adaptquiz_core::user::UserRecord;

use crate::console::{self, ConsoleReporter};

/// Flags shared by `play` and `simulate`; unset values fall back to config.
pub struct RoundOptions {
    pub questions: Option<PathBuf>,
    pub user: Option<String>,
    pub rounds: Option<u32>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON document printed with `--format json`.
#[derive(Serialize)]
struct PlayReport<'a> {
    user: &'a str,
    history: Vec<u32>,
    stats: Option<ScoreStats>,
    no_questions: bool,
    sessions: &'a [SessionSummary],
}

/// Play `rounds` sessions over the same question records, recording each
/// completed session into one user record. Stops early if the player quits.
pub(crate) fn run_rounds(
    options: RoundOptions,
    source: &mut dyn AnswerSource,
    show_progress: bool,
) -> Result<()> {
    let config = load_config_from(options.config.as_deref())?;

    let format = match options.format.as_deref().unwrap_or(config.format.as_str()) {
        "text" => OutputFormat::Text,
        "json" => OutputFormat::Json,
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    };
    let rounds = options.rounds.unwrap_or(config.rounds);
    anyhow::ensure!(rounds >= 1, "rounds must be at least 1");

    let path = options
        .questions
        .or(config.default_question_set)
        .context("no question set given; pass --questions or set default_question_set")?;
    let records: Vec<QuestionRecord> = parser::load_question_sets(&path)?
        .into_iter()
        .flat_map(|set| set.questions)
        .collect();

    let mut user = UserRecord::new(options.user.unwrap_or(config.username));
    let mut summaries = Vec::new();
    let mut no_questions = false;
    let progress: &dyn ProgressReporter = if show_progress && format == OutputFormat::Text {
        &ConsoleReporter
    } else {
        &NoopReporter
    };

    for round in 1..=rounds {
        // Sessions are not restartable; every round gets a fresh pool.
        let pool = QuestionPool::from_records(records.iter().cloned())
            .context("could not start quiz")?;
        if pool.is_empty() {
            if format == OutputFormat::Text {
                println!("No questions available.");
                return Ok(());
            }
            eprintln!("No questions available.");
            no_questions = true;
            break;
        }

        tracing::debug!(round, questions = pool.len(), "starting round");
        let mut session = QuizSession::new(pool);
        let mut summary = run_session(&mut session, source, progress)?;
        summary.user = Some(user.display_name().to_string());

        if let Some(dir) = &options.output {
            summary.save_json(&dir.join(format!("session-{}.json", summary.id)))?;
        }

        let completed = summary.completed;
        if completed {
            user.record_score(summary.score);
        }
        summaries.push(summary);
        if !completed {
            break;
        }
    }

    match format {
        OutputFormat::Text => console::print_results(&user, &summaries),
        OutputFormat::Json => {
            let report = PlayReport {
                user: user.display_name(),
                history: user.score_history(),
                stats: user.stats(),
                no_questions,
                sessions: &summaries,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
