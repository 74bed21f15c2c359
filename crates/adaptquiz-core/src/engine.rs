//! Session driver.
//!
//! Runs the pull loop a presentation layer would run: present the current
//! question, obtain an answer, submit it, repeat until the session ends or the
//! player quits.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::model::Question;
use crate::report::SessionSummary;
use crate::session::{AnswerOutcome, QuizSession};

/// Where answers come from: a terminal, a script, a strategy.
pub trait AnswerSource {
    /// Answer text for `question`, or `None` if the player quits.
    fn next_answer(&mut self, question: &Question) -> Result<Option<String>>;
}

/// Progress reporting trait.
pub trait ProgressReporter {
    fn on_question(&self, number: usize, total: usize, question: &Question);
    fn on_answer(&self, outcome: &AnswerOutcome);
    fn on_session_end(&self, summary: &SessionSummary);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_question(&self, _: usize, _: usize, _: &Question) {}
    fn on_answer(&self, _: &AnswerOutcome) {}
    fn on_session_end(&self, _: &SessionSummary) {}
}

/// Answers taken from a fixed list; quits when the list runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    answers: VecDeque<String>,
}

impl ScriptedAnswers {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl AnswerSource for ScriptedAnswers {
    fn next_answer(&mut self, _question: &Question) -> Result<Option<String>> {
        Ok(self.answers.pop_front())
    }
}

/// How an [`Oracle`] decides whether to answer correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    AllCorrect,
    AllWrong,
    /// Correct, wrong, correct, ...
    Alternate,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::AllCorrect => write!(f, "correct"),
            Strategy::AllWrong => write!(f, "wrong"),
            Strategy::Alternate => write!(f, "alternate"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "correct" | "all-correct" => Ok(Strategy::AllCorrect),
            "wrong" | "all-wrong" => Ok(Strategy::AllWrong),
            "alternate" => Ok(Strategy::Alternate),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Answers with knowledge of the correct answer, following a [`Strategy`].
#[derive(Debug, Clone)]
pub struct Oracle {
    strategy: Strategy,
    answered: usize,
}

impl Oracle {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            answered: 0,
        }
    }
}

impl AnswerSource for Oracle {
    fn next_answer(&mut self, question: &Question) -> Result<Option<String>> {
        let correct = match self.strategy {
            Strategy::AllCorrect => true,
            Strategy::AllWrong => false,
            Strategy::Alternate => self.answered % 2 == 0,
        };
        self.answered += 1;

        let answer = if correct {
            question.correct_answer()
        } else {
            question
                .choices()
                .iter()
                .find(|c| !question.check_answer(c))
                .map(String::as_str)
                .unwrap_or_default()
        };
        Ok(Some(answer.to_string()))
    }
}

/// Drive `session` until it ends or `source` quits.
pub fn run_session(
    session: &mut QuizSession,
    source: &mut dyn AnswerSource,
    progress: &dyn ProgressReporter,
) -> Result<SessionSummary> {
    let started_at = Utc::now();
    let mut answers = Vec::new();

    while !session.is_ended() {
        let Some(question) = session.current_question() else {
            break;
        };
        progress.on_question(session.attempted() + 1, session.total(), question);

        let Some(answer) = source.next_answer(question)? else {
            tracing::info!(attempted = session.attempted(), "player quit early");
            break;
        };

        let outcome = session.submit_answer(&answer)?;
        progress.on_answer(&outcome);
        answers.push(outcome);
    }

    let summary = SessionSummary {
        id: Uuid::new_v4(),
        user: None,
        started_at,
        finished_at: Utc::now(),
        score: session.current_score(),
        attempted: session.attempted(),
        total: session.total(),
        completed: session.is_ended(),
        answers,
    };
    progress.on_session_end(&summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, QuestionRecord};
    use crate::pool::QuestionPool;
    use std::cell::RefCell;

    fn session() -> QuizSession {
        let records = vec![
            QuestionRecord::new("e1", &["a", "b"], "a", "easy"),
            QuestionRecord::new("e2", &["a", "b"], "b", "easy"),
            QuestionRecord::new("m1", &["x", "y", "z"], "z", "medium"),
            QuestionRecord::new("h1", &["x", "y"], "y", "hard"),
        ];
        QuizSession::new(QuestionPool::from_records(records).unwrap())
    }

    #[derive(Default)]
    struct Recorder {
        questions: RefCell<Vec<(usize, String)>>,
        ended: RefCell<bool>,
    }

    impl ProgressReporter for Recorder {
        fn on_question(&self, number: usize, _total: usize, question: &Question) {
            self.questions
                .borrow_mut()
                .push((number, question.prompt().to_string()));
        }
        fn on_answer(&self, _: &AnswerOutcome) {}
        fn on_session_end(&self, _: &SessionSummary) {
            *self.ended.borrow_mut() = true;
        }
    }

    #[test]
    fn all_correct_oracle_scores_everything() {
        let mut s = session();
        let recorder = Recorder::default();
        let summary = run_session(&mut s, &mut Oracle::new(Strategy::AllCorrect), &recorder).unwrap();

        assert!(summary.completed);
        assert_eq!(summary.score, 4);
        assert_eq!(summary.attempted, 4);
        assert_eq!(
            recorder.questions.borrow().iter().map(|(_, p)| p.as_str()).collect::<Vec<_>>(),
            vec!["e1", "m1", "h1", "e2"]
        );
        assert!(*recorder.ended.borrow());
    }

    #[test]
    fn all_wrong_oracle_stays_easy_first() {
        let mut s = session();
        let summary = run_session(&mut s, &mut Oracle::new(Strategy::AllWrong), &NoopReporter).unwrap();

        assert_eq!(summary.score, 0);
        let order: Vec<_> = summary.answers.iter().map(|a| a.prompt.as_str()).collect();
        assert_eq!(order, vec!["e1", "e2", "m1", "h1"]);
        assert!(summary.answers.iter().all(|a| !a.correct));
    }

    #[test]
    fn alternate_oracle() {
        let mut s = session();
        let summary = run_session(&mut s, &mut Oracle::new(Strategy::Alternate), &NoopReporter).unwrap();
        assert_eq!(summary.score, 2);
        assert_eq!(summary.answers[0].difficulty, Difficulty::Easy);
        assert!(summary.answers[0].correct);
        assert!(!summary.answers[1].correct);
    }

    #[test]
    fn scripted_source_quits_when_exhausted() {
        let mut s = session();
        let summary =
            run_session(&mut s, &mut ScriptedAnswers::new(["a", "nope"]), &NoopReporter).unwrap();

        assert!(!summary.completed);
        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.score, 1);
        assert!(!s.is_ended());
    }

    #[test]
    fn empty_session_produces_empty_summary() {
        let mut s = QuizSession::new(QuestionPool::default());
        let summary = run_session(&mut s, &mut ScriptedAnswers::default(), &NoopReporter).unwrap();
        assert!(summary.completed);
        assert_eq!(summary.total, 0);
        assert!(summary.answers.is_empty());
    }

    #[test]
    fn strategy_parse() {
        assert_eq!("correct".parse::<Strategy>().unwrap(), Strategy::AllCorrect);
        assert_eq!("WRONG".parse::<Strategy>().unwrap(), Strategy::AllWrong);
        assert_eq!(Strategy::Alternate.to_string(), "alternate");
        assert!("random".parse::<Strategy>().is_err());
    }
}
