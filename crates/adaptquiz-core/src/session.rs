//! Quiz session state machine.
//!
//! A session owns its [`QuestionPool`] and advances one question per
//! [`QuizSession::submit_answer`] call. Grading, consumption and cursor
//! adjustment happen as a single transition; there is no way to consume a
//! question without moving the cursor.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Difficulty, Question};
use crate::pool::{DifficultyCursor, QuestionPool};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    InProgress,
    Ended,
}

/// What happened when an answer was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    /// Prompt of the graded question.
    pub prompt: String,
    /// Bucket the graded question came from.
    pub difficulty: Difficulty,
    /// The answer text that was submitted.
    pub submitted: String,
    /// Whether the submission matched the correct answer.
    pub correct: bool,
    /// The correct answer text.
    pub correct_answer: String,
    /// Running score after this answer.
    pub score: u32,
    /// Questions attempted after this answer.
    pub attempted: usize,
    /// Bucket the next question will come from, `None` once exhausted.
    pub next_difficulty: Option<Difficulty>,
}

/// One run of the quiz, from first question to termination.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pool: QuestionPool,
    cursor: DifficultyCursor,
    score: u32,
    attempted: usize,
    total: usize,
}

impl QuizSession {
    /// Start a session over `pool`.
    ///
    /// The cursor starts at the first non-empty bucket, so an empty pool
    /// yields a session that is already ended.
    pub fn new(pool: QuestionPool) -> Self {
        let total = pool.len();
        let cursor = pool
            .first_available()
            .map(DifficultyCursor::at)
            .unwrap_or(DifficultyCursor::EXHAUSTED);
        tracing::debug!(total, %cursor, "quiz session started");
        Self {
            pool,
            cursor,
            score: 0,
            attempted: 0,
            total,
        }
    }

    /// The question to present next, or `None` when nothing is left.
    pub fn current_question(&self) -> Option<&Question> {
        self.pool.peek_active(self.cursor)
    }

    pub fn current_score(&self) -> u32 {
        self.score
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    /// Number of questions in the pool when the session was created.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn cursor(&self) -> DifficultyCursor {
        self.cursor
    }

    pub fn is_ended(&self) -> bool {
        self.attempted >= self.total || self.cursor.is_exhausted()
    }

    pub fn state(&self) -> SessionState {
        if self.is_ended() {
            SessionState::Ended
        } else {
            SessionState::InProgress
        }
    }

    /// Grade `candidate` against the current question and advance.
    ///
    /// Late submissions are rejected with `InvalidAnswerSubmission` and leave
    /// the score and attempt counters untouched.
    pub fn submit_answer(&mut self, candidate: &str) -> Result<AnswerOutcome, QuizError> {
        if self.is_ended() {
            return Err(self.late_submission());
        }

        let Some(bucket) = self.pool.resolve_active(self.cursor) else {
            // Nothing left to ask even though attempts remain.
            tracing::warn!(
                attempted = self.attempted,
                total = self.total,
                "pool exhausted before all questions were attempted"
            );
            self.cursor = DifficultyCursor::EXHAUSTED;
            return Err(self.late_submission());
        };

        let question = self.pool.consume_head(bucket)?;
        let correct = question.check_answer(candidate);
        if correct {
            self.score += 1;
        }

        let adjusted = if correct {
            self.cursor.step_up()
        } else {
            self.cursor.step_down()
        };
        self.cursor = self.reresolve(adjusted);
        self.attempted += 1;

        tracing::debug!(
            %bucket,
            correct,
            score = self.score,
            attempted = self.attempted,
            cursor = %self.cursor,
            "answer graded"
        );
        if self.is_ended() {
            tracing::info!(
                score = self.score,
                total = self.total,
                "quiz session ended"
            );
        }

        Ok(AnswerOutcome {
            prompt: question.prompt().to_string(),
            difficulty: bucket,
            submitted: candidate.to_string(),
            correct,
            correct_answer: question.correct_answer().to_string(),
            score: self.score,
            attempted: self.attempted,
            next_difficulty: self.cursor.difficulty(),
        })
    }

    /// Keep `cursor` if its bucket still has questions, otherwise fall back
    /// to the easiest non-empty bucket, or the sentinel.
    fn reresolve(&self, cursor: DifficultyCursor) -> DifficultyCursor {
        match cursor.difficulty() {
            Some(d) if self.pool.bucket_len(d) > 0 => cursor,
            _ => self
                .pool
                .first_available()
                .map(DifficultyCursor::at)
                .unwrap_or(DifficultyCursor::EXHAUSTED),
        }
    }

    fn late_submission(&self) -> QuizError {
        QuizError::InvalidAnswerSubmission {
            attempted: self.attempted,
            total: self.total,
        }
    }
}
