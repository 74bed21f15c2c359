//! Quiz error types.
//!
//! Construction errors (`InvalidDifficulty`, `InvalidQuestion`) abort the
//! whole quiz setup. The remaining variants signal that a caller broke the
//! pool or session protocol.

use thiserror::Error;

use crate::model::Difficulty;

/// Errors raised by the question pool and quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// A record carried a difficulty tag other than `easy`, `medium` or `hard`.
    #[error("invalid difficulty: {0:?} (expected easy, medium or hard)")]
    InvalidDifficulty(String),

    /// A record broke the question invariants (choices, correct answer).
    #[error("invalid question {prompt:?}: {reason}")]
    InvalidQuestion { prompt: String, reason: String },

    /// `consume_head` was called on a bucket with no questions left.
    #[error("cannot consume from empty {0} bucket")]
    EmptyBucket(Difficulty),

    /// An answer was submitted after the session ended.
    #[error("answer submitted after the quiz ended ({attempted}/{total} attempted)")]
    InvalidAnswerSubmission { attempted: usize, total: usize },
}

impl QuizError {
    /// Returns `true` if this error is a caller protocol violation rather than
    /// bad input data.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            QuizError::EmptyBucket(_) | QuizError::InvalidAnswerSubmission { .. }
        )
    }
}
