//! Difficulty-bucketed question pool.
//!
//! Questions are grouped into one FIFO bucket per [`Difficulty`]. A
//! [`DifficultyCursor`] names the active bucket; lookups scan forward from it
//! so an exhausted bucket falls through to the next harder one.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use crate::error::QuizError;
use crate::model::{Difficulty, Question, QuestionRecord};

/// Index of the active difficulty bucket.
///
/// Values `0..=2` map onto [`Difficulty::ALL`]; `3` means every bucket is
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DifficultyCursor(u8);

impl DifficultyCursor {
    /// Sentinel for "no bucket has remaining questions".
    pub const EXHAUSTED: DifficultyCursor = DifficultyCursor(3);

    /// Cursor pointing at the given bucket.
    pub fn at(difficulty: Difficulty) -> Self {
        Self(difficulty.index() as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The bucket this cursor points at, or `None` for the sentinel.
    pub fn difficulty(self) -> Option<Difficulty> {
        Difficulty::from_index(self.index())
    }

    pub fn is_exhausted(self) -> bool {
        self == Self::EXHAUSTED
    }

    /// One level harder, saturating at `hard`. The sentinel is left alone.
    pub fn step_up(self) -> Self {
        if self.0 < 2 {
            Self(self.0 + 1)
        } else {
            self
        }
    }

    /// One level easier, saturating at `easy`. The sentinel is left alone.
    pub fn step_down(self) -> Self {
        if self.0 > 0 && !self.is_exhausted() {
            Self(self.0 - 1)
        } else {
            self
        }
    }
}

impl Default for DifficultyCursor {
    fn default() -> Self {
        Self::at(Difficulty::Easy)
    }
}

impl fmt::Display for DifficultyCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.difficulty() {
            Some(d) => write!(f, "{d}"),
            None => f.write_str("exhausted"),
        }
    }
}

/// Questions grouped by difficulty, each bucket in input order.
#[derive(Debug, Clone, Default)]
pub struct QuestionPool {
    buckets: [VecDeque<Question>; 3],
}

impl QuestionPool {
    /// Build a pool from raw records.
    ///
    /// Any invalid record fails the whole build; no partial pool is returned.
    pub fn from_records<I>(records: I) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = QuestionRecord>,
    {
        let mut pool = Self::default();
        for record in records {
            let question = Question::from_record(record)?;
            pool.buckets[question.difficulty().index()].push_back(question);
        }
        tracing::debug!(
            easy = pool.bucket_len(Difficulty::Easy),
            medium = pool.bucket_len(Difficulty::Medium),
            hard = pool.bucket_len(Difficulty::Hard),
            "built question pool"
        );
        Ok(pool)
    }

    /// Total number of questions still in the pool.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(VecDeque::is_empty)
    }

    pub fn bucket_len(&self, difficulty: Difficulty) -> usize {
        self.buckets[difficulty.index()].len()
    }

    /// The bucket `peek_active` would draw from, scanning forward from `cursor`.
    pub fn resolve_active(&self, cursor: DifficultyCursor) -> Option<Difficulty> {
        Difficulty::ALL
            .into_iter()
            .skip(cursor.index())
            .find(|d| !self.buckets[d.index()].is_empty())
    }

    /// Head of the first non-empty bucket at or after `cursor`.
    ///
    /// Never wraps back to easier buckets and never moves the cursor.
    pub fn peek_active(&self, cursor: DifficultyCursor) -> Option<&Question> {
        self.resolve_active(cursor)
            .and_then(|d| self.buckets[d.index()].front())
    }

    /// First non-empty bucket in the whole pool, easiest first.
    pub fn first_available(&self) -> Option<Difficulty> {
        self.resolve_active(DifficultyCursor::default())
    }

    /// Remove and return the oldest question of a bucket.
    pub fn consume_head(&mut self, difficulty: Difficulty) -> Result<Question, QuizError> {
        self.buckets[difficulty.index()]
            .pop_front()
            .ok_or(QuizError::EmptyBucket(difficulty))
    }
}
