//! Per-user score history across quiz sessions.

use serde::{Deserialize, Serialize};

use crate::statistics::ScoreStats;

/// A player and the scores of their completed sessions, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    name: String,
    scores: Vec<u32>,
}

impl UserRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: Vec::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Append the final score of a completed session.
    pub fn record_score(&mut self, score: u32) {
        tracing::debug!(user = %self.name, score, "recorded session score");
        self.scores.push(score);
    }

    /// A copy of the score history in recording order.
    pub fn score_history(&self) -> Vec<u32> {
        self.scores.clone()
    }

    pub fn stats(&self) -> Option<ScoreStats> {
        ScoreStats::from_history(&self.scores)
    }
}
