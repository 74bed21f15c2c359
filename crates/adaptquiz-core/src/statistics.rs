//! Aggregate statistics over a user's score history.

use serde::{Deserialize, Serialize};

/// Summary of a score history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    /// Number of completed sessions.
    pub sessions: usize,
    /// Highest score.
    pub best: u32,
    /// Lowest score.
    pub worst: u32,
    /// Most recent score.
    pub latest: u32,
    /// Mean score across all sessions.
    pub mean: f64,
}

impl ScoreStats {
    /// Compute statistics, or `None` if no session has been recorded yet.
    pub fn from_history(scores: &[u32]) -> Option<Self> {
        let latest = *scores.last()?;
        let best = scores.iter().copied().max()?;
        let worst = scores.iter().copied().min()?;
        let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();

        Some(Self {
            sessions: scores.len(),
            best,
            worst,
            latest,
            mean: total as f64 / scores.len() as f64,
        })
    }
}

/// Fraction of answers that were correct, in `[0.0, 1.0]`.
pub fn accuracy(score: u32, attempted: usize) -> f64 {
    if attempted == 0 {
        return 0.0;
    }
    (score as f64 / attempted as f64).min(1.0)
}
