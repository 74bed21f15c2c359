//! Session summaries with JSON export.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::AnswerOutcome;
use crate::statistics::accuracy;

/// Everything that happened during one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Unique session identifier.
    pub id: Uuid,
    /// Player name, if the session was played for a user.
    #[serde(default)]
    pub user: Option<String>,
    /// When the first question was presented.
    pub started_at: DateTime<Utc>,
    /// When the loop stopped.
    pub finished_at: DateTime<Utc>,
    /// Final score.
    pub score: u32,
    /// Questions answered.
    pub attempted: usize,
    /// Questions in the pool at the start.
    pub total: usize,
    /// `false` if the player quit before the session ended.
    pub completed: bool,
    /// Per-answer outcomes in order.
    #[serde(default)]
    pub answers: Vec<AnswerOutcome>,
}

impl SessionSummary {
    pub fn accuracy(&self) -> f64 {
        accuracy(self.score, self.attempted)
    }

    /// Save the summary as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        Ok(())
    }
}
