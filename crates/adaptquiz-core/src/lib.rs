//! adaptquiz-core — Adaptive-difficulty quiz engine.
//!
//! This crate defines the question model, the difficulty-bucketed question
//! pool, the quiz session state machine, and per-user score history that the
//! `adaptquiz` CLI builds on.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod pool;
pub mod report;
pub mod session;
pub mod statistics;
pub mod user;

pub use error::QuizError;
pub use model::{Difficulty, Question, QuestionRecord};
pub use pool::{DifficultyCursor, QuestionPool};
pub use session::{QuizSession, SessionState};
pub use user::UserRecord;
