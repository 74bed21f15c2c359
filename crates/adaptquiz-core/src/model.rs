//! Core data model types for adaptquiz.
//!
//! Raw `QuestionRecord`s come from question set files or any other fetch
//! layer. `Question` is the validated, immutable form the pool hands out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

/// The three difficulty levels, ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All levels in bucket order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Position of this level in [`Difficulty::ALL`].
    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Inverse of [`Difficulty::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    /// Tags are matched exactly; `"Easy"` is not a recognized tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QuizError::InvalidDifficulty(other.to_string())),
        }
    }
}

/// A question as it arrives from the outside, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    /// Prompt text. May contain HTML entities; they are passed through as-is.
    pub question: String,
    /// Answer choices in display order.
    pub choices: Vec<String>,
    /// Text of the correct choice.
    #[serde(alias = "correct_answer")]
    pub correct_answer: String,
    /// Difficulty tag, kept as text so unknown tags surface as `InvalidDifficulty`.
    pub difficulty: String,
}

impl QuestionRecord {
    pub fn new(
        question: impl Into<String>,
        choices: &[&str],
        correct_answer: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct_answer: correct_answer.into(),
            difficulty: difficulty.into(),
        }
    }
}

/// An immutable, validated quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: String,
    choices: Vec<String>,
    correct_answer: String,
    difficulty: Difficulty,
}

impl Question {
    /// Validate a raw record.
    ///
    /// Fails if the difficulty tag is unknown, there are fewer than two
    /// choices, or the correct answer is not one of the choices.
    pub fn from_record(record: QuestionRecord) -> Result<Self, QuizError> {
        let difficulty: Difficulty = record.difficulty.parse()?;

        if record.choices.len() < 2 {
            return Err(QuizError::InvalidQuestion {
                prompt: record.question,
                reason: format!("expected at least 2 choices, got {}", record.choices.len()),
            });
        }
        if !record.choices.contains(&record.correct_answer) {
            return Err(QuizError::InvalidQuestion {
                reason: format!(
                    "correct answer {:?} is not among the choices",
                    record.correct_answer
                ),
                prompt: record.question,
            });
        }

        Ok(Self {
            prompt: record.question,
            choices: record.choices,
            correct_answer: record.correct_answer,
            difficulty,
        })
    }

    /// Returns `true` iff `candidate` is byte-for-byte the correct answer.
    pub fn check_answer(&self, candidate: &str) -> bool {
        candidate == self.correct_answer
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

/// A named collection of question records loaded from a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Unique identifier for this question set.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this question set.
    #[serde(default)]
    pub description: String,
    /// The raw records, in file order.
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capital() -> QuestionRecord {
        QuestionRecord::new(
            "What is the capital of France?",
            &["Berlin", "Paris", "Rome"],
            "Paris",
            "easy",
        )
    }

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(
            "impossible".parse::<Difficulty>(),
            Err(QuizError::InvalidDifficulty("impossible".into()))
        );
        assert!("Easy".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_index_roundtrip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_index(d.index()), Some(d));
        }
        assert_eq!(Difficulty::from_index(3), None);
    }

    #[test]
    fn check_answer_is_exact() {
        let q = Question::from_record(capital()).unwrap();
        assert!(q.check_answer("Paris"));
        assert!(!q.check_answer("paris"));
        assert!(!q.check_answer(" Paris"));
        assert!(!q.check_answer("Paris "));
    }

    #[test]
    fn check_answer_is_pure() {
        let q = Question::from_record(capital()).unwrap();
        let first = q.check_answer("Rome");
        for _ in 0..5 {
            assert_eq!(q.check_answer("Rome"), first);
            assert!(q.check_answer("Paris"));
        }
    }

    #[test]
    fn entities_are_not_decoded() {
        let record = QuestionRecord::new(
            "Who wrote &quot;Hamlet&quot;?",
            &["Shakespeare &amp; Co", "Marlowe"],
            "Shakespeare &amp; Co",
            "medium",
        );
        let q = Question::from_record(record).unwrap();
        assert_eq!(q.prompt(), "Who wrote &quot;Hamlet&quot;?");
        assert!(q.check_answer("Shakespeare &amp; Co"));
        assert!(!q.check_answer("Shakespeare & Co"));
    }

    #[test]
    fn rejects_correct_answer_outside_choices() {
        let mut record = capital();
        record.correct_answer = "Madrid".into();
        let err = Question::from_record(record).unwrap_err();
        assert!(matches!(err, QuizError::InvalidQuestion { .. }));
    }

    #[test]
    fn rejects_single_choice() {
        let record = QuestionRecord::new("Only one?", &["Yes"], "Yes", "easy");
        assert!(matches!(
            Question::from_record(record),
            Err(QuizError::InvalidQuestion { .. })
        ));
    }

    #[test]
    fn difficulty_checked_before_choices() {
        let record = QuestionRecord::new("?", &[], "x", "impossible");
        assert_eq!(
            Question::from_record(record),
            Err(QuizError::InvalidDifficulty("impossible".into()))
        );
    }

    #[test]
    fn record_accepts_both_field_spellings() {
        let camel: QuestionRecord = serde_json::from_str(
            r#"{"question":"q","choices":["a","b"],"correctAnswer":"a","difficulty":"easy"}"#,
        )
        .unwrap();
        let snake: QuestionRecord = serde_json::from_str(
            r#"{"question":"q","choices":["a","b"],"correct_answer":"a","difficulty":"easy"}"#,
        )
        .unwrap();
        assert_eq!(camel, snake);
    }
}
