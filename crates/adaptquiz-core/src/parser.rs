//! Question set file parser.
//!
//! Loads question sets from TOML or JSON files and directories, and validates
//! them. Records are not checked here beyond their shape; invariant checks
//! happen when a pool is built, and `validate_question_set` reports them all
//! up front.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Difficulty, QuestionRecord, QuestionSet};

/// Intermediate TOML structure for question set files.
#[derive(Debug, Deserialize)]
struct TomlQuestionFile {
    question_set: QuestionSetHeader,
    #[serde(default)]
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct QuestionSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

/// Accepted JSON layouts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonQuestionFile {
    /// A bare array of records.
    Records(Vec<QuestionRecord>),
    /// A full set with header, same shape as the TOML file.
    Set(TomlQuestionFile),
    /// A saved Open Trivia DB `api.php` response.
    TriviaDb(TriviaDbResponse),
}

#[derive(Debug, Deserialize)]
struct TriviaDbResponse {
    #[serde(default)]
    response_code: u32,
    results: Vec<TriviaDbQuestion>,
}

#[derive(Debug, Deserialize)]
struct TriviaDbQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    difficulty: String,
}

impl From<TriviaDbQuestion> for QuestionRecord {
    /// The correct answer goes last, after the incorrect ones.
    fn from(q: TriviaDbQuestion) -> Self {
        let mut choices = q.incorrect_answers;
        choices.push(q.correct_answer.clone());
        QuestionRecord {
            question: q.question,
            choices,
            correct_answer: q.correct_answer,
            difficulty: q.difficulty,
        }
    }
}

/// Parse a single question set file, picking the format from its extension.
pub fn parse_question_set(path: &Path) -> Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question set file: {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml_str(&content, path),
        Some("json") => parse_json_str(&content, path),
        _ => anyhow::bail!(
            "unsupported question set format (expected .toml or .json): {}",
            path.display()
        ),
    }
}

/// Parse a TOML question set (useful for testing).
pub fn parse_toml_str(content: &str, source_path: &Path) -> Result<QuestionSet> {
    let parsed: TomlQuestionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    Ok(from_file(parsed))
}

/// Parse a JSON question set in any of the accepted layouts.
pub fn parse_json_str(content: &str, source_path: &Path) -> Result<QuestionSet> {
    let parsed: JsonQuestionFile = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;

    let stem = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "questions".to_string());

    let set = match parsed {
        JsonQuestionFile::Set(file) => from_file(file),
        JsonQuestionFile::Records(questions) => QuestionSet {
            id: stem.clone(),
            name: stem,
            description: String::new(),
            questions,
        },
        JsonQuestionFile::TriviaDb(response) => {
            anyhow::ensure!(
                response.response_code == 0,
                "trivia response {} carries error code {}",
                source_path.display(),
                response.response_code
            );
            QuestionSet {
                id: stem.clone(),
                name: stem,
                description: "Open Trivia DB export".to_string(),
                questions: response.results.into_iter().map(Into::into).collect(),
            }
        }
    };
    Ok(set)
}

fn from_file(file: TomlQuestionFile) -> QuestionSet {
    QuestionSet {
        id: file.question_set.id,
        name: file.question_set.name,
        description: file.question_set.description,
        questions: file.questions,
    }
}

/// Recursively load all `.toml` and `.json` question sets from a directory.
/// Symlinked directories are not descended into.
pub fn load_question_directory(dir: &Path) -> Result<Vec<QuestionSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to stat {}", path.display()))?;

        if file_type.is_symlink() && path.is_dir() {
            tracing::warn!("skipping symlinked directory {}", path.display());
        } else if file_type.is_dir() {
            sets.extend(load_question_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            match parse_question_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a file, or every question set under a directory.
pub fn load_question_sets(path: &Path) -> Result<Vec<QuestionSet>> {
    if path.is_dir() {
        load_question_directory(path)
    } else {
        Ok(vec![parse_question_set(path)?])
    }
}

/// A warning from question set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Zero-based index of the offending record (if applicable).
    pub index: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn at(index: usize, message: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            message: message.into(),
        }
    }
}

/// Validate a question set for issues that would stop or degrade a quiz.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen_prompts = HashSet::new();
    let mut bucket_sizes = [0usize; 3];

    for (i, q) in set.questions.iter().enumerate() {
        match q.difficulty.parse::<Difficulty>() {
            Ok(d) => bucket_sizes[d.index()] += 1,
            Err(e) => warnings.push(ValidationWarning::at(i, e.to_string())),
        }

        if q.question.trim().is_empty() {
            warnings.push(ValidationWarning::at(i, "prompt is empty"));
        } else if !seen_prompts.insert(q.question.as_str()) {
            warnings.push(ValidationWarning::at(
                i,
                format!("duplicate prompt: {}", q.question),
            ));
        }

        if q.choices.len() < 2 {
            warnings.push(ValidationWarning::at(
                i,
                format!("expected at least 2 choices, got {}", q.choices.len()),
            ));
        }

        if !q.choices.contains(&q.correct_answer) {
            warnings.push(ValidationWarning::at(
                i,
                format!("correct answer {:?} is not among the choices", q.correct_answer),
            ));
        }

        let mut seen_choices = HashSet::new();
        if q.choices.iter().any(|c| !seen_choices.insert(c)) {
            warnings.push(ValidationWarning::at(i, "choices contain duplicates"));
        }
    }

    if !set.questions.is_empty() {
        for d in Difficulty::ALL {
            if bucket_sizes[d.index()] == 0 {
                warnings.push(ValidationWarning {
                    index: None,
                    message: format!("no {d} questions"),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[question_set]
id = "geo"
name = "Geography"
description = "Capitals and rivers"

[[questions]]
question = "What is the capital of France?"
choices = ["Berlin", "Paris", "Rome"]
correct_answer = "Paris"
difficulty = "easy"

[[questions]]
question = "Which river flows through Vienna?"
choices = ["Danube", "Rhine", "Elbe"]
correct_answer = "Danube"
difficulty = "medium"

[[questions]]
question = "What is the capital of Burkina Faso?"
choices = ["Ouagadougou", "Bamako", "Niamey"]
correct_answer = "Ouagadougou"
difficulty = "hard"
"#;

    #[test]
    fn parse_valid_toml() {
        let set = parse_toml_str(VALID_TOML, &PathBuf::from("geo.toml")).unwrap();
        assert_eq!(set.id, "geo");
        assert_eq!(set.name, "Geography");
        assert_eq!(set.questions.len(), 3);
        assert_eq!(set.questions[1].correct_answer, "Danube");
        assert!(validate_question_set(&set).is_empty());
    }

    #[test]
    fn parse_json_records() {
        let json = r#"[
            {"question": "2 + 2?", "choices": ["3", "4"], "correctAnswer": "4", "difficulty": "easy"}
        ]"#;
        let set = parse_json_str(json, &PathBuf::from("dir/math.json")).unwrap();
        assert_eq!(set.id, "math");
        assert_eq!(set.questions[0].choices, vec!["3", "4"]);
    }

    #[test]
    fn parse_trivia_db_response() {
        let json = r#"{
            "response_code": 0,
            "results": [{
                "type": "multiple",
                "difficulty": "hard",
                "category": "Science",
                "question": "What is &quot;Hg&quot;?",
                "correct_answer": "Mercury",
                "incorrect_answers": ["Silver", "Lead", "Tin"]
            }]
        }"#;
        let set = parse_json_str(json, &PathBuf::from("trivia.json")).unwrap();
        let q = &set.questions[0];
        assert_eq!(q.choices, vec!["Silver", "Lead", "Tin", "Mercury"]);
        assert_eq!(q.correct_answer, "Mercury");
        assert_eq!(q.question, "What is &quot;Hg&quot;?");
        assert_eq!(q.difficulty, "hard");
    }

    #[test]
    fn trivia_error_code_is_rejected() {
        let json = r#"{"response_code": 1, "results": []}"#;
        assert!(parse_json_str(json, &PathBuf::from("t.json")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_toml_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.yaml");
        std::fs::write(&path, "- q").unwrap();
        assert!(parse_question_set(&path).is_err());
    }

    #[test]
    fn validate_reports_every_problem() {
        let set = QuestionSet {
            id: "bad".into(),
            name: "Bad".into(),
            description: String::new(),
            questions: vec![
                QuestionRecord::new("q", &["a", "b"], "a", "impossible"),
                QuestionRecord::new("q", &["a", "a"], "c", "easy"),
                QuestionRecord::new("  ", &["a"], "a", "easy"),
            ],
        };
        let warnings = validate_question_set(&set);
        let messages: Vec<_> = warnings.iter().map(|w| w.message.as_str()).collect();

        assert!(messages.iter().any(|m| m.contains("invalid difficulty")));
        assert!(messages.iter().any(|m| m.contains("duplicate prompt")));
        assert!(messages.iter().any(|m| m.contains("not among the choices")));
        assert!(messages.iter().any(|m| m.contains("duplicates")));
        assert!(messages.iter().any(|m| m.contains("prompt is empty")));
        assert!(messages.iter().any(|m| m.contains("at least 2 choices")));
        assert!(messages.contains(&"no medium questions"));
        assert!(messages.contains(&"no hard questions"));
        assert_eq!(warnings[0].index, Some(0));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("geo.toml"), VALID_TOML).unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            nested.join("math.json"),
            r#"[{"question":"1+1?","choices":["2","3"],"correctAnswer":"2","difficulty":"easy"}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml {").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let sets = load_question_directory(dir.path()).unwrap();
        let ids: Vec<_> = sets.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["geo", "math"]);
    }

    #[cfg(unix)]
    #[test]
    fn load_directory_skips_symlink_loop() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("geo.toml"), VALID_TOML).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let sets = load_question_directory(dir.path()).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, "geo");
    }
}
