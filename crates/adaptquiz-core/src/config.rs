//! adaptquiz configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level adaptquiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Player name used when `--user` is not given.
    #[serde(default = "default_username")]
    pub username: String,
    /// Question set file or directory used when `--questions` is not given.
    #[serde(default)]
    pub default_question_set: Option<PathBuf>,
    /// Number of sessions to play per invocation.
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    /// Output format: text or json.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_username() -> String {
    "player".to_string()
}
fn default_rounds() -> u32 {
    1
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            default_question_set: None,
            rounds: default_rounds(),
            format: default_format(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Single left-to-right pass: substituted values are copied verbatim and
/// never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `adaptquiz.toml` in the current directory
/// 2. `~/.config/adaptquiz/config.toml`
///
/// Environment variable overrides: `ADAPTQUIZ_USER`, `ADAPTQUIZ_QUESTIONS`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("adaptquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => QuizConfig::default(),
    };

    if let Ok(user) = std::env::var("ADAPTQUIZ_USER") {
        config.username = user;
    }
    if let Ok(questions) = std::env::var("ADAPTQUIZ_QUESTIONS") {
        config.default_question_set = Some(PathBuf::from(questions));
    }

    config.username = resolve_env_vars(&config.username);
    config.default_question_set = config
        .default_question_set
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));

    anyhow::ensure!(config.rounds >= 1, "rounds must be at least 1");
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<QuizConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<QuizConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("adaptquiz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_ADAPTQUIZ_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_ADAPTQUIZ_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_ADAPTQUIZ_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        std::env::remove_var("_ADAPTQUIZ_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_substituted_text() {
        std::env::set_var("_ADAPTQUIZ_SELF_REF", "${_ADAPTQUIZ_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_ADAPTQUIZ_SELF_REF}"),
            "${_ADAPTQUIZ_SELF_REF}"
        );
        assert_eq!(
            resolve_env_vars("a${_ADAPTQUIZ_SELF_REF}b${_ADAPTQUIZ_SELF_REF}"),
            "a${_ADAPTQUIZ_SELF_REF}b${_ADAPTQUIZ_SELF_REF}"
        );
        std::env::remove_var("_ADAPTQUIZ_SELF_REF");
    }

    #[test]
    fn resolve_env_vars_keeps_unterminated_reference() {
        assert_eq!(resolve_env_vars("x${UNCLOSED"), "x${UNCLOSED");
        assert_eq!(resolve_env_vars("${_ADAPTQUIZ_UNSET_VAR}!"), "!");
    }

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.username, "player");
        assert_eq!(config.rounds, 1);
        assert_eq!(config.format, "text");
        assert!(config.default_question_set.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config: QuizConfig = toml::from_str(
            r#"
username = "ada"
default_question_set = "question-sets/geo.toml"
"#,
        )
        .unwrap();
        assert_eq!(config.username, "ada");
        assert_eq!(config.rounds, 1);
        assert_eq!(
            config.default_question_set,
            Some(PathBuf::from("question-sets/geo.toml"))
        );
    }

    #[test]
    fn explicit_missing_path_errors() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_rejects_zero_rounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adaptquiz.toml");
        std::fs::write(&path, "rounds = 0\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }
}
