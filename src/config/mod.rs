mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const BUILTIN_CATALOG: &str = include_str!("default.yaml");

/// Where the active quiz catalog came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Builtin,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Builtin => write!(f, "built-in catalog"),
        }
    }
}

/// Get the config directory path (~/.config/introspect/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("introspect"))
}

/// Get the default catalog path (~/.config/introspect/quizzes.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("quizzes.yaml"))
}

/// The catalog compiled into the binary
pub fn builtin_config() -> Result<Config> {
    serde_saphyr::from_str(BUILTIN_CATALOG).context("Failed to parse built-in quiz catalog")
}

/// Load a quiz catalog from a YAML file
///
/// # Errors
///
/// Returns an error if the file cannot be read or the YAML cannot be parsed.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read quiz catalog at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&content).with_context(|| {
        format!("Failed to parse quiz catalog: invalid YAML in {}", path.display())
    })?;

    Ok(config)
}

/// Resolve the active quiz catalog
///
/// # Arguments
///
/// * `path` - Explicit catalog path. When given, the file must exist.
///
/// Without an explicit path, `~/.config/introspect/quizzes.yaml` is used if
/// present, otherwise the built-in catalog.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, ConfigSource)> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("Quiz catalog not found at {}", path.display());
        }
        let config = load_config_file(&path)?;
        return Ok((config, ConfigSource::File(path)));
    }

    if let Some(default_path) = get_config_path().filter(|p| p.exists()) {
        let config = load_config_file(&default_path)?;
        return Ok((config, ConfigSource::File(default_path)));
    }

    Ok((builtin_config()?, ConfigSource::Builtin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::validate_catalog;

    #[test]
    fn test_builtin_catalog_parses() {
        let config = builtin_config().unwrap();
        assert_eq!(config.quiz_ids(), vec!["archetype", "trope"]);
        assert_eq!(config.quiz("archetype").unwrap().questions.len(), 7);
        assert_eq!(config.quiz("trope").unwrap().questions.len(), 6);
        assert!(config.recommendations.is_some());
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let config = builtin_config().unwrap();
        assert_eq!(validate_catalog(&config), Ok(()));
    }

    #[test]
    fn test_builtin_catalog_maps_every_choice() {
        let config = builtin_config().unwrap();
        for quiz in &config.quizzes {
            for question in &quiz.questions {
                for choice in &question.choices {
                    assert!(
                        quiz.categories.contains_key(choice),
                        "{}: '{}' has no category",
                        question.id,
                        choice
                    );
                }
            }
        }
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = load_config(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzes.yaml");
        fs::write(
            &path,
            r#"
quizzes:
  - id: mini
    title: "Mini"
    questions:
      - id: m_1
        prompt: "Pick"
        choices: ["A"]
    categories:
      "A": Alpha
"#,
        )
        .unwrap();

        let (config, source) = load_config(Some(path.clone())).unwrap();
        assert_eq!(source, ConfigSource::File(path));
        assert_eq!(config.quiz_ids(), vec!["mini"]);
        assert!(config.recommendations.is_none());
    }

    #[test]
    fn test_load_invalid_yaml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "quizzes: [ { id: ").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.yaml"));
    }
}
