use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Name of the optional config file looked up in the working directory
pub const CONFIG_FILE: &str = "mdcodes.toml";

/// How code blocks are pulled out of a markdown document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtractionStrategy {
    /// Line-oriented scan for ``` fences (GitHub style)
    #[default]
    Fenced,
    /// Full markdown parse, every code block regardless of tag
    Structural,
}

/// Main configuration for mdcodes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Files or directories to scan
    pub inputs: Vec<PathBuf>,
    /// Output path template, must contain `{name}`
    pub output: String,
    /// Extraction strategy (Fenced or Structural)
    pub strategy: ExtractionStrategy,
    /// Only keep fences explicitly tagged with a target language
    pub safe: bool,
    /// Language tags that mark a fence as a target block
    pub languages: Vec<String>,
    /// Empty file dropped into every directory created for output
    pub package_marker: Option<String>,
    /// Process discovered files on the rayon pool
    pub parallel: bool,
    /// Print progress to stdout and enable debug logs
    pub verbose: bool,
}

impl ExtractConfig {
    /// Validates the configuration: every input must exist, the
    /// template must name the file, and there must be at least one
    /// non-empty target language tag.
    pub fn validate(&self) -> anyhow::Result<()> {
        for input in &self.inputs {
            if !input.exists() {
                return Err(ExtractError::InputNotFound(input.clone()).into());
            }
        }
        if !self.output.contains("{name}") {
            return Err(ExtractError::InvalidTemplate(self.output.clone()).into());
        }
        if self.languages.is_empty() || self.languages.iter().any(|l| l.is_empty()) {
            return Err(ExtractError::EmptyLanguage(self.languages.clone()).into());
        }
        Ok(())
    }

    /// Attempts to load configuration from `mdcodes.toml` in the current directory.
    pub fn load_from_file() -> anyhow::Result<Option<Self>> {
        Self::load_from_path(Path::new(CONFIG_FILE))
    }

    /// Loads configuration from `path`. A missing file is `Ok(None)`; a
    /// file that cannot be parsed is an error.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err).with_context(|| format!("Failed to read {:?}", path)),
        };
        let config =
            toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(Some(config))
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from(".")],
            output: format!("output{}{{name}}.py", MAIN_SEPARATOR),
            strategy: ExtractionStrategy::Fenced,
            safe: true,
            languages: vec!["py".to_string(), "python".to_string()],
            package_marker: Some("__init__.py".to_string()),
            parallel: false,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = ExtractConfig {
            inputs: vec![PathBuf::from("non_existent_path_xyz_123")],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_template_requires_name() {
        let config = ExtractConfig {
            output: "output/code.py".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_language_tags_required() {
        for languages in [vec![], vec!["py".to_string(), String::new()]] {
            let config = ExtractConfig {
                languages,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(
                err.downcast_ref::<ExtractError>(),
                Some(ExtractError::EmptyLanguage(_))
            ));
        }
    }

    #[test]
    fn test_load_from_path() {
        let temp = tempfile::TempDir::new().unwrap();

        let missing = temp.path().join("mdcodes.toml");
        assert!(ExtractConfig::load_from_path(&missing).unwrap().is_none());

        let good = temp.path().join("good.toml");
        std::fs::write(&good, "parallel = true\n").unwrap();
        let loaded = ExtractConfig::load_from_path(&good).unwrap().unwrap();
        assert!(loaded.parallel);

        let bad = temp.path().join("bad.toml");
        std::fs::write(&bad, "safe = \"maybe\"\n").unwrap();
        assert!(ExtractConfig::load_from_path(&bad).is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ExtractConfig =
            toml::from_str("safe = false\nstrategy = \"Structural\"\n").unwrap();
        assert!(!config.safe);
        assert_eq!(config.strategy, ExtractionStrategy::Structural);
        assert_eq!(config.languages, vec!["py", "python"]);
        assert_eq!(config.package_marker.as_deref(), Some("__init__.py"));
    }
}
