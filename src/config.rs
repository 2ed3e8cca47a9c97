/// Configuration system for toc-builder
///
/// Supports loading from multiple sources with priority:
/// Environment variables > Config file > Defaults
use crate::error::{ConfigError, TocError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Markdown corpus configuration
    pub corpus: CorpusConfig,

    /// PDF extraction configuration
    #[serde(default)]
    pub pdf: PdfConfig,
}

/// Markdown corpus configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorpusConfig {
    /// Root directories crawled for markdown files
    #[serde(default)]
    pub roots: Vec<PathBuf>,
}

/// PDF extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Number of characters of each page kept for matching
    #[serde(default = "default_snippet_len")]
    pub snippet_len: usize,

    /// Page count above which extraction is split across four workers
    #[serde(default = "default_split_threshold")]
    pub split_threshold: usize,
}

// Default value functions
fn default_snippet_len() -> usize {
    125
}

fn default_split_threshold() -> usize {
    13
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            snippet_len: default_snippet_len(),
            split_threshold: default_split_threshold(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, TocError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the given path, or fall back to defaults
    /// when no file exists there.
    ///
    /// The fallback is not validated here; callers validate after applying
    /// environment overrides, which may supply the required corpus roots.
    pub fn load_or_default(path: &Path) -> Result<Self, TocError> {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            Self::from_file(path)
        } else {
            tracing::info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), TocError> {
        if self.corpus.roots.is_empty() {
            return Err(ConfigError::MissingRequired("corpus.roots".to_string()).into());
        }

        if self.pdf.snippet_len == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pdf.snippet_len".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.pdf.split_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pdf.split_threshold".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        // Corpus roots, separated like PATH entries
        if let Ok(roots) = std::env::var("TOC_BUILDER_ROOTS") {
            self.corpus.roots = std::env::split_paths(&roots).collect();
        }

        // Snippet length
        if let Ok(len) = std::env::var("TOC_BUILDER_SNIPPET_LEN")
            && let Ok(len) = len.parse()
        {
            self.pdf.snippet_len = len;
        }

        // Split threshold
        if let Ok(threshold) = std::env::var("TOC_BUILDER_SPLIT_THRESHOLD")
            && let Ok(threshold) = threshold.parse()
        {
            self.pdf.split_threshold = threshold;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.corpus.roots.is_empty());
        assert_eq!(config.pdf.snippet_len, 125);
        assert_eq!(config.pdf.split_threshold, 13);
    }

    #[test]
    fn test_validate_requires_roots() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            TocError::Config(ConfigError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validate_valid_config() {
        let mut config = Config::default();
        config.corpus.roots.push(PathBuf::from("docs"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_snippet_len() {
        let mut config = Config::default();
        config.corpus.roots.push(PathBuf::from("docs"));
        config.pdf.snippet_len = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            TocError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_zero_split_threshold() {
        let mut config = Config::default();
        config.corpus.roots.push(PathBuf::from("docs"));
        config.pdf.split_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let content = r#"
[corpus]
roots = ["docs/articles", "docs/tutorials"]

[pdf]
snippet_len = 200
        "#;
        std::fs::write(temp_file.path(), content).unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.corpus.roots,
            vec![
                PathBuf::from("docs/articles"),
                PathBuf::from("docs/tutorials")
            ]
        );
        assert_eq!(config.pdf.snippet_len, 200);
        // Omitted field falls back to its default
        assert_eq!(config.pdf.split_threshold, 13);
    }

    #[test]
    fn test_from_file_missing_pdf_section() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "[corpus]\nroots = [\"docs\"]\n").unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pdf.snippet_len, 125);
    }

    #[test]
    fn test_from_file_nonexistent() {
        let result = Config::from_file(Path::new("/nonexistent/toc-builder.toml"));
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            TocError::Config(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "invalid toml {{{ content").unwrap();

        let result = Config::from_file(temp_file.path());
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            TocError::Config(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_from_file_validates() {
        let temp_file = NamedTempFile::new().unwrap();
        // Roots present but snippet_len invalid
        let content = r#"
[corpus]
roots = ["docs"]

[pdf]
snippet_len = 0
        "#;
        std::fs::write(temp_file.path(), content).unwrap();

        let result = Config::from_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/toc-builder.toml")).unwrap();
        assert!(config.corpus.roots.is_empty());
        assert_eq!(config.pdf.snippet_len, 125);
        assert_eq!(config.pdf.split_threshold, 13);
    }

    #[test]
    fn test_load_or_default_existing_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "[corpus]\nroots = [\"docs\"]\n").unwrap();

        let config = Config::load_or_default(temp_file.path()).unwrap();
        assert_eq!(config.corpus.roots, vec![PathBuf::from("docs")]);
    }

    #[test]
    fn test_load_or_default_still_reports_bad_toml() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "invalid toml {{{ content").unwrap();

        let result = Config::load_or_default(temp_file.path());
        assert!(matches!(
            result.unwrap_err(),
            TocError::Config(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.corpus.roots.push(PathBuf::from("docs"));
        config.pdf.snippet_len = 300;

        let toml_str = toml::to_string(&config).unwrap();
        let loaded: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded.corpus.roots, config.corpus.roots);
        assert_eq!(loaded.pdf.snippet_len, 300);
    }

    #[test]
    fn test_apply_env_overrides() {
        // Unparseable values first: they must be ignored
        // Safety: no other test touches these variables
        unsafe {
            std::env::set_var("TOC_BUILDER_SNIPPET_LEN", "not_a_number");
        }

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.pdf.snippet_len, 125);

        unsafe {
            std::env::set_var("TOC_BUILDER_SNIPPET_LEN", "64");
            std::env::set_var("TOC_BUILDER_SPLIT_THRESHOLD", "20");
        }

        config.apply_env_overrides();
        assert_eq!(config.pdf.snippet_len, 64);
        assert_eq!(config.pdf.split_threshold, 20);

        // Cleanup
        // Safety: same as above
        unsafe {
            std::env::remove_var("TOC_BUILDER_SNIPPET_LEN");
            std::env::remove_var("TOC_BUILDER_SPLIT_THRESHOLD");
        }
    }

    #[test]
    fn test_apply_env_overrides_roots() {
        unsafe {
            std::env::set_var("TOC_BUILDER_ROOTS", "docs/a:docs/b");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(
            config.corpus.roots,
            vec![PathBuf::from("docs/a"), PathBuf::from("docs/b")]
        );

        unsafe {
            std::env::remove_var("TOC_BUILDER_ROOTS");
        }
    }

}
