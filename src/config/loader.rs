//! Site configuration loader
//!
//! Loading pipeline:
//! 1. Size check
//! 2. YAML parsing (an empty file means "all defaults")
//! 3. Deserialization to [`SiteConfig`]
//! 4. Validation (theme must be bundled)
//! 5. Freeze with `Arc`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::schema::SiteConfig;
use crate::error::ConfigError;
use crate::render::highlight;

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_config_size: env_or("REVIEWDECK_MAX_CONFIG_SIZE", 1024 * 1024),
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<SiteConfig>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is missing, too large, not valid
    /// YAML, or fails validation.
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|e| read_error(path, e))?;

        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > self.options.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: file_size.to_string(),
                expected: format!("at most {} bytes", self.options.max_config_size),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;

        self.load_from_str(&text, path)
    }

    /// Parses and validates configuration text; `path` is used in errors only.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text is not valid YAML or fails
    /// validation.
    pub fn load_from_str(&self, text: &str, path: &Path) -> Result<LoadResult, ConfigError> {
        if text.len() > self.options.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: text.len().to_string(),
                expected: format!("at most {} bytes", self.options.max_config_size),
            });
        }

        let root: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| parse_error(path, &e))?;

        let config = if root.is_null() {
            SiteConfig::default()
        } else {
            serde_yaml::from_value(root).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: format!("Failed to deserialize configuration: {e}"),
            })?
        };

        let warnings = validate(&config)?;

        Ok(LoadResult {
            config: Arc::new(config),
            warnings,
        })
    }
}

/// Loads `path` if given, otherwise returns the built-in defaults.
///
/// Warnings are logged, not returned.
///
/// # Errors
///
/// Propagates any [`ConfigError`] from [`ConfigLoader::load`].
pub fn load_or_default(path: Option<&Path>) -> Result<Arc<SiteConfig>, ConfigError> {
    let Some(path) = path else {
        tracing::debug!("no site configuration given, using defaults");
        return Ok(Arc::new(SiteConfig::default()));
    };

    tracing::info!(config = %path.display(), "loading site configuration");
    let result = ConfigLoader::default().load(path)?;
    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
    Ok(result.config)
}

// ============================================================================
// Validation
// ============================================================================

fn validate(config: &SiteConfig) -> Result<Vec<LoadWarning>, ConfigError> {
    if !highlight::has_theme(&config.theme) {
        return Err(ConfigError::InvalidValue {
            field: "theme".to_string(),
            value: config.theme.clone(),
            expected: format!("one of: {}", highlight::theme_names().join(", ")),
        });
    }

    let mut warnings = Vec::new();

    if config.project.name.trim().is_empty() {
        warnings.push(LoadWarning {
            message: "project name is empty".to_string(),
            location: Some("project.name".to_string()),
        });
    }

    for (i, card) in config.summary.iter().enumerate() {
        if card.items.is_empty() {
            warnings.push(LoadWarning {
                message: format!("summary card '{}' has no items", card.title),
                location: Some(format!("summary[{i}].items")),
            });
        }
    }

    for (i, group) in config.priorities.iter().enumerate() {
        if group.items.is_empty() {
            warnings.push(LoadWarning {
                message: format!("priority group '{}' has no items", group.title),
                location: Some(format!("priorities[{i}].items")),
            });
        }
    }

    Ok(warnings)
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_error(path: &Path, e: &serde_yaml::Error) -> ConfigError {
    ConfigError::ParseError {
        path: PathBuf::from(path),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    }
}

fn read_error(path: &Path, source: std::io::Error) -> ConfigError {
    if source.kind() == std::io::ErrorKind::NotFound {
        ConfigError::MissingFile {
            path: path.to_path_buf(),
        }
    } else {
        ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn env_or(var: &str, default: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn loader() -> ConfigLoader {
        ConfigLoader::new(LoaderOptions {
            max_config_size: 64 * 1024,
        })
    }

    #[test]
    fn empty_text_yields_defaults() {
        let result = loader().load_from_str("", Path::new("site.yaml")).unwrap();
        assert_eq!(*result.config, SiteConfig::default());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let err = loader()
            .load_from_str("theme: no-such-theme\n", Path::new("site.yaml"))
            .unwrap_err();
        match err {
            ConfigError::InvalidValue { field, value, .. } => {
                assert_eq!(field, "theme");
                assert_eq!(value, "no-such-theme");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let err = loader()
            .load_from_str("project: [unclosed\n", Path::new("broken.yaml"))
            .unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn empty_groups_warn() {
        let result = loader()
            .load_from_str(
                "summary:\n  - title: Nothing\npriorities:\n  - level: low\n    title: Later\n",
                Path::new("site.yaml"),
            )
            .unwrap();
        let locations: Vec<_> = result
            .warnings
            .iter()
            .filter_map(|w| w.location.as_deref())
            .collect();
        assert_eq!(locations, ["summary[0].items", "priorities[0].items"]);
    }

    #[test]
    fn oversized_text_rejected() {
        let small = ConfigLoader::new(LoaderOptions { max_config_size: 4 });
        assert!(matches!(
            small.load_from_str("theme: x\n", Path::new("site.yaml")),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "project:\n  name: ACME").unwrap();
        let result = loader().load(file.path()).unwrap();
        assert_eq!(result.config.project.name, "ACME");
    }

    #[test]
    fn missing_file() {
        let err = loader()
            .load(Path::new("/nonexistent/reviewdeck/site.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn directory_is_a_read_error_not_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = loader().load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "got: {err}");
        assert!(!err.to_string().contains("file not found"));
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, b'\n']).unwrap();
        let err = loader().load(file.path()).unwrap_err();
        match err {
            ConfigError::Read { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("expected read error, got: {other}"),
        }
    }

    #[test]
    fn load_or_default_without_path() {
        let config = load_or_default(None).unwrap();
        assert_eq!(config.project.name, "NEOCARE");
    }
}
