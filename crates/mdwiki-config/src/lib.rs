//! Configuration for mdwiki.
//!
//! Parses `mdwiki.toml` with serde and discovers it in the current
//! directory or its parents. Command-line overrides are applied during load
//! via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` (error if unset) and `${VAR:-default}`.
//!
//! Expanded fields:
//! - `render.resource_root`
//! - `github.organization`
//! - `github.branch`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "mdwiki.toml";

/// Upper bound accepted for `render.max_depth`.
const MAX_DEPTH_LIMIT: usize = 1000;

/// Command-line settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the resource root.
    pub resource_root: Option<String>,
    /// Override hard line breaks.
    pub hard_wraps: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion settings.
    pub render: RenderConfig,
    /// Repository lookup settings.
    pub github: GithubConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[render]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Base URL that relative links and images resolve against.
    pub resource_root: Option<String>,
    /// Fence tags rendered as `{code:<lang>}`.
    pub code_languages: Vec<String>,
    /// Treat soft line breaks as hard breaks.
    pub hard_wraps: bool,
    /// Maximum block and inline nesting depth.
    pub max_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resource_root: None,
            code_languages: ["java", "ruby", "python", "javascript"]
                .map(str::to_owned)
                .to_vec(),
            hard_wraps: true,
            max_depth: 64,
        }
    }
}

/// `[github]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Organization owning plugin repositories.
    pub organization: String,
    /// Branch to read raw files from.
    pub branch: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            organization: "jenkinsci".to_owned(),
            branch: "master".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g. `render.resource_root`).
        field: String,
        /// What went wrong.
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration with optional command-line overrides.
    ///
    /// An explicit `config_path` must exist. Otherwise `mdwiki.toml` is
    /// searched for from the current directory upward, falling back to
    /// defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if the explicit file is missing, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Search `start` and its parents for `mdwiki.toml`.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load, expand and validate a specific file.
    ///
    /// # Errors
    ///
    /// Returns error if reading, parsing, expansion or validation fails.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.render.resource_root {
            require_http_url(root, "render.resource_root")?;
        }
        if !(1..=MAX_DEPTH_LIMIT).contains(&self.render.max_depth) {
            return Err(ConfigError::Validation(format!(
                "render.max_depth must be between 1 and {MAX_DEPTH_LIMIT}"
            )));
        }
        require_non_empty(&self.github.organization, "github.organization")?;
        require_non_empty(&self.github.branch, "github.branch")?;
        Ok(())
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.resource_root {
            self.render.resource_root = Some(root.clone());
        }
        if let Some(hard_wraps) = settings.hard_wraps {
            self.render.hard_wraps = hard_wraps;
        }
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(root) = &mut self.render.resource_root {
            expand::expand_in_place(root, "render.resource_root")?;
        }
        expand::expand_in_place(&mut self.github.organization, "github.organization")?;
        expand::expand_in_place(&mut self.github.branch, "github.branch")?;
        Ok(())
    }
}
