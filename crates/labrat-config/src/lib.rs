//! Configuration management for labrat.
//!
//! Parses `labrat.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! A bare `$` without braces is kept literally.
//!
//! Expanded fields:
//! - `render.profile_base_url`
//! - `render.hashtag_base_url`
//! - `message.reply_label`

mod expand;

use std::path::{Path, PathBuf};

use labrat_feed::{ComposerOptions, DEFAULT_REPLY_LABEL, OffsetUnit};
use labrat_render::{DEFAULT_HASHTAG_BASE_URL, DEFAULT_PROFILE_BASE_URL, RendererOptions};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the feed offset unit.
    pub offset_unit: Option<OffsetUnit>,
    /// Override the profile base URL.
    pub profile_base_url: Option<String>,
    /// Override whether the reply link is appended.
    pub reply_link: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "labrat.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Span rendering configuration.
    pub render: RenderConfig,
    /// Message composition configuration.
    pub message: MessageConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Span rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Base URL of account profiles.
    pub profile_base_url: String,
    /// Base URL of hashtag searches.
    pub hashtag_base_url: String,
    /// Unit the feed counts entity offsets in.
    pub offset_unit: OffsetUnit,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            profile_base_url: DEFAULT_PROFILE_BASE_URL.to_owned(),
            hashtag_base_url: DEFAULT_HASHTAG_BASE_URL.to_owned(),
            offset_unit: OffsetUnit::default(),
        }
    }
}

/// Message composition configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Whether to append a reply link to every message.
    pub reply_link: bool,
    /// Label of the reply link.
    pub reply_label: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            reply_link: true,
            reply_label: DEFAULT_REPLY_LABEL.to_owned(),
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
        /// Config field path (e.g., "`render.profile_base_url`").
        field: String,
        /// Error message (e.g., "${`PROFILE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `labrat.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(unit) = settings.offset_unit {
            self.render.offset_unit = unit;
        }
        if let Some(url) = &settings.profile_base_url {
            self.render.profile_base_url.clone_from(url);
        }
        if let Some(reply_link) = settings.reply_link {
            self.message.reply_link = reply_link;
        }
    }

    /// Composer options described by this configuration.
    #[must_use]
    pub fn composer_options(&self) -> ComposerOptions {
        ComposerOptions {
            renderer: RendererOptions {
                profile_base_url: self.render.profile_base_url.clone(),
                hashtag_base_url: self.render.hashtag_base_url.clone(),
            },
            offset_unit: self.render.offset_unit,
            reply_label: self
                .message
                .reply_link
                .then(|| self.message.reply_label.clone()),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.profile_base_url, "render.profile_base_url")?;
        require_http_url(&self.render.profile_base_url, "render.profile_base_url")?;
        require_non_empty(&self.render.hashtag_base_url, "render.hashtag_base_url")?;
        require_http_url(&self.render.hashtag_base_url, "render.hashtag_base_url")?;

        // An empty label would render an anchor with no visible text
        if self.message.reply_link {
            require_non_empty(&self.message.reply_label, "message.reply_label")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.render.profile_base_url =
            expand::expand_env(&self.render.profile_base_url, "render.profile_base_url")?;
        self.render.hashtag_base_url =
            expand::expand_env(&self.render.hashtag_base_url, "render.hashtag_base_url")?;
        self.message.reply_label =
            expand::expand_env(&self.message.reply_label, "message.reply_label")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render.profile_base_url, "https://twitter.com");
        assert_eq!(config.render.hashtag_base_url, "https://twitter.com/hashtag");
        assert_eq!(config.render.offset_unit, OffsetUnit::CodePoint);
        assert!(config.message.reply_link);
        assert_eq!(config.message.reply_label, "Reply");
        assert!(config.config_path.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.profile_base_url, "https://twitter.com");
        assert!(config.message.reply_link);
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
profile_base_url = "https://x.com"
hashtag_base_url = "https://x.com/hashtag"
offset_unit = "utf16"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.render.profile_base_url, "https://x.com");
        assert_eq!(config.render.hashtag_base_url, "https://x.com/hashtag");
        assert_eq!(config.render.offset_unit, OffsetUnit::Utf16);
    }

    #[test]
    fn test_parse_message_config() {
        let toml = r#"
[message]
reply_link = false
reply_label = "Reply on Twitter"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.message.reply_link);
        assert_eq!(config.message.reply_label, "Reply on Twitter");
    }

    #[test]
    fn test_parse_unknown_offset_unit_fails() {
        let toml = r#"
[render]
offset_unit = "graphemes"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_composer_options() {
        let config = Config::default();
        let options = config.composer_options();
        assert_eq!(options.renderer, RendererOptions::default());
        assert_eq!(options.offset_unit, OffsetUnit::CodePoint);
        assert_eq!(options.reply_label, Some("Reply".to_owned()));
    }

    #[test]
    fn test_composer_options_without_reply_link() {
        let mut config = Config::default();
        config.message.reply_link = false;
        assert_eq!(config.composer_options().reply_label, None);
    }

    #[test]
    fn test_apply_cli_settings_offset_unit() {
        let mut config = Config::default();
        let overrides = CliSettings {
            offset_unit: Some(OffsetUnit::Utf8),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.offset_unit, OffsetUnit::Utf8);
        assert_eq!(config.render.profile_base_url, "https://twitter.com"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_profile_and_reply() {
        let mut config = Config::default();
        let overrides = CliSettings {
            profile_base_url: Some("https://nitter.example".to_owned()),
            reply_link: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.profile_base_url, "https://nitter.example");
        assert!(!config.message.reply_link);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.render.offset_unit, OffsetUnit::CodePoint);
        assert!(config.message.reply_link);
    }

    #[test]
    fn test_validate_invalid_scheme() {
        let mut config = Config::default();
        config.render.hashtag_base_url = "ftp://example.com".to_owned();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("render.hashtag_base_url"));
    }

    #[test]
    fn test_validate_empty_profile_url() {
        let mut config = Config::default();
        config.render.profile_base_url = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("render.profile_base_url cannot be empty"));
    }

    #[test]
    fn test_validate_empty_label_only_with_reply_link() {
        let mut config = Config::default();
        config.message.reply_label = "  ".to_owned();
        assert!(config.validate().is_err());

        config.message.reply_link = false;
        config.validate().unwrap();
    }

    #[test]
    fn test_expand_env_vars_profile_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_LABRAT_PROFILE", "https://profiles.test");
        }

        let toml = r#"
[render]
profile_base_url = "${TEST_LABRAT_PROFILE}"
hashtag_base_url = "${TEST_LABRAT_HASHTAG_UNSET:-https://tags.test}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.render.profile_base_url, "https://profiles.test");
        assert_eq!(config.render.hashtag_base_url, "https://tags.test");

        unsafe {
            std::env::remove_var("TEST_LABRAT_PROFILE");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_LABRAT_TEST");
        }

        let toml = r#"
[message]
reply_label = "${MISSING_VAR_LABRAT_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_LABRAT_TEST"));
        assert!(err.to_string().contains("message.reply_label"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labrat.toml");
        std::fs::write(
            &path,
            r#"
[render]
offset_unit = "utf8"

[message]
reply_label = "Open"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.render.offset_unit, OffsetUnit::Utf8);
        assert_eq!(config.message.reply_label, "Open");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labrat.toml");
        std::fs::write(&path, "[render]\nprofile_base_url = \"twitter.com\"\n").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labrat.toml");
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            reply_link: Some(false),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert!(!config.message.reply_link);
    }

    #[test]
    fn test_load_keeps_literal_dollar_in_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labrat.toml");
        std::fs::write(&path, "[message]\nreply_label = \"Reply $5 off\"\n").unwrap();
        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.message.reply_label, "Reply $5 off");
    }
}
