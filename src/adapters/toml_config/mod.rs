// TOML config adapter - Settings hierarchy: CLI > environment > file > defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::adapters::tracing_log::{LogFormat, LogLevel};
use crate::error::{RemapError, RemapResult};
use crate::output::OutputFormat;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "remap.toml";

/// Environment variables that override file settings
pub const ENV_LOG_LEVEL: &str = "REMAP_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "REMAP_LOG_FORMAT";
pub const ENV_OUTPUT_FORMAT: &str = "REMAP_OUTPUT_FORMAT";

/// Resolved tool settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    pub output_format: OutputFormat,
    /// File the settings were read from, if any
    pub source: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            log_format: LogFormat::Full,
            output_format: OutputFormat::Text,
            source: None,
        }
    }
}

/// Command-line values, highest precedence
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
    pub output_format: Option<OutputFormat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    remap: FileSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    log_level: Option<LogLevel>,
    log_format: Option<LogFormat>,
    output_format: Option<OutputFormat>,
}

impl Settings {
    /// Resolve settings from every layer.
    ///
    /// An explicit `config_path` must exist; otherwise `remap.toml` in the
    /// working directory is used when present.
    pub fn load(config_path: Option<&Path>, overrides: &SettingsOverrides) -> RemapResult<Self> {
        let mut settings = Settings::default();

        let path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };
        if let Some(path) = path {
            let content = std::fs::read_to_string(&path).map_err(|e| RemapError::Config {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;
            settings.apply_toml(&content)?;
            settings.source = Some(path);
        }

        settings.apply_env(|key| std::env::var(key).ok())?;
        settings.apply_overrides(overrides);
        Ok(settings)
    }

    /// Layer a TOML document (`[remap]` table) over the current values
    pub fn apply_toml(&mut self, content: &str) -> RemapResult<()> {
        let parsed: ConfigFile = toml::from_str(content).map_err(|e| RemapError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })?;

        let file = parsed.remap;
        if let Some(level) = file.log_level {
            self.log_level = level;
        }
        if let Some(format) = file.log_format {
            self.log_format = format;
        }
        if let Some(format) = file.output_format {
            self.output_format = format;
        }
        Ok(())
    }

    /// Layer environment values, read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> RemapResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env_overrides = 0;
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = value.parse()?;
            env_overrides += 1;
        }
        if let Some(value) = lookup(ENV_LOG_FORMAT) {
            self.log_format = value.parse()?;
            env_overrides += 1;
        }
        if let Some(value) = lookup(ENV_OUTPUT_FORMAT) {
            self.output_format = value.parse()?;
            env_overrides += 1;
        }

        if env_overrides > 0 {
            info!("Applied {} environment variable overrides", env_overrides);
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(format) = overrides.log_format {
            self.log_format = format;
        }
        if let Some(format) = overrides.output_format {
            self.output_format = format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, LogLevel::Warn);
        assert_eq!(settings.output_format, OutputFormat::Text);
    }

    #[test]
    fn test_apply_toml() {
        let mut settings = Settings::default();
        settings
            .apply_toml("[remap]\nlog_level = \"debug\"\noutput_format = \"json\"\n")
            .unwrap();
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.log_format, LogFormat::Full);
        assert_eq!(settings.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_apply_toml_rejects_unknown_values() {
        let mut settings = Settings::default();
        assert!(settings.apply_toml("[remap]\nlog_level = \"loud\"\n").is_err());
        assert!(settings.apply_toml("[remap]\ncolour = true\n").is_err());
        assert!(settings.apply_toml("not toml at all = = =").is_err());
    }

    #[test]
    fn test_precedence_cli_over_env_over_file() {
        let mut settings = Settings::default();
        settings
            .apply_toml("[remap]\nlog_level = \"info\"\noutput_format = \"yaml\"\nlog_format = \"pretty\"\n")
            .unwrap();
        settings
            .apply_env(|key| match key {
                ENV_LOG_LEVEL => Some("trace".to_string()),
                ENV_OUTPUT_FORMAT => Some("json".to_string()),
                _ => None,
            })
            .unwrap();
        settings.apply_overrides(&SettingsOverrides {
            output_format: Some(OutputFormat::Text),
            ..SettingsOverrides::default()
        });

        assert_eq!(settings.log_level, LogLevel::Trace);
        assert_eq!(settings.log_format, LogFormat::Pretty);
        assert_eq!(settings.output_format, OutputFormat::Text);
    }

    #[test]
    fn test_bad_env_value_is_config_error() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env(|key| (key == ENV_LOG_FORMAT).then(|| "xml".to_string()))
            .unwrap_err();
        assert!(matches!(err, RemapError::Config { .. }));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[remap]\nlog_format = \"compact\"\n").unwrap();

        let settings = Settings::load(Some(&path), &SettingsOverrides::default()).unwrap();
        assert_eq!(settings.log_format, LogFormat::Compact);
        assert_eq!(settings.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(Settings::load(Some(&path), &SettingsOverrides::default()).is_err());
    }
}
