// vespa-logfmt - platform/config.rs
//
// Config file location and config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::TimeZoneMode;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for vespa-logfmt configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/vespa-logfmt/).
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::debug!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[display]` section.
    pub display: DisplaySection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[display]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Toggle list for shown fields, applied before any `--show`.
    pub show: Option<String>,
    /// Toggle list for levels, applied before any `--level`.
    pub levels: Option<String>,
    /// "local" or "utc".
    pub timezone: Option<String>,
    /// Same as `--truncateservice`.
    pub truncate_service: Option<bool>,
    /// Same as `--truncatecomponent`.
    pub truncate_component: Option<bool>,
    /// Same as `--nldequote`.
    pub nldequote: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    // -- Display --
    /// Shown-field toggle list.
    pub show: Option<String>,
    /// Level toggle list.
    pub levels: Option<String>,
    /// Timezone for formatted timestamps.
    pub timezone: TimeZoneMode,
    pub truncate_service: bool,
    pub truncate_component: bool,
    pub nldequote: bool,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

/// Load and validate the config file at `config_path`.
///
/// Returns the validated config and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings. An unreadable or
/// unparseable file yields defaults with one warning.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut warnings: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    match parse_config(&content) {
        Ok((config, value_warnings)) => {
            warnings.extend(value_warnings);
            (config, warnings)
        }
        Err(e) => {
            warnings.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            });
            (AppConfig::default(), warnings)
        }
    }
}

/// Parse and validate config.toml content.
///
/// Syntax errors fail the whole parse; out-of-range values only produce
/// warnings and keep the default for that field.
pub fn parse_config(content: &str) -> Result<(AppConfig, Vec<ConfigError>), toml::de::Error> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut warnings = Vec::new();
    let mut config = AppConfig {
        show: non_empty(raw.display.show),
        levels: non_empty(raw.display.levels),
        truncate_service: raw.display.truncate_service.unwrap_or(false),
        truncate_component: raw.display.truncate_component.unwrap_or(false),
        nldequote: raw.display.nldequote.unwrap_or(false),
        ..Default::default()
    };

    // -- Display: timezone --
    if let Some(ref tz) = raw.display.timezone {
        match TimeZoneMode::from_name(tz) {
            Some(mode) => config.timezone = mode,
            None => warnings.push(ConfigError::ValueOutOfRange {
                field: "display.timezone".to_string(),
                value: tz.clone(),
                expected: "\"local\" or \"utc\"".to_string(),
            }),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level.clone(),
                expected: "error, warn, info, debug, trace".to_string(),
            });
        }
    }

    Ok((config, warnings))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_gives_defaults() {
        let (config, warnings) = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_full_config() {
        let (config, warnings) = parse_config(
            r#"
[display]
show = "+host,+pid"
levels = "all,-spam"
timezone = "UTC"
truncate_service = true
nldequote = true

[logging]
level = "DEBUG"
"#,
        )
        .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.show.as_deref(), Some("+host,+pid"));
        assert_eq!(config.levels.as_deref(), Some("all,-spam"));
        assert_eq!(config.timezone, TimeZoneMode::Utc);
        assert!(config.truncate_service);
        assert!(!config.truncate_component);
        assert!(config.nldequote);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let (config, warnings) = parse_config(
            r#"
[display]
timezone = "Mars/Olympus"
show = ""

[logging]
level = "loud"
"#,
        )
        .unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(config.timezone, TimeZoneMode::Local);
        assert_eq!(config.show, None);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (config, warnings) = parse_config("[future]\nfeature = 1\n").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_unparseable_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display\nshow = ").unwrap();
        let (config, warnings) = load_config(&path);
        assert_eq!(config, AppConfig::default());
        assert!(matches!(warnings.as_slice(), [ConfigError::TomlParse { .. }]));
    }
}
