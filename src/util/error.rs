// vespa-logfmt - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all vespa-logfmt operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogfmtError {
    /// A toggle list (levels or shown fields) named an unknown key.
    Toggle(ToggleError),

    /// A filter option could not be compiled.
    Filter(FilterError),

    /// A record could not be rendered.
    Format(FormatError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// An input source could not be opened or read.
    Input(InputError),

    /// Writing rendered output failed.
    Output { source: io::Error },
}

impl fmt::Display for LogfmtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toggle(e) => write!(f, "Invalid option: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Format(e) => write!(f, "Format error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Input(e) => write!(f, "Input error: {e}"),
            Self::Output { source } => write!(f, "Cannot write output: {source}"),
        }
    }
}

impl std::error::Error for LogfmtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Toggle(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Input(e) => Some(e),
            Self::Output { source } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Toggle errors
// ---------------------------------------------------------------------------

/// Errors raised while applying a `+name,-name,name` toggle list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleError {
    /// The key is neither `all` nor one of the group's known keys.
    InvalidFlag { group: &'static str, flag: String },
}

impl fmt::Display for ToggleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFlag { group, flag } => {
                write!(f, "{group}: not a valid flag: '{flag}'")
            }
        }
    }
}

impl std::error::Error for ToggleError {}

impl From<ToggleError> for LogfmtError {
    fn from(e: ToggleError) -> Self {
        Self::Toggle(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter options.
#[derive(Debug)]
pub enum FilterError {
    /// User-provided regex is invalid.
    InvalidRegex {
        option: &'static str,
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex {
                option,
                pattern,
                source,
            } => write!(f, "Invalid {option} regex '{pattern}': {source}"),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}

impl From<FilterError> for LogfmtError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Format errors
// ---------------------------------------------------------------------------

/// Per-record rendering failures. Recoverable: the stream skips the line.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The timestamp field is not a number of seconds, or is out of range.
    Timestamp { raw: String, reason: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp { raw, reason } => {
                write!(f, "cannot parse timestamp '{raw}': {reason}")
            }
        }
    }
}

impl std::error::Error for FormatError {}

impl From<FormatError> for LogfmtError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },

    /// Two settings cannot be used together.
    Conflict { detail: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
            Self::Conflict { detail } => write!(f, "{detail}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogfmtError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors related to opening or reading an input source.
#[derive(Debug)]
pub enum InputError {
    /// The file could not be opened.
    Open { path: PathBuf, source: io::Error },

    /// Reading from an already-open source failed.
    Read { source_name: String, source: io::Error },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Cannot open '{}': {source}", path.display())
            }
            Self::Read {
                source_name,
                source,
            } => write!(f, "Error reading '{source_name}': {source}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Read { source, .. } => Some(source),
        }
    }
}

impl From<InputError> for LogfmtError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

/// Convenience type alias for vespa-logfmt results.
pub type Result<T> = std::result::Result<T, LogfmtError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_toggle_error_names_key() {
        let e = ToggleError::InvalidFlag {
            group: "level",
            flag: "verbose".to_string(),
        };
        assert_eq!(e.to_string(), "level: not a valid flag: 'verbose'");
    }

    #[test]
    fn test_top_level_error_preserves_source_chain() {
        let e: LogfmtError = InputError::Open {
            path: PathBuf::from("/nonexistent/vespa.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        }
        .into();
        let source = e.source().expect("input error must have a source");
        assert!(source.to_string().contains("/nonexistent/vespa.log"));
        assert!(source.source().is_some());
    }
}
