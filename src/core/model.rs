// vespa-logfmt - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

// =============================================================================
// Log Record (output of parsing)
// =============================================================================

/// One parsed line of a Vespa log file.
///
/// Fields are kept exactly as they appear in the input. Nothing is validated
/// at parse time: the timestamp is only interpreted when a formatted time
/// column is rendered, and the level is a free-form string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Seconds since the Unix epoch, optional fractional part (raw text).
    pub timestamp: String,

    /// Host name the record was logged on.
    pub host: String,

    /// Process id, optionally followed by `/tid`. Compared as an opaque string.
    pub pid: String,

    /// Vespa service name (e.g. `container`, `searchnode`).
    pub service: String,

    /// Dot-separated component namespace (e.g. `Container.com.yahoo.Foo`).
    pub component: String,

    /// Severity level as written in the log (e.g. `info`, `warning`).
    pub level: String,

    /// Message text. More than one part means the message contained tabs.
    pub message_parts: Vec<String>,
}

// =============================================================================
// Rendering options
// =============================================================================

/// Timezone used when rendering the formatted time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZoneMode {
    /// The local timezone of the machine running the formatter.
    #[default]
    Local,

    /// Coordinated Universal Time.
    Utc,
}

impl TimeZoneMode {
    /// Parses a config value (`"local"` or `"utc"`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "local" => Some(Self::Local),
            "utc" => Some(Self::Utc),
            _ => None,
        }
    }
}

/// Switches that alter how individual columns are rendered.
///
/// Which columns appear at all is decided by the shown-fields toggle state;
/// these options only change the rendering of a column that is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Hard-truncate the service column to 9 characters.
    pub truncate_service: bool,

    /// Hard-truncate the component column to 15 characters.
    pub truncate_component: bool,

    /// Replace literal `\n` and `\n\t` in messages with real newlines.
    pub dequote_newlines: bool,

    /// Timezone for the formatted time column.
    pub timezone: TimeZoneMode,
}
