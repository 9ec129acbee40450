// vespa-logfmt - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "vespa-logfmt";

/// Application identifier used for config directories.
pub const APP_ID: &str = "vespa-logfmt";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input limits
// =============================================================================

/// Initial capacity of the line reader buffer.
pub const INITIAL_LINE_BUFFER: usize = 64 * 1024; // 64 KiB

/// Maximum accepted length of a single input line in bytes.
///
/// Vespa collapses stack traces into a single message field, so lines can be
/// very long. Lines above this bound are reported and skipped, never
/// truncated.
pub const MAX_LINE_LENGTH: usize = 4 * 1024 * 1024; // 4 MiB

// =============================================================================
// Record grammar
// =============================================================================

/// Field separator in the Vespa log format.
pub const FIELD_SEPARATOR: char = '\t';

/// Number of fixed positional fields before the message parts.
pub const FIXED_FIELD_COUNT: usize = 6;

// =============================================================================
// Rendering widths
// =============================================================================

/// Host column width (left-justified, padded).
pub const HOST_WIDTH: usize = 8;

/// Level column width (left-justified, padded).
pub const LEVEL_WIDTH: usize = 7;

/// Pid column width (right-justified, padded).
pub const PID_WIDTH: usize = 6;

/// Service column width when `--truncateservice` is set (hard-truncated).
pub const SHORT_SERVICE_WIDTH: usize = 9;

/// Service column width otherwise (padded, never truncated).
pub const SERVICE_WIDTH: usize = 16;

/// Component column width when `--truncatecomponent` is set.
pub const SHORT_COMPONENT_WIDTH: usize = 15;

/// Separator inserted between message parts and before multi-line messages.
pub const CONTINUATION: &str = "\n\t";

// =============================================================================
// Toggle defaults
// =============================================================================

/// Known severity levels and whether each is shown by default.
pub const DEFAULT_LEVELS: &[(&str, bool)] = &[
    ("fatal", true),
    ("error", true),
    ("warning", true),
    ("info", true),
    ("config", false),
    ("event", false),
    ("debug", false),
    ("spam", false),
];

/// Known display fields and whether each is rendered by default.
pub const DEFAULT_SHOW_FIELDS: &[(&str, bool)] = &[
    ("time", false),
    ("fmttime", true),
    ("msecs", true),
    ("usecs", false),
    ("host", false),
    ("level", true),
    ("pid", false),
    ("service", true),
    ("component", true),
    ("message", true),
];

// =============================================================================
// Follow mode
// =============================================================================

/// How often a followed file is polled for appended data (ms).
pub const FOLLOW_POLL_INTERVAL_MS: u64 = 250;

// =============================================================================
// Default input location
// =============================================================================

/// Environment variable naming the Vespa installation root.
pub const VESPA_HOME_ENV: &str = "VESPA_HOME";

/// Installation root used when `VESPA_HOME` is unset or empty.
pub const DEFAULT_VESPA_HOME: &str = "/opt/vespa";

/// Log file path relative to the installation root.
pub const DEFAULT_LOG_PATH: &str = "logs/vespa/vespa.log";

// =============================================================================
// Logging
// =============================================================================

/// Default internal log level. Kept at `warn` so tracing output does not
/// interleave with rendered records on a terminal.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
