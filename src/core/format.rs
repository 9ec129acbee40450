// vespa-logfmt - core/format.rs
//
// Rendering of accepted records into display lines.
// Core layer: pure logic; returns strings, never writes them.
//
// Columns appear in a fixed order, each only when its shown-field flag is on:
//   [time] host level pid service component<TAB>message

use crate::core::model::{LogRecord, RenderOptions, TimeZoneMode};
use crate::core::toggle::ToggleState;
use crate::util::constants::{
    CONTINUATION, HOST_WIDTH, LEVEL_WIDTH, PID_WIDTH, SERVICE_WIDTH, SHORT_COMPONENT_WIDTH,
    SHORT_SERVICE_WIDTH,
};
use crate::util::error::FormatError;
use chrono::{DateTime, Local, Utc};

/// Shown-field keys.
pub mod field {
    pub const TIME: &str = "time";
    pub const FMTTIME: &str = "fmttime";
    pub const MSECS: &str = "msecs";
    pub const USECS: &str = "usecs";
    pub const HOST: &str = "host";
    pub const LEVEL: &str = "level";
    pub const PID: &str = "pid";
    pub const SERVICE: &str = "service";
    pub const COMPONENT: &str = "component";
    pub const MESSAGE: &str = "message";
}

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Renders `record` as one display line, including the trailing newline.
///
/// Fails only when the formatted time column is shown and the timestamp is
/// not a usable number of seconds.
pub fn format_record(
    record: &LogRecord,
    fields: &ToggleState,
    options: &RenderOptions,
) -> Result<String, FormatError> {
    let mut out = String::new();

    if fields.is_on(field::FMTTIME) {
        let timestamp = parse_epoch(&record.timestamp)?;
        out.push_str(&format_time(&timestamp, fields, options.timezone));
        out.push(' ');
    } else if fields.is_on(field::TIME) {
        out.push_str(&record.timestamp);
        out.push(' ');
    }

    if fields.is_on(field::HOST) {
        out.push_str(&format!("{:<HOST_WIDTH$} ", record.host));
    }
    if fields.is_on(field::LEVEL) {
        out.push_str(&format!("{:<LEVEL_WIDTH$} ", record.level.to_uppercase()));
    }
    if fields.is_on(field::PID) {
        out.push_str(&format!("{:>PID_WIDTH$} ", record.pid));
    }
    if fields.is_on(field::SERVICE) {
        if options.truncate_service {
            out.push_str(&format!(
                "{:<SHORT_SERVICE_WIDTH$.SHORT_SERVICE_WIDTH$} ",
                record.service
            ));
        } else {
            out.push_str(&format!("{:<SERVICE_WIDTH$} ", record.service));
        }
    }
    if fields.is_on(field::COMPONENT) {
        if options.truncate_component {
            out.push_str(&format!(
                "{:<SHORT_COMPONENT_WIDTH$.SHORT_COMPONENT_WIDTH$}\t",
                record.component
            ));
        } else {
            out.push_str(&record.component);
            out.push('\t');
        }
    }
    if fields.is_on(field::MESSAGE) {
        let message = join_message(&record.message_parts, options.dequote_newlines);
        if message.contains('\n') {
            out.push_str(CONTINUATION);
        }
        out.push_str(&message);
    }

    out.push('\n');
    Ok(out)
}

/// Joins message parts with a newline-tab, optionally unescaping embedded
/// `\n` and `\n\t` sequences the same way.
fn join_message(parts: &[String], dequote_newlines: bool) -> String {
    let mut message = String::new();
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            message.push_str(CONTINUATION);
        }
        if dequote_newlines {
            message.push_str(
                &part
                    .replace("\\n\\t", CONTINUATION)
                    .replace("\\n", CONTINUATION),
            );
        } else {
            message.push_str(part);
        }
    }
    message
}

/// `[YYYY-MM-DD HH:MM:SS]`, with `.mmmmmm` when usecs is on, else `.mmm`
/// when msecs is on. Sub-second digits are truncated, not rounded.
fn format_time(timestamp: &DateTime<Utc>, fields: &ToggleState, timezone: TimeZoneMode) -> String {
    let pattern = if fields.is_on(field::USECS) {
        "[%Y-%m-%d %H:%M:%S%.6f]"
    } else if fields.is_on(field::MSECS) {
        "[%Y-%m-%d %H:%M:%S%.3f]"
    } else {
        "[%Y-%m-%d %H:%M:%S]"
    };
    match timezone {
        TimeZoneMode::Utc => timestamp.format(pattern).to_string(),
        TimeZoneMode::Local => timestamp.with_timezone(&Local).format(pattern).to_string(),
    }
}

/// Parses seconds since the epoch with an optional fractional part.
///
/// Plain decimals (`1623760800.123456`) are split textually so the
/// sub-second digits survive exactly; anything else the float parser
/// accepts (exponents, signs) goes through `f64`.
pub fn parse_epoch(raw: &str) -> Result<DateTime<Utc>, FormatError> {
    let invalid = |reason: &str| FormatError::Timestamp {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };

    let secs: f64 = raw
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(&e.to_string()))?;
    if !secs.is_finite() {
        return Err(invalid("not a finite number"));
    }

    let (whole, nanos) = match split_plain_decimal(raw) {
        Some(parts) => parts,
        None => {
            let whole = secs.floor();
            let nanos = ((secs - whole) * f64::from(NANOS_PER_SEC)) as u32;
            if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
                return Err(invalid("out of range"));
            }
            (whole as i64, nanos.min(NANOS_PER_SEC - 1))
        }
    };

    DateTime::from_timestamp(whole, nanos).ok_or_else(|| invalid("out of range"))
}

/// Splits `digits[.digits]` into whole seconds and nanoseconds.
fn split_plain_decimal(raw: &str) -> Option<(i64, u32)> {
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let whole: i64 = int_part.parse().ok()?;
    let nanos = frac_part
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(9)
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
    Some((whole, nanos))
}
