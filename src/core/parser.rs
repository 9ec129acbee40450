// vespa-logfmt - core/parser.rs
//
// Splitting of raw lines into log records.
// Core layer: accepts &str, never touches the filesystem.
//
// Line grammar (tab-separated, at least seven fields):
//   timestamp host pid service component level message [message ...]
//
// Lines with fewer fields are not records. They are dropped silently: the
// Vespa log is often interleaved with stray output, and reporting each such
// line would bury the real records.

use crate::core::model::LogRecord;
use crate::util::constants::{FIELD_SEPARATOR, FIXED_FIELD_COUNT};

/// Parses one line (without its line terminator) into a record.
///
/// Returns `None` when the line has `FIXED_FIELD_COUNT` fields or fewer.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() <= FIXED_FIELD_COUNT {
        return None;
    }

    Some(LogRecord {
        timestamp: fields[0].to_string(),
        host: fields[1].to_string(),
        pid: fields[2].to_string(),
        service: fields[3].to_string(),
        component: fields[4].to_string(),
        level: fields[5].to_string(),
        message_parts: fields[FIXED_FIELD_COUNT..]
            .iter()
            .map(|part| part.to_string())
            .collect(),
    })
}
