// vespa-logfmt - app/stream.rs
//
// Line-by-line processing of one input stream:
//
//   read line -> parse -> filter -> format -> write
//
// Every rendered record is written as soon as it is produced so that
// followed files show up live. Problems with a single line (bad timestamp,
// over-long line) are reported on the diagnostics sink and the stream goes
// on. Only read and write failures end the stream early.

use crate::core::filter::{FilterDecision, RecordFilter};
use crate::core::format::format_record;
use crate::core::model::RenderOptions;
use crate::core::parser::parse_line;
use crate::core::toggle::ToggleState;
use crate::util::constants::{DEBUG_MAX_LINE_PREVIEW, INITIAL_LINE_BUFFER, MAX_LINE_LENGTH};
use crate::util::error::{InputError, LogfmtError};
use std::io::{self, BufRead, Write};

/// Counters for one processed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Lines read, including skipped ones.
    pub lines: u64,
    /// Lines that parsed into records.
    pub records: u64,
    /// Records written to the output.
    pub shown: u64,
    /// Records dropped by a filter.
    pub filtered: u64,
    /// Lines reported as bad on the diagnostics sink.
    pub bad_lines: u64,
}

/// Result of reading one line.
#[derive(Debug, PartialEq, Eq)]
enum NextLine {
    /// A complete line is in the buffer, terminator removed.
    Line,
    /// The line exceeded the maximum length and was discarded.
    TooLong,
    /// End of stream.
    End,
}

/// Drives records from input streams to an output sink.
///
/// The level set is owned here because the level gate extends it with
/// levels first seen in the input; that knowledge carries over from one
/// stream to the next.
#[derive(Debug)]
pub struct StreamProcessor {
    levels: ToggleState,
    fields: ToggleState,
    filter: RecordFilter,
    render: RenderOptions,
    max_line_length: usize,
}

impl StreamProcessor {
    pub fn new(
        levels: ToggleState,
        fields: ToggleState,
        filter: RecordFilter,
        render: RenderOptions,
    ) -> Self {
        Self {
            levels,
            fields,
            filter,
            render,
            max_line_length: MAX_LINE_LENGTH,
        }
    }

    /// Override the maximum accepted line length in bytes.
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Current level set, including levels learned from the input.
    pub fn levels(&self) -> &ToggleState {
        &self.levels
    }

    /// Process `reader` to end of stream.
    ///
    /// `source_name` identifies the stream in diagnostics. A completion
    /// notice is written to `diagnostics` once the stream ends normally.
    pub fn process<R: BufRead, W: Write, D: Write>(
        &mut self,
        source_name: &str,
        mut reader: R,
        output: &mut W,
        diagnostics: &mut D,
    ) -> Result<StreamStats, LogfmtError> {
        let mut stats = StreamStats::default();
        let mut buf: Vec<u8> = Vec::with_capacity(INITIAL_LINE_BUFFER);

        loop {
            let next = read_line(&mut reader, &mut buf, self.max_line_length).map_err(|e| {
                InputError::Read {
                    source_name: source_name.to_string(),
                    source: e,
                }
            })?;
            if next == NextLine::End {
                break;
            }
            stats.lines += 1;

            if next == NextLine::TooLong {
                stats.bad_lines += 1;
                tracing::warn!(source = source_name, line = stats.lines, "Line too long");
                diagnose(
                    diagnostics,
                    &format!(
                        "line {} exceeds maximum length of {} bytes, skipped",
                        stats.lines, self.max_line_length
                    ),
                )?;
                continue;
            }

            let line = String::from_utf8_lossy(&buf);
            self.handle_line(source_name, &line, &mut stats, output, diagnostics)?;
        }

        tracing::debug!(
            source = source_name,
            lines = stats.lines,
            records = stats.records,
            shown = stats.shown,
            filtered = stats.filtered,
            bad = stats.bad_lines,
            "Stream finished"
        );
        diagnose(diagnostics, "finished")?;
        Ok(stats)
    }

    fn handle_line<W: Write, D: Write>(
        &mut self,
        source_name: &str,
        line: &str,
        stats: &mut StreamStats,
        output: &mut W,
        diagnostics: &mut D,
    ) -> Result<(), LogfmtError> {
        let Some(record) = parse_line(line) else {
            return Ok(());
        };
        stats.records += 1;

        let outcome = self.filter.check(&record, &mut self.levels);
        if let Some(level) = &outcome.learned_level {
            tracing::debug!(source = source_name, level = %level, "Learned new level");
            diagnose(
                diagnostics,
                &format!("Warning: unknown level '{level}' in input"),
            )?;
        }
        if let FilterDecision::Reject(reason) = outcome.decision {
            tracing::trace!(line = stats.lines, ?reason, "Record filtered");
            stats.filtered += 1;
            return Ok(());
        }

        match format_record(&record, &self.fields, &self.render) {
            Ok(rendered) => {
                output
                    .write_all(rendered.as_bytes())
                    .and_then(|()| output.flush())
                    .map_err(|e| LogfmtError::Output { source: e })?;
                stats.shown += 1;
            }
            Err(e) => {
                stats.bad_lines += 1;
                tracing::debug!(
                    source = source_name,
                    line = stats.lines,
                    preview = %preview(line),
                    "Bad log line"
                );
                diagnose(
                    diagnostics,
                    &format!("bad log line {} in {source_name}: {e}", stats.lines),
                )?;
            }
        }
        Ok(())
    }
}

/// Write one diagnostic line.
fn diagnose<D: Write>(diagnostics: &mut D, message: &str) -> Result<(), LogfmtError> {
    writeln!(diagnostics, "{message}").map_err(|e| LogfmtError::Output { source: e })
}

/// First `DEBUG_MAX_LINE_PREVIEW` characters of a line, for debug logging.
fn preview(line: &str) -> &str {
    match line.char_indices().nth(DEBUG_MAX_LINE_PREVIEW) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

/// Read the next line into `buf` without its `\n` or `\r\n` terminator.
///
/// A final line without a terminator still counts as a line. Lines longer
/// than `max` bytes are consumed and discarded rather than truncated.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, max: usize) -> io::Result<NextLine> {
    buf.clear();
    let mut read_any = false;
    let mut too_long = false;

    loop {
        let (used, complete) = {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            read_any = true;

            let (chunk, used, complete) = match available.iter().position(|&b| b == b'\n') {
                Some(idx) => (&available[..idx], idx + 1, true),
                None => (available, available.len(), false),
            };
            if !too_long {
                if buf.len() + chunk.len() > max {
                    too_long = true;
                    buf.clear();
                } else {
                    buf.extend_from_slice(chunk);
                }
            }
            (used, complete)
        };
        reader.consume(used);
        if complete {
            break;
        }
    }

    if !read_any {
        return Ok(NextLine::End);
    }
    if too_long {
        return Ok(NextLine::TooLong);
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(NextLine::Line)
}
