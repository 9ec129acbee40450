// vespa-logfmt - app/run.rs
//
// Top-level run: resolve input sources and stream each one through a
// single StreamProcessor.
//
// A source that cannot be opened or read is reported on the diagnostics
// sink and the run moves on to the next source. Only output failures stop
// the run.

use crate::app::options::Options;
use crate::app::stream::{StreamProcessor, StreamStats};
use crate::platform::fs::{self, InputSource};
use crate::util::constants::INITIAL_LINE_BUFFER;
use crate::util::error::{LogfmtError, Result};
use std::io::{BufRead, BufReader, Write};

/// Environment facts the run depends on, passed in for testability.
#[derive(Debug, Clone, Default)]
pub struct RunEnv {
    /// True when standard input is an interactive terminal.
    pub stdin_is_terminal: bool,
    /// Value of `VESPA_HOME`, if set.
    pub vespa_home: Option<String>,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Sources processed to the end.
    pub sources_read: usize,
    /// Sources that could not be opened or failed while reading.
    pub sources_failed: usize,
    pub lines: u64,
    pub shown: u64,
    pub bad_lines: u64,
}

impl RunSummary {
    fn add(&mut self, stats: &StreamStats) {
        self.sources_read += 1;
        self.lines += stats.lines;
        self.shown += stats.shown;
        self.bad_lines += stats.bad_lines;
    }
}

/// Process every input source in order.
pub fn run<I: BufRead, W: Write, D: Write>(
    options: Options,
    env: &RunEnv,
    stdin: I,
    output: &mut W,
    diagnostics: &mut D,
) -> Result<RunSummary> {
    let sources = fs::resolve_sources(
        &options.files,
        env.stdin_is_terminal,
        env.vespa_home.as_deref(),
    );
    let mut processor = StreamProcessor::new(
        options.levels,
        options.fields,
        options.filter,
        options.render,
    );
    let mut summary = RunSummary::default();
    let mut stdin = Some(stdin);

    for source in &sources {
        let name = source.to_string();
        let result = match source {
            InputSource::Stdin => match stdin.take() {
                Some(reader) => processor.process(&name, reader, output, diagnostics),
                None => continue,
            },
            InputSource::File(path) => match fs::open_file(path, options.follow) {
                Ok(file) => {
                    let reader = BufReader::with_capacity(INITIAL_LINE_BUFFER, file);
                    processor.process(&name, reader, output, diagnostics)
                }
                Err(e) => Err(e.into()),
            },
        };

        match result {
            Ok(stats) => summary.add(&stats),
            Err(LogfmtError::Input(e)) => {
                tracing::warn!(source = %name, error = %e, "Input source failed");
                summary.sources_failed += 1;
                writeln!(diagnostics, "{e}").map_err(|e| LogfmtError::Output { source: e })?;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(
        sources = summary.sources_read,
        failed = summary.sources_failed,
        lines = summary.lines,
        shown = summary.shown,
        "Run complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::TimeZoneMode;
    use std::path::PathBuf;

    const LINE: &str = "1000.0\thostA\t42\tsvcX\tContainer.com.yahoo.config.Foo\tinfo\thello\n";

    fn options(files: Vec<PathBuf>) -> Options {
        let mut options = Options {
            files,
            ..Default::default()
        };
        options.fields = options.fields.with("level,message").unwrap();
        options.render.timezone = TimeZoneMode::Utc;
        options
    }

    #[test]
    fn test_reads_stdin_when_piped() {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let summary = run(
            options(Vec::new()),
            &RunEnv::default(),
            LINE.as_bytes(),
            &mut out,
            &mut diag,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "INFO    hello\n");
        assert_eq!(String::from_utf8(diag).unwrap(), "finished\n");
        assert_eq!(summary.sources_read, 1);
    }

    #[test]
    fn test_missing_file_is_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.log");
        std::fs::write(&good, LINE).unwrap();
        let missing = dir.path().join("missing.log");

        let mut out = Vec::new();
        let mut diag = Vec::new();
        let summary = run(
            options(vec![missing.clone(), good]),
            &RunEnv::default(),
            &b""[..],
            &mut out,
            &mut diag,
        )
        .unwrap();

        let diag = String::from_utf8(diag).unwrap();
        assert!(diag.starts_with(&format!("Cannot open '{}'", missing.display())));
        assert!(diag.ends_with("finished\n"));
        assert_eq!(String::from_utf8(out).unwrap(), "INFO    hello\n");
        assert_eq!(summary.sources_failed, 1);
        assert_eq!(summary.sources_read, 1);
    }

    #[test]
    fn test_terminal_stdin_falls_back_to_vespa_home() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs").join("vespa");
        std::fs::create_dir_all(&log_dir).unwrap();
        std::fs::write(log_dir.join("vespa.log"), LINE).unwrap();

        let env = RunEnv {
            stdin_is_terminal: true,
            vespa_home: Some(dir.path().display().to_string()),
        };
        let mut out = Vec::new();
        let mut diag = Vec::new();
        run(options(Vec::new()), &env, &b""[..], &mut out, &mut diag).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "INFO    hello\n");
    }
}
