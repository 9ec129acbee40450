// vespa-logfmt - platform/fs.rs
//
// Input source resolution and opening.

use crate::platform::follow::FollowReader;
use crate::util::constants;
use crate::util::error::InputError;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Where a stream of log lines comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Decide which sources to read.
///
/// Explicit files are read in order. Without files, standard input is read
/// unless it is a terminal, in which case the node's own vespa.log is used.
pub fn resolve_sources(
    files: &[PathBuf],
    stdin_is_terminal: bool,
    vespa_home: Option<&str>,
) -> Vec<InputSource> {
    if !files.is_empty() {
        return files.iter().cloned().map(InputSource::File).collect();
    }
    if stdin_is_terminal {
        let path = default_log_path(vespa_home);
        tracing::debug!(path = %path.display(), "stdin is a terminal; reading default log");
        return vec![InputSource::File(path)];
    }
    vec![InputSource::Stdin]
}

/// `$VESPA_HOME/logs/vespa/vespa.log`, with an unset or empty home
/// falling back to `/opt/vespa`.
pub fn default_log_path(vespa_home: Option<&str>) -> PathBuf {
    let home = match vespa_home {
        Some(home) if !home.is_empty() => home,
        _ => constants::DEFAULT_VESPA_HOME,
    };
    Path::new(home).join(constants::DEFAULT_LOG_PATH)
}

/// Open a log file for reading, optionally following appended data.
pub fn open_file(path: &Path, follow: bool) -> Result<Box<dyn Read>, InputError> {
    let file = std::fs::File::open(path).map_err(|e| InputError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), follow, "Opened input");
    if follow {
        Ok(Box::new(FollowReader::new(path.to_path_buf(), file)))
    } else {
        Ok(Box::new(file))
    }
}
