// vespa-logfmt - app/options.rs
//
// Assembly of the run options from config.toml and command-line values.
//
// Toggle lists are applied in order: config file first, then each
// command-line occurrence. The first list applied to a set decides whether
// the defaults are replaced or amended.

use crate::core::filter::RecordFilter;
use crate::core::model::{RenderOptions, TimeZoneMode};
use crate::core::toggle::ToggleState;
use crate::platform::config::AppConfig;
use crate::util::error::{ConfigError, LogfmtError};
use std::path::PathBuf;

/// Option values as given on the command line, before validation.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    /// `--level` lists, in the order given.
    pub levels: Vec<String>,
    /// `--show` lists, in the order given.
    pub show: Vec<String>,
    pub host: Option<String>,
    pub pid: Option<String>,
    pub service: Option<String>,
    pub internal_only: bool,
    pub component_regex: Option<String>,
    pub message_regex: Option<String>,
    pub follow: bool,
    pub nldequote: bool,
    pub truncate_service: bool,
    pub truncate_component: bool,
    pub utc: bool,
    pub files: Vec<PathBuf>,
}

/// Validated options for one run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Shown severity levels. Extended at run time with unknown levels.
    pub levels: ToggleState,
    /// Shown columns and time modes.
    pub fields: ToggleState,
    pub filter: RecordFilter,
    pub render: RenderOptions,
    /// Keep reading files as they grow.
    pub follow: bool,
    /// Explicit input files; empty means stdin or the default log.
    pub files: Vec<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            levels: ToggleState::levels(),
            fields: ToggleState::show_fields(),
            filter: RecordFilter::default(),
            render: RenderOptions::default(),
            follow: false,
            files: Vec::new(),
        }
    }
}

impl Options {
    /// Validate and combine config and command-line values.
    ///
    /// Fails on the first invalid toggle key or regex; nothing should be
    /// processed with partially applied options.
    pub fn build(cli: &CliOptions, config: &AppConfig) -> Result<Self, LogfmtError> {
        let mut options = Self::default();

        for list in config.levels.iter().chain(cli.levels.iter()) {
            options.levels.set(list)?;
        }
        for list in config.show.iter().chain(cli.show.iter()) {
            options.fields.set(list)?;
        }

        options.filter.host = cli.host.clone();
        options.filter.pid = cli.pid.clone();
        options.filter.service = cli.service.clone();
        options.filter.internal_only = cli.internal_only;
        if let Some(ref pattern) = cli.component_regex {
            options.filter.set_component_regex(pattern)?;
        }
        if let Some(ref pattern) = cli.message_regex {
            options.filter.set_message_regex(pattern)?;
        }

        options.render = RenderOptions {
            truncate_service: cli.truncate_service || config.truncate_service,
            truncate_component: cli.truncate_component || config.truncate_component,
            dequote_newlines: cli.nldequote || config.nldequote,
            timezone: if cli.utc {
                TimeZoneMode::Utc
            } else {
                config.timezone
            },
        };
        // A followed file never ends, so any file after it would never be read.
        if cli.follow && cli.files.len() > 1 {
            return Err(ConfigError::Conflict {
                detail: format!(
                    "--follow takes at most one file, got {}",
                    cli.files.len()
                ),
            }
            .into());
        }
        options.follow = cli.follow;
        options.files = cli.files.clone();

        tracing::debug!(levels = %options.levels, fields = %options.fields, "Options built");
        Ok(options)
    }
}
