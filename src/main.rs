// vespa-logfmt - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Running the formatter over the selected inputs

use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use vespa_logfmt::app::options::{CliOptions, Options};
use vespa_logfmt::app::run::{run, RunEnv};
use vespa_logfmt::platform::config::{load_config, PlatformPaths};
use vespa_logfmt::util::{self, constants, error::LogfmtError};

/// Convert vespa.log to a human-readable format.
///
/// Reads records in Vespa's internal tab-separated log format from the
/// given files (or standard input) and prints the selected ones.
#[derive(Parser, Debug)]
#[command(name = "vespa-logfmt", version, about)]
struct Cli {
    /// Log files to read (standard input or $VESPA_HOME/logs/vespa/vespa.log if omitted).
    files: Vec<PathBuf>,

    /// Turn levels on/off, e.g. "all,-spam" or "+debug" (repeatable).
    #[arg(short = 'l', long = "level", allow_hyphen_values = true)]
    level: Vec<String>,

    /// Turn shown fields on/off, e.g. "+host,-component" (repeatable).
    #[arg(short = 's', long = "show", allow_hyphen_values = true)]
    show: Vec<String>,

    /// Select only one host.
    #[arg(short = 'H', long = "host")]
    host: Option<String>,

    /// Select only one process ID.
    #[arg(short = 'p', long = "pid")]
    pid: Option<String>,

    /// Select only one service.
    #[arg(short = 'S', long = "service")]
    service: Option<String>,

    /// Select only internal components.
    #[arg(short = 'i', long = "internal")]
    internal: bool,

    /// Select components by regexp (accepted, not applied).
    #[arg(short = 'c', long = "component")]
    component: Option<String>,

    /// Select messages by regexp (accepted, not applied).
    #[arg(short = 'm', long = "message")]
    message: Option<String>,

    /// Keep reading the file as it grows (at most one file).
    #[arg(short = 'f', long = "follow")]
    follow: bool,

    /// Dequote newlines embedded in messages.
    #[arg(short = 'N', long = "nldequote")]
    nldequote: bool,

    /// Truncate service names.
    #[arg(long = "truncateservice")]
    truncate_service: bool,

    /// Truncate component names.
    #[arg(short = 't', long = "truncatecomponent")]
    truncate_component: bool,

    /// Render formatted timestamps in UTC instead of local time.
    #[arg(long = "utc")]
    utc: bool,

    /// Config file to use instead of the platform default.
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    fn to_options(&self) -> CliOptions {
        CliOptions {
            levels: self.level.clone(),
            show: self.show.clone(),
            host: self.host.clone(),
            pid: self.pid.clone(),
            service: self.service.clone(),
            internal_only: self.internal,
            component_regex: self.component.clone(),
            message_regex: self.message.clone(),
            follow: self.follow,
            nldequote: self.nldequote,
            truncate_service: self.truncate_service,
            truncate_component: self.truncate_component,
            utc: self.utc,
            files: self.files.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (config, config_warnings) = load_config(&config_path);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::debug!(
        version = constants::APP_VERSION,
        config = %config_path.display(),
        "vespa-logfmt starting"
    );
    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Config problem; using defaults");
    }

    let options = match Options::build(&cli.to_options(), &config) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env = RunEnv {
        stdin_is_terminal: io::stdin().is_terminal(),
        vespa_home: std::env::var(constants::VESPA_HOME_ENV).ok(),
    };

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    match run(options, &env, stdin, &mut stdout, &mut stderr) {
        Ok(_) => ExitCode::SUCCESS,
        // The reader went away (e.g. piped into `head`); nothing left to do.
        Err(LogfmtError::Output { ref source }) if source.kind() == io::ErrorKind::BrokenPipe => {
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
