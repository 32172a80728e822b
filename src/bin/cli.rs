use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use logging::{
    ColourMode, ConfigError, LogCategory, LogConfig, LogEvent, LogGroup, LogWriter, SinkKind,
};
use logging_sink::{SinkError, build_writer};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Name used in diagnostics and `--help`.
pub const PROGRAM_NAME: &str = "logwriter";

/// Environment variable holding the diagnostics filter.
pub const DIAGNOSTICS_ENV: &str = "LOGWRITER_LOG";

const EXIT_WRITE_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

/// Failure of one invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// Command line rejected by the parser.
    #[error("{0}")]
    Usage(#[from] clap::Error),
    /// A `--meta` argument without `=` or with an empty label.
    #[error("invalid metadata {0:?}: expected LABEL=VALUE")]
    InvalidMeta(String),
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    ConfigRead {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The configuration file is not valid JSON for [`LogConfig`].
    #[error("invalid configuration in {path}: {source}")]
    ConfigParse {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser failure.
        source: serde_json::Error,
    },
    /// The writer could not be built.
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// The event could not be written.
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

impl CliError {
    const fn exit_code(&self) -> u8 {
        match self {
            Self::Write(_) => EXIT_WRITE_FAILURE,
            _ => EXIT_USAGE,
        }
    }
}

/// Everything one invocation needs to emit its event.
#[derive(Debug)]
struct Invocation {
    config: LogConfig,
    metadata: Vec<(String, String, bool)>,
    prepend: Option<String>,
    prepend_meta_line: bool,
    event: LogEvent,
}

/// Installs the stderr diagnostics subscriber filtered by `LOGWRITER_LOG`.
///
/// Defaults to `warn`. Calling it again, or after another subscriber was
/// installed, is a no-op.
pub fn init_diagnostics() {
    let filter =
        EnvFilter::try_from_env(DIAGNOSTICS_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Parses `args`, emits one event and maps the outcome to an exit code.
///
/// `stdout` and `stderr` back the stream sinks and receive help, version and
/// error text.
#[must_use]
pub fn run_with<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let invocation = match parse_args(args) {
        Ok(invocation) => invocation,
        Err(CliError::Usage(error))
            if matches!(
                error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let _ = write!(stdout, "{}", error.render());
            return ExitCode::SUCCESS;
        }
        Err(error) => return report(stderr, &error),
    };

    match emit(&invocation, stdout, stderr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(stderr, &error),
    }
}

fn report<Err: Write>(stderr: &mut Err, error: &CliError) -> ExitCode {
    match error {
        CliError::Usage(usage) => {
            let _ = write!(stderr, "{}", usage.render());
        }
        other => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {other}");
        }
    }
    ExitCode::from(error.exit_code())
}

fn emit<Out, Err>(
    invocation: &Invocation,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<(), CliError>
where
    Out: Write,
    Err: Write,
{
    let mut writer = match invocation.config.sink {
        SinkKind::Stderr => build_writer(&invocation.config, &mut *stderr)?,
        _ => build_writer(&invocation.config, &mut *stdout)?,
    };

    for (label, value, skip) in &invocation.metadata {
        writer.add_meta(label, value, *skip);
    }
    if let Some(label) = &invocation.prepend {
        writer.prepend_meta(label, invocation.prepend_meta_line);
    }

    writer.write_event(&invocation.event).map_err(CliError::Write)?;
    tracing::debug!(
        target: "logwriter",
        sink = %invocation.config.sink,
        group = invocation.event.group_name(),
        category = invocation.event.category_name(),
        "event written"
    );
    Ok(())
}

fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Write one log event with metadata to the selected sink.")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Read writer settings from a JSON file; flags override it.")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("sink")
                .long("sink")
                .value_name("SINK")
                .help("Destination: stdout, stderr, syslog or journald.")
                .value_parser(SinkKind::from_str),
        )
        .arg(
            Arg::new("group")
                .long("group")
                .value_name("NAME")
                .help("Log group of the event.")
                .default_value("undefined")
                .value_parser(parse_group),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .value_name("NAME")
                .help("Log category of the event.")
                .default_value("info")
                .value_parser(parse_category),
        )
        .arg(
            Arg::new("meta")
                .long("meta")
                .value_name("LABEL=VALUE")
                .help("Attach a metadata entry (repeatable).")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("skip-meta")
                .long("skip-meta")
                .value_name("LABEL=VALUE")
                .help("Attach a metadata entry hidden from output (repeatable).")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("prepend")
                .long("prepend")
                .value_name("LABEL")
                .help("Prefix the message with the value of LABEL."),
        )
        .arg(
            Arg::new("prepend-meta-line")
                .long("prepend-meta-line")
                .help("Also prefix the metadata line.")
                .requires("prepend")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("session-token")
                .long("session-token")
                .value_name("TOKEN")
                .help("Session token attached to the event."),
        )
        .arg(
            Arg::new("no-timestamp")
                .long("no-timestamp")
                .help("Do not timestamp stream lines.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-meta")
                .long("no-meta")
                .help("Drop all metadata.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-message-prepend")
                .long("no-message-prepend")
                .help("Never prefix structured messages.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("colour")
                .long("colour")
                .visible_alias("color")
                .value_name("MODE")
                .help("Colour stream output: none, group or category.")
                .value_parser(ColourMode::from_str),
        )
        .arg(
            Arg::new("facility")
                .long("facility")
                .value_name("NAME")
                .help("Syslog facility."),
        )
        .arg(
            Arg::new("ident")
                .long("ident")
                .value_name("NAME")
                .help("Syslog identity."),
        )
        .arg(
            Arg::new("message")
                .value_name("MESSAGE")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append),
        )
}

fn parse_group(name: &str) -> Result<LogGroup, ConfigError> {
    LogGroup::from_name(name).ok_or_else(|| ConfigError::UnknownGroup(name.to_owned()))
}

fn parse_category(name: &str) -> Result<LogCategory, ConfigError> {
    LogCategory::from_name(name).ok_or_else(|| ConfigError::UnknownCategory(name.to_owned()))
}

fn parse_args<I>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let mut config = match matches.remove_one::<PathBuf>("config") {
        Some(path) => load_config(&path)?,
        None => LogConfig::default(),
    };
    if let Some(sink) = matches.remove_one::<SinkKind>("sink") {
        config.sink = sink;
    }
    if let Some(mode) = matches.remove_one::<ColourMode>("colour") {
        config.colour_mode = mode;
    }
    if let Some(facility) = matches.remove_one::<String>("facility") {
        config.syslog.facility = facility;
    }
    if let Some(ident) = matches.remove_one::<String>("ident") {
        config.syslog.ident = ident;
    }
    config.timestamp &= !matches.get_flag("no-timestamp");
    config.log_meta &= !matches.get_flag("no-meta");
    config.message_prepend &= !matches.get_flag("no-message-prepend");

    let metadata = ordered_metadata(&matches)?;
    let message = matches
        .remove_many::<String>("message")
        .map(|words| words.collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let group = matches
        .remove_one::<LogGroup>("group")
        .unwrap_or(LogGroup::Undefined);
    let category = matches
        .remove_one::<LogCategory>("category")
        .unwrap_or(LogCategory::Info);
    let session_token = matches.remove_one::<String>("session-token").unwrap_or_default();

    Ok(Invocation {
        config,
        metadata,
        prepend: matches.remove_one::<String>("prepend"),
        prepend_meta_line: matches.get_flag("prepend-meta-line"),
        event: LogEvent::new(group, category, message).with_session_token(session_token),
    })
}

/// Collects `--meta` and `--skip-meta` values in command line order.
fn ordered_metadata(matches: &ArgMatches) -> Result<Vec<(String, String, bool)>, CliError> {
    let mut indexed = Vec::new();
    for (id, skip) in [("meta", false), ("skip-meta", true)] {
        let (Some(values), Some(indices)) = (
            matches.get_many::<String>(id),
            matches.indices_of(id),
        ) else {
            continue;
        };
        for (value, index) in values.zip(indices) {
            let (label, value) = split_meta(value)?;
            indexed.push((index, label, value, skip));
        }
    }
    indexed.sort_by_key(|(index, ..)| *index);
    Ok(indexed
        .into_iter()
        .map(|(_, label, value, skip)| (label, value, skip))
        .collect())
}

fn split_meta(argument: &str) -> Result<(String, String), CliError> {
    match argument.split_once('=') {
        Some((label, value)) if !label.is_empty() => Ok((label.to_owned(), value.to_owned())),
        _ => Err(CliError::InvalidMeta(argument.to_owned())),
    }
}

fn load_config(path: &Path) -> Result<LogConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
