//! crates/logging-sink/src/factory.rs
//! Builds the writer selected by a [`LogConfig`].

use std::io::{self, Write};

use logging::{
    AnsiColours, ColourMode, ColourStreamWriter, LogConfig, LogWriter, SinkKind, StreamWriter,
};

use crate::error::SinkError;
use crate::journald::JournaldWriter;
use crate::syslog::{SyslogConfig, SyslogWriter};

/// Builds the writer described by `config` and applies its toggles.
///
/// Stream sinks write to `stream`; the caller decides which process stream
/// backs [`SinkKind::Stdout`] and [`SinkKind::Stderr`]. Other sinks ignore
/// `stream`. A colour mode other than [`ColourMode::None`] selects a
/// [`ColourStreamWriter`] with ANSI colours.
///
/// ```
/// use logging::{LogConfig, LogWriter, SinkKind};
/// use logging_sink::build_writer;
///
/// let mut config = LogConfig::for_sink(SinkKind::Stdout);
/// config.timestamp = false;
///
/// let mut out = Vec::new();
/// let mut writer = build_writer(&config, &mut out)?;
/// writer.write("ready")?;
/// drop(writer);
/// assert_eq!(out, b"ready\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn build_writer<'a, W>(
    config: &LogConfig,
    stream: W,
) -> Result<Box<dyn LogWriter + 'a>, SinkError>
where
    W: Write + 'a,
{
    let mut writer: Box<dyn LogWriter + 'a> = match config.sink {
        SinkKind::Stdout | SinkKind::Stderr => stream_writer(config.colour_mode, stream),
        SinkKind::Syslog => {
            let syslog = SyslogConfig::from_settings(&config.syslog)?;
            Box::new(SyslogWriter::open(&syslog)?)
        }
        SinkKind::Journald => Box::new(JournaldWriter::connect()?),
    };

    writer.enable_timestamp(config.timestamp);
    writer.enable_log_meta(config.log_meta);
    writer.enable_message_prepend(config.message_prepend);

    tracing::debug!(
        target: "logging_sink::factory",
        sink = %config.sink,
        colour = %config.colour_mode,
        "log writer ready"
    );
    Ok(writer)
}

/// Builds the writer described by `config`, backing stream sinks with the
/// process's standard output or standard error.
pub fn open_writer(config: &LogConfig) -> Result<Box<dyn LogWriter>, SinkError> {
    match config.sink {
        SinkKind::Stderr => build_writer(config, io::stderr()),
        _ => build_writer(config, io::stdout()),
    }
}

fn stream_writer<'a, W>(mode: ColourMode, stream: W) -> Box<dyn LogWriter + 'a>
where
    W: Write + 'a,
{
    let inner = StreamWriter::new(stream);
    match mode {
        ColourMode::None => Box::new(inner),
        mode => Box::new(ColourStreamWriter::new(inner, AnsiColours::new(mode))),
    }
}
