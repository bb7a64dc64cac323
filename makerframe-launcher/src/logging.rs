use std::fmt;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::PathBuf;

use color_eyre::Result;
use tracing::Event;
use tracing::Level;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

/// Every launch records its milestones, so the level is fixed.
pub const LOG_LEVEL: LevelFilter = LevelFilter::INFO;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[must_use]
pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One record of the launch log: a single physical line terminated by exactly
/// one newline. Interior line breaks become spaces.
#[must_use]
pub fn log_line(timestamp: &str, level: Level, message: &str) -> String {
    let message = message
        .trim_end_matches(['\r', '\n'])
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ");

    format!("{timestamp} [{level}] {message}\n")
}

/// Renders events as `YYYY-MM-DD HH:MM:SS [LEVEL] message`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogLineFormat;

impl<S, N> FormatEvent<S, N> for LogLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.field_format()
            .format_fields(Writer::new(&mut message), event)?;

        writer.write_str(&log_line(&timestamp(), *event.metadata().level(), &message))
    }
}

/// Opens the log file for every line and closes it straight after, so a crash
/// loses at most the line being written.
#[derive(Clone, Debug)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .ok(),
        )
    }
}

/// Failures to open or write are swallowed; logging never interrupts a launch.
#[derive(Debug)]
pub struct LogFileWriter(Option<File>);

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(file) = &mut self.0 {
            if file.write_all(buf).is_err() {
                self.0 = None;
            }
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = &mut self.0 {
            let _ = file.flush();
        }

        Ok(())
    }
}

pub fn subscriber(log_file: PathBuf) -> impl Subscriber + Send + Sync {
    tracing_subscriber::registry().with(LOG_LEVEL).with(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .event_format(LogLineFormat)
            .with_writer(LogFile::new(log_file)),
    )
}

pub fn init(log_file: PathBuf) -> Result<()> {
    color_eyre::install()?;
    tracing::subscriber::set_global_default(subscriber(log_file))?;

    // https://github.com/tokio-rs/tracing/blob/master/examples/examples/panic_hook.rs
    // Set a panic hook that records the panic as a `tracing` event at the
    // `ERROR` verbosity level.
    std::panic::set_hook(Box::new(|panic| {
        if let Some(location) = panic.location() {
            tracing::error!(
                message = %panic,
                panic.file = location.file(),
                panic.line = location.line(),
                panic.column = location.column(),
            );
        } else {
            tracing::error!(message = %panic);
        }
    }));

    Ok(())
}
