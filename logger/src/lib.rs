//! Line logger for the rendering core.
//!
//! Everything is behind the `logger` feature: without it [`log`] compiles to a
//! no-op, so diagnostic calls can stay in per-scanline code paths without
//! costing anything in release builds of the core.

#[cfg(feature = "logger")]
use chrono::Utc;
#[cfg(feature = "logger")]
use once_cell::sync::OnceCell;
#[cfg(feature = "logger")]
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    sync::Mutex,
    time::Instant,
};

#[cfg(feature = "logger")]
static LOGGER: OnceCell<Logger> = OnceCell::new();

/// `LogKind` represents the kind of logging: `stdout` or `logfile`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum LogKind {
    /// It logs to console, the default choice.
    STDOUT,

    /// It logs on a file in /tmp/satsuma-<timestamp>.log
    FILE,
}

#[cfg(feature = "logger")]
struct Logger {
    sink: Mutex<Box<dyn Write + Send>>,
    start_instant: Instant,
}

#[cfg(feature = "logger")]
impl Logger {
    fn new(kind: LogKind) -> Self {
        let sink: Box<dyn Write + Send> = match kind {
            LogKind::STDOUT => Box::new(io::stdout()),
            LogKind::FILE => {
                let filename = format!("satsuma-{}.log", Utc::now().timestamp());
                let path = std::env::temp_dir().join(filename);
                println!("Logging to file: {path:?}");
                // BufWriter batches the per-line writes.
                Box::new(BufWriter::new(File::create(path).unwrap()))
            }
        };

        Self {
            sink: Mutex::new(sink),
            start_instant: Instant::now(),
        }
    }

    fn log<T>(&self, data: T)
    where
        T: std::fmt::Display,
    {
        let now = self.start_instant.elapsed();
        let seconds = now.as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds / 60) % 60;
        let seconds = seconds % 60;
        let milliseconds = now.subsec_millis();

        if let Ok(ref mut sink) = self.sink.lock() {
            writeln!(
                sink,
                "[{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}] {data}"
            )
            .unwrap();
        }
    }

    fn flush(&self) {
        if let Ok(ref mut sink) = self.sink.lock() {
            sink.flush().ok();
        }
    }
}

#[cfg(feature = "logger")]
pub fn init_logger(kind: LogKind) {
    LOGGER.set(Logger::new(kind)).ok();
}

pub fn log<T>(data: T)
where
    T: std::fmt::Display,
{
    let _ = data;
    #[cfg(feature = "logger")]
    if let Some(logger) = LOGGER.get() {
        logger.log(data);
    }
}

/// Flushes any buffered log lines to the sink. Useful before an expected
/// abort, or when tailing the file sink while a render loop is running.
pub fn flush() {
    #[cfg(feature = "logger")]
    if let Some(logger) = LOGGER.get() {
        logger.flush();
    }
}
