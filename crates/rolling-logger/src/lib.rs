//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes to stdout and to a
//! date-rolled log file (`<app>.<YYYY-MM-DD>.log`). Only the newest
//! [`DEFAULT_RETENTION`] files are kept. `log` records are forwarded
//! into `tracing`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Number of daily files kept on disk.
pub const DEFAULT_RETENTION: usize = 7;

#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    Init(String),
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "log file error: {}", e),
            LoggerError::Init(msg) => write!(f, "subscriber init failed: {}", msg),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

// ========================
// Rolling file writer
// ========================

struct Inner {
    dir: PathBuf,
    prefix: String,
    retention: usize,
    current_date: NaiveDate,
    file: File,
}

/// A file writer that switches to a new file when the local date changes.
#[derive(Clone)]
pub struct RollingFileWriter {
    inner: Arc<Mutex<Inner>>,
}

impl RollingFileWriter {
    pub fn new(dir: impl Into<PathBuf>, prefix: &str, retention: usize) -> Result<Self, LoggerError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let today = Local::now().date_naive();
        let file = open_for(&dir, prefix, today)?;
        prune(&dir, prefix, retention)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                dir,
                prefix: prefix.to_string(),
                retention,
                current_date: today,
                file,
            })),
        })
    }

    /// Path of the file that receives writes for `date`.
    pub fn path_for(dir: &Path, prefix: &str, date: NaiveDate) -> PathBuf {
        dir.join(format!("{}.{}.log", prefix, date.format("%Y-%m-%d")))
    }

    fn write_at(&self, date: NaiveDate, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        if date != inner.current_date {
            inner.file = open_for(&inner.dir, &inner.prefix, date)?;
            inner.current_date = date;
            // Pruning failures must not drop the record being written
            let _ = prune(&inner.dir, &inner.prefix, inner.retention);
        }
        inner.file.write(buf)
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_at(Local::now().date_naive(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        inner.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingFileWriter {
    type Writer = RollingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn open_for(dir: &Path, prefix: &str, date: NaiveDate) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(RollingFileWriter::path_for(dir, prefix, date))
}

/// Delete the oldest `<prefix>.*.log` files beyond `retention`.
fn prune(dir: &Path, prefix: &str, retention: usize) -> io::Result<()> {
    let head = format!("{}.", prefix);
    let mut logs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&head) && n.ends_with(".log"))
                .unwrap_or(false)
        })
        .collect();

    if logs.len() <= retention {
        return Ok(());
    }

    // Date stamps are zero padded, so names sort chronologically
    logs.sort();
    let excess = logs.len() - retention;
    for path in logs.into_iter().take(excess) {
        fs::remove_file(path)?;
    }
    Ok(())
}

// ========================
// Subscriber setup
// ========================

/// Install the global subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_logger(log_dir: impl Into<PathBuf>, app_name: &str) -> Result<(), LoggerError> {
    let writer = RollingFileWriter::new(log_dir, app_name, DEFAULT_RETENTION)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()
        .map_err(|e| LoggerError::Init(e.to_string()))?;

    log::info!("logger ready for {}", app_name);
    Ok(())
}
