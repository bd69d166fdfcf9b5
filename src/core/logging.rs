//! Logging Module
//!
//! Sets up `tracing` with:
//! - A JSON file layer (daily rolling, non-blocking writer)
//! - An optional human-readable stdout layer
//! - `log` crate events bridged into `tracing`
//! - Background gzip compression of rotated logs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Prefix of the rolling log file; rotated files get `.YYYY-MM-DD` appended.
pub const LOG_FILE_PREFIX: &str = "themedex.log";

// ============================================================================
// Logging Initialization
// ============================================================================

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn prepare_dir(log_dir: &Path) {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }
}

fn install(level: &str, log_dir: &Path, with_stdout: bool) -> WorkerGuard {
    prepare_dir(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // File Layer: JSON format for easy parsing/ingestion
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter(level));

    // Stdout Layer: human-readable
    let stdout_layer = with_stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .pretty()
            .with_filter(env_filter(level))
    });

    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
    {
        eprintln!("Failed to initialize tracing subscriber: {}", e);
    }

    // Redirect standard `log` macros to `tracing`; a no-op when the
    // subscriber already installed the bridge.
    let _ = tracing_log::LogTracer::init();

    let compress_dir = log_dir.to_path_buf();
    std::thread::spawn(move || {
        compress_old_logs(compress_dir);
    });

    guard
}

/// Initialize logging with file and stdout output.
///
/// `level` is the fallback filter when `RUST_LOG` is unset. Returns a
/// `WorkerGuard` that must stay alive until shutdown so buffered lines
/// are flushed.
pub fn init(level: &str, log_dir: &Path) -> WorkerGuard {
    let guard = install(level, log_dir, true);
    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );
    guard
}

/// Initialize file-only logging.
///
/// Identical to [`init()`] but omits the stdout layer, for commands whose
/// stdout carries machine-readable output.
pub fn init_file_only(level: &str, log_dir: &Path) -> WorkerGuard {
    install(level, log_dir, false)
}

/// Default log directory under the platform data dir.
pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("themedex").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

// ============================================================================
// Log Compression
// ============================================================================

/// Whether a file in the log dir is a rotated log that is not today's.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{LOG_FILE_PREFIX}."))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

/// Compress rotated logs older than today.
fn compress_old_logs(log_dir: PathBuf) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(&log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }

        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let parent_dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
    let gz_path = parent_dir.join(gz_name);

    // Skip if already exists
    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());

    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;

    Ok(())
}
