use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing::level_filters::LevelFilter;

const LOG_FILE: &str = "typecast.log";

/// Default location of the log file, inside the platform data directory
pub fn default_log_file() -> Option<PathBuf> {
    ProjectDirs::from("com", "Typecast", "Typecast").map(|dirs| dirs.data_dir().join(LOG_FILE))
}

pub const fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Filter directive enabling `level` for the workspace crates only
pub fn filter(level: LevelFilter) -> String {
    let mut filter = vec!["off".to_owned()];
    for krate in ["typecast", "typewriter"] {
        filter.push(format!("{krate}={level}"));
    }
    filter.join(",")
}

/// Sends logs to `path`. The terminal is owned by the UI, so nothing goes to stdout/stderr.
pub fn configure_logging(verbose: u8, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let format = tracing_subscriber::fmt::format().with_target(false).compact();

    tracing_subscriber::fmt()
        .event_format(format)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_env_filter(filter(level_from_verbosity(verbose)))
        .try_init()
        .map_err(std::io::Error::other)
}
