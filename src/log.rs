// src/log.rs
//
// File logging under `.store/`, elapsed-time stamps, filter from `LOTO_LOG`.
// Console output for humans goes through `progress::Progress`, not here.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt::time::Uptime, EnvFilter};

use crate::config::consts::{LOG_FILE, STORE_DIR};

pub const FILTER_ENV: &str = "LOTO_LOG";

pub fn default_path() -> PathBuf {
    Path::new(STORE_DIR).join(LOG_FILE)
}

/// Install the global subscriber. Falls back to stderr when the log file
/// cannot be opened. Calling it twice is harmless (second install is ignored).
pub fn init(path: &Path) {
    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file = path
        .parent()
        .map_or(Ok(()), |dir| if dir.as_os_str().is_empty() { Ok(()) } else { fs::create_dir_all(dir) })
        .and_then(|_| OpenOptions::new().create(true).append(true).open(path));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(Uptime::default())
        .with_target(false);

    let installed = match file {
        Ok(f) => builder.with_ansi(false).with_writer(Mutex::new(f)).try_init(),
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {e}", path.display());
            builder.with_writer(std::io::stderr).try_init()
        }
    };
    // Already installed (tests, repeated init): keep the first one.
    let _ = installed;
}
