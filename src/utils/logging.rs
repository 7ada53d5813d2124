//! Tracing subscriber setup
//!
//! The session screen owns the terminal, so log output goes to a file.

use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to `log_file` or stderr if it cannot be opened
pub fn init_tracing(log_file: &Path, level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("splitwatch={}", level)));

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        let _ = std::fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            tracing::warn!("Cannot open log file {}: {}", log_file.display(), e);
        }
    }
}
