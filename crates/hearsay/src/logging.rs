//! Tracing initialization
//!
//! Logs go to stdout by default; setting `HEARSAY_LOG_FILE` redirects them to
//! an append-mode file (no ANSI) so batch runs keep a persistent log.

use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(file) = log_file() {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter()).init();
    }
}

fn log_file() -> Option<std::fs::File> {
    let raw = std::env::var("HEARSAY_LOG_FILE").ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let path = std::path::Path::new(raw);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok()?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()
}
