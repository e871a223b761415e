//! Tracing setup. Logs go to a file because the terminal belongs to the UI.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install a file-backed `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `default_directive`. Calling this more
/// than once keeps the first subscriber.
pub fn init_file_logging(path: &Path, default_directive: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    if let Err(error) = installed {
        tracing::debug!(path = %path.display(), %error, "global subscriber already set, keeping it");
    }

    Ok(())
}
