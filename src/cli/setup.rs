use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example configuration to the default location.
pub fn setup() -> Result<String> {
    setup_at_path(AppConfig::default_config_path()?)
}

/// Writes the example configuration to `path`, never replacing an existing
/// file. Returns the message shown to the user.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            anyhow::bail!("Configuration file already exists at {}", path.display())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create {}", path.display()));
        }
    };
    file.write_all(EXAMPLE_CONFIG.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "Wrote example configuration");
    Ok(format!(
        "Created {}\nEdit it to change the currency, storage backend or login delay.",
        path.display()
    ))
}
