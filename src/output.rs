//! JSON output to stdout or a file.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Serializes `value` as pretty JSON and writes it to `path`, or to stdout
/// when no path is given.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    match path {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write to stdout")?;
        }
    }
    Ok(())
}
