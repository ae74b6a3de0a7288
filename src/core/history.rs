use crate::core::conversion::ConversionRecord;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::{fs, path::Path};
use tracing::debug;

const INDENT: &[u8] = b"    ";

/// Writes the whole history as a pretty-printed JSON array, replacing the file.
pub fn save_history<P: AsRef<Path>>(records: &[ConversionRecord], path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    records
        .serialize(&mut serializer)
        .context("Failed to serialize conversion history")?;

    fs::write(path, buf)
        .with_context(|| format!("Failed to write history file: {}", path.display()))?;
    debug!(count = records.len(), path = %path.display(), "Saved conversion history");
    Ok(())
}

/// Reads a saved history back. A missing file is an empty history.
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<Vec<ConversionRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "No history file found");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;
    let records: Vec<ConversionRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse history file: {}", path.display()))?;
    debug!(count = records.len(), "Loaded conversion history");
    Ok(records)
}
