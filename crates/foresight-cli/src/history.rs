//! Snapshot history directory reader
//!
//! Turns a directory of `*.json` files into raw snapshot records for the
//! engine. Validation is left to the engine's loader; this module only
//! deals with files that cannot be read or parsed as JSON at all.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use foresight_core::SnapshotRecord;
use serde_json::Value;
use tracing::{debug, warn};

/// A history file that contributed no records
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Records read from a history directory
#[derive(Debug, Default)]
pub struct History {
    pub records: Vec<SnapshotRecord>,
    pub skipped: Vec<SkippedFile>,
    pub files_read: usize,
}

/// Read every `*.json` file in `dir`, in file name order
pub fn read_history(dir: &Path) -> Result<History> {
    if !dir.is_dir() {
        bail!("History directory not found: {}", dir.display());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut history = History::default();
    for path in paths {
        match read_file(&path) {
            Ok(records) => {
                debug!(file = %path.display(), count = records.len(), "Read history file");
                history.files_read += 1;
                history.records.extend(records);
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!(file = %path.display(), reason = %reason, "Skipping history file");
                history.skipped.push(SkippedFile { path, reason });
            }
        }
    }

    Ok(history)
}

fn read_file(path: &Path) -> Result<Vec<SnapshotRecord>> {
    let content = fs::read_to_string(path).context("unreadable")?;
    let value: Value = serde_json::from_str(&content).context("invalid JSON")?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let records = match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| SnapshotRecord::new(item).with_source(format!("{}[{}]", name, i)))
            .collect(),
        other => vec![SnapshotRecord::new(other).with_source(name)],
    };
    Ok(records)
}
