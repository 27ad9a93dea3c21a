//! YAML documents of named records.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use og1_model::RecordSet;

/// Read a `name -> record` document. An empty document is an empty set.
pub fn read_records(path: &Path) -> Result<RecordSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read draft records from {}", path.display()))?;
    if text.trim().is_empty() {
        return Ok(RecordSet::new());
    }
    let records: Option<RecordSet> = serde_yaml::from_str(&text)
        .with_context(|| format!("parse draft records in {}", path.display()))?;
    Ok(records.unwrap_or_default())
}

/// Write a `name -> record` document, creating parent directories.
pub fn write_records(path: &Path, records: &RecordSet) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let text = serde_yaml::to_string(records).context("serialize validated records")?;
    fs::write(path, text).with_context(|| format!("write validated records to {}", path.display()))
}
