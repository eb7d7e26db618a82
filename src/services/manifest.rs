// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Style fixture index manifest.

use crate::models::ManifestEntry;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix marking a fixture as disabled.
const DISABLED_PREFIX: char = '_';
const FIXTURE_EXTENSION: &str = ".json";

/// List the JSON fixtures directly inside `dir`, sorted by file name.
pub fn scan_fixtures<P: AsRef<Path>>(dir: P) -> Result<Vec<ManifestEntry>, ManifestError> {
    let dir = dir.as_ref();
    let read_dir = fs::read_dir(dir).map_err(|e| ManifestError::Io(dir.to_path_buf(), e))?;

    let mut file_names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| ManifestError::Io(dir.to_path_buf(), e))?;
        let is_file = entry
            .file_type()
            .map_err(|e| ManifestError::Io(entry.path(), e))?
            .is_file();
        let Ok(file_name) = entry.file_name().into_string() else {
            tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 fixture name");
            continue;
        };
        if is_file && file_name.ends_with(FIXTURE_EXTENSION) {
            file_names.push(file_name);
        }
    }
    file_names.sort();

    Ok(file_names
        .into_iter()
        .map(|file_name| manifest_entry(dir, &file_name))
        .collect())
}

fn manifest_entry(dir: &Path, file_name: &str) -> ManifestEntry {
    let stem = file_name
        .strip_suffix(FIXTURE_EXTENSION)
        .unwrap_or(file_name);
    let name = stem.strip_prefix(DISABLED_PREFIX).unwrap_or(stem);

    ManifestEntry {
        name: name.to_string(),
        disabled: file_name.starts_with(DISABLED_PREFIX),
        filepath: dir.join(file_name),
    }
}

/// Where the manifest for `dir` goes by default: `index.json` beside it.
pub fn default_output_path(dir: &Path) -> PathBuf {
    dir.parent()
        .unwrap_or_else(|| Path::new("."))
        .join("index.json")
}

/// Write the manifest as pretty-printed JSON.
pub fn write_manifest(entries: &[ManifestEntry], out: &Path) -> Result<(), ManifestError> {
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(out, json).map_err(|e| ManifestError::Io(out.to_path_buf(), e))
}

/// Scan `dir` and write its manifest to `out`. Returns the entries written.
pub fn build_manifest(dir: &Path, out: &Path) -> Result<Vec<ManifestEntry>, ManifestError> {
    let entries = scan_fixtures(dir)?;
    write_manifest(&entries, out)?;
    tracing::info!(
        dir = %dir.display(),
        out = %out.display(),
        count = entries.len(),
        "Manifest written"
    );
    Ok(entries)
}

/// Errors from manifest operations.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("I/O error on {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode manifest: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_entry_names() {
        let dir = Path::new("styles");

        let entry = manifest_entry(dir, "fill-color.json");
        assert_eq!(entry.name, "fill-color");
        assert!(!entry.disabled);
        assert_eq!(entry.filepath, PathBuf::from("styles/fill-color.json"));

        let entry = manifest_entry(dir, "_line-gradient.json");
        assert_eq!(entry.name, "line-gradient");
        assert!(entry.disabled);
    }

    #[test]
    fn test_default_output_path_is_beside_dir() {
        assert_eq!(
            default_output_path(Path::new("site/styles")),
            PathBuf::from("site/index.json")
        );
    }
}
