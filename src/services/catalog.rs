// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Style-spec property catalog and fixture pairing.

use crate::models::{PropertyKind, StyleEntry, StyleProperty};
use crate::services::manifest::{scan_fixtures, ManifestError};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog of style properties and their comparison fixtures.
#[derive(Default, Clone)]
pub struct StyleCatalog {
    properties: Vec<StyleProperty>,
    entries: Vec<StyleEntry>,
}

impl StyleCatalog {
    /// Load the style-spec reference and pair it with fixtures in `styles_dir`.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        reference_path: P,
        styles_dir: Q,
    ) -> Result<Self, CatalogError> {
        let reference = read_json(reference_path.as_ref())?;
        let properties = extract_properties(&reference);
        let entries = pair_fixtures(&properties, styles_dir.as_ref())?;

        let present = entries.iter().filter(|e| e.style.is_some()).count();
        tracing::info!(
            properties = properties.len(),
            fixtures = present,
            "Style catalog loaded"
        );

        Ok(Self {
            properties,
            entries,
        })
    }

    pub fn properties(&self) -> &[StyleProperty] {
        &self.properties
    }

    pub fn entries(&self) -> &[StyleEntry] {
        &self.entries
    }
}

fn read_json(path: &Path) -> Result<Value, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|e| CatalogError::Io(path.to_path_buf(), e))?;
    serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(path.to_path_buf(), e))
}

/// Collect every property under the reference's `layout_*` and `paint_*`
/// sections, deduplicated by `<type>-<id>` and sorted by id.
///
/// Sections are visited in key order, so a bare `layout_` section is
/// included like any other.
pub fn extract_properties(reference: &Value) -> Vec<StyleProperty> {
    let Some(sections) = reference.as_object() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut properties = Vec::new();

    for (section, body) in sections {
        let Some((prefix, _)) = section.split_once('_') else {
            continue;
        };
        let Some(kind) = PropertyKind::from_prefix(prefix) else {
            continue;
        };
        let Some(body) = body.as_object() else {
            continue;
        };

        for id in body.keys() {
            let property = StyleProperty {
                kind,
                id: id.clone(),
            };
            if seen.insert(property.key()) {
                properties.push(property);
            }
        }
    }

    // Stable: equal ids keep the order of their sections by name
    properties.sort_by(|a, b| a.id.cmp(&b.id));
    properties
}

/// Pair each property with `<styles_dir>/<id>.json`. Present fixtures sort
/// first, each group by id. Disabled (`_`-prefixed) fixtures count as missing.
pub fn pair_fixtures(
    properties: &[StyleProperty],
    styles_dir: &Path,
) -> Result<Vec<StyleEntry>, CatalogError> {
    let fixtures: HashMap<String, PathBuf> = scan_fixtures(styles_dir)?
        .into_iter()
        .filter(|entry| !entry.disabled)
        .map(|entry| (entry.name, entry.filepath))
        .collect();

    let mut entries = Vec::with_capacity(properties.len());
    for property in properties {
        let path = styles_dir.join(format!("{}.json", property.id));
        let style = match fixtures.get(&property.id) {
            Some(fixture) => Some(read_json(fixture)?),
            None => None,
        };
        let supported = style
            .as_ref()
            .and_then(|s| s.pointer("/metadata/ol/supported"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        entries.push(StyleEntry {
            id: property.id.clone(),
            kind: property.kind,
            path: path.to_string_lossy().into_owned(),
            style,
            supported,
        });
    }

    entries.sort_by(|a, b| {
        a.style
            .is_none()
            .cmp(&b.style.is_none())
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(entries)
}

/// Errors from catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error(transparent)]
    Fixtures(#[from] ManifestError),
}
