// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Style fixture and style-spec property models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One fixture file listed in the style index manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// File name without a leading `_` and without `.json`
    pub name: String,
    /// Fixtures prefixed with `_` are disabled
    pub disabled: bool,
    /// Path of the fixture file
    pub filepath: PathBuf,
}

/// Which half of the style spec a property belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum PropertyKind {
    Layout,
    Paint,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Layout => "layout",
            PropertyKind::Paint => "paint",
        }
    }

    /// Parse the reference section prefix (`layout` / `paint`).
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "layout" => Some(PropertyKind::Layout),
            "paint" => Some(PropertyKind::Paint),
            _ => None,
        }
    }
}

/// A style-spec property (e.g. `paint` / `fill-color`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StyleProperty {
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub id: String,
}

impl StyleProperty {
    /// Deduplication key: `<type>-<id>`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.kind.as_str(), self.id)
    }
}

/// A catalog property paired with its fixture, if one exists.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StyleEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    /// Fixture path, e.g. `styles/fill-color.json`
    pub path: String,
    /// Fixture document; `None` when missing or disabled
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub style: Option<serde_json::Value>,
    /// `metadata.ol.supported` from the fixture
    pub supported: bool,
}
