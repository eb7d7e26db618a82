// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Style catalog route.

use crate::models::StyleEntry;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/styles", get(get_styles))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StylesResponse {
    pub styles: Vec<StyleEntry>,
    pub total: u32,
    pub supported: u32,
    pub missing: u32,
}

/// Catalog properties with their fixtures, present fixtures first.
async fn get_styles(State(state): State<Arc<AppState>>) -> Json<StylesResponse> {
    let styles = state.catalog.entries().to_vec();
    let supported = styles.iter().filter(|s| s.supported).count() as u32;
    let missing = styles.iter().filter(|s| s.style.is_none()).count() as u32;

    Json(StylesResponse {
        total: styles.len() as u32,
        styles,
        supported,
        missing,
    })
}
