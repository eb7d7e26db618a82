// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity list and detail routes.

use crate::error::{AppError, Result};
use crate::models::{Activity, Lap};
use crate::services::share::share_url;
use crate::services::TimerDisplay;
use crate::time_utils::format_millis;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Activity routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/activities",
            get(list_activities).post(create_activity),
        )
        .route(
            "/api/activities/{id}",
            get(get_activity)
                .put(update_activity)
                .delete(delete_activity),
        )
}

// ─── List ────────────────────────────────────────────────────

#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitySummary {
    pub id: String,
    pub title: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub created_at: i64,
    pub started: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub lap_count: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_ms: i64,
    pub total: String,
    /// Fastest lap, formatted
    pub best_lap: Option<String>,
}

impl From<&Activity> for ActivitySummary {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.clone(),
            title: activity.title.clone(),
            created_at: activity.created_at,
            started: activity.is_started(),
            lap_count: activity.lap_count(),
            total_ms: activity.total_ms(),
            total: format_millis(activity.total_ms()),
            best_lap: activity.best_lap().map(|lap| format_millis(lap.duration_ms)),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivitySummary>,
    pub total: u32,
}

/// List activities, newest first.
async fn list_activities(State(state): State<Arc<AppState>>) -> Json<ActivitiesResponse> {
    let activities: Vec<ActivitySummary> = state
        .store
        .list_recent()
        .iter()
        .map(ActivitySummary::from)
        .collect();

    tracing::debug!(count = activities.len(), "Listing activities");

    Json(ActivitiesResponse {
        total: activities.len() as u32,
        activities,
    })
}

/// Create a new, not-yet-started activity.
async fn create_activity(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Activity>)> {
    let activity = state.store.create()?;
    Ok((StatusCode::CREATED, Json(activity)))
}

// ─── Detail ──────────────────────────────────────────────────

#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LapView {
    #[serde(flatten)]
    pub lap: Lap,
    pub formatted: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityDetailResponse {
    pub activity: Activity,
    pub laps: Vec<LapView>,
    pub timer: TimerDisplay,
    pub share_url: String,
}

fn detail(state: &AppState, activity: Activity, timer: TimerDisplay) -> ActivityDetailResponse {
    let laps = activity
        .laps()
        .into_iter()
        .map(|lap| LapView {
            formatted: format_millis(lap.duration_ms),
            lap,
        })
        .collect();

    ActivityDetailResponse {
        share_url: share_url(&state.config.frontend_url, &activity),
        laps,
        timer,
        activity,
    }
}

/// Get one activity with its laps and timer state.
async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActivityDetailResponse>> {
    let activity = state.store.get(&id)?;
    let timer = state.timers.display(&id)?;
    Ok(Json(detail(&state, activity, timer)))
}

#[derive(Deserialize, Validate)]
struct UpdateActivityRequest {
    #[validate(length(max = 200))]
    title: String,
}

/// Edit an activity's title.
async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateActivityRequest>,
) -> Result<Json<ActivityDetailResponse>> {
    body.validate()
        .map_err(|e| AppError::BadRequest(format!("Invalid title: {}", e)))?;

    let activity = state.timers.rename(&id, body.title.trim())?;
    let timer = state.timers.display(&id)?;
    Ok(Json(detail(&state, activity, timer)))
}

#[derive(Deserialize)]
struct DeleteQuery {
    /// Deletion must be confirmed explicitly
    #[serde(default)]
    confirm: bool,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteActivityResponse {
    pub success: bool,
    pub id: String,
}

/// Delete an activity. Requires `?confirm=true`.
async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<DeleteQuery>,
) -> Result<Json<DeleteActivityResponse>> {
    if !params.confirm {
        return Err(AppError::BadRequest(
            "Deleting an activity requires confirm=true".to_string(),
        ));
    }

    let removed = state.store.destroy(&id)?;
    state.timers.forget(&removed.id);

    Ok(Json(DeleteActivityResponse {
        success: true,
        id: removed.id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_activity() {
        let activity = Activity {
            id: "a".to_string(),
            created_at: 10,
            title: "Track".to_string(),
            splits: vec![0, 65_400, 128_000],
        };

        let summary = ActivitySummary::from(&activity);
        assert!(summary.started);
        assert_eq!(summary.lap_count, 2);
        assert_eq!(summary.total, "128.0");
        assert_eq!(summary.best_lap.as_deref(), Some("62.6"));
    }

    #[test]
    fn test_title_length_validated() {
        let ok = UpdateActivityRequest {
            title: "a".repeat(200),
        };
        assert!(ok.validate().is_ok());

        let too_long = UpdateActivityRequest {
            title: "a".repeat(201),
        };
        assert!(too_long.validate().is_err());
    }
}
