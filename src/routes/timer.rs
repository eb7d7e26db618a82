// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Split timer transitions and the live redraw stream.

use crate::error::Result;
use crate::models::Activity;
use crate::services::TimerDisplay;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures_util::Stream;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Timer routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities/{id}/start", post(start))
        .route("/api/activities/{id}/undo", post(undo))
        .route("/api/activities/{id}/stop", post(stop))
        .route("/api/activities/{id}/cancel", post(cancel))
        .route("/api/activities/{id}/finish", post(finish))
        .route("/api/activities/{id}/live", get(live))
}

/// Begin timing or record a lap split.
async fn start(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TimerDisplay>> {
    Ok(Json(state.timers.start(&id)?))
}

/// Remove the most recent split.
async fn undo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TimerDisplay>> {
    Ok(Json(state.timers.undo(&id)?))
}

/// Open the end-of-effort summary.
async fn stop(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TimerDisplay>> {
    Ok(Json(state.timers.stop(&id)?))
}

/// Dismiss the summary.
async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TimerDisplay>> {
    Ok(Json(state.timers.cancel(&id)?))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FinishResponse {
    /// False when the activity was not in review (nothing ended)
    pub ended: bool,
    pub activity: Activity,
    /// Where the client navigates next
    pub redirect: String,
}

/// Leave the summary and go back to the results list.
async fn finish(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FinishResponse>> {
    let (activity, ended) = state.timers.finish(&id)?;
    Ok(Json(FinishResponse {
        ended,
        activity,
        redirect: "/".to_string(),
    }))
}

/// Stream display snapshots at the configured redraw rate.
///
/// The stream ends when the activity disappears from the store.
async fn live(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    // Unknown ids are a 404, not an empty stream
    state.timers.display(&id)?;

    let period = Duration::from_millis(1000 / u64::from(state.config.redraw_hz.max(1)));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::debug!(id = %id, hz = state.config.redraw_hz, "Live timer stream opened");

    let stream = futures_util::stream::unfold(
        (state, id, interval),
        |(state, id, mut interval)| async move {
            interval.tick().await;
            let display = match state.timers.display(&id) {
                Ok(display) => display,
                Err(e) => {
                    tracing::debug!(id = %id, error = %e, "Live timer stream closed");
                    return None;
                }
            };
            let event = Event::default()
                .event("tick")
                .json_data(&display)
                .unwrap_or_else(|_| Event::default().comment("encode failed"));
            Some((Ok::<_, Infallible>(event), (state, id, interval)))
        },
    );

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
