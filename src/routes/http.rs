//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each generation endpoint returns the batch as a bare JSON list.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::logic::{generate_assessment_items, generate_grading_batch, generate_practice_items};
use crate::protocol::{GenerateIn, HealthOut};
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body), fields(seed = %body.seed))]
pub async fn http_post_assessment(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateIn>,
) -> impl IntoResponse {
  let items = generate_assessment_items(&state, body).await;
  info!(target: "generator", produced = items.len(), "HTTP assessment batch served");
  Json(items)
}

#[instrument(level = "info", skip(state, body), fields(seed = %body.seed))]
pub async fn http_post_practice(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateIn>,
) -> impl IntoResponse {
  let items = generate_practice_items(&state, body).await;
  info!(target: "generator", produced = items.len(), "HTTP practice batch served");
  Json(items)
}

#[instrument(level = "info", skip(state, body), fields(seed = %body.seed))]
pub async fn http_post_grading(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateIn>,
) -> impl IntoResponse {
  let rows = generate_grading_batch(&state, body).await;
  info!(target: "generator", rows = rows.len(), "HTTP grading batch served");
  Json(rows)
}
