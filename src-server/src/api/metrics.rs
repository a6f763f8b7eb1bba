//! Metric endpoints

use axum::extract::{Path, State};
use axum::response::Json;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::domain::{metric_key, Metric, MetricRecord};
use crate::error::ApiResult;
use crate::repository::Repository;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MetricRecorded {
    pub recorded: bool,
    pub metric_id: u32,
    pub value: f64,
    pub timestamp: Option<String>,
}

/// Metrics keyed by their camelCased name.
pub async fn list(State(state): State<AppState>, _user: AuthenticatedUser) -> ApiResult<Json<BTreeMap<String, Metric>>> {
    let metrics = state.repos.metrics.list().await?;
    Ok(Json(metrics.into_iter().map(|m| (metric_key(&m), m)).collect()))
}

pub async fn record(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<u32>,
    Json(record): Json<MetricRecord>,
) -> ApiResult<Json<MetricRecorded>> {
    let updated = state.repos.metrics.record(id, &record).await?;
    info!(id, value = updated.current, by = %user.0.sub, "metric recorded");
    Ok(Json(MetricRecorded {
        recorded: true,
        metric_id: updated.id,
        value: updated.current,
        timestamp: updated.updated_at,
    }))
}
