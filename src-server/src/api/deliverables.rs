//! Deliverable endpoints

use axum::extract::{Path, State};
use axum::response::Json;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::domain::{validate_phase, Deliverable, DeliverableProgress, DomainError, PHASES};
use crate::error::ApiResult;
use crate::repository::Repository;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PhaseDeliverables {
    pub month: u8,
    pub deliverables: Vec<Deliverable>,
}

#[derive(Debug, Serialize)]
pub struct DeliverableUpdated {
    pub id: u32,
    pub updated: bool,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// `{"month1": [...], ..., "month4": [...]}`
pub fn group_by_phase(deliverables: Vec<Deliverable>) -> BTreeMap<String, Vec<Deliverable>> {
    let mut grouped: BTreeMap<String, Vec<Deliverable>> =
        PHASES.map(|p| (format!("month{}", p), Vec::new())).collect();
    for deliverable in deliverables {
        if let Some(bucket) = grouped.get_mut(&format!("month{}", deliverable.phase_id)) {
            bucket.push(deliverable);
        }
    }
    grouped
}

pub async fn list_all(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> ApiResult<Json<BTreeMap<String, Vec<Deliverable>>>> {
    let deliverables = state.repos.deliverables.list().await?;
    Ok(Json(group_by_phase(deliverables)))
}

pub async fn list_by_phase(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(month): Path<i64>,
) -> ApiResult<Json<PhaseDeliverables>> {
    let phase = validate_phase(month)?;
    let deliverables = state.repos.deliverables.list_by_phase(phase).await?;
    Ok(Json(PhaseDeliverables { month: phase, deliverables }))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<u32>,
) -> ApiResult<Json<Deliverable>> {
    let deliverable = state
        .repos
        .deliverables
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound("Deliverable not found".to_string()))?;
    Ok(Json(deliverable))
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<u32>,
    Json(progress): Json<DeliverableProgress>,
) -> ApiResult<Json<DeliverableUpdated>> {
    let updated = state.repos.deliverables.update_progress(id, &progress).await?;
    info!(
        id,
        status = updated.status.as_str(),
        completion = updated.completion_percentage,
        blockers = progress.blockers.len(),
        by = %user.0.sub,
        "deliverable progress updated"
    );
    Ok(Json(DeliverableUpdated { id: updated.id, updated: true, updated_at: updated.updated_at }))
}
