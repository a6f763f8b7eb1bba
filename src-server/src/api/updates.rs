//! Communication feed endpoints

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::domain::{reader_name, timestamp_now, DomainError, NewUpdate, Update, UpdateType};
use crate::error::ApiResult;
use crate::repository::Repository;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateQuery {
    pub type_filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AcknowledgeQuery {
    pub user_email: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateList {
    pub updates: Vec<Update>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct UpdateCreated {
    pub id: u32,
    pub created: bool,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct Acknowledged {
    pub update_id: u32,
    pub acknowledged: bool,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<UpdateQuery>,
) -> ApiResult<Json<UpdateList>> {
    let update_type = match query.type_filter.filter(|t| !t.is_empty()) {
        Some(raw) => Some(raw.parse::<UpdateType>()?),
        None => None,
    };
    let updates = state.repos.updates.list_by_type(update_type).await?;
    Ok(Json(UpdateList { total: updates.len(), updates }))
}

pub async fn create(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(body): Json<NewUpdate>,
) -> ApiResult<Json<UpdateCreated>> {
    let created = state.repos.updates.create(&body.into_update(timestamp_now())?).await?;
    info!(id = created.id, kind = created.update_type.as_str(), "update posted");
    Ok(Json(UpdateCreated { id: created.id, created: true, timestamp: created.created_at }))
}

pub async fn acknowledge(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<u32>,
    Query(query): Query<AcknowledgeQuery>,
) -> ApiResult<Json<Acknowledged>> {
    if query.user_email.trim().is_empty() {
        return Err(DomainError::InvalidInput("user_email is required".to_string()).into());
    }
    let (_, added) = state.repos.updates.acknowledge(id, &query.user_email).await?;
    Ok(Json(Acknowledged {
        update_id: id,
        acknowledged: true,
        user: reader_name(&query.user_email),
        message: (!added).then_some("Already acknowledged"),
    }))
}
