//! Meeting endpoints

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::action_items::Deleted;
use crate::auth::AuthenticatedUser;
use crate::domain::{DomainError, Meeting, MeetingPatch, NewMeeting};
use crate::error::ApiResult;
use crate::repository::Repository;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MeetingQuery {
    pub meeting_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MeetingList {
    pub meetings: Vec<Meeting>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct MeetingCreated {
    pub id: u32,
    pub created: bool,
    pub meeting: Meeting,
}

#[derive(Debug, Serialize)]
pub struct MeetingUpdated {
    pub id: u32,
    pub updated: bool,
    pub meeting: Meeting,
}

fn not_found() -> DomainError {
    DomainError::NotFound("Meeting not found".to_string())
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<MeetingQuery>,
) -> ApiResult<Json<MeetingList>> {
    let meetings = match query.meeting_date.filter(|d| !d.is_empty()) {
        Some(date) => state.repos.meetings.list_by_date(&date).await?,
        None => state.repos.meetings.list().await?,
    };
    Ok(Json(MeetingList { total: meetings.len(), meetings }))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<u32>,
) -> ApiResult<Json<Meeting>> {
    let meeting = state.repos.meetings.find_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(meeting))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<NewMeeting>,
) -> ApiResult<Json<MeetingCreated>> {
    let created = state.repos.meetings.create(&body.into_meeting()?).await?;
    info!(id = created.id, by = %user.0.sub, "meeting created");
    Ok(Json(MeetingCreated { id: created.id, created: true, meeting: created }))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<u32>,
    Json(patch): Json<MeetingPatch>,
) -> ApiResult<Json<MeetingUpdated>> {
    let mut meeting = state.repos.meetings.find_by_id(id).await?.ok_or_else(not_found)?;
    meeting.apply(patch)?;
    let updated = state.repos.meetings.update(&meeting).await?;
    Ok(Json(MeetingUpdated { id: updated.id, updated: true, meeting: updated }))
}

pub async fn delete(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<u32>,
) -> ApiResult<Json<Deleted>> {
    state.repos.meetings.delete(id).await?;
    info!(id, by = %user.0.sub, "meeting deleted");
    Ok(Json(Deleted { id, deleted: true }))
}
