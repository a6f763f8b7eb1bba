//! Action item endpoints

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::domain::{ActionItem, ActionItemFilter, ActionItemPatch, DomainError, DomainResult, NewActionItem};
use crate::error::ApiResult;
use crate::repository::Repository;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ActionItemQuery {
    pub status: Option<String>,
    pub responsible_party: Option<String>,
    pub meeting_id: Option<u32>,
}

impl ActionItemQuery {
    /// Empty parameters count as unset; both text filters may be combined.
    pub fn into_filter(self) -> DomainResult<ActionItemFilter> {
        let status = match self.status.filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse()?),
            None => None,
        };
        Ok(ActionItemFilter {
            status,
            responsible_party: self.responsible_party.filter(|p| !p.is_empty()),
            meeting_id: self.meeting_id,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ActionItemList {
    pub action_items: Vec<ActionItem>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ActionItemCreated {
    pub id: u32,
    pub created: bool,
    pub action_item: ActionItem,
}

#[derive(Debug, Serialize)]
pub struct ActionItemUpdated {
    pub id: u32,
    pub updated: bool,
    pub action_item: ActionItem,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: u32,
    pub deleted: bool,
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ActionItemQuery>,
) -> ApiResult<Json<ActionItemList>> {
    let filter = query.into_filter()?;
    let action_items = state.repos.action_items.list_filtered(&filter).await?;
    Ok(Json(ActionItemList { total: action_items.len(), action_items }))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<u32>,
) -> ApiResult<Json<ActionItem>> {
    let item = state
        .repos
        .action_items
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound("Action item not found".to_string()))?;
    Ok(Json(item))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<NewActionItem>,
) -> ApiResult<Json<ActionItemCreated>> {
    let created = state.repos.action_items.create(&body.into_item()?).await?;
    info!(id = created.id, by = %user.0.sub, "action item created");
    Ok(Json(ActionItemCreated { id: created.id, created: true, action_item: created }))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<u32>,
    Json(patch): Json<ActionItemPatch>,
) -> ApiResult<Json<ActionItemUpdated>> {
    let mut item = state
        .repos
        .action_items
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound("Action item not found".to_string()))?;
    item.apply(patch)?;
    let updated = state.repos.action_items.update(&item).await?;
    Ok(Json(ActionItemUpdated { id: updated.id, updated: true, action_item: updated }))
}

pub async fn delete(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<u32>,
) -> ApiResult<Json<Deleted>> {
    state.repos.action_items.delete(id).await?;
    info!(id, by = %user.0.sub, "action item deleted");
    Ok(Json(Deleted { id, deleted: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActionStatus;

    #[test]
    fn test_query_combines_filters() {
        let filter = ActionItemQuery {
            status: Some("in_progress".into()),
            responsible_party: Some("Client".into()),
            meeting_id: None,
        }
        .into_filter()
        .unwrap();

        assert_eq!(filter.status, Some(ActionStatus::InProgress));
        assert_eq!(filter.responsible_party.as_deref(), Some("Client"));
    }

    #[test]
    fn test_query_ignores_empty_values() {
        let filter = ActionItemQuery { status: Some(String::new()), responsible_party: Some(String::new()), meeting_id: None }
            .into_filter()
            .unwrap();
        assert_eq!(filter, ActionItemFilter::default());
    }

    #[test]
    fn test_query_rejects_unknown_status() {
        let result = ActionItemQuery { status: Some("done".into()), ..Default::default() }.into_filter();
        assert!(result.is_err());
    }
}
