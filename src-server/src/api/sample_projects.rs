//! Sample project endpoints

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::auth::AuthenticatedUser;
use crate::domain::{DeliveryMethod, DomainError, DomainResult, ProjectStats, SampleProject};
use crate::error::ApiResult;
use crate::repository::Repository;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SampleProjectQuery {
    pub delivery_method: Option<String>,
}

impl SampleProjectQuery {
    /// An empty parameter counts as unset.
    pub fn method(self) -> DomainResult<Option<DeliveryMethod>> {
        self.delivery_method.filter(|m| !m.is_empty()).map(|m| m.parse()).transpose()
    }
}

#[derive(Debug, Serialize)]
pub struct SampleProjectList {
    pub projects: Vec<SampleProject>,
    pub total: usize,
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<SampleProjectQuery>,
) -> ApiResult<Json<SampleProjectList>> {
    let projects = state.repos.sample_projects.list_by_method(query.method()?).await?;
    Ok(Json(SampleProjectList { total: projects.len(), projects }))
}

pub async fn stats(State(state): State<AppState>, _user: AuthenticatedUser) -> ApiResult<Json<ProjectStats>> {
    Ok(Json(state.repos.sample_projects.stats().await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<u32>,
) -> ApiResult<Json<SampleProject>> {
    let project = state
        .repos
        .sample_projects
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Project ID {} not found", id)))?;
    Ok(Json(project))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_method() {
        let query = SampleProjectQuery { delivery_method: Some("DESIGN_BUILD".into()) };
        assert_eq!(query.method().unwrap(), Some(DeliveryMethod::DesignBuild));

        assert_eq!(SampleProjectQuery { delivery_method: Some(String::new()) }.method().unwrap(), None);
        assert_eq!(SampleProjectQuery::default().method().unwrap(), None);
        assert!(SampleProjectQuery { delivery_method: Some("BID".into()) }.method().is_err());
    }
}
