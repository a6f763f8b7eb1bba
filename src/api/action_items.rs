//! Action Item Endpoints

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::{ApiClient, ApiError, Transport};
use crate::models::{ActionItem, ActionItemList, ActionStatus};

/// List path with the server-side filters; both may be combined.
pub fn action_items_path(status: Option<&ActionStatus>, responsible_party: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(status) = status {
        params.push(format!("status={}", utf8_percent_encode(status.as_str(), NON_ALPHANUMERIC)));
    }
    if let Some(party) = responsible_party.filter(|p| !p.is_empty()) {
        params.push(format!("responsible_party={}", utf8_percent_encode(party, NON_ALPHANUMERIC)));
    }
    if params.is_empty() {
        "/api/action-items".to_string()
    } else {
        format!("/api/action-items?{}", params.join("&"))
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_action_items(
        &self,
        status: Option<&ActionStatus>,
        responsible_party: Option<&str>,
    ) -> Result<Vec<ActionItem>, ApiError> {
        let list: ActionItemList = self.get_json(&action_items_path(status, responsible_party)).await?;
        Ok(list.action_items)
    }
}
