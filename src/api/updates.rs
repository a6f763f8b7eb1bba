//! Communication Feed Endpoints

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::{ApiClient, ApiError, Method, RequestOptions, Transport};
use crate::models::{Acknowledged, NewUpdate, Update, UpdateCreated, UpdateList, UpdateType};

pub fn updates_path(type_filter: Option<&UpdateType>) -> String {
    match type_filter {
        Some(kind) => format!("/api/updates?type_filter={}", utf8_percent_encode(kind.as_str(), NON_ALPHANUMERIC)),
        None => "/api/updates".to_string(),
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_updates(&self, type_filter: Option<&UpdateType>) -> Result<Vec<Update>, ApiError> {
        let list: UpdateList = self.get_json(&updates_path(type_filter)).await?;
        Ok(list.updates)
    }

    pub async fn post_update(&self, update: &NewUpdate) -> Result<UpdateCreated, ApiError> {
        self.send_json(Method::Post, "/api/updates", update).await
    }

    pub async fn acknowledge_update(&self, id: u32, email: &str) -> Result<Acknowledged, ApiError> {
        let path = format!(
            "/api/updates/{}/acknowledge?user_email={}",
            id,
            utf8_percent_encode(email, NON_ALPHANUMERIC)
        );
        self.authenticated_fetch(&path, RequestOptions::method(Method::Post))
            .await?
            .error_for_status()?
            .json()
    }
}
