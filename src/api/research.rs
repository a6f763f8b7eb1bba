//! Research Document Endpoint
//!
//! Served by the portal itself, so no bearer token is attached.

use super::{ApiClient, ApiError, HttpRequest, Transport};
use crate::models::ResearchDocument;

impl<T: Transport> ApiClient<T> {
    pub async fn research_document(&self, id: &str) -> Result<ResearchDocument, ApiError> {
        self.transport
            .send(HttpRequest::get(format!("/api/research/{}", id)))
            .await?
            .error_for_status()?
            .json()
    }
}
